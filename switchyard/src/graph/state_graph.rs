//! Graph builder: named nodes wired by fixed edges or by routers.
//!
//! `add_edge(from, to)` wires a fixed successor (`START` marks the entry, `END`
//! the exit). `add_conditional_edges(source, router, path_map)` lets a function
//! of the state choose the successor instead; a node gets one or the other.
//! `compile` checks the wiring and returns a runnable `CompiledStateGraph`.
//!
//! The routed conversation agents give every node a router; the single-node
//! pipelines use plain `START → node → END` edges.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;

/// Entry marker for `add_edge(START, first)`.
pub const START: &str = "__start__";

/// Exit marker; also what a router returns to finish a run.
pub const END: &str = "__end__";

/// Uncompiled graph over state type `S`.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Fixed edges, in the order they were added.
    edges: Vec<(String, String)>,
    routers: HashMap<String, ConditionalRouter<S>>,
    middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    /// Upper bound on node runs per invoke; `None` never stops a run.
    max_steps: Option<u32>,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            routers: HashMap::new(),
            middleware: None,
            max_steps: None,
        }
    }

    /// Wraps every node run in `middleware` once compiled.
    pub fn with_middleware(mut self, middleware: Arc<dyn NodeMiddleware<S>>) -> Self {
        self.middleware = Some(middleware);
        self
    }

    /// Caps node runs per invoke. `None` (the default) never stops a run.
    pub fn with_max_steps(mut self, max_steps: Option<u32>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Registers `node` under `id`; a second registration replaces the first.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Fixed successor: after `from_id` runs, `to_id` runs (`START` / `END` allowed).
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// Routed successor: after `source` runs, `path(state)` names the next node,
    /// looked up in `path_map` first when one is given.
    ///
    /// ```rust,ignore
    /// graph.add_conditional_edges(
    ///     "call_model",
    ///     Arc::new(|s: &ConversationState| route(s).as_str().to_string()),
    ///     None,
    /// );
    /// ```
    pub fn add_conditional_edges(
        &mut self,
        source: impl Into<String>,
        path: ConditionalRouterFn<S>,
        path_map: Option<HashMap<String, String>>,
    ) -> &mut Self {
        self.routers
            .insert(source.into(), ConditionalRouter::new(path, path_map));
        self
    }

    fn is_known(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Every id an edge or router mentions must be registered.
    fn check_ids(&self) -> Result<(), CompilationError> {
        let endpoints = self.edges.iter().flat_map(|(from, to)| {
            [(from, from.as_str() == START), (to, to.as_str() == END)]
        });
        for (id, is_marker) in endpoints {
            if !is_marker && !self.is_known(id) {
                return Err(CompilationError::NodeNotFound(id.clone()));
            }
        }
        for (source, router) in &self.routers {
            if !self.is_known(source) {
                return Err(CompilationError::NodeNotFound(source.clone()));
            }
            let targets = router.path_map.iter().flat_map(|m| m.values());
            for target in targets {
                if target != END && !self.is_known(target) {
                    return Err(CompilationError::InvalidConditionalPathMap(target.clone()));
                }
            }
        }
        Ok(())
    }

    /// The single node `START` points at.
    fn entry(&self) -> Result<String, CompilationError> {
        let mut entries = self.edges.iter().filter(|(from, _)| from == START);
        let (_, first) = entries.next().ok_or(CompilationError::MissingStart)?;
        if entries.next().is_some() {
            return Err(CompilationError::InvalidChain(
                "more than one edge leaves START".into(),
            ));
        }
        Ok(first.clone())
    }

    /// END is reachable when an edge targets it or some router may return it.
    /// A router without a path map may return anything, END included.
    fn reaches_end(&self) -> bool {
        self.edges.iter().any(|(_, to)| to == END)
            || self.routers.values().any(|router| match &router.path_map {
                None => true,
                Some(map) => map.values().any(|target| target == END),
            })
    }

    /// Successor table: one fixed edge or one router per node.
    fn successors(&self) -> Result<HashMap<String, NextEntry<S>>, CompilationError> {
        let mut table: HashMap<String, NextEntry<S>> = HashMap::new();
        for (from, to) in self.edges.iter().filter(|(from, _)| from != START) {
            if self.routers.contains_key(from) {
                return Err(CompilationError::NodeHasBothEdgeAndConditional(from.clone()));
            }
            if table
                .insert(from.clone(), NextEntry::Unconditional(to.clone()))
                .is_some()
            {
                return Err(CompilationError::InvalidChain(format!(
                    "node {} has more than one outgoing edge",
                    from
                )));
            }
        }
        for (source, router) in &self.routers {
            table.insert(source.clone(), NextEntry::Conditional(router.clone()));
        }
        Ok(table)
    }

    /// Checks and freezes the graph.
    ///
    /// A graph with only fixed edges must form one chain from the entry to END
    /// without revisiting a node; routed graphs may loop.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.check_ids()?;
        let first = self.entry()?;
        if !self.reaches_end() {
            return Err(CompilationError::MissingEnd);
        }
        let next_map = self.successors()?;

        if self.routers.is_empty() {
            let mut seen = HashSet::new();
            let mut current = first.as_str();
            loop {
                if !seen.insert(current) {
                    return Err(CompilationError::InvalidChain("cycle detected".into()));
                }
                match next_map.get(current) {
                    Some(NextEntry::Unconditional(next)) if next != END => current = next.as_str(),
                    _ => break,
                }
            }
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            first_node_id: first,
            next_map,
            middleware: self.middleware,
            max_steps: self.max_steps,
        })
    }
}
