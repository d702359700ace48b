//! switchyard CLI binary: run one of the conversation agents or a writing task.
//!
//! Subcommands: `echo`, `chat`, `direct`, `simple`, `plan` (one turn), `agent`
//! (REPL with function calling) and `task` (content / email / research).

mod logging;
mod repl;

use std::io::Write;

use clap::{Parser, Subcommand};
use cli::{run_task, AgentKind, RunError, RunOptions, Session, TaskArgs};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "switchyard")]
#[command(about = "Switchyard: routed conversation agents from the command line", version)]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Model name (overrides OPENAI_MODEL)
    #[arg(long, global = true, value_name = "NAME")]
    model: Option<String>,

    /// Sampling temperature 0..=2 (overrides OPENAI_TEMPERATURE)
    #[arg(long, global = true, value_name = "T", value_parser = parse_temperature_arg)]
    temperature: Option<f32>,

    /// Verbose: print node enter/exit on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Abort a run after this many steps (default: unbounded)
    #[arg(long, global = true, value_name = "N")]
    max_steps: Option<u32>,

    /// Answer every model call with TEXT instead of calling OpenAI
    #[arg(long, global = true, value_name = "TEXT", env = "SWITCHYARD_MOCK_REPLY")]
    mock: Option<String>,
}

fn parse_temperature_arg(s: &str) -> Result<f32, String> {
    switchyard::parse_temperature(s).map_err(|e| e.to_string())
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Echo the input back (no model)
    Echo(MessageArgs),
    /// One model call over the message
    Chat(MessageArgs),
    /// One model call with the content-writer prompt
    Direct(MessageArgs),
    /// user → call_model, no functions
    Simple(MessageArgs),
    /// Plan first, then answer by following the plan
    Plan(MessageArgs),
    /// Function-calling agent (search_web, calculator); interactive unless -m is given
    Agent(MessageArgs),
    /// Writing task: 1 content, 2 email, 3 research
    Task(TaskCmd),
}

#[derive(clap::Args, Debug, Clone)]
struct MessageArgs {
    /// User message; read from stdin when omitted
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
struct TaskCmd {
    /// 1|2|3 or content|email|research
    #[arg(long)]
    task: String,
    #[arg(long)]
    topic: Option<String>,
    /// Content type for task 1 (default: LinkedIn post)
    #[arg(long)]
    content_type: Option<String>,
    /// Email type for task 2 (default: intake)
    #[arg(long)]
    email_type: Option<String>,
    /// Details for task 2
    #[arg(long)]
    details: Option<String>,
}

impl Args {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            verbose: self.verbose,
            max_steps: self.max_steps,
            mock_reply: self.mock.clone(),
        }
    }
}

/// Prompts once on stdout and reads one line from stdin.
async fn read_message() -> Result<String, RunError> {
    print!("You: ");
    std::io::stdout().flush()?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    Ok(lines.next_line().await?.unwrap_or_default())
}

async fn run_single(kind: AgentKind, message: Option<String>, opts: &RunOptions) -> Result<(), RunError> {
    let session = Session::new(kind, opts)?;
    let message = match message {
        Some(m) => m,
        None => read_message().await?,
    };
    let replies = session.turn(message.trim()).await?;
    repl::print_replies(&mut std::io::stdout(), &replies)?;
    Ok(())
}

async fn run(args: Args) -> Result<(), RunError> {
    let opts = args.run_options();
    match args.cmd {
        Command::Echo(m) => run_single(AgentKind::Echo, m.message, &opts).await,
        Command::Chat(m) => run_single(AgentKind::Chat, m.message, &opts).await,
        Command::Direct(m) => run_single(AgentKind::Direct, m.message, &opts).await,
        Command::Simple(m) => run_single(AgentKind::Simple, m.message, &opts).await,
        Command::Plan(m) => run_single(AgentKind::Plan, m.message, &opts).await,
        Command::Agent(MessageArgs { message: Some(m) }) => {
            run_single(AgentKind::Agent, Some(m), &opts).await
        }
        Command::Agent(MessageArgs { message: None }) => {
            let session = Session::new(AgentKind::Agent, &opts)?;
            let stdin = BufReader::new(tokio::io::stdin());
            repl::run_repl_loop(&session, stdin, &mut std::io::stdout()).await?;
            Ok(())
        }
        Command::Task(t) => {
            let task_args = TaskArgs {
                task: t.task,
                topic: t.topic,
                content_type: t.content_type,
                email_type: t.email_type,
                details: t.details,
            };
            let reply = run_task(&task_args, &opts).await?;
            println!("{}", reply);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let loaded = config::load_and_apply("switchyard", None);
    if let Err(e) = logging::init() {
        eprintln!("switchyard: cannot open LOG_FILE: {}", e);
    }
    if let Err(e) = loaded {
        tracing::warn!(error = %e, "config not loaded");
    }

    let args = Args::parse();
    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "run failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_parse_after_subcommand() {
        let args = Args::try_parse_from([
            "switchyard",
            "agent",
            "-m",
            "2+2?",
            "--model",
            "gpt-4o",
            "--temperature",
            "0.2",
            "--max-steps",
            "12",
            "-v",
        ])
        .unwrap();
        let opts = args.run_options();
        assert_eq!(opts.model.as_deref(), Some("gpt-4o"));
        assert_eq!(opts.temperature, Some(0.2));
        assert_eq!(opts.max_steps, Some(12));
        assert!(opts.verbose);
        assert!(matches!(args.cmd, Command::Agent(MessageArgs { message: Some(ref m) }) if m == "2+2?"));
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let err = Args::try_parse_from(["switchyard", "chat", "--temperature", "3"]).unwrap_err();
        assert!(err.to_string().contains("between 0 and 2"), "{}", err);
    }

    #[test]
    fn task_requires_task_flag() {
        assert!(Args::try_parse_from(["switchyard", "task", "--topic", "x"]).is_err());
        let args =
            Args::try_parse_from(["switchyard", "task", "--task", "3", "--topic", "ADHD"]).unwrap();
        assert!(matches!(args.cmd, Command::Task(ref t) if t.task == "3"));
    }
}
