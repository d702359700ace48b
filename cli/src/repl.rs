//! Interactive loop for `agent`: read a line, run one turn, print every reply, repeat.
//!
//! Opens with a banner and ends on EOF or `exit` (any case) with `Goodbye!`. A
//! failed turn prints `Error: <e>` and the loop reads the next line.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use cli::Session;

const RULE: &str = "======================================";
const SEPARATOR: &str = "--------------------------------------";

fn print_banner<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "Switchyard agent with function calling")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Type 'exit' to quit the chat")?;
    writeln!(out)
}

pub fn is_quit_command(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("exit")
}

/// Prints each reply as `AI: <reply>`.
pub fn print_replies<W: Write>(out: &mut W, replies: &[String]) -> std::io::Result<()> {
    for reply in replies {
        writeln!(out, "AI: {}", reply)?;
    }
    Ok(())
}

pub async fn run_repl_loop<R, W>(session: &Session, reader: R, out: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    print_banner(out)?;
    let mut lines = reader.lines();
    loop {
        write!(out, "You: ")?;
        out.flush()?;

        let line = match lines.next_line().await? {
            None => break,
            Some(s) if is_quit_command(&s) => break,
            Some(s) if s.trim().is_empty() => continue,
            Some(s) => s,
        };

        match session.turn(line.trim()).await {
            Ok(replies) => print_replies(out, &replies)?,
            Err(e) => {
                tracing::warn!(error = %e, "turn failed");
                writeln!(out, "Error: {}", e)?;
            }
        }
        writeln!(out, "\n{SEPARATOR}\n")?;
    }
    writeln!(out, "Goodbye!")?;
    Ok(())
}
