//! Ask command.

use std::io::Write;

use console::style;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;

use crate::cli::icons::warn;
use crate::cli::progress::SpinnerProgress;
use crate::context::AppContext;
use crate::extract::InputSource;
use crate::flow::{QaFlow, QaState};

/// Load a source, then answer the given questions or prompt for them.
pub async fn cmd_ask(
    ctx: &AppContext,
    source: InputSource,
    questions: Vec<String>,
) -> anyhow::Result<()> {
    let progress = SpinnerProgress::new();
    let mut flow = ctx.qa_flow();

    match flow.load(&source, &progress).await {
        QaState::Ready => {}
        QaState::Warned(message) => {
            println!("{} {}", warn(), message);
            return Ok(());
        }
        _ => {
            info!("No text extracted, nothing to ask about");
            return Ok(());
        }
    }

    if questions.is_empty() {
        let stdin = BufReader::new(tokio::io::stdin());
        interactive(&mut flow, stdin, &progress).await
    } else {
        for question in &questions {
            if let Some(answer) = flow.ask(question, &progress).await {
                print_answer(question, answer);
            }
        }
        Ok(())
    }
}

/// Answer questions read line by line until EOF, `exit` or `quit`.
async fn interactive<R>(
    flow: &mut QaFlow,
    input: R,
    progress: &SpinnerProgress,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        print!("{} ", style("Question:").bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        if is_exit(&line) {
            break;
        }
        if let Some(answer) = flow.ask(&line, progress).await {
            println!("{} {}", style("Answer:").bold(), answer);
        }
    }
    Ok(())
}

fn is_exit(line: &str) -> bool {
    matches!(line.trim(), "exit" | "quit")
}

fn print_answer(question: &str, answer: &str) {
    println!("{} {}", style("Question:").bold(), question);
    println!("{} {}", style("Answer:").bold(), answer);
}
