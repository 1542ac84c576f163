//! Summarize command.

use console::style;

use crate::cli::icons::warn;
use crate::cli::progress::SpinnerProgress;
use crate::context::AppContext;
use crate::extract::InputSource;
use crate::flow::SummarizeState;

/// Summarize a source and print one bullet per sentence.
pub async fn cmd_summarize(ctx: &AppContext, source: InputSource) -> anyhow::Result<()> {
    let progress = SpinnerProgress::new();
    let mut flow = ctx.summarize_flow();

    match flow.run(&source, &progress).await {
        SummarizeState::Done(sentences) => {
            println!("{}", style("Summary:").bold());
            for line in summary_lines(sentences) {
                println!("{}", line);
            }
        }
        SummarizeState::Warned(message) => println!("{} {}", warn(), message),
        _ => {}
    }
    Ok(())
}

fn summary_lines(sentences: &[String]) -> Vec<String> {
    sentences.iter().map(|s| format!("→ {}", s)).collect()
}
