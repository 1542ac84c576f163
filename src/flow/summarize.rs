//! Summarize flow: extract, gate, summarize.

use std::sync::Arc;

use tracing::info;

use super::{Progress, NOT_ENOUGH_CONTENT, SUMMARIZING_MESSAGE};
use crate::extract::{Extractor, InputSource};
use crate::summarize::SummarizationClient;

/// Where a summarize interaction stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizeState {
    Idle,
    Extracting,
    Summarizing,
    /// Summary sentences, or a single failure message.
    Done(Vec<String>),
    Warned(&'static str),
}

pub struct SummarizeFlow {
    extractor: Arc<Extractor>,
    summarizer: Arc<SummarizationClient>,
    state: SummarizeState,
}

impl SummarizeFlow {
    pub fn new(extractor: Arc<Extractor>, summarizer: Arc<SummarizationClient>) -> Self {
        Self {
            extractor,
            summarizer,
            state: SummarizeState::Idle,
        }
    }

    pub fn state(&self) -> &SummarizeState {
        &self.state
    }

    /// Run one interaction for `source`.
    ///
    /// Documents of 100 characters or fewer never reach the summarizer.
    pub async fn run(&mut self, source: &InputSource, progress: &dyn Progress) -> &SummarizeState {
        self.state = SummarizeState::Extracting;
        progress.begin(source.extracting_message());
        let document = self.extractor.extract(source).await;
        progress.end();

        if !document.has_enough_content() {
            info!(
                "Only {} characters extracted, not summarizing",
                document.char_count()
            );
            self.state = SummarizeState::Warned(NOT_ENOUGH_CONTENT);
            return &self.state;
        }

        self.state = SummarizeState::Summarizing;
        progress.begin(SUMMARIZING_MESSAGE);
        let sentences = self.summarizer.summarize(document.text()).await;
        progress.end();

        self.state = SummarizeState::Done(sentences);
        &self.state
    }
}
