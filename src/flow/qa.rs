//! Question-answering flow: extract once, then answer questions about it.

use std::sync::Arc;

use tracing::info;

use super::{Progress, ANSWERING_MESSAGE, CONTENT_TOO_SHORT};
use crate::extract::{Document, Extractor, InputSource};
use crate::qa::QaClient;

/// Where a Q&A interaction stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QaState {
    Idle,
    Extracting,
    Warned(&'static str),
    /// A document is loaded and questions may be asked.
    Ready,
    Querying,
    Answered { question: String, answer: String },
}

pub struct QaFlow {
    extractor: Arc<Extractor>,
    qa: Arc<QaClient>,
    document: Option<Document>,
    state: QaState,
}

impl QaFlow {
    pub fn new(extractor: Arc<Extractor>, qa: Arc<QaClient>) -> Self {
        Self {
            extractor,
            qa,
            document: None,
            state: QaState::Idle,
        }
    }

    pub fn state(&self) -> &QaState {
        &self.state
    }

    /// Loaded document, once one has passed the length gate.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Whether questions will be answered.
    pub fn is_ready(&self) -> bool {
        self.document.is_some()
    }

    /// Extract `source` and keep it as the context for later questions.
    ///
    /// Empty text leaves the flow idle without a warning.
    pub async fn load(&mut self, source: &InputSource, progress: &dyn Progress) -> &QaState {
        self.document = None;
        self.state = QaState::Extracting;
        progress.begin(source.extracting_message());
        let document = self.extractor.extract(source).await;
        progress.end();

        self.state = if document.has_enough_content() {
            info!("Loaded {} characters of context", document.char_count());
            self.document = Some(document);
            QaState::Ready
        } else if document.is_empty() {
            QaState::Idle
        } else {
            info!("Only {} characters extracted", document.char_count());
            QaState::Warned(CONTENT_TOO_SHORT)
        };
        &self.state
    }

    /// Answer one question about the loaded document.
    ///
    /// Returns `None` without calling the service when the question is
    /// empty or no document is loaded.
    pub async fn ask(&mut self, question: &str, progress: &dyn Progress) -> Option<&str> {
        if question.is_empty() {
            return None;
        }
        let document = self.document.as_ref()?;

        self.state = QaState::Querying;
        progress.begin(ANSWERING_MESSAGE);
        let answer = self.qa.answer(question, document.text()).await;
        progress.end();

        self.state = QaState::Answered {
            question: question.to_string(),
            answer,
        };
        match &self.state {
            QaState::Answered { answer, .. } => Some(answer.as_str()),
            _ => None,
        }
    }
}
