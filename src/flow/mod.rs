//! Interactive summarize and question-answering flows.
//!
//! A flow owns one user interaction from source selection to result. Busy
//! phases are reported to a [`Progress`] sink so the CLI can show spinners
//! while the web UI ignores them.

mod qa;
mod summarize;

pub use qa::{QaFlow, QaState};
pub use summarize::{SummarizeFlow, SummarizeState};

/// Warning shown when a summarize source yields too little text.
pub const NOT_ENOUGH_CONTENT: &str = "Couldn't extract enough content.";

/// Warning shown when a Q&A source yields some, but too little, text.
pub const CONTENT_TOO_SHORT: &str = "Extracted content is too short.";

pub const SUMMARIZING_MESSAGE: &str = "Summarizing...";
pub const ANSWERING_MESSAGE: &str = "Getting answer from OpenAI...";

/// Receives busy-phase notifications.
pub trait Progress: Send + Sync {
    /// A phase with the given message started.
    fn begin(&self, message: &str);
    /// The current phase finished.
    fn end(&self);
}

/// Progress sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn begin(&self, _message: &str) {}
    fn end(&self) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::Progress;

    /// Records the messages of every phase begun.
    #[derive(Default)]
    pub struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl RecordingProgress {
        pub fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Progress for RecordingProgress {
        fn begin(&self, message: &str) {
            self.events.lock().unwrap().push(message.to_string());
        }

        fn end(&self) {
            self.events.lock().unwrap().push("done".to_string());
        }
    }
}
