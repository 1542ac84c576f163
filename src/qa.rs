//! Question answering over extracted text.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::ServiceError;
use crate::llm::{ChatMessage, ChatRequest, ChatService, LlmConfig};

/// Instruction line at the top of every prompt.
pub const QA_INSTRUCTION: &str =
    "You are a helpful assistant. Answer the following question based on the given context.";

/// Prefix of the answer returned when the service call fails.
pub const ERROR_PREFIX: &str = "❌ OpenAI Error: ";

/// Build the single-turn prompt embedding the full context and the question.
pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "{}\n\nContext:\n{}\n\nQuestion: {}\nAnswer:",
        QA_INSTRUCTION, context, question
    )
}

/// Answers questions about a context with one completion per question.
pub struct QaClient {
    service: Arc<dyn ChatService>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl QaClient {
    pub fn new(service: Arc<dyn ChatService>, config: &LlmConfig) -> Self {
        Self {
            service,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Request sent for a question. The context is not truncated.
    pub fn request(&self, question: &str, context: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(build_prompt(question, context))],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    pub async fn try_answer(&self, question: &str, context: &str) -> Result<String, ServiceError> {
        debug!(
            "Answering question ({} chars of context)",
            context.chars().count()
        );
        let content = self
            .service
            .complete(&self.request(question, context))
            .await?;
        Ok(content.trim().to_string())
    }

    /// Like [`Self::try_answer`], with a failure returned as the answer text.
    pub async fn answer(&self, question: &str, context: &str) -> String {
        match self.try_answer(question, context).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Question answering failed: {}", e);
                format!("{}{}", ERROR_PREFIX, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubChat;

    #[test]
    fn test_prompt_layout() {
        assert_eq!(
            build_prompt("What is the capital?", "France is a country."),
            "You are a helpful assistant. Answer the following question based on the given context.\n\
             \n\
             Context:\n\
             France is a country.\n\
             \n\
             Question: What is the capital?\n\
             Answer:"
        );
    }

    #[tokio::test]
    async fn test_answer_is_trimmed() {
        let chat = Arc::new(StubChat::replying("  Paris\n"));
        let qa = QaClient::new(chat.clone(), &LlmConfig::default());

        let answer = qa.answer("What is the capital of France?", "Some context").await;
        assert_eq!(answer, "Paris");
    }

    #[tokio::test]
    async fn test_request_parameters() {
        let chat = Arc::new(StubChat::replying("Paris"));
        let qa = QaClient::new(chat.clone(), &LlmConfig::default());

        qa.answer("Q?", "C").await;

        let requests = chat.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.model, "gpt-3.5-turbo");
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(request.max_tokens, 500);
        assert_eq!(request.messages, vec![ChatMessage::user(build_prompt("Q?", "C"))]);
    }

    #[tokio::test]
    async fn test_failure_becomes_answer_text() {
        let chat = Arc::new(StubChat::failing(ServiceError::Api {
            status: 400,
            message: "maximum context length is 4097 tokens".to_string(),
        }));
        let qa = QaClient::new(chat, &LlmConfig::default());

        let answer = qa.answer("Q?", "C").await;
        assert_eq!(
            answer,
            "❌ OpenAI Error: API error (400): maximum context length is 4097 tokens"
        );
    }

    #[tokio::test]
    async fn test_large_context_sent_whole() {
        let chat = Arc::new(StubChat::replying("ok"));
        let qa = QaClient::new(chat.clone(), &LlmConfig::default());
        let context = "w".repeat(200_000);

        qa.answer("Q?", &context).await;

        assert!(chat.requests()[0].messages[0].content.contains(&context));
    }
}
