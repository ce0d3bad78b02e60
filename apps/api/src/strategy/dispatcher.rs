//! Request Dispatcher — builds the prompt and issues exactly one outbound
//! call, collapsing the transport result into a `StrategyOutcome`.
//!
//! `AppState` holds an `Arc<dyn StrategyGenerator>` so the HTTP handler and
//! tests never depend on the concrete Gemini client.

use async_trait::async_trait;
use tracing::{error, warn};

use crate::llm_client::prompts::strategy_prompt;
use crate::llm_client::{GeminiClient, LlmError};

/// The generative backend seam. Implement this to swap backends without
/// touching the handler or the session state machine.
#[async_trait]
pub trait StrategyGenerator: Send + Sync {
    /// Returns `Ok(Some(text))` for usable generated text, `Ok(None)` for a
    /// well-formed response with no usable content, `Err` on transport or
    /// API failure.
    async fn generate(&self, prompt: &str) -> Result<Option<String>, LlmError>;
}

#[async_trait]
impl StrategyGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, LlmError> {
        GeminiClient::generate(self, prompt).await
    }
}

/// How a single strategy request resolved.
///
/// `Degraded` covers the content-model edge case: the API answered, but the
/// expected text field is absent or empty. The dispatcher cannot distinguish
/// "returned nothing" from "blocked/filtered the prompt", so both collapse
/// here and the presenter shows the fixed apology text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyOutcome {
    Success(String),
    Degraded,
    Failure,
}

/// Issues exactly one generation call for `problem` and classifies the result.
///
/// Technical failure detail is logged here and never surfaced to the caller:
/// the user-facing text for `Degraded` and `Failure` is fixed fallback copy
/// chosen by the session.
pub async fn dispatch(generator: &dyn StrategyGenerator, problem: &str) -> StrategyOutcome {
    let prompt = strategy_prompt(problem);

    match generator.generate(&prompt).await {
        Ok(Some(text)) => StrategyOutcome::Success(text),
        Ok(None) => {
            warn!("strategy generation returned no usable content");
            StrategyOutcome::Degraded
        }
        Err(e) => {
            error!("strategy generation failed: {e}");
            StrategyOutcome::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Stub generator that records the prompt it was handed and returns a
    /// canned result.
    struct StubGenerator {
        result: fn() -> Result<Option<String>, LlmError>,
        seen_prompt: Mutex<Option<String>>,
    }

    impl StubGenerator {
        fn new(result: fn() -> Result<Option<String>, LlmError>) -> Self {
            Self {
                result,
                seen_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl StrategyGenerator for StubGenerator {
        async fn generate(&self, prompt: &str) -> Result<Option<String>, LlmError> {
            *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
            (self.result)()
        }
    }

    #[tokio::test]
    async fn test_generated_text_maps_to_success() {
        let stub = StubGenerator::new(|| Ok(Some("**Use n8n**".to_string())));
        let outcome = dispatch(&stub, "automate my inbox").await;
        assert_eq!(outcome, StrategyOutcome::Success("**Use n8n**".to_string()));
    }

    #[tokio::test]
    async fn test_missing_content_maps_to_degraded() {
        let stub = StubGenerator::new(|| Ok(None));
        let outcome = dispatch(&stub, "automate my inbox").await;
        assert_eq!(outcome, StrategyOutcome::Degraded);
    }

    #[tokio::test]
    async fn test_transport_error_maps_to_failure() {
        let stub = StubGenerator::new(|| {
            Err(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            })
        });
        let outcome = dispatch(&stub, "automate my inbox").await;
        assert_eq!(outcome, StrategyOutcome::Failure);
    }

    #[tokio::test]
    async fn test_prompt_carries_raw_untrimmed_input() {
        let stub = StubGenerator::new(|| Ok(None));
        dispatch(&stub, "  padded input  ").await;
        let prompt = stub.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("\"  padded input  \""));
    }
}
