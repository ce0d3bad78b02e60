use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::strategy::dispatcher::dispatch;
use crate::strategy::session::{StrategySession, StrategyStatus, SubmitError};

#[derive(Debug, Deserialize)]
pub struct StrategyRequestBody {
    /// The visitor's free-text business problem, sent raw (untrimmed).
    pub problem: String,
}

#[derive(Debug, Serialize)]
pub struct StrategyResponseBody {
    pub status: StrategyStatus,
    /// Markdown recommendation, or fixed fallback copy when the service
    /// produced nothing usable or was unreachable.
    pub strategy: String,
}

/// POST /api/v1/strategy
///
/// Drives one full modal session per request: capture input, submit (the
/// state machine enforces the non-empty precondition), dispatch the single
/// outbound call, apply the outcome. Both terminal outcomes answer 200 —
/// a generation failure is contained and presented, never propagated as an
/// HTTP error.
pub async fn handle_generate_strategy(
    State(state): State<AppState>,
    Json(req): Json<StrategyRequestBody>,
) -> Result<Json<StrategyResponseBody>, AppError> {
    let mut session = StrategySession::new();
    session.set_input(&req.problem);

    let ticket = session.submit().map_err(|e| match e {
        SubmitError::EmptyInput => {
            AppError::Validation("problem must not be empty".to_string())
        }
        SubmitError::AlreadyInFlight => AppError::Conflict(e.to_string()),
        SubmitError::Closed => AppError::Conflict(e.to_string()),
    })?;

    let outcome = dispatch(state.generator.as_ref(), &req.problem).await;
    session.apply(ticket, outcome);

    Ok(Json(StrategyResponseBody {
        status: session.status(),
        strategy: session.result_text().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::config::Config;
    use crate::llm_client::LlmError;
    use crate::strategy::dispatcher::StrategyGenerator;
    use crate::strategy::session::{CONNECTION_ERROR_FALLBACK, EMPTY_STRATEGY_FALLBACK};

    struct StubGenerator(fn() -> Result<Option<String>, LlmError>);

    #[async_trait]
    impl StrategyGenerator for StubGenerator {
        async fn generate(&self, _prompt: &str) -> Result<Option<String>, LlmError> {
            (self.0)()
        }
    }

    fn test_state(result: fn() -> Result<Option<String>, LlmError>) -> AppState {
        AppState {
            generator: Arc::new(StubGenerator(result)),
            config: Config {
                gemini_api_key: "test-key".to_string(),
                gemini_api_url: "http://127.0.0.1:0".to_string(),
                static_dir: "static".to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    fn body(problem: &str) -> Json<StrategyRequestBody> {
        Json(StrategyRequestBody {
            problem: problem.to_string(),
        })
    }

    #[tokio::test]
    async fn test_successful_generation_returns_succeeded_and_text() {
        let state = test_state(|| Ok(Some("**Use n8n** for the intake flow.".to_string())));
        let Json(response) = handle_generate_strategy(State(state), body("automate lead emails"))
            .await
            .unwrap();
        assert_eq!(response.status, StrategyStatus::Succeeded);
        assert_eq!(response.strategy, "**Use n8n** for the intake flow.");
    }

    #[tokio::test]
    async fn test_empty_response_returns_succeeded_with_apology() {
        let state = test_state(|| Ok(None));
        let Json(response) = handle_generate_strategy(State(state), body("automate lead emails"))
            .await
            .unwrap();
        assert_eq!(response.status, StrategyStatus::Succeeded);
        assert_eq!(response.strategy, EMPTY_STRATEGY_FALLBACK);
    }

    #[tokio::test]
    async fn test_transport_failure_returns_failed_with_fallback() {
        let state = test_state(|| {
            Err(LlmError::Api {
                status: 500,
                message: "boom".to_string(),
            })
        });
        let Json(response) = handle_generate_strategy(State(state), body("automate lead emails"))
            .await
            .unwrap();
        assert_eq!(response.status, StrategyStatus::Failed);
        assert_eq!(response.strategy, CONNECTION_ERROR_FALLBACK);
    }

    #[tokio::test]
    async fn test_whitespace_only_problem_is_rejected_without_dispatch() {
        let state = test_state(|| panic!("generator must not be called for blank input"));
        let result = handle_generate_strategy(State(state), body("   \n  ")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&StrategyStatus::Succeeded).unwrap();
        assert_eq!(json, "\"succeeded\"");
    }
}
