//! Modal session state machine.
//!
//! One `StrategySession` models one open modal: the captured input text, the
//! request status, and the presented result. It is owned by exactly one
//! caller and never shared, so transitions are plain `&mut` methods.
//!
//! ```text
//! Idle --submit(valid)--> InFlight
//! InFlight --apply(Success)--> Succeeded
//! InFlight --apply(Degraded)--> Succeeded (fallback text)
//! InFlight --apply(Failure)--> Failed (fallback text)
//! Succeeded/Failed --reset--> Idle
//! any --close--> closed (entity discarded; late outcomes dropped)
//! ```
//!
//! The guards the UI alone cannot provide live here: `submit` rejects a
//! second request while one is in flight, and `apply` drops any outcome whose
//! ticket no longer matches the session's generation (late response after
//! `reset` or `close`).

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::dispatcher::StrategyOutcome;

/// Shown when the API answered but produced no usable content.
pub const EMPTY_STRATEGY_FALLBACK: &str =
    "I apologize, but I couldn't generate a strategy at this moment. Please try again.";

/// Shown when the outbound call failed outright.
pub const CONNECTION_ERROR_FALLBACK: &str =
    "An error occurred while connecting to the AI service. Please check your connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyStatus {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("input is empty")]
    EmptyInput,

    #[error("a request is already in flight")]
    AlreadyInFlight,

    #[error("session is closed")]
    Closed,
}

/// Proof of a successful `submit`, consumed by `apply`. Carries the
/// generation the request was issued under; `reset` and `close` advance the
/// generation, which is what makes outstanding tickets stale.
#[derive(Debug, PartialEq, Eq)]
pub struct SubmitTicket {
    generation: u64,
}

/// What the modal should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// The input form. `submit_enabled` is false while a request is in
    /// flight or the trimmed input is empty; `in_flight` drives the
    /// progress indicator.
    Input {
        submit_enabled: bool,
        in_flight: bool,
    },
    /// The rendered recommendation (or fallback copy), with reset and close
    /// affordances.
    Result { markdown: String },
}

#[derive(Debug)]
pub struct StrategySession {
    input_text: String,
    status: StrategyStatus,
    result_text: String,
    error_text: String,
    generation: u64,
    closed: bool,
}

impl StrategySession {
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            status: StrategyStatus::Idle,
            result_text: String::new(),
            error_text: String::new(),
            generation: 0,
            closed: false,
        }
    }

    pub fn status(&self) -> StrategyStatus {
        self.status
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn result_text(&self) -> &str {
        &self.result_text
    }

    pub fn error_text(&self) -> &str {
        &self.error_text
    }

    /// Captures the raw input text. The value is stored untrimmed; trimming
    /// only applies to the emptiness check at submit time.
    pub fn set_input(&mut self, text: &str) {
        if self.closed {
            return;
        }
        self.input_text = text.to_string();
    }

    /// Starts a request. On success the session is `InFlight`, prior
    /// result/error text is cleared, and the returned ticket must be handed
    /// back to `apply` with the eventual outcome.
    pub fn submit(&mut self) -> Result<SubmitTicket, SubmitError> {
        if self.closed {
            return Err(SubmitError::Closed);
        }
        if self.status == StrategyStatus::InFlight {
            return Err(SubmitError::AlreadyInFlight);
        }
        if self.input_text.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        self.status = StrategyStatus::InFlight;
        self.result_text.clear();
        self.error_text.clear();

        Ok(SubmitTicket {
            generation: self.generation,
        })
    }

    /// Resolves an in-flight request. Outcomes whose ticket is stale (the
    /// session was reset or closed since submit) are silently discarded so a
    /// late response can never overwrite newer state.
    pub fn apply(&mut self, ticket: SubmitTicket, outcome: StrategyOutcome) {
        if self.closed
            || ticket.generation != self.generation
            || self.status != StrategyStatus::InFlight
        {
            debug!("discarding stale strategy outcome");
            return;
        }

        match outcome {
            StrategyOutcome::Success(text) => {
                self.status = StrategyStatus::Succeeded;
                self.result_text = text;
            }
            StrategyOutcome::Degraded => {
                self.status = StrategyStatus::Succeeded;
                self.result_text = EMPTY_STRATEGY_FALLBACK.to_string();
            }
            StrategyOutcome::Failure => {
                // Same presentation as Degraded on purpose: technical detail
                // stays in the logs, the user sees fixed fallback copy.
                self.status = StrategyStatus::Failed;
                self.result_text = CONNECTION_ERROR_FALLBACK.to_string();
            }
        }
    }

    /// Returns to the input form from a terminal state, clearing everything.
    /// A no-op while a request is in flight or after close.
    pub fn reset(&mut self) {
        if self.closed || self.status == StrategyStatus::InFlight {
            // InFlight: the outstanding ticket stays valid; only terminal
            // states offer the reset affordance.
            return;
        }
        self.input_text.clear();
        self.result_text.clear();
        self.error_text.clear();
        self.status = StrategyStatus::Idle;
        self.generation += 1;
    }

    /// Discards the entity. Any response still in flight resolves against a
    /// stale generation and is dropped. Reopening the modal means
    /// constructing a fresh session.
    pub fn close(&mut self) {
        self.closed = true;
        self.generation += 1;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Response Presenter: maps the current state to what the modal shows.
    pub fn display(&self) -> DisplayState {
        match self.status {
            StrategyStatus::Idle => DisplayState::Input {
                submit_enabled: !self.input_text.trim().is_empty(),
                in_flight: false,
            },
            StrategyStatus::InFlight => DisplayState::Input {
                submit_enabled: false,
                in_flight: true,
            },
            StrategyStatus::Succeeded | StrategyStatus::Failed => DisplayState::Result {
                markdown: self.result_text.clone(),
            },
        }
    }
}

impl Default for StrategySession {
    fn default() -> Self {
        Self::new()
    }
}
