//! Strategy Request Flow — the one interactive feature of the site.
//!
//! A visitor describes a business problem in the "AI Automation Architect"
//! modal; the server interpolates it into a fixed consultant prompt, issues a
//! single Gemini call, and returns a Markdown recommendation or a fixed
//! fallback message.
//!
//! Split: `dispatcher` owns the outbound call and outcome classification,
//! `session` owns the per-modal state machine, `handlers` wires both to HTTP.

pub mod dispatcher;
pub mod handlers;
pub mod session;
