//! Model-backed insights and recommendations for the SalesPulse dashboard.
//!
//! The hosted language model sits behind two seams:
//! - `LlmClient` (`llm`) sends one prompt with a declared JSON schema and
//!   returns the raw JSON text. `GeminiClient` (`gemini`) is the HTTP
//!   implementation.
//! - `InsightGateway` (`gateway`) turns catalog and sales data into prompts
//!   and parses the model output into domain types. Errors are surfaced.
//!
//! `InsightService` (`service`) is what callers use: it never fails and
//! substitutes a static fallback whenever the gateway does.
//!
//! The model only writes advisory text. Catalog data, sales figures and
//! aggregates are always computed locally.

pub mod gateway;
pub mod gemini;
pub mod llm;
pub mod prompt;
pub mod service;

pub use gateway::{GatewayError, InsightGateway, LlmGateway};
pub use gemini::GeminiClient;
pub use llm::{CompletionRequest, LlmClient, LlmError};
pub use service::InsightService;
