//! HTTP server for vdiff.
//!
//! Decodes JSON request bodies, runs one engine operation per request on
//! the blocking pool, and serializes the engine's report back. Malformed
//! bodies are rejected by the extractors before the engine is reached.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{JsonDiffRequest, SimilarityRequest, TextDiffRequest};
pub use server::VdiffServer;
