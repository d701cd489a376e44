//! SpamSift prediction service — library interface.
//!
//! Re-exports the handlers and state constructors so that integration tests
//! can build the same router the binary serves.

pub mod config;
pub mod page;
pub mod serve;

// Re-export key types for convenience
pub use config::load_config;
pub use serve::{build_app_state, build_router, AppState};
