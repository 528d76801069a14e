//! HTTP API module for the cleaning award cost engine.
//!
//! This module exposes the quote orchestrator over REST so quote screens can
//! recompute costs on every shift edit.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::QuoteCostRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
