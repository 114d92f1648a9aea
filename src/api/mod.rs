//! HTTP API module for the Pricing Engine.
//!
//! This module provides the REST endpoints for managing pricing sessions:
//! each session owns an exclusive [`crate::calculation::PricingEngine`]
//! behind a per-session mutex, and every mutation runs the full recompute
//! cascade before the response is built.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AddFactorRequest, AddTaskRequest, CreateSessionRequest, CurrencyUpdateRequest,
    ProjectNamesRequest, SettingsRequest, UpdateFactorRequest,
};
pub use response::{ApiError, SessionCreated, SessionSummary};
pub use state::AppState;
