//! # BioSynth Client
//!
//! Client-side core of the BioSynth gene synthesis application: composing a
//! synthesis request, submitting it to the synthesis API, keeping resolved
//! results for the session, and deriving what the result view shows.
//!
//! ## Features
//!
//! - **Form State**: Draft editing, field validation and submission tracking
//! - **Synthesis Client**: Single-attempt submission with a fail-open fallback
//!   to synthetic demo data, and error-propagating result lookup
//! - **Demo Generator**: Seedable synthetic responses with documented bounds
//! - **Result Cache**: Write-once, session-scoped store keyed by request id
//! - **Presenter**: Pure risk/confidence tiers, sequence differences, viability
//! - **Polling**: Bounded, cancellable interval polling
//!
//! ## Architecture
//!
//! ```text
//! FormState → SynthesisClient ──HTTP──→ /api/v1/synthesize
//!                  │   └─ on failure → DemoGenerator
//!                  ↓
//!             ResultCache ← resolve_result(id) → ResultSummary
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use biosynth_client::{Config, SynthesisClient};
//! use biosynth_client::form::{FormState, FormUpdate};
//! use biosynth_client::presenter::{resolve_result, ResultSummary};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = SynthesisClient::from_config(&config)?;
//!
//!     let mut form = FormState::new();
//!     form.update_form_data(
//!         FormUpdate::new()
//!             .host_organism("homo_sapiens")
//!             .desired_trait("high bone density"),
//!     );
//!     if let Some(response) = form.submit(&client).await {
//!         let view = resolve_result(&client, &response.request_id).await;
//!         println!("{:?}", ResultSummary::from_response(view.response()));
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Synthesis API types and HTTP client.
pub mod api;
/// Session-scoped result cache.
pub mod cache;
/// Configuration management.
pub mod config;
/// Synthetic demo response generation.
pub mod demo;
/// Error types and result aliases for the application.
pub mod error;
/// Request form state and validation.
pub mod form;
/// Cancellable interval polling.
pub mod poll;
/// Pure display computations and result resolution.
pub mod presenter;

pub use api::SynthesisClient;
pub use config::Config;
pub use error::{AppError, AppResult};
