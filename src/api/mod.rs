//! Synthesis API wire types and HTTP client.

mod client;
mod types;


pub use client::SynthesisClient;
pub use types::*;
