//! Core application types and state.
//!
//! This module contains the fundamental types used throughout the service:
//! - [`AppState`]: shared state handed to every handler
//! - [`ConversionRequest`]: a fully parsed conversion request
//! - [`ConversionReply`]: the uniform success/failure wire reply
//! - [`OutputFormat`]: the target format selector

mod state;
mod types;

pub use state::AppState;
pub use types::{ConversionReply, ConversionRequest, OutputFormat};
