// Module declarations in dependency order
pub mod utils;
pub mod gallery;
pub mod core;
pub mod processing;
pub mod handlers;

// Public exports for external consumers
pub use self::core::{AppState, ConversionReply, ConversionRequest, OutputFormat};
pub use self::gallery::ImageStore;
pub use self::handlers::router;
pub use self::utils::{OptimizerError, OptimizerResult};

// This library file is used as a public API for consuming this crate as a library.
// The actual application entry point is in main.rs.
