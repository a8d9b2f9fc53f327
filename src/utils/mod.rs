pub mod error;

pub use error::{OptimizerError, OptimizerResult};
