//! Image conversion: the decode → resize → encode → base64 pipeline.

pub mod codec;
mod pipeline;

pub use pipeline::convert;
