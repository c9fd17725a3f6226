//! Error taxonomy for the codec pipeline.

/// Errors produced by any stage of the compression/decompression pipeline.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("format error in {stage}: {detail}")]
    FormatError { stage: &'static str, detail: String },

    #[error("invalid code {code} during LZW decode at position {position} (next code {next_code})")]
    InvalidCode { code: u32, position: usize, next_code: u32 },

    #[error("integrity check failed: expected digest {expected}, computed {actual}")]
    IntegrityError { expected: String, actual: String },

    #[error("invalid configuration: {0}")]
    ConfigError(String),
}
