use alloc::string::String;

/// Errors returned by quantization descriptor operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantError {
    /// The argument id or one of the values passed along with it is rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The encoded bytes can't be turned back into a valid value.
    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),
}
