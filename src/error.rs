use std::io;

use thiserror::Error;

/// Malformed header text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("header has an odd number of fields ({0})")]
    OddFieldCount(usize),

    #[error("header field {index} is not a non-negative integer: {field:?}")]
    NotAnInteger { index: usize, field: String },

    #[error("header symbol {0} is outside 0-255")]
    SymbolOutOfRange(u64),

    #[error("header lists symbol {0} more than once")]
    DuplicateSymbol(u8),

    #[error("header gives symbol {0} a zero frequency")]
    ZeroFrequency(u8),

    #[error("header line is not valid UTF-8")]
    NotUtf8,
}

/// Malformed bitstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid bit {found:?} at offset {offset}")]
    InvalidBit { offset: usize, found: char },

    #[error("bitstream ends in the middle of a code after {consumed} bits")]
    Truncated { consumed: usize },

    #[error("bit at offset {offset} leads outside the code tree")]
    InvalidPath { offset: usize },

    #[error("bitstream is not empty but the header lists no symbols")]
    UnexpectedBits,

    #[error("decoded {decoded} bytes but the header accounts for {expected}")]
    LengthMismatch { expected: u64, decoded: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("byte {symbol} at offset {offset} has no code in the frequency table")]
    UnknownSymbol { symbol: u8, offset: usize },
}

#[derive(Debug, Error)]
pub enum HuffmanError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The byte source or sink failed; passed through untouched.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed packed container: {0}")]
    Container(String),
}

pub type Result<T, E = HuffmanError> = std::result::Result<T, E>;
