use thiserror::Error;

/// Errors raised while reading bytes off the wire
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The buffer ended before the value was complete
    #[error("Unexpected end of buffer: needed {needed} more byte(s), {remaining} remaining")]
    UnexpectedEnd { needed: usize, remaining: usize },

    /// A boolean byte was neither 0 nor 1
    #[error("Invalid boolean byte: {byte}")]
    InvalidBool { byte: u8 },

    /// String payload was not valid UTF-8
    #[error("String payload is not valid UTF-8")]
    InvalidUtf8,

    /// String length prefix exceeds the allowed maximum
    #[error("String of {length} bytes exceeds the maximum of {max} bytes")]
    StringTooLong { length: usize, max: usize },

    /// A var-int ran past five bytes
    #[error("Var-int is longer than 5 bytes")]
    VarIntTooLong,

    /// A signed length prefix was negative
    #[error("Negative length prefix: {length}")]
    NegativeLength { length: i32 },

    /// Bytes were left over after a complete message was read
    #[error("{remaining} trailing byte(s) after a complete message")]
    TrailingBytes { remaining: usize },

    /// Unknown message kind discriminant
    #[error("Unknown message kind: {kind}")]
    InvalidMessageKind { kind: u8 },
}
