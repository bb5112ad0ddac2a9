use core::fmt;
use serde::{Deserialize, Serialize};

/// Context markers used when reporting serialization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerKind {
    /// Bundle framing: version and hash family.
    Header,
    /// Claimed root digest.
    Root,
    /// Requested leaf digests.
    Leaves,
    /// Sibling digests consumed during replay.
    Proof,
    /// Boolean combination tape.
    Flags,
    /// Explicit operand index tape.
    Ids,
}

impl fmt::Display for SerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerKind::Header => write!(f, "header"),
            SerKind::Root => write!(f, "root"),
            SerKind::Leaves => write!(f, "leaves"),
            SerKind::Proof => write!(f, "proof"),
            SerKind::Flags => write!(f, "flags"),
            SerKind::Ids => write!(f, "ids"),
        }
    }
}

/// Canonical serialization error surfaced while encoding or decoding data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerError {
    /// Input ended before the expected number of bytes were read.
    UnexpectedEnd {
        kind: SerKind,
        field: &'static str,
    },
    /// A length prefix exceeded `u32` or the remaining buffer.
    InvalidLength {
        kind: SerKind,
        field: &'static str,
    },
    /// Encountered an unexpected discriminant, version or tag.
    InvalidValue {
        kind: SerKind,
        field: &'static str,
    },
    /// Additional bytes remained after consuming the expected payload.
    TrailingBytes {
        kind: SerKind,
        consumed: usize,
        remaining: usize,
    },
}

impl SerError {
    pub fn unexpected_end(kind: SerKind, field: &'static str) -> Self {
        SerError::UnexpectedEnd { kind, field }
    }

    pub fn invalid_length(kind: SerKind, field: &'static str) -> Self {
        SerError::InvalidLength { kind, field }
    }

    pub fn invalid_value(kind: SerKind, field: &'static str) -> Self {
        SerError::InvalidValue { kind, field }
    }

    pub fn trailing_bytes(kind: SerKind, consumed: usize, remaining: usize) -> Self {
        SerError::TrailingBytes {
            kind,
            consumed,
            remaining,
        }
    }

    /// Returns the section in which the failure occurred.
    pub fn kind(&self) -> SerKind {
        match *self {
            SerError::UnexpectedEnd { kind, .. }
            | SerError::InvalidLength { kind, .. }
            | SerError::InvalidValue { kind, .. }
            | SerError::TrailingBytes { kind, .. } => kind,
        }
    }
}

impl fmt::Display for SerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerError::UnexpectedEnd { kind, field } => {
                write!(f, "unexpected end of input in {kind} ({field})")
            }
            SerError::InvalidLength { kind, field } => {
                write!(f, "invalid length in {kind} ({field})")
            }
            SerError::InvalidValue { kind, field } => {
                write!(f, "invalid value in {kind} ({field})")
            }
            SerError::TrailingBytes {
                kind,
                consumed,
                remaining,
            } => write!(
                f,
                "{remaining} trailing bytes after {kind} at offset {consumed}"
            ),
        }
    }
}

impl std::error::Error for SerError {}

/// Convenient alias for serialization results.
pub type SerResult<T> = core::result::Result<T, SerError>;
