// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by every layer of the codec.

use std::io;
use thiserror::Error;

/// Errors raised by schema construction, registry access, navigation and I/O.
#[derive(Debug, Error)]
pub enum BinioError {
    /// Malformed type graph, detected when the type is constructed.
    #[error("schema error: {0}")]
    Schema(String),

    /// Alias already bound to a different type.
    #[error("alias '{name}' already bound to {existing}, cannot rebind to {incoming}")]
    AliasConflict {
        name: String,
        existing: String,
        incoming: String,
    },

    /// Alias not present in the registry (nor in its basis).
    #[error("unknown alias: {0}")]
    UnknownAlias(String),

    /// Member name not part of the compound.
    #[error("compound '{compound}' has no member '{member}'")]
    UnknownMember { compound: String, member: String },

    /// Element index outside `[0, length)`.
    #[error("index out of range: {index} >= {length}")]
    IndexOutOfRange { index: usize, length: usize },

    /// Length or element size of the type is not statically known.
    #[error("length of '{0}' is unbounded")]
    UnboundedLength(String),

    /// Accessor or value kind does not match the schema.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Value cannot be represented by the scalar codec.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// View buffer would exceed the configured limit.
    #[error("view span of {span} bytes exceeds limit of {limit} bytes")]
    SpanTooLarge { span: usize, limit: usize },

    /// Storage adapter failure, propagated verbatim.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Schema document could not be parsed.
    #[error("schema document error: {0}")]
    Document(String),
}

impl BinioError {
    pub(crate) fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Returns `true` for errors caused by the storage adapter.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, BinioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = BinioError::UnknownMember {
            compound: "Point".into(),
            member: "z".into(),
        };
        assert_eq!(err.to_string(), "compound 'Point' has no member 'z'");

        let err = BinioError::IndexOutOfRange {
            index: 5,
            length: 5,
        };
        assert_eq!(err.to_string(), "index out of range: 5 >= 5");
    }

    #[test]
    fn test_io_conversion() {
        let err: BinioError = io::Error::new(io::ErrorKind::UnexpectedEof, "short").into();
        assert!(err.is_io());
        assert!(!BinioError::schema("x").is_io());
    }
}
