// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type system describing binary layouts.
//!
//! A layout is a graph of three variants:
//!
//! - **Scalar**: fixed-size primitive (`byte` .. `double`, ASCII numerics)
//! - **Sequence**: homogeneous array with a fixed, unbounded or member-counted length
//! - **Compound**: ordered list of named members
//!
//! Types are immutable values; nested types are shared through `Arc`, and
//! equality is structural.
//!
//! # Example
//!
//! ```rust
//! use binio::types::{CompoundBuilder, Type, DOUBLE, FLOAT};
//!
//! let point = CompoundBuilder::new("Point")
//!     .member("x", DOUBLE)
//!     .member("y", DOUBLE)
//!     .build()
//!     .unwrap();
//! assert_eq!(Type::from(point).size(), 16);
//!
//! let grid = Type::unbounded(Type::sequence(FLOAT, 32));
//! assert_eq!(grid.name(), "float[32][]");
//! assert_eq!(grid.size(), -1);
//! ```

mod builder;
mod compound;
mod scalar;
mod sequence;

pub use builder::CompoundBuilder;
pub use compound::{CompoundType, Member};
pub use scalar::{Endianness, FromScalar, ScalarType, ScalarValue};
pub use sequence::{SequenceCount, SequenceType};

use std::fmt;
use std::sync::Arc;

/// Size reported for types whose byte size is not statically known.
pub const UNBOUNDED: isize = -1;

pub const BYTE: Type = Type::Scalar(ScalarType::Byte);
pub const UBYTE: Type = Type::Scalar(ScalarType::UByte);
pub const SHORT: Type = Type::Scalar(ScalarType::Short);
pub const USHORT: Type = Type::Scalar(ScalarType::UShort);
pub const INT: Type = Type::Scalar(ScalarType::Int);
pub const UINT: Type = Type::Scalar(ScalarType::UInt);
pub const LONG: Type = Type::Scalar(ScalarType::Long);
pub const ULONG: Type = Type::Scalar(ScalarType::ULong);
pub const FLOAT: Type = Type::Scalar(ScalarType::Float);
pub const DOUBLE: Type = Type::Scalar(ScalarType::Double);

/// A binary layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Scalar(ScalarType),
    Sequence(Arc<SequenceType>),
    Compound(Arc<CompoundType>),
}

impl Type {
    /// Fixed-count sequence of `element`.
    pub fn sequence(element: Type, count: usize) -> Self {
        SequenceType::fixed(element, count).into()
    }

    /// Sequence of `element` with unknown count.
    pub fn unbounded(element: Type) -> Self {
        SequenceType::unbounded(element).into()
    }

    /// Sequence of `element` counted by a preceding member of the parent compound.
    pub fn counted_by(element: Type, member: impl Into<String>) -> Self {
        SequenceType::counted_by(element, member).into()
    }

    /// Structural name, e.g. `float[32][]` or the compound's name.
    pub fn name(&self) -> String {
        match self {
            Self::Scalar(s) => s.name(),
            Self::Sequence(s) => s.name(),
            Self::Compound(c) => c.name().to_string(),
        }
    }

    /// Byte size, or [`UNBOUNDED`] (-1).
    pub fn size(&self) -> isize {
        self.fixed_size()
            .and_then(|s| isize::try_from(s).ok())
            .unwrap_or(UNBOUNDED)
    }

    /// Byte size when statically known.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Scalar(s) => Some(s.size()),
            Self::Sequence(s) => s.fixed_size(),
            Self::Compound(c) => c.fixed_size(),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Compound(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, Self::Compound(_))
    }

    pub fn as_scalar(&self) -> Option<ScalarType> {
        match self {
            Self::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Arc<SequenceType>> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Arc<CompoundType>> {
        match self {
            Self::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// Short variant label used in error messages.
    pub(crate) fn kind_label(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Sequence(_) => "sequence",
            Self::Compound(_) => "compound",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<ScalarType> for Type {
    fn from(s: ScalarType) -> Self {
        Self::Scalar(s)
    }
}

impl From<SequenceType> for Type {
    fn from(s: SequenceType) -> Self {
        Self::Sequence(Arc::new(s))
    }
}

impl From<CompoundType> for Type {
    fn from(c: CompoundType) -> Self {
        Self::Compound(Arc::new(c))
    }
}

impl From<Arc<CompoundType>> for Type {
    fn from(c: Arc<CompoundType>) -> Self {
        Self::Compound(c)
    }
}
