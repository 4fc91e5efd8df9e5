// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Homogeneous sequence (array) types.

use crate::types::Type;

/// How the element count of a sequence is known.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SequenceCount {
    /// Count fixed in the schema.
    Fixed(usize),
    /// Count not known statically and not tied to any member.
    Unbounded,
    /// Count stored in a preceding integer member of the enclosing compound.
    Member(String),
}

/// Sequence of `element`, `count` times.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceType {
    element: Type,
    count: SequenceCount,
}

impl SequenceType {
    /// Create a sequence type.
    pub fn new(element: Type, count: SequenceCount) -> Self {
        Self { element, count }
    }

    /// Sequence with a fixed element count.
    pub fn fixed(element: Type, count: usize) -> Self {
        Self::new(element, SequenceCount::Fixed(count))
    }

    /// Sequence with an unknown element count.
    pub fn unbounded(element: Type) -> Self {
        Self::new(element, SequenceCount::Unbounded)
    }

    /// Sequence whose element count is the value of `member` in the parent compound.
    pub fn counted_by(element: Type, member: impl Into<String>) -> Self {
        Self::new(element, SequenceCount::Member(member.into()))
    }

    pub fn element(&self) -> &Type {
        &self.element
    }

    pub fn count(&self) -> &SequenceCount {
        &self.count
    }

    /// Statically known element count.
    pub fn element_count(&self) -> Option<usize> {
        match self.count {
            SequenceCount::Fixed(n) => Some(n),
            _ => None,
        }
    }

    /// Byte size, `None` when the count or the element size is unbounded.
    pub fn fixed_size(&self) -> Option<usize> {
        let count = self.element_count()?;
        count.checked_mul(self.element.fixed_size()?)
    }

    /// Element name followed by this sequence's bracket.
    pub fn name(&self) -> String {
        let mut name = self.element.name();
        match &self.count {
            SequenceCount::Fixed(n) => name.push_str(&format!("[{}]", n)),
            SequenceCount::Unbounded => name.push_str("[]"),
            SequenceCount::Member(member) => name.push_str(&format!("[{}]", member)),
        }
        name
    }
}
