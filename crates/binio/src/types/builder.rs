// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for compound types.

use crate::error::Result;
use crate::types::{CompoundType, Member, SequenceType, Type};

/// Builder for creating `CompoundType` instances.
#[derive(Debug)]
pub struct CompoundBuilder {
    name: String,
    members: Vec<Member>,
}

impl CompoundBuilder {
    /// Create a new builder for a compound type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Add a member of any type.
    pub fn member(mut self, name: impl Into<String>, ty: impl Into<Type>) -> Self {
        self.members.push(Member::new(name, ty));
        self
    }

    /// Add a fixed-count sequence member.
    pub fn sequence(self, name: impl Into<String>, element: Type, count: usize) -> Self {
        self.member(name, SequenceType::fixed(element, count))
    }

    /// Add a sequence member counted by a preceding integer member.
    pub fn counted_sequence(
        self,
        name: impl Into<String>,
        element: Type,
        count_member: impl Into<String>,
    ) -> Self {
        self.member(name, SequenceType::counted_by(element, count_member))
    }

    /// Add a trailing sequence member of unknown count.
    pub fn unbounded_sequence(self, name: impl Into<String>, element: Type) -> Self {
        self.member(name, SequenceType::unbounded(element))
    }

    /// Validate and build the compound.
    pub fn build(self) -> Result<CompoundType> {
        CompoundType::new(self.name, self.members)
    }
}
