// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compound (record) types.

use crate::error::{BinioError, Result};
use crate::types::{SequenceCount, Type};
use std::collections::HashSet;

/// Named member of a compound.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// Member name.
    pub name: String,
    /// Member type.
    pub ty: Type,
}

impl Member {
    /// Create a member.
    pub fn new(name: impl Into<String>, ty: impl Into<Type>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Ordered list of named members.
///
/// At most one member may be unbounded and it must be the last one, so every
/// member offset is known once the type is built.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundType {
    name: String,
    members: Vec<Member>,
    offsets: Vec<usize>,
    size: Option<usize>,
}

impl CompoundType {
    /// Validate `members` and precompute their offsets.
    pub fn new(name: impl Into<String>, members: Vec<Member>) -> Result<Self> {
        let name = name.into();
        let mut seen = HashSet::new();
        let mut offsets = Vec::with_capacity(members.len());
        let mut offset = 0usize;
        let mut size = Some(0usize);

        for (index, member) in members.iter().enumerate() {
            if member.name.is_empty() {
                return Err(BinioError::schema(format!(
                    "compound '{}': member #{} has an empty name",
                    name, index
                )));
            }
            if !seen.insert(member.name.as_str()) {
                return Err(BinioError::schema(format!(
                    "compound '{}': duplicate member '{}'",
                    name, member.name
                )));
            }
            check_counted(&name, &members[..index], member)?;

            offsets.push(offset);
            match member.ty.fixed_size() {
                Some(member_size) => {
                    offset = offset.checked_add(member_size).ok_or_else(|| {
                        BinioError::schema(format!("compound '{}' is too large", name))
                    })?;
                    size = size.map(|_| offset);
                }
                None if index + 1 == members.len() => size = None,
                None => {
                    return Err(BinioError::schema(format!(
                        "compound '{}': unbounded member '{}' ({}) must be last",
                        name,
                        member.name,
                        member.ty.name()
                    )));
                }
            }
        }

        Ok(Self {
            name,
            members,
            offsets,
            size,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Find a member by name.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Position of a member in declaration order.
    pub fn member_index(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|m| m.name == name)
    }

    /// Byte offset of the member at `index`, relative to the compound start.
    pub fn member_offset(&self, index: usize) -> Option<usize> {
        self.offsets.get(index).copied()
    }

    /// Byte size, `None` when the last member is unbounded.
    pub fn fixed_size(&self) -> Option<usize> {
        self.size
    }

    /// Bytes covered by the statically placed members.
    ///
    /// Equals `fixed_size()` for bounded compounds, otherwise the offset of
    /// the trailing unbounded member.
    pub fn static_span(&self) -> usize {
        match self.size {
            Some(size) => size,
            None => self.offsets.last().copied().unwrap_or(0),
        }
    }
}

/// Member-counted sequences must be direct members whose count member is a
/// preceding integer scalar.
fn check_counted(compound: &str, preceding: &[Member], member: &Member) -> Result<()> {
    if let Type::Sequence(seq) = &member.ty {
        if let SequenceCount::Member(count) = seq.count() {
            let count_member = preceding.iter().find(|m| &m.name == count);
            match count_member.map(|m| &m.ty) {
                Some(Type::Scalar(scalar)) if scalar.is_integer() => {}
                Some(other) => {
                    return Err(BinioError::schema(format!(
                        "compound '{}': count member '{}' of '{}' is {}, not an integer scalar",
                        compound,
                        count,
                        member.name,
                        other.name()
                    )));
                }
                None => {
                    return Err(BinioError::schema(format!(
                        "compound '{}': count member '{}' of '{}' must precede it",
                        compound, count, member.name
                    )));
                }
            }
        }
        if nests_counted(seq.element()) {
            return Err(BinioError::schema(format!(
                "compound '{}': member '{}' nests a member-counted sequence inside a sequence",
                compound, member.name
            )));
        }
    }
    Ok(())
}

fn nests_counted(ty: &Type) -> bool {
    match ty {
        Type::Sequence(seq) => {
            matches!(seq.count(), SequenceCount::Member(_)) || nests_counted(seq.element())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SequenceType, DOUBLE, FLOAT, INT, SHORT, UBYTE};

    #[test]
    fn test_offsets_and_size() {
        let ty = CompoundType::new(
            "Rec",
            vec![
                Member::new("a", SHORT),
                Member::new("b", DOUBLE),
                Member::new("c", SequenceType::fixed(FLOAT, 3)),
            ],
        )
        .unwrap();
        assert_eq!(ty.member_offset(0), Some(0));
        assert_eq!(ty.member_offset(1), Some(2));
        assert_eq!(ty.member_offset(2), Some(10));
        assert_eq!(ty.fixed_size(), Some(22));
        assert_eq!(ty.static_span(), 22);
        assert_eq!(ty.member_index("c"), Some(2));
    }

    #[test]
    fn test_trailing_unbounded() {
        let ty = CompoundType::new(
            "Rec",
            vec![
                Member::new("n", INT),
                Member::new("data", SequenceType::counted_by(UBYTE, "n")),
            ],
        )
        .unwrap();
        assert_eq!(ty.fixed_size(), None);
        assert_eq!(ty.static_span(), 4);
    }

    #[test]
    fn test_unbounded_not_last_is_rejected() {
        let err = CompoundType::new(
            "Bad",
            vec![
                Member::new("data", SequenceType::unbounded(UBYTE)),
                Member::new("n", INT),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, BinioError::Schema(_)));
    }

    #[test]
    fn test_duplicate_member_is_rejected() {
        let err =
            CompoundType::new("Dup", vec![Member::new("x", INT), Member::new("x", INT)])
                .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_count_member_must_precede_and_be_integer() {
        let later = CompoundType::new(
            "Late",
            vec![Member::new("data", SequenceType::counted_by(UBYTE, "n"))],
        );
        assert!(later.is_err());

        let float_count = CompoundType::new(
            "FloatCount",
            vec![
                Member::new("n", FLOAT),
                Member::new("data", SequenceType::counted_by(UBYTE, "n")),
            ],
        );
        assert!(float_count.is_err());

        let nested = CompoundType::new(
            "Nested",
            vec![
                Member::new("n", INT),
                Member::new(
                    "rows",
                    SequenceType::unbounded(SequenceType::counted_by(UBYTE, "n").into()),
                ),
            ],
        );
        assert!(nested.is_err());
    }
}
