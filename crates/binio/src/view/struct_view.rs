// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Named member access over a compound instance.

use crate::error::{BinioError, Result};
use crate::session::Session;
use crate::types::{CompoundType, FromScalar, ScalarValue, SequenceCount, Type};
use crate::view::{ArrayView, ViewBuffer};
use std::sync::Arc;

/// Buffered view of one compound at an absolute position.
///
/// The buffer covers the statically placed members (the whole compound
/// unless its last member is unbounded).
#[derive(Debug)]
pub struct StructView {
    session: Session,
    ty: Arc<CompoundType>,
    buffer: ViewBuffer,
}

impl StructView {
    pub(crate) fn new(session: Session, ty: Arc<CompoundType>, position: u64) -> Self {
        let span = ty.static_span();
        Self {
            session,
            ty,
            buffer: ViewBuffer::new(position, span),
        }
    }

    pub fn compound_type(&self) -> &Arc<CompoundType> {
        &self.ty
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Absolute position of the compound.
    pub fn position(&self) -> u64 {
        self.buffer.position()
    }

    /// Number of bytes buffered by this view.
    pub fn span(&self) -> usize {
        self.buffer.span()
    }

    pub fn is_loaded(&self) -> bool {
        self.buffer.is_loaded()
    }

    /// Index, byte offset and type of a member.
    fn locate(&self, name: &str) -> Result<(usize, Type)> {
        let index = self
            .ty
            .member_index(name)
            .ok_or_else(|| BinioError::UnknownMember {
                compound: self.ty.name().to_string(),
                member: name.to_string(),
            })?;
        let offset = self.ty.member_offset(index).unwrap_or(0);
        Ok((offset, self.ty.members()[index].ty.clone()))
    }

    /// Decode a scalar member.
    pub fn get_scalar(&mut self, name: &str) -> Result<ScalarValue> {
        let (offset, ty) = self.locate(name)?;
        let scalar = ty
            .as_scalar()
            .ok_or_else(|| BinioError::mismatch("scalar", ty.kind_label()))?;
        let order = self.session.endianness();
        let data = self.buffer.load(&self.session)?;
        scalar.decode(&data[offset..offset + scalar.size()], order)
    }

    /// Decode a scalar member into a Rust value of the matching kind.
    pub fn get<T: FromScalar>(&mut self, name: &str) -> Result<T> {
        T::from_scalar(self.get_scalar(name)?)
    }

    /// Encode a scalar member into the buffer; nothing is written until `flush`.
    pub fn set_scalar(&mut self, name: &str, value: impl Into<ScalarValue>) -> Result<()> {
        let (offset, ty) = self.locate(name)?;
        let scalar = ty
            .as_scalar()
            .ok_or_else(|| BinioError::mismatch("scalar", ty.kind_label()))?;
        let order = self.session.endianness();
        let data = self.buffer.load(&self.session)?;
        scalar.encode(value.into(), &mut data[offset..offset + scalar.size()], order)
    }

    /// Fresh view of a compound member. Performs no I/O.
    pub fn get_struct(&self, name: &str) -> Result<StructView> {
        let (offset, ty) = self.locate(name)?;
        match ty {
            Type::Compound(compound) => Ok(StructView::new(
                self.session.clone(),
                compound,
                self.member_position(offset)?,
            )),
            other => Err(BinioError::mismatch("compound", other.kind_label())),
        }
    }

    /// Fresh view of a sequence member.
    ///
    /// A member-counted sequence reads its count from this view first, so
    /// the returned view is bounded.
    pub fn get_sequence(&mut self, name: &str) -> Result<ArrayView> {
        let (offset, ty) = self.locate(name)?;
        let seq = match ty {
            Type::Sequence(seq) => seq,
            other => return Err(BinioError::mismatch("sequence", other.kind_label())),
        };
        let length = match seq.count() {
            SequenceCount::Fixed(n) => Some(*n),
            SequenceCount::Unbounded => None,
            SequenceCount::Member(count_member) => Some(self.count_from(count_member)?),
        };
        Ok(ArrayView::new(
            self.session.clone(),
            seq,
            self.member_position(offset)?,
            length,
        ))
    }

    fn member_position(&self, offset: usize) -> Result<u64> {
        self.position()
            .checked_add(offset as u64)
            .ok_or_else(|| {
                BinioError::InvalidValue(format!(
                    "member at offset {} of '{}' lies beyond the addressable range",
                    offset,
                    self.ty.name()
                ))
            })
    }

    fn count_from(&mut self, member: &str) -> Result<usize> {
        let value = self.get_scalar(member)?;
        value
            .to_i64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                BinioError::InvalidValue(format!(
                    "count member '{}' holds {}, not a valid element count",
                    member, value
                ))
            })
    }

    /// Write the whole buffer back in a single call.
    ///
    /// Does nothing if no member has been accessed yet.
    pub fn flush(&mut self) -> Result<()> {
        self.buffer.flush(&self.session)
    }
}
