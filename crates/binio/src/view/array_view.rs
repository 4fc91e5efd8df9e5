// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Indexed element access over a sequence instance.

use crate::error::{BinioError, Result};
use crate::session::Session;
use crate::types::{FromScalar, ScalarType, ScalarValue, SequenceType, Type};
use crate::view::{StructView, ViewBuffer};
use std::sync::Arc;

/// Buffered view of one sequence at an absolute position.
///
/// A view is *bounded* when its length is known (fixed count, resolved count
/// member, or [`ArrayView::resolve`]). Scalar access and flushing need a
/// bounded view; navigating to fixed-size elements does not.
///
/// Scalar access buffers the whole sequence, so its span is subject to
/// [`SessionConfig::max_view_span`](crate::SessionConfig::max_view_span),
/// 64 MiB by default. A bigger fixed-count sequence is valid but fails with
/// `SpanTooLarge` unless the session is opened with a higher limit; element
/// navigation (`get_struct`/`get_sequence`) is not affected.
#[derive(Debug)]
pub struct ArrayView {
    session: Session,
    ty: Arc<SequenceType>,
    length: Option<usize>,
    buffer: ViewBuffer,
}

impl ArrayView {
    pub(crate) fn new(
        session: Session,
        ty: Arc<SequenceType>,
        position: u64,
        length: Option<usize>,
    ) -> Self {
        let span = match (length, ty.element().fixed_size()) {
            // overflow surfaces as SpanTooLarge on first access
            (Some(n), Some(size)) => n.checked_mul(size).unwrap_or(usize::MAX),
            _ => 0,
        };
        Self {
            session,
            ty,
            length,
            buffer: ViewBuffer::new(position, span),
        }
    }

    pub fn sequence_type(&self) -> &Arc<SequenceType> {
        &self.ty
    }

    pub fn element_type(&self) -> &Type {
        self.ty.element()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn position(&self) -> u64 {
        self.buffer.position()
    }

    pub fn is_loaded(&self) -> bool {
        self.buffer.is_loaded()
    }

    pub fn is_bounded(&self) -> bool {
        self.length.is_some()
    }

    /// Number of elements.
    pub fn length(&self) -> Result<usize> {
        self.length
            .ok_or_else(|| BinioError::UnboundedLength(self.ty.name()))
    }

    /// Bind an unbounded view to `length` elements at the same position.
    pub fn resolve(self, length: usize) -> Result<ArrayView> {
        if let Some(current) = self.length {
            return Err(BinioError::InvalidValue(format!(
                "'{}' is already bounded to {} elements",
                self.ty.name(),
                current
            )));
        }
        let position = self.position();
        Ok(ArrayView::new(self.session, self.ty, position, Some(length)))
    }

    fn element_size(&self) -> Result<usize> {
        self.ty
            .element()
            .fixed_size()
            .ok_or_else(|| BinioError::UnboundedLength(self.ty.element().name()))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        match self.length {
            Some(length) if index >= length => {
                Err(BinioError::IndexOutOfRange { index, length })
            }
            _ => Ok(()),
        }
    }

    fn scalar_element(&self) -> Result<ScalarType> {
        let element = self.ty.element();
        element
            .as_scalar()
            .ok_or_else(|| BinioError::mismatch("scalar", element.kind_label()))
    }

    /// Byte offset of a scalar element inside the bounded buffer.
    ///
    /// The span limit is checked first, so a corrupt count fails here
    /// without touching storage.
    fn scalar_offset(&self, index: usize) -> Result<(ScalarType, usize)> {
        let scalar = self.scalar_element()?;
        self.length()?;
        self.check_index(index)?;
        self.session.check_span(self.buffer.span())?;
        let offset = index
            .checked_mul(scalar.size())
            .ok_or_else(|| self.session.span_error(usize::MAX))?;
        Ok((scalar, offset))
    }

    /// Absolute position of a fixed-size element.
    fn element_position(&self, index: usize) -> Result<u64> {
        self.check_index(index)?;
        let size = self.element_size()?;
        u64::try_from(index)
            .ok()
            .and_then(|i| i.checked_mul(size as u64))
            .and_then(|offset| self.position().checked_add(offset))
            .ok_or_else(|| {
                BinioError::InvalidValue(format!(
                    "element {} of '{}' lies beyond the addressable range",
                    index,
                    self.ty.name()
                ))
            })
    }

    /// Decode element `index`.
    pub fn get_scalar(&mut self, index: usize) -> Result<ScalarValue> {
        let (scalar, offset) = self.scalar_offset(index)?;
        let order = self.session.endianness();
        let data = self.buffer.load(&self.session)?;
        scalar.decode(&data[offset..offset + scalar.size()], order)
    }

    /// Decode element `index` into a Rust value of the matching kind.
    pub fn get<T: FromScalar>(&mut self, index: usize) -> Result<T> {
        T::from_scalar(self.get_scalar(index)?)
    }

    /// Encode element `index` into the buffer; nothing is written until `flush`.
    pub fn set_scalar(&mut self, index: usize, value: impl Into<ScalarValue>) -> Result<()> {
        let (scalar, offset) = self.scalar_offset(index)?;
        let order = self.session.endianness();
        let data = self.buffer.load(&self.session)?;
        scalar.encode(value.into(), &mut data[offset..offset + scalar.size()], order)
    }

    /// Fresh view of compound element `index`. Performs no I/O.
    pub fn get_struct(&self, index: usize) -> Result<StructView> {
        let compound = match self.ty.element() {
            Type::Compound(c) => Arc::clone(c),
            other => return Err(BinioError::mismatch("compound", other.kind_label())),
        };
        let position = self.element_position(index)?;
        Ok(StructView::new(self.session.clone(), compound, position))
    }

    /// Fresh view of sequence element `index` (multi-dimensional arrays).
    pub fn get_sequence(&self, index: usize) -> Result<ArrayView> {
        let inner = match self.ty.element() {
            Type::Sequence(s) => Arc::clone(s),
            other => return Err(BinioError::mismatch("sequence", other.kind_label())),
        };
        let position = self.element_position(index)?;
        let length = inner.element_count();
        Ok(ArrayView::new(self.session.clone(), inner, position, length))
    }

    fn byte_element(&self) -> Result<()> {
        match self.scalar_element()? {
            ScalarType::Byte | ScalarType::UByte => Ok(()),
            other => Err(BinioError::mismatch("byte or ubyte", other.name())),
        }
    }

    /// Raw bytes of a `byte`/`ubyte` sequence.
    pub fn get_bytes(&mut self) -> Result<Vec<u8>> {
        self.byte_element()?;
        self.length()?;
        Ok(self.buffer.load(&self.session)?.to_vec())
    }

    /// Text of a `byte`/`ubyte` sequence, trailing NUL and spaces removed.
    pub fn get_string(&mut self) -> Result<String> {
        let bytes = self.get_bytes()?;
        let end = bytes
            .iter()
            .rposition(|&b| b != 0 && b != b' ')
            .map_or(0, |i| i + 1);
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }

    /// Store `text` left-aligned and space padded.
    pub fn set_string(&mut self, text: &str) -> Result<()> {
        self.byte_element()?;
        let length = self.length()?;
        if text.len() > length {
            return Err(BinioError::InvalidValue(format!(
                "{} bytes of text do not fit in {}",
                text.len(),
                self.ty.name()
            )));
        }
        let data = self.buffer.load(&self.session)?;
        data[..text.len()].copy_from_slice(text.as_bytes());
        data[text.len()..].fill(b' ');
        Ok(())
    }

    /// Write the whole buffer back in a single call.
    ///
    /// Fails on an unresolved view; does nothing if no element was accessed.
    pub fn flush(&mut self) -> Result<()> {
        self.length()?;
        self.buffer.flush(&self.session)
    }
}
