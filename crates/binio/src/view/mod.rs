// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Lazy, buffered views over compound and sequence instances.
//!
//! # Buffering contract
//!
//! - Creating a view performs no I/O.
//! - The first member/element access issues exactly one read covering the
//!   view's whole span; later accesses on the same instance use the buffer.
//! - `set_*` only changes the buffer. `flush()` writes the whole buffer in
//!   one call and the buffer stays valid afterwards.
//! - Views are never cached by their parent: each `get_struct` /
//!   `get_sequence` call returns a new, unpopulated view. Keep a view
//!   around for as long as you access the same record, otherwise every
//!   navigation re-reads it.
//! - After an I/O error the view must be discarded.
//!
//! Views take `&mut self` for access and are meant for a single writer;
//! flush before dropping a modified view, unflushed changes are lost.

mod array_view;
mod buffer;
mod struct_view;

pub use array_view::ArrayView;
pub use struct_view::StructView;

pub(crate) use buffer::ViewBuffer;
