// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Storage adapters: raw byte-range access at absolute offsets.
//!
//! An adapter either transfers the full requested span or fails; there are
//! no partial reads or writes. Cross-cutting behaviour (tracing, buffering,
//! encryption) is added by wrapping one adapter in another, see
//! [`TracingAdapter`].

mod file;
mod memory;
mod trace;

pub use file::FileAdapter;
pub use memory::MemoryAdapter;
pub use trace::{IoOp, IoRecord, TraceLog, TracingAdapter};

use crate::registry::SchemaRegistry;
use std::io;

/// Information about the session issuing an adapter call.
#[derive(Debug, Clone, Copy)]
pub struct IoContext<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> IoContext<'a> {
    pub(crate) fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Registry of the calling session.
    pub fn registry(&self) -> &'a SchemaRegistry {
        self.registry
    }

    /// Name of the session's root record type.
    pub fn root_name(&self) -> &'a str {
        self.registry.root().name()
    }
}

/// Byte-range access to the underlying resource.
pub trait StorageAdapter: Send {
    /// Fill `buf` from absolute `position`.
    fn read(&mut self, ctx: &IoContext<'_>, buf: &mut [u8], position: u64) -> io::Result<()>;

    /// Persist `buf` at absolute `position`.
    fn write(&mut self, ctx: &IoContext<'_>, buf: &[u8], position: u64) -> io::Result<()>;

    /// Current size of the resource in bytes.
    fn size(&self) -> io::Result<u64>;
}

impl<A: StorageAdapter + ?Sized> StorageAdapter for Box<A> {
    fn read(&mut self, ctx: &IoContext<'_>, buf: &mut [u8], position: u64) -> io::Result<()> {
        (**self).read(ctx, buf, position)
    }

    fn write(&mut self, ctx: &IoContext<'_>, buf: &[u8], position: u64) -> io::Result<()> {
        (**self).write(ctx, buf, position)
    }

    fn size(&self) -> io::Result<u64> {
        (**self).size()
    }
}

/// Convert a position plus length into a `usize` range end, rejecting overflow.
pub(crate) fn span_end(position: u64, len: usize) -> io::Result<usize> {
    usize::try_from(position)
        .ok()
        .and_then(|start| start.checked_add(len))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("span {}+{} exceeds addressable range", position, len),
            )
        })
}
