// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory storage adapter backed by a growable byte vector.

use super::{span_end, IoContext, StorageAdapter};
use parking_lot::RwLock;
use std::io;
use std::sync::Arc;

/// Growable in-memory byte store.
///
/// Clones share the same bytes, so a handle kept by the caller can export
/// what a session wrote after the adapter has been moved into it.
///
/// A write past the end zero-fills the gap and grows the store to fit. Gaps
/// larger than [`MemoryAdapter::max_gap`] (default
/// [`DEFAULT_MAX_VIEW_SPAN`](crate::config::DEFAULT_MAX_VIEW_SPAN)) are
/// rejected with `InvalidInput` instead of allocating.
#[derive(Debug, Clone)]
pub struct MemoryAdapter {
    data: Arc<RwLock<Vec<u8>>>,
    max_gap: usize,
}

impl Default for MemoryAdapter {
    fn default() -> Self {
        Self::from_bytes(Vec::new())
    }
}

impl MemoryAdapter {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `bytes`.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Arc::new(RwLock::new(bytes.into())),
            max_gap: crate::config::DEFAULT_MAX_VIEW_SPAN,
        }
    }

    /// Set the largest zero-filled gap a write past the end may create.
    pub fn with_max_gap(mut self, max_gap: usize) -> Self {
        self.max_gap = max_gap;
        self
    }

    pub fn max_gap(&self) -> usize {
        self.max_gap
    }

    /// Copy of the current contents.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.read().clone()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl StorageAdapter for MemoryAdapter {
    fn read(&mut self, _ctx: &IoContext<'_>, buf: &mut [u8], position: u64) -> io::Result<()> {
        let end = span_end(position, buf.len())?;
        let data = self.data.read();
        if end > data.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "read of {} bytes at {} past end of {}-byte store",
                    buf.len(),
                    position,
                    data.len()
                ),
            ));
        }
        buf.copy_from_slice(&data[end - buf.len()..end]);
        Ok(())
    }

    fn write(&mut self, _ctx: &IoContext<'_>, buf: &[u8], position: u64) -> io::Result<()> {
        let end = span_end(position, buf.len())?;
        let mut data = self.data.write();
        let start = end - buf.len();
        if start > data.len() && start - data.len() > self.max_gap {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "write at {} leaves a {}-byte gap after the {}-byte store (limit {})",
                    position,
                    start - data.len(),
                    data.len(),
                    self.max_gap
                ),
            ));
        }
        if end > data.len() {
            data.resize(end, 0);
        }
        data[end - buf.len()..end].copy_from_slice(buf);
        Ok(())
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SchemaRegistry;
    use crate::types::{CompoundBuilder, INT};

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new(CompoundBuilder::new("R").member("x", INT).build().unwrap())
    }

    #[test]
    fn test_write_grows_and_shares() {
        let reg = registry();
        let ctx = IoContext::new(&reg);
        let handle = MemoryAdapter::new();
        let mut adapter = handle.clone();

        adapter.write(&ctx, &[1, 2, 3], 4).unwrap();
        assert_eq!(handle.to_bytes(), vec![0, 0, 0, 0, 1, 2, 3]);
        assert_eq!(adapter.size().unwrap(), 7);

        let mut buf = [0u8; 2];
        adapter.read(&ctx, &mut buf, 5).unwrap();
        assert_eq!(buf, [2, 3]);
    }

    #[test]
    fn test_read_past_end_fails() {
        let reg = registry();
        let ctx = IoContext::new(&reg);
        let mut adapter = MemoryAdapter::from_bytes(vec![0u8; 4]);
        let mut buf = [0u8; 8];
        let err = adapter.read(&ctx, &mut buf, 0).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_write_far_past_end_is_rejected() {
        let reg = registry();
        let ctx = IoContext::new(&reg);
        let handle = MemoryAdapter::from_bytes(vec![7u8; 4]);
        let mut adapter = handle.clone();

        let err = adapter.write(&ctx, &[1, 2], 1 << 40).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(handle.to_bytes(), vec![7u8; 4]);

        let mut small = MemoryAdapter::new().with_max_gap(8);
        assert!(small.write(&ctx, &[1], 8).is_ok());
        assert!(small.write(&ctx, &[1], 18).is_err());
        assert_eq!(small.len(), 9);
    }

}
