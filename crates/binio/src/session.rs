// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Session: one schema registry bound to one storage adapter.

use crate::config::SessionConfig;
use crate::error::{BinioError, Result};
use crate::io::{IoContext, StorageAdapter};
use crate::registry::SchemaRegistry;
use crate::types::{CompoundType, Endianness, SequenceType};
use crate::view::{ArrayView, StructView};
use parking_lot::Mutex;
use std::sync::Arc;

/// Entry point for navigating a binary resource.
///
/// Cloning is cheap and yields a handle on the same session. Views keep a
/// handle, so the adapter is released when the session and every view
/// created from it have been dropped.
///
/// Independent sessions share nothing and may be used from different
/// threads. Views of one session are not coordinated: two views over
/// overlapping bytes buffer independently and the later flush wins.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    registry: Arc<SchemaRegistry>,
    adapter: Mutex<Box<dyn StorageAdapter>>,
    config: SessionConfig,
}

impl Session {
    /// Open a session with the default configuration.
    ///
    /// The default configuration caps a single view buffer at
    /// [`DEFAULT_MAX_VIEW_SPAN`](crate::config::DEFAULT_MAX_VIEW_SPAN)
    /// (64 MiB, or `BINIO_MAX_VIEW_SPAN`). Larger records, such as a whole
    /// raw image band, fail with `SpanTooLarge` on first access; use
    /// [`Session::open_with_config`] with a higher `max_view_span` for them.
    pub fn open<A>(registry: impl Into<Arc<SchemaRegistry>>, adapter: A) -> Self
    where
        A: StorageAdapter + 'static,
    {
        Self::open_with_config(registry, adapter, SessionConfig::default())
    }

    /// Open a session with an explicit configuration.
    pub fn open_with_config<A>(
        registry: impl Into<Arc<SchemaRegistry>>,
        adapter: A,
        config: SessionConfig,
    ) -> Self
    where
        A: StorageAdapter + 'static,
    {
        let registry = registry.into();
        log::debug!(
            "[Session::open] root={} endianness={:?} max_view_span={}",
            registry.root().name(),
            registry.endianness(),
            config.max_view_span
        );
        Self {
            inner: Arc::new(SessionInner {
                registry,
                adapter: Mutex::new(Box::new(adapter)),
                config,
            }),
        }
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.inner.registry
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    pub fn endianness(&self) -> Endianness {
        self.inner.registry.endianness()
    }

    /// Fresh view of the root record at offset 0.
    pub fn root(&self) -> StructView {
        StructView::new(self.clone(), Arc::clone(self.inner.registry.root()), 0)
    }

    /// Fresh view of `ty` at absolute `position`.
    pub fn struct_at(&self, ty: impl Into<Arc<CompoundType>>, position: u64) -> StructView {
        StructView::new(self.clone(), ty.into(), position)
    }

    /// Fresh view of `ty` at absolute `position`.
    ///
    /// Only fixed-count sequences are bounded; any other count yields an
    /// unresolved view (see [`ArrayView::resolve`]).
    pub fn sequence_at(&self, ty: impl Into<Arc<SequenceType>>, position: u64) -> ArrayView {
        let ty = ty.into();
        let length = ty.element_count();
        ArrayView::new(self.clone(), ty, position, length)
    }

    /// Size of the underlying resource.
    pub fn max_position(&self) -> Result<u64> {
        Ok(self.inner.adapter.lock().size()?)
    }

    pub(crate) fn check_span(&self, span: usize) -> Result<()> {
        if span > self.inner.config.max_view_span {
            return Err(self.span_error(span));
        }
        Ok(())
    }

    pub(crate) fn span_error(&self, span: usize) -> BinioError {
        BinioError::SpanTooLarge {
            span,
            limit: self.inner.config.max_view_span,
        }
    }

    pub(crate) fn read(&self, buf: &mut [u8], position: u64) -> Result<()> {
        self.log_io("read", position, buf.len());
        let ctx = IoContext::new(&self.inner.registry);
        self.inner.adapter.lock().read(&ctx, buf, position)?;
        Ok(())
    }

    pub(crate) fn write(&self, buf: &[u8], position: u64) -> Result<()> {
        self.log_io("write", position, buf.len());
        let ctx = IoContext::new(&self.inner.registry);
        self.inner.adapter.lock().write(&ctx, buf, position)?;
        Ok(())
    }

    fn log_io(&self, op: &str, position: u64, len: usize) {
        if self.inner.config.trace_io {
            log::debug!("[Session::{}] pos={} len={}", op, position, len);
        } else {
            log::trace!("[Session::{}] pos={} len={}", op, position, len);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("root", &self.inner.registry.root().name())
            .field("config", &self.inner.config)
            .finish()
    }
}
