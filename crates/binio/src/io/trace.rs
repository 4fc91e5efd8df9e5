// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decorating adapter that records every read and write.

use super::{IoContext, StorageAdapter};
use parking_lot::Mutex;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Kind of adapter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoOp {
    Read,
    Write,
}

/// One recorded adapter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IoRecord {
    pub op: IoOp,
    pub position: u64,
    pub length: usize,
}

impl IoRecord {
    pub fn read(position: u64, length: usize) -> Self {
        Self {
            op: IoOp::Read,
            position,
            length,
        }
    }

    pub fn write(position: u64, length: usize) -> Self {
        Self {
            op: IoOp::Write,
            position,
            length,
        }
    }
}

impl fmt::Display for IoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            IoOp::Read => 'R',
            IoOp::Write => 'W',
        };
        write!(f, "{}({},{})", op, self.position, self.length)
    }
}

/// Shared, ordered log of recorded calls.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    records: Arc<Mutex<Vec<IoRecord>>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, record: IoRecord) {
        self.records.lock().push(record);
    }

    /// Snapshot of all records in call order.
    pub fn records(&self) -> Vec<IoRecord> {
        self.records.lock().clone()
    }

    /// Remove and return all records.
    pub fn take(&self) -> Vec<IoRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Compact rendering, e.g. `R(0,16) W(0,16)`.
    pub fn summary(&self) -> String {
        self.records
            .lock()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Forwards every call to `inner` unchanged after recording it.
#[derive(Debug)]
pub struct TracingAdapter<A> {
    inner: A,
    log: TraceLog,
}

impl<A: StorageAdapter> TracingAdapter<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            log: TraceLog::new(),
        }
    }

    /// Handle on the recorded calls, valid after the adapter is moved.
    pub fn trace(&self) -> TraceLog {
        self.log.clone()
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: StorageAdapter> StorageAdapter for TracingAdapter<A> {
    fn read(&mut self, ctx: &IoContext<'_>, buf: &mut [u8], position: u64) -> io::Result<()> {
        let record = IoRecord::read(position, buf.len());
        log::trace!("[TracingAdapter] {} {}", ctx.root_name(), record);
        self.log.push(record);
        self.inner.read(ctx, buf, position)
    }

    fn write(&mut self, ctx: &IoContext<'_>, buf: &[u8], position: u64) -> io::Result<()> {
        let record = IoRecord::write(position, buf.len());
        log::trace!("[TracingAdapter] {} {}", ctx.root_name(), record);
        self.log.push(record);
        self.inner.write(ctx, buf, position)
    }

    fn size(&self) -> io::Result<u64> {
        self.inner.size()
    }
}
