// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Lazily populated byte window shared by struct and array views.

use crate::error::Result;
use crate::session::Session;

/// Bytes `[position, position + span)` of the resource, read on first use.
#[derive(Debug)]
pub(crate) struct ViewBuffer {
    position: u64,
    span: usize,
    data: Option<Vec<u8>>,
}

impl ViewBuffer {
    pub(crate) fn new(position: u64, span: usize) -> Self {
        Self {
            position,
            span,
            data: None,
        }
    }

    pub(crate) fn position(&self) -> u64 {
        self.position
    }

    pub(crate) fn span(&self) -> usize {
        self.span
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// Populate with a single read covering the whole span, once.
    ///
    /// A failed read leaves the buffer unpopulated.
    pub(crate) fn load(&mut self, session: &Session) -> Result<&mut [u8]> {
        let data = match self.data.take() {
            Some(data) => data,
            None => {
                session.check_span(self.span)?;
                let mut data = vec![0u8; self.span];
                if self.span > 0 {
                    session.read(&mut data, self.position)?;
                }
                data
            }
        };
        Ok(self.data.insert(data).as_mut_slice())
    }

    /// Write the whole buffer back in one call; no-op if never populated.
    pub(crate) fn flush(&self, session: &Session) -> Result<()> {
        match &self.data {
            Some(data) => session.write(data, self.position),
            None => Ok(()),
        }
    }
}
