// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! File-backed storage adapter.

use super::{IoContext, StorageAdapter};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Storage adapter over a seekable file.
#[derive(Debug)]
pub struct FileAdapter {
    file: File,
}

impl FileAdapter {
    /// Open an existing file read-only.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            file: File::open(path)?,
        })
    }

    /// Open an existing file for reading and writing.
    pub fn open_rw(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self { file })
    }

    /// Create (or truncate) a file for reading and writing.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(Self { file })
    }

    /// Wrap an already opened file.
    pub fn from_file(file: File) -> Self {
        Self { file }
    }

    pub fn into_inner(self) -> File {
        self.file
    }
}

impl StorageAdapter for FileAdapter {
    fn read(&mut self, _ctx: &IoContext<'_>, buf: &mut [u8], position: u64) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(position))?;
        self.file.read_exact(buf)
    }

    fn write(&mut self, _ctx: &IoContext<'_>, buf: &[u8], position: u64) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(position))?;
        self.file.write_all(buf)?;
        self.file.flush()
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }
}
