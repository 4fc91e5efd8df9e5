// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! binio: typed, lazy navigation of structured binary files.
//!
//! Describe a record layout once with scalars, sequences and compounds,
//! then read and write individual members in place without decoding the
//! whole file.
//!
//! - [`types`]: layout description (`Type`, `CompoundBuilder`)
//! - [`registry`]: alias table, root record and byte order
//! - [`io`]: storage adapters (memory, file, tracing)
//! - [`session`] / [`view`]: lazily buffered struct and array views
//! - `schema`: YAML/JSON schema documents (feature `documents`)
//!
//! # Quick Start
//!
//! ```rust
//! use binio::{CompoundBuilder, MemoryAdapter, SchemaRegistry, Session, DOUBLE, INT};
//!
//! let point = CompoundBuilder::new("Point")
//!     .member("x", DOUBLE)
//!     .member("y", DOUBLE)
//!     .build()?;
//! let header = CompoundBuilder::new("Header")
//!     .member("id", INT)
//!     .sequence("points", point.into(), 2)
//!     .build()?;
//!
//! let memory = MemoryAdapter::from_bytes(vec![0u8; 36]);
//! let session = Session::open(SchemaRegistry::new(header), memory.clone());
//!
//! let mut root = session.root();
//! root.set_scalar("id", 7i32)?;
//! root.flush()?;
//!
//! let points = session.root().get_sequence("points")?;
//! let mut second = points.get_struct(1)?;
//! second.set_scalar("y", 1.5f64)?;
//! second.flush()?;
//!
//! assert_eq!(memory.to_bytes()[3], 7);
//! assert_eq!(session.root().get_sequence("points")?.get_struct(1)?.get::<f64>("y")?, 1.5);
//! # Ok::<(), binio::BinioError>(())
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod registry;
#[cfg(feature = "documents")]
pub mod schema;
pub mod session;
pub mod types;
pub mod view;

pub use config::SessionConfig;
pub use error::{BinioError, Result};
pub use io::{FileAdapter, IoContext, MemoryAdapter, StorageAdapter, TracingAdapter};
pub use registry::SchemaRegistry;
pub use session::Session;
pub use types::{
    CompoundBuilder, CompoundType, Endianness, FromScalar, Member, ScalarType, ScalarValue,
    SequenceCount, SequenceType, Type, BYTE, DOUBLE, FLOAT, INT, LONG, SHORT, UBYTE, UINT, ULONG,
    UNBOUNDED, USHORT,
};
pub use view::{ArrayView, StructView};
