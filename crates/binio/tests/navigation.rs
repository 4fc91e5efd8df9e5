// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::float_cmp)] // Test assertions with constants
#![allow(clippy::missing_panics_doc)] // Tests panic on failure

//! Layout sizes, alias registration and invalid navigation.

use binio::{
    BinioError, CompoundBuilder, MemoryAdapter, SchemaRegistry, SequenceType, Session, Type,
    BYTE, DOUBLE, FLOAT, INT, SHORT, UBYTE, UNBOUNDED,
};
use std::sync::Arc;

fn point_registry() -> SchemaRegistry {
    let point = CompoundBuilder::new("Point")
        .member("x", DOUBLE)
        .member("y", DOUBLE)
        .build()
        .unwrap();
    let root = CompoundBuilder::new("Polyline")
        .member("closed", BYTE)
        .sequence("points", point.into(), 4)
        .build()
        .unwrap();
    SchemaRegistry::new(root)
}

#[test]
fn test_compound_sizes() {
    let scalars = CompoundBuilder::new("S")
        .member("a", BYTE)
        .member("b", SHORT)
        .member("c", INT)
        .member("d", DOUBLE)
        .build()
        .unwrap();
    assert_eq!(Type::from(scalars).size(), 1 + 2 + 4 + 8);

    let open = CompoundBuilder::new("Open")
        .member("a", INT)
        .unbounded_sequence("rest", UBYTE)
        .build()
        .unwrap();
    assert_eq!(Type::from(open).size(), UNBOUNDED);

    assert_eq!(Type::sequence(FLOAT, 6).size(), 24);
    assert_eq!(Type::unbounded(FLOAT).size(), UNBOUNDED);
    assert_eq!(Type::sequence(Type::unbounded(FLOAT), 2).size(), UNBOUNDED);
}

#[test]
fn test_sequence_names() {
    let inner = Type::sequence(FLOAT, 32);
    let grid = Type::unbounded(inner.clone());
    assert_eq!(grid.name(), "float[32][]");
    assert_eq!(Type::sequence(grid, 8).name(), "float[32][][8]");
    assert_eq!(Type::counted_by(INT, "n").name(), "int[n]");
}

#[test]
fn test_alias_registration() {
    let mut reg = point_registry();
    reg.define("bool", BYTE).unwrap();
    reg.define("bool", BYTE).unwrap();
    assert!(matches!(
        reg.define("bool", SHORT),
        Err(BinioError::AliasConflict { .. })
    ));
    assert_eq!(reg.undefine("bool").unwrap(), BYTE);
    assert!(!reg.is_defined("bool"));
}

#[test]
fn test_unknown_member() {
    let session = Session::open(point_registry(), MemoryAdapter::from_bytes(vec![0u8; 65]));
    let mut root = session.root();
    assert!(matches!(
        root.get_scalar("nonexistent"),
        Err(BinioError::UnknownMember { .. })
    ));
    assert!(matches!(
        root.get_struct("nonexistent"),
        Err(BinioError::UnknownMember { .. })
    ));
}

#[test]
fn test_index_out_of_range() {
    let session = Session::open(point_registry(), MemoryAdapter::from_bytes(vec![0u8; 65]));
    let points = session.root().get_sequence("points").unwrap();
    assert_eq!(points.length().unwrap(), 4);
    assert!(points.get_struct(3).is_ok());
    assert!(matches!(
        points.get_struct(4),
        Err(BinioError::IndexOutOfRange { index: 4, length: 4 })
    ));
}

#[test]
fn test_views_at_explicit_positions() {
    let session = Session::open(point_registry(), MemoryAdapter::from_bytes(vec![0u8; 65]));
    let point = session
        .registry()
        .root()
        .member("points")
        .and_then(|m| m.ty.as_sequence())
        .and_then(|s| s.element().as_compound())
        .cloned()
        .unwrap();

    let mut p = session.struct_at(Arc::clone(&point), 17);
    p.set_scalar("y", 2.0f64).unwrap();
    p.flush().unwrap();

    let points = session.root().get_sequence("points").unwrap();
    assert_eq!(points.get_struct(1).unwrap().get::<f64>("y").unwrap(), 2.0);

    let bytes = session.sequence_at(SequenceType::fixed(UBYTE, 65), 0);
    assert!(bytes.is_bounded());
    let loose = session.sequence_at(SequenceType::unbounded(point.into()), 1);
    assert!(matches!(loose.length(), Err(BinioError::UnboundedLength(_))));
    assert_eq!(session.max_position().unwrap(), 65);
}
