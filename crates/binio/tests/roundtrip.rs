// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::float_cmp)] // Test assertions with constants
#![allow(clippy::cast_possible_truncation)] // Test parameters
#![allow(clippy::missing_panics_doc)] // Tests panic on failure

//! Write, flush, export the bytes, then read them back through a fresh session.

use binio::{
    CompoundBuilder, CompoundType, Endianness, MemoryAdapter, SchemaRegistry, ScalarType, Session,
    Type, BYTE, DOUBLE, FLOAT, INT, LONG, SHORT, UBYTE, UINT, ULONG, USHORT,
};

fn all_scalars() -> CompoundType {
    CompoundBuilder::new("AllScalars")
        .member("b", BYTE)
        .member("ub", UBYTE)
        .member("s", SHORT)
        .member("us", USHORT)
        .member("i", INT)
        .member("ui", UINT)
        .member("l", LONG)
        .member("ul", ULONG)
        .member("f", FLOAT)
        .member("d", DOUBLE)
        .build()
        .unwrap()
}

fn reopen(memory: &MemoryAdapter, registry: SchemaRegistry) -> Session {
    Session::open(registry, MemoryAdapter::from_bytes(memory.to_bytes()))
}

fn roundtrip_all_scalars(order: Endianness) {
    let registry = SchemaRegistry::new(all_scalars()).with_endianness(order);
    assert_eq!(Type::from(registry.root().clone()).size(), 42);

    let memory = MemoryAdapter::from_bytes(vec![0u8; 42]);
    let session = Session::open(registry.clone(), memory.clone());
    let mut root = session.root();
    root.set_scalar("b", -12i8).unwrap();
    root.set_scalar("ub", 250u8).unwrap();
    root.set_scalar("s", -30_000i16).unwrap();
    root.set_scalar("us", 60_000u16).unwrap();
    root.set_scalar("i", i32::MIN).unwrap();
    root.set_scalar("ui", u32::MAX).unwrap();
    root.set_scalar("l", -9_007_199_254_740_993i64).unwrap();
    root.set_scalar("ul", u64::MAX - 1).unwrap();
    root.set_scalar("f", 0.1f32).unwrap();
    root.set_scalar("d", std::f64::consts::PI).unwrap();
    root.flush().unwrap();

    let mut root = reopen(&memory, registry).root();
    assert_eq!(root.get::<i8>("b").unwrap(), -12);
    assert_eq!(root.get::<u8>("ub").unwrap(), 250);
    assert_eq!(root.get::<i16>("s").unwrap(), -30_000);
    assert_eq!(root.get::<u16>("us").unwrap(), 60_000);
    assert_eq!(root.get::<i32>("i").unwrap(), i32::MIN);
    assert_eq!(root.get::<u32>("ui").unwrap(), u32::MAX);
    assert_eq!(root.get::<i64>("l").unwrap(), -9_007_199_254_740_993);
    assert_eq!(root.get::<u64>("ul").unwrap(), u64::MAX - 1);
    assert_eq!(root.get::<f32>("f").unwrap(), 0.1);
    assert!((root.get::<f64>("d").unwrap() - std::f64::consts::PI).abs() < 1e-10);
}

#[test]
fn test_roundtrip_big_endian() {
    roundtrip_all_scalars(Endianness::Big);
}

#[test]
fn test_roundtrip_little_endian() {
    roundtrip_all_scalars(Endianness::Little);
}

#[test]
fn test_big_endian_byte_layout() {
    let memory = MemoryAdapter::from_bytes(vec![0u8; 42]);
    let session = Session::open(SchemaRegistry::new(all_scalars()), memory.clone());
    let mut root = session.root();
    root.set_scalar("s", 0x0102i16).unwrap();
    root.set_scalar("i", 0x0A0B_0C0Di32).unwrap();
    root.flush().unwrap();

    let bytes = memory.to_bytes();
    assert_eq!(&bytes[2..4], &[0x01, 0x02]);
    assert_eq!(&bytes[6..10], &[0x0A, 0x0B, 0x0C, 0x0D]);
}

#[test]
fn test_roundtrip_random_records() {
    let record = CompoundBuilder::new("Sample")
        .member("id", UINT)
        .member("value", DOUBLE)
        .member("flag", BYTE)
        .build()
        .unwrap();
    let root = CompoundBuilder::new("Log")
        .member("count", INT)
        .counted_sequence("samples", record.into(), "count")
        .build()
        .unwrap();
    let registry = SchemaRegistry::new(root);

    let mut rng = fastrand::Rng::with_seed(0x5eed);
    let n = 20usize;
    let expected: Vec<(u32, f64, i8)> = (0..n)
        .map(|_| (rng.u32(..), rng.f64() * 1e6 - 5e5, rng.i8(..)))
        .collect();

    let memory = MemoryAdapter::from_bytes(vec![0u8; 4 + 13 * n]);
    let session = Session::open(registry.clone(), memory.clone());
    let mut header = session.root();
    header.set_scalar("count", n as i32).unwrap();
    header.flush().unwrap();

    let samples = session.root().get_sequence("samples").unwrap();
    assert_eq!(samples.length().unwrap(), n);
    for (i, (id, value, flag)) in expected.iter().enumerate() {
        let mut sample = samples.get_struct(i).unwrap();
        assert_eq!(sample.position(), 4 + 13 * i as u64);
        sample.set_scalar("id", *id).unwrap();
        sample.set_scalar("value", *value).unwrap();
        sample.set_scalar("flag", *flag).unwrap();
        sample.flush().unwrap();
    }
    let session = reopen(&memory, registry);
    let samples = session.root().get_sequence("samples").unwrap();
    for (i, (id, value, flag)) in expected.iter().enumerate() {
        let mut sample = samples.get_struct(i).unwrap();
        assert_eq!(sample.get::<u32>("id").unwrap(), *id);
        assert!((sample.get::<f64>("value").unwrap() - value).abs() < 1e-10);
        assert_eq!(sample.get::<i8>("flag").unwrap(), *flag);
    }
}

#[test]
fn test_ascii_numeric_fields() {
    let root = CompoundBuilder::new("Card")
        .member("year", ScalarType::AsciiInt(4))
        .member("scale", ScalarType::AsciiFloat(10))
        .build()
        .unwrap();
    let registry = SchemaRegistry::new(root);
    let memory = MemoryAdapter::from_bytes(b"  87  1.5D+03 ".to_vec());
    let session = Session::open(registry, memory.clone());

    let mut card = session.root();
    assert_eq!(card.span(), 14);
    assert_eq!(card.get::<i64>("year").unwrap(), 87);
    assert_eq!(card.get::<f64>("scale").unwrap(), 1500.0);

    card.set_scalar("year", 2024i64).unwrap();
    card.set_scalar("scale", 0.25f64).unwrap();
    card.flush().unwrap();
    assert_eq!(memory.to_bytes(), b"2024      0.25".to_vec());
}
