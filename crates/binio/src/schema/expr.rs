// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type expressions: `base` followed by `[N]`, `[]` or `[member]` suffixes.
//!
//! Suffixes apply innermost-first, so an expression reads the same as the
//! generated type name: `float[32][]` is an unbounded sequence of 32-float
//! sequences.

use crate::error::{BinioError, Result};
use crate::types::{ScalarType, SequenceCount, SequenceType, Type};

/// Parse `expr`, resolving non-scalar base names through `resolve`.
pub fn parse_type_expr<F>(expr: &str, resolve: F) -> Result<Type>
where
    F: Fn(&str) -> Result<Type>,
{
    let expr = expr.trim();
    let (base, mut rest) = match expr.find('[') {
        Some(i) => (expr[..i].trim(), &expr[i..]),
        None => (expr, ""),
    };
    if base.is_empty() {
        return Err(BinioError::Document(format!(
            "type expression '{}' has no base type",
            expr
        )));
    }

    let mut ty = match ScalarType::from_name(base) {
        Some(scalar) => Type::Scalar(scalar),
        None => resolve(base)?,
    };

    while !rest.is_empty() {
        let close = rest
            .find(']')
            .filter(|_| rest.starts_with('['))
            .ok_or_else(|| {
                BinioError::Document(format!("malformed suffix '{}' in '{}'", rest, expr))
            })?;
        let count = parse_count(rest[1..close].trim(), expr)?;
        ty = SequenceType::new(ty, count).into();
        rest = rest[close + 1..].trim_start();
    }
    Ok(ty)
}

fn parse_count(inner: &str, expr: &str) -> Result<SequenceCount> {
    if inner.is_empty() {
        return Ok(SequenceCount::Unbounded);
    }
    if inner.bytes().all(|b| b.is_ascii_digit()) {
        return inner
            .parse()
            .map(SequenceCount::Fixed)
            .map_err(|_| BinioError::Document(format!("count '{}' too large in '{}'", inner, expr)));
    }
    let is_ident = inner
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && inner.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_ident {
        Ok(SequenceCount::Member(inner.to_string()))
    } else {
        Err(BinioError::Document(format!(
            "invalid sequence count '{}' in '{}'",
            inner, expr
        )))
    }
}
