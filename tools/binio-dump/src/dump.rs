// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursive conversion of views into JSON values.

use binio::{ArrayView, ScalarValue, StructView, Type};
use serde_json::{Map, Value};

/// Limits applied while walking a record.
#[derive(Debug, Clone, Copy)]
pub struct DumpOptions {
    /// Elements shown per sequence before truncating.
    pub max_elements: usize,
}

pub fn scalar_to_json(value: ScalarValue) -> Value {
    match value {
        ScalarValue::I8(v) => Value::from(v),
        ScalarValue::U8(v) => Value::from(v),
        ScalarValue::I16(v) => Value::from(v),
        ScalarValue::U16(v) => Value::from(v),
        ScalarValue::I32(v) => Value::from(v),
        ScalarValue::U32(v) => Value::from(v),
        ScalarValue::I64(v) => Value::from(v),
        ScalarValue::U64(v) => Value::from(v),
        ScalarValue::F32(v) => Value::from(f64::from(v)),
        ScalarValue::F64(v) => Value::from(v),
    }
}

/// Every member of `view`, in declaration order.
pub fn dump_struct(view: &mut StructView, opts: DumpOptions) -> binio::Result<Value> {
    let compound = view.compound_type().clone();
    let mut map = Map::new();
    for member in compound.members() {
        let value = match &member.ty {
            Type::Scalar(_) => scalar_to_json(view.get_scalar(&member.name)?),
            Type::Compound(_) => dump_struct(&mut view.get_struct(&member.name)?, opts)?,
            Type::Sequence(_) => dump_array(view.get_sequence(&member.name)?, opts)?,
        };
        map.insert(member.name.clone(), value);
    }
    Ok(Value::Object(map))
}

/// Elements of `view`; an unbounded view is resolved against the end of the
/// resource.
pub fn dump_array(view: ArrayView, opts: DumpOptions) -> binio::Result<Value> {
    let mut view = if view.is_bounded() {
        view
    } else {
        match view.element_type().fixed_size() {
            Some(size) if size > 0 => {
                let end = view.session().max_position()?;
                let remaining = end.saturating_sub(view.position()) / size as u64;
                let length = usize::try_from(remaining).unwrap_or(usize::MAX);
                log::debug!(
                    "[dump_array] resolved {} to {} elements",
                    view.sequence_type().name(),
                    length
                );
                view.resolve(length)?
            }
            _ => return Ok(Value::String(format!("<{}>", view.sequence_type().name()))),
        }
    };

    let length = view.length()?;
    let shown = length.min(opts.max_elements);
    let mut items = Vec::with_capacity(shown + 1);
    match view.element_type().clone() {
        Type::Scalar(_) if shown < length => {
            // avoid loading the whole span for a preview
            let element = view.sequence_type().element().clone();
            let preview = view.session().sequence_at(
                binio::SequenceType::fixed(element, shown),
                view.position(),
            );
            return dump_truncated(preview, length, opts);
        }
        Type::Scalar(_) => {
            for i in 0..shown {
                items.push(scalar_to_json(view.get_scalar(i)?));
            }
        }
        Type::Compound(_) => {
            for i in 0..shown {
                items.push(dump_struct(&mut view.get_struct(i)?, opts)?);
            }
        }
        Type::Sequence(_) => {
            for i in 0..shown {
                items.push(dump_array(view.get_sequence(i)?, opts)?);
            }
        }
    }
    if shown < length {
        items.push(Value::String(format!("... {} more", length - shown)));
    }
    Ok(Value::Array(items))
}

fn dump_truncated(preview: ArrayView, length: usize, opts: DumpOptions) -> binio::Result<Value> {
    let shown = preview.length()?;
    let mut value = dump_array(preview, opts)?;
    if let Value::Array(items) = &mut value {
        items.push(Value::String(format!("... {} more", length - shown)));
    }
    Ok(value)
}
