// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema documents (YAML or JSON) describing a whole record format.
//!
//! # Example YAML
//!
//! ```yaml
//! endianness: big
//! types:
//!   - name: Point
//!     members:
//!       - { name: x, type: double }
//!       - { name: y, type: double }
//!   - name: Header
//!     members:
//!       - { name: count, type: uint }
//!       - { name: points, type: "Point[count]" }
//! aliases:
//!   - { name: bool, type: byte }
//! root: Header
//! ```
//!
//! Types are defined in order; a definition may only reference scalars and
//! names defined before it.

mod expr;

pub use expr::parse_type_expr;

use crate::error::{BinioError, Result};
use crate::registry::SchemaRegistry;
use crate::types::{CompoundType, Endianness, Member, Type};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Serialization format of a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// `.json` files are JSON, anything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Root document structure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    /// `big` (default) or `little`.
    #[serde(default)]
    pub endianness: Option<String>,

    /// Compound definitions, in dependency order.
    #[serde(default)]
    pub types: Vec<TypeDef>,

    /// Extra aliases bound to type expressions.
    #[serde(default)]
    pub aliases: Vec<AliasDef>,

    /// Name of the root compound.
    pub root: String,
}

/// A compound definition.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDef {
    pub name: String,
    pub members: Vec<MemberDef>,
}

/// A compound member.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// An alias bound to a type expression.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Parse a document from text.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<SchemaDocument> {
    match format {
        DocumentFormat::Yaml => serde_yaml::from_str(text)
            .map_err(|e| BinioError::Document(format!("failed to parse YAML: {}", e))),
        DocumentFormat::Json => serde_json::from_str(text)
            .map_err(|e| BinioError::Document(format!("failed to parse JSON: {}", e))),
    }
}

/// Build a registry from document text.
pub fn load_str(text: &str, format: DocumentFormat) -> Result<SchemaRegistry> {
    build_registry(&parse_document(text, format)?)
}

/// Build a registry from a document file.
pub fn load_path(path: impl AsRef<Path>) -> Result<SchemaRegistry> {
    let path = path.as_ref();
    log::debug!("[schema::load_path] {}", path.display());
    let text = fs::read_to_string(path)?;
    load_str(&text, DocumentFormat::from_path(path))
}

/// Turn a parsed document into a registry.
pub fn build_registry(doc: &SchemaDocument) -> Result<SchemaRegistry> {
    let endianness = match doc.endianness.as_deref() {
        None => crate::config::DEFAULT_ENDIANNESS,
        Some(s) => Endianness::parse(s)
            .ok_or_else(|| BinioError::Document(format!("unknown endianness '{}'", s)))?,
    };

    // Definitions in document order; later ones may refer to earlier ones.
    let mut defined: Vec<(String, Type)> = Vec::new();
    let mut table: HashMap<String, Type> = HashMap::new();
    let resolve = |table: &HashMap<String, Type>, name: &str| {
        table
            .get(name)
            .cloned()
            .ok_or_else(|| BinioError::UnknownAlias(name.to_string()))
    };

    for def in &doc.types {
        let members = def
            .members
            .iter()
            .map(|m| {
                parse_type_expr(&m.ty, |name| resolve(&table, name))
                    .map(|ty| Member::new(m.name.clone(), ty))
            })
            .collect::<Result<Vec<_>>>()?;
        let ty: Type = CompoundType::new(def.name.clone(), members)?.into();
        if table.insert(def.name.clone(), ty.clone()).is_some() {
            return Err(BinioError::Document(format!(
                "type '{}' defined twice",
                def.name
            )));
        }
        defined.push((def.name.clone(), ty));
    }

    for alias in &doc.aliases {
        let ty = parse_type_expr(&alias.ty, |name| resolve(&table, name))?;
        if let Some(existing) = table.get(&alias.name) {
            if *existing != ty {
                return Err(BinioError::AliasConflict {
                    name: alias.name.clone(),
                    existing: existing.name(),
                    incoming: ty.name(),
                });
            }
            continue;
        }
        table.insert(alias.name.clone(), ty.clone());
        defined.push((alias.name.clone(), ty));
    }

    let root = match resolve(&table, &doc.root)? {
        Type::Compound(c) => c,
        other => {
            return Err(BinioError::Document(format!(
                "root '{}' must be a compound, found {}",
                doc.root,
                other.name()
            )))
        }
    };

    let mut registry = SchemaRegistry::new(root).with_endianness(endianness);
    for (name, ty) in defined {
        registry.define(name, ty)?;
    }
    log::debug!(
        "[schema::build_registry] root={} aliases={}",
        doc.root,
        registry.aliases().len()
    );
    Ok(registry)
}
