// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema registry: named type aliases bound to one root compound.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{BinioError, Result};
use crate::types::{CompoundType, Endianness, Type};

// ---------------------------------------------------------------------------
// SchemaRegistry
// ---------------------------------------------------------------------------

/// Alias table plus the root record type of a binary format.
///
/// Aliases are naming sugar only; they never change offset computation.
/// A registry may delegate unknown names to a basis registry, which lets
/// format variants share a common set of definitions.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    root: Arc<CompoundType>,
    endianness: Endianness,
    aliases: HashMap<String, Type>,
    basis: Option<Arc<SchemaRegistry>>,
}

impl SchemaRegistry {
    /// Create a registry for `root` with big-endian scalars.
    pub fn new(root: impl Into<Arc<CompoundType>>) -> Self {
        Self {
            root: root.into(),
            endianness: crate::config::DEFAULT_ENDIANNESS,
            aliases: HashMap::new(),
            basis: None,
        }
    }

    /// Set the byte order used by binary scalars.
    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    /// Fall back to `basis` for names not defined locally.
    pub fn with_basis(mut self, basis: Arc<SchemaRegistry>) -> Self {
        self.basis = Some(basis);
        self
    }

    pub fn root(&self) -> &Arc<CompoundType> {
        &self.root
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn basis(&self) -> Option<&Arc<SchemaRegistry>> {
        self.basis.as_ref()
    }

    /// Bind `name` to `ty`.
    ///
    /// Re-defining a name with a structurally equal type is a no-op; binding
    /// it to a different type fails with `AliasConflict`.
    pub fn define(&mut self, name: impl Into<String>, ty: impl Into<Type>) -> Result<()> {
        let name = name.into();
        let ty = ty.into();
        if let Some(existing) = self.aliases.get(&name) {
            if *existing == ty {
                return Ok(());
            }
            return Err(BinioError::AliasConflict {
                name,
                existing: existing.name(),
                incoming: ty.name(),
            });
        }
        log::debug!("[SchemaRegistry::define] {} -> {}", name, ty);
        self.aliases.insert(name, ty);
        Ok(())
    }

    /// Resolve `name`, consulting the basis registry if needed.
    pub fn lookup(&self, name: &str) -> Result<&Type> {
        match self.aliases.get(name) {
            Some(ty) => Ok(ty),
            None => match &self.basis {
                Some(basis) => basis.lookup(name),
                None => Err(BinioError::UnknownAlias(name.to_string())),
            },
        }
    }

    /// Returns `true` if `name` resolves here or in the basis registry.
    pub fn is_defined(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
            || self.basis.as_ref().is_some_and(|b| b.is_defined(name))
    }

    /// Remove a local alias and return its type.
    pub fn undefine(&mut self, name: &str) -> Result<Type> {
        let ty = self
            .aliases
            .remove(name)
            .ok_or_else(|| BinioError::UnknownAlias(name.to_string()))?;
        log::debug!("[SchemaRegistry::undefine] {}", name);
        Ok(ty)
    }

    /// Local alias names, sorted for determinism.
    pub fn aliases(&self) -> Vec<String> {
        let mut names: Vec<String> = self.aliases.keys().cloned().collect();
        names.sort();
        names
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
