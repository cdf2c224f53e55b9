//! Compiles a declarative field map plus per-path transforms into a reusable
//! mapper from raw provider payloads to validated domain objects.
//!
//! A [`Mapper`] is built once per provider and entity shape, then shared:
//! it holds no per-call state, so one instance serves any number of
//! concurrent callers. Each invocation assembles a fresh output tree,
//! resolves transform collisions through [`merge`](super::merge::merge), and
//! gates the result through the target schema before anything downstream is
//! allowed to see it.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use super::{merge, path};
use crate::domain::Schema;
use crate::error::{Error, MappingError};

/// A pure derivation attached to an internal path.
///
/// Receives the value currently written at that path (if any) and the whole
/// raw payload; returns the new value, or a message that surfaces as a
/// [`MappingError`] naming the path.
pub type Transform = Arc<dyn Fn(Option<&Value>, &Value) -> Result<Value, String> + Send + Sync>;

/// Ordered external-path → internal-path correspondence.
///
/// Declaration order is preserved; each entry writes a distinct internal
/// path, which [`Mapper::compile`] enforces. Collisions at one internal
/// path are only legal via transforms, where the merge resolver governs
/// them.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `external` in the raw payload onto `internal` in the output.
    pub fn field(mut self, external: impl Into<String>, internal: impl Into<String>) -> Self {
        self.entries.push((external.into(), internal.into()));
        self
    }

    /// Internal paths in declaration order.
    pub fn internal_paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, internal)| internal.as_str())
    }
}

/// Ordered transform registrations.
///
/// Several registrations may target the same internal path; they are
/// applied in registration order, with later outputs merged onto earlier
/// ones.
#[derive(Clone, Default)]
pub struct Transforms {
    entries: Vec<(String, Transform)>,
}

impl Transforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` against `internal`.
    pub fn derive<F>(mut self, internal: impl Into<String>, f: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.entries.push((internal.into(), Arc::new(f)));
        self
    }
}

/// The field map itself is malformed; raised when the mapper is built,
/// before any payload is seen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate internal path `{0}` in field map")]
pub struct CompileError(pub String);

/// A compiled raw-payload → domain-object function.
///
/// Immutable once built; safe to share across threads and reuse across
/// calls.
pub struct Mapper<T: Schema> {
    field_map: FieldMap,
    transforms: Vec<(String, Transform)>,
    _schema: PhantomData<fn() -> T>,
}

// Transforms are opaque closures; show the declarative parts instead.
impl<T: Schema> fmt::Debug for Mapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("schema", &T::NAME)
            .field("field_map", &self.field_map)
            .field("transforms", &self.transforms.len())
            .finish()
    }
}

impl<T: Schema> Mapper<T> {
    /// Build a mapper for schema `T` from a field map and transforms.
    ///
    /// Fails only if two field-map entries target the same internal path;
    /// schema conformance is checked per call, in [`Mapper::map`].
    pub fn compile(field_map: FieldMap, transforms: Transforms) -> Result<Self, CompileError> {
        let mut seen = std::collections::HashSet::new();
        for internal in field_map.internal_paths() {
            if !seen.insert(internal) {
                return Err(CompileError(internal.to_string()));
            }
        }
        Ok(Self {
            field_map,
            transforms: transforms.entries,
            _schema: PhantomData,
        })
    }

    /// Rewrite `raw` into a validated `T`.
    ///
    /// An absent external path still writes its internal path (as null);
    /// schema defaults are what rescue required-with-default fields. A
    /// failing transform surfaces as [`Error::Mapping`], a schema violation
    /// as [`Error::Validation`].
    pub fn map(&self, raw: &Value) -> Result<T, Error> {
        let output = self.assemble(raw)?;
        Ok(T::validate(&output)?)
    }

    /// Build the output tree without the schema gate. Every internal path
    /// in the field map is written, absent external values as null.
    pub(crate) fn assemble(&self, raw: &Value) -> Result<Value, Error> {
        let mut output = Value::Object(serde_json::Map::new());
        let mut applied = vec![false; self.transforms.len()];

        // Field-map pass: each entry writes a distinct internal path. The
        // first transform registered for a mapped path runs inline here.
        for (external, internal) in &self.field_map.entries {
            let raw_value = path::get(raw, external).cloned();
            let value = match self.first_unapplied(internal, &mut applied) {
                Some(transform) => (transform.as_ref())(raw_value.as_ref(), raw)
                    .map_err(|message| MappingError::new(internal.clone(), message))?,
                None => raw_value.unwrap_or(Value::Null),
            };
            path::set(&mut output, internal, value);
        }

        // Derivation pass: remaining transforms compute paths not sourced
        // from a single external field; collisions go through the resolver.
        for (idx, (internal, transform)) in self.transforms.iter().enumerate() {
            if applied[idx] {
                continue;
            }
            let current = path::get(&output, internal).cloned();
            let new = (transform.as_ref())(current.as_ref(), raw)
                .map_err(|message| MappingError::new(internal.clone(), message))?;
            let resolved = match current {
                Some(existing) => merge::merge(existing, new),
                None => new,
            };
            path::set(&mut output, internal, resolved);
        }

        Ok(output)
    }

    fn first_unapplied(&self, internal: &str, applied: &mut [bool]) -> Option<&Transform> {
        let idx = self
            .transforms
            .iter()
            .enumerate()
            .position(|(i, (p, _))| !applied[i] && p == internal)?;
        applied[idx] = true;
        Some(&self.transforms[idx].1)
    }
}
