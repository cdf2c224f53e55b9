//! The field-mapping engine.
//!
//! Turns a loosely-typed external payload into a validated domain object in
//! four steps: path-addressed reads from the raw tree ([`path`]), declarative
//! field mapping with per-path transforms ([`compiler`]), conflict resolution
//! when transforms collide ([`merge`]), and a final schema gate owned by the
//! [`domain`](crate::domain) module.
//!
//! The engine is synchronous and pure: no I/O, no shared mutable state, no
//! retries. Compiled mappers are immutable and freely shareable.

pub mod compiler;
pub mod merge;
pub mod path;

pub use compiler::{CompileError, FieldMap, Mapper, Transform, Transforms};
pub use merge::merge;
