//! # schemabind
//!
//! Intermediate representation and class-graph analyzer for an
//! XSD/WSDL data-binding code generator.
//!
//! A parser collaborator (not part of this crate) reads XSD/WSDL
//! source into a flat list of [`ir::Class`] nodes; this crate resolves
//! cross-references between them, runs the transform pipeline, and
//! filters the result down to what should actually be emitted.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! pipeline  → top-level orchestration entry point
//!   ↓
//! wsdl      → WSDL definitions document model + merge protocol
//! adapter   → pluggable binding-shape strategy for the emitter
//! filter    → keep-worth-emitting class selection
//!   ↓
//! transform → ordered IR→IR rewrite passes
//!   ↓
//! container → lazily-processing class registry (the central type)
//!   ↓
//! ir        → Class / Attribute / Extension IR nodes
//! qname     → the IR's sole cross-reference key
//! error     → fatal error taxonomy + non-fatal codegen warnings
//!   ↓
//! core      → string interning
//! base      → Span/Position source locations
//! ```

/// Foundation types: source `Span`/`Position`.
pub mod base;

/// String interning shared across the IR.
pub mod core;

/// Qualified names: the IR's sole cross-reference key.
pub mod qname;

/// Error taxonomy: fatal errors and non-fatal codegen warnings.
pub mod error;

/// The intermediate representation: `Class`, `Attribute`, `Extension`.
pub mod ir;

/// `ClassContainer`: the lazily-processing class registry.
pub mod container;

/// Transform passes run over the container in a fixed order.
pub mod transform;

/// Filter: keep-worth-emitting class selection.
pub mod filter;

/// WSDL `definitions` document model and merge protocol.
pub mod wsdl;

/// Pluggable binding-shape strategy for the emitter.
pub mod adapter;

/// Top-level generation entry point.
pub mod pipeline;

/// A minimal reference XSD reader for building test fixtures.
#[cfg(feature = "xml-fixtures")]
pub mod fixtures;

pub use container::ClassContainer;
pub use error::{CodegenWarning, GenerationError};
pub use ir::{AttrTag, AttrType, Attribute, Class, Extension, Status, Tag};
pub use pipeline::{generate, generate_with_adapter, GenerationResult, GeneratorConfig};
pub use qname::QName;
