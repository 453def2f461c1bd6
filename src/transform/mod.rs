//! Transform passes: an ordered set of IR→IR rewrites run once per class,
//! the first time that class is visited (spec.md §4.4).
//!
//! Each pass sets `status = Processed` on completion (done by
//! [`crate::container::ClassContainer::process_class`] once every
//! registered pass has run); a pass that inlines a class into its parent
//! sets that class's status to `Flattened` itself.

mod calculate_field_types;
mod flatten_enumerations;
mod flatten_extensions;
mod merge_substitution_groups;
mod resolve_forward_references;
mod sanitize_names;

pub mod designate_dependency_order;

pub use calculate_field_types::CalculateFieldTypes;
pub use flatten_enumerations::FlattenEnumerations;
pub use flatten_extensions::FlattenExtensions;
pub use merge_substitution_groups::MergeSubstitutionGroups;
pub use resolve_forward_references::ResolveForwardReferences;
pub use sanitize_names::SanitizeNames;

use crate::container::ClassContainer;
use crate::qname::QName;

/// A single IR→IR rewrite, registered against the container and run in
/// sequence by `process_class` (spec.md §4.4).
pub trait Transform {
    fn name(&self) -> &'static str;

    /// Mutate the class at `(qname, index)`. Implementations must check
    /// the entry still exists before touching it — an earlier pass in
    /// the same pipeline run may have inlined or removed it.
    fn apply(&self, container: &mut ClassContainer, qname: &QName, index: usize);
}

/// The fixed pass order (spec.md §4.4, items 1-6). Item 7
/// ("designate abstract and dependency order") runs once over the whole
/// graph after filtering, not per-class — see
/// [`designate_dependency_order`].
pub fn default_pipeline() -> Vec<Box<dyn Transform>> {
    vec![
        Box::new(FlattenEnumerations),
        Box::new(FlattenExtensions),
        Box::new(ResolveForwardReferences),
        Box::new(SanitizeNames::with_reserved_words(
            crate::adapter::RUST_RESERVED_WORDS,
        )),
        Box::new(MergeSubstitutionGroups),
        Box::new(CalculateFieldTypes),
    ]
}
