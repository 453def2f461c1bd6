//! `ClassContainer`: a keyed, lazily-processing work registry coordinating
//! resolution/transformation of IR entities across mutually recursive
//! schema references (spec.md §4.3).

use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::CodegenWarning;
use crate::ir::{Class, Status};
use crate::qname::QName;
use crate::transform::{default_pipeline, Transform};

/// A keyed, lazily-processing registry: a multimap from `QName` to an
/// ordered sequence of [`Class`]. A single QName can briefly hold
/// multiple classes differing in `tag` until the merge pass collapses
/// them (spec.md §4.3).
pub struct ClassContainer {
    buckets: IndexMap<QName, Vec<Class>>,
    /// `Rc`-shared rather than owned outright: `process_class` clones the
    /// handle instead of moving the `Vec` out, so a pass that triggers a
    /// nested `process_class` call on a sibling (via `find`/`find_any`)
    /// still sees the real passes instead of an empty pipeline.
    pipeline: Rc<Vec<Box<dyn Transform>>>,
    warnings: Vec<CodegenWarning>,
}

impl ClassContainer {
    /// An empty container with the default transform pipeline
    /// (spec.md §4.4).
    pub fn new() -> Self {
        Self {
            buckets: IndexMap::new(),
            pipeline: Rc::new(default_pipeline()),
            warnings: Vec::new(),
        }
    }

    /// Build a container from a flat class list, preserving insertion
    /// order per key (spec.md §4.3, invariant 1).
    pub fn from_list(classes: Vec<Class>) -> Self {
        let mut container = Self::new();
        container.extend(classes);
        container
    }

    /// Replace the default transform pipeline (SPEC_FULL.md §4.3).
    pub fn set_transform_pipeline(&mut self, passes: Vec<Box<dyn Transform>>) {
        self.pipeline = Rc::new(passes);
    }

    /// Number of distinct QNames held, not number of classes
    /// (spec.md invariant 1: after merge, no two distinct classes share a
    /// `(qname, tag)`, but the count tracked here is pre-merge bucket
    /// count).
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Append classes to their key's bucket, in insertion order.
    pub fn extend(&mut self, classes: impl IntoIterator<Item = Class>) {
        for class in classes {
            self.buckets.entry(class.qname.clone()).or_default().push(class);
        }
    }

    /// Accumulated non-fatal diagnostics (SPEC_FULL.md §4.3).
    pub fn warnings(&self) -> &[CodegenWarning] {
        &self.warnings
    }

    pub fn push_warning(&mut self, warning: CodegenWarning) {
        tracing::warn!(%warning, "codegen warning recorded");
        self.warnings.push(warning);
    }

    /// Run every registered transform pass over a class in sequence, the
    /// first time that class is visited (spec.md §4.4). Idempotent per
    /// class: a class whose status is already past `Raw` is not
    /// reprocessed.
    pub fn process_class(&mut self, qname: &QName, index: usize) {
        let already_done = self
            .buckets
            .get(qname)
            .and_then(|bucket| bucket.get(index))
            .map(|c| c.status != Status::Raw)
            .unwrap_or(true);
        if already_done {
            return;
        }

        {
            let class = &mut self.buckets[qname][index];
            tracing::debug!(qname = %class.qname, "processing class");
            class.advance_status(Status::Processing);
        }

        // Passes run with `&mut self` so they can reach into other
        // buckets (inline a class into a sibling, look up a base type,
        // etc.) through `find`/`find_mut`. Cloning the `Rc` (instead of
        // `mem::take`-ing the `Vec` out of `self`) keeps the pipeline
        // available to any nested `process_class` call a pass triggers
        // through `find` — a still-`Raw` sibling must run the real
        // passes, not an empty one, or it gets stamped `Processed`
        // without ever being flattened/sanitized/field-typed (spec.md
        // §4.3: `find` must leave the candidate in its final shape).
        let pipeline = Rc::clone(&self.pipeline);
        for pass in pipeline.iter() {
            pass.apply(self, qname, index);
        }

        if let Some(class) = self.buckets.get_mut(qname).and_then(|b| b.get_mut(index)) {
            if class.status < Status::Processed {
                class.advance_status(Status::Processed);
            }
        }
    }

    /// Look up a class by QName, running the transform pipeline lazily
    /// on demand and converging even as passes rewrite the bucket
    /// mid-search (spec.md §4.3, the central subtlety).
    ///
    /// 1. Look up the bucket for `qname`; absent means `None`.
    /// 2. For each candidate still `Raw`, process it (may rewrite the
    ///    bucket — re-examine it after each processing call).
    /// 3. Return the first candidate satisfying `predicate` (or any
    ///    candidate, if `predicate` is `None`) whose status is no longer
    ///    `Raw`.
    /// 4. If nothing matched but at least one candidate's status
    ///    advanced this call, restart the scan exactly once more, then
    ///    give up.
    pub fn find(&mut self, qname: &QName, predicate: Option<&dyn Fn(&Class) -> bool>) -> Option<&Class> {
        if !self.buckets.contains_key(qname) {
            return None;
        }

        for _attempt in 0..2 {
            let mut advanced_any = false;
            let mut found_index = None;

            let bucket_len = self.buckets.get(qname).map(Vec::len).unwrap_or(0);
            let mut index = 0;
            while index < bucket_len {
                let was_raw = self
                    .buckets
                    .get(qname)
                    .and_then(|b| b.get(index))
                    .map(|c| c.status == Status::Raw)
                    .unwrap_or(false);

                if was_raw {
                    self.process_class(qname, index);
                    advanced_any = true;
                }

                // Re-read: the bucket may have been rewritten (split,
                // inlined, reordered) by the pass that just ran.
                let current_len = self.buckets.get(qname).map(Vec::len).unwrap_or(0);
                if index >= current_len {
                    break;
                }

                let matches = self
                    .buckets
                    .get(qname)
                    .and_then(|b| b.get(index))
                    .map(|c| predicate.map(|p| p(c)).unwrap_or(true))
                    .unwrap_or(false);

                if matches {
                    found_index = Some(index);
                    break;
                }

                index += 1;
            }

            if let Some(index) = found_index {
                return self.buckets.get(qname).and_then(|b| b.get(index));
            }

            if !advanced_any {
                return None;
            }
            // else: at least one candidate advanced this pass; restart
            // the scan once more (a sibling may now satisfy predicate).
        }

        None
    }

    /// Same as [`ClassContainer::find`] without a predicate.
    pub fn find_any(&mut self, qname: &QName) -> Option<&Class> {
        self.find(qname, None)
    }

    /// In-place removal per spec.md §4.6: rewrites buckets to contain
    /// only survivors, applying the delegated filter policy.
    pub fn filter_classes(&mut self, fallback_to_simple_types: bool) {
        crate::filter::filter_classes(self, fallback_to_simple_types);
    }

    /// Deterministic iteration over surviving classes: insertion order of
    /// QNames, ties broken by original bucket position (spec.md §5).
    pub fn class_list(&self) -> Vec<&Class> {
        self.buckets.values().flatten().collect()
    }

    /// Mutable access to the raw bucket map, for transform passes and the
    /// filter that need to rewrite buckets directly.
    pub(crate) fn buckets_mut(&mut self) -> &mut IndexMap<QName, Vec<Class>> {
        &mut self.buckets
    }

    pub(crate) fn buckets(&self) -> &IndexMap<QName, Vec<Class>> {
        &self.buckets
    }
}

impl Default for ClassContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq<IndexMap<QName, Vec<Class>>> for ClassContainer {
    fn eq(&self, other: &IndexMap<QName, Vec<Class>>) -> bool {
        &self.buckets == other
    }
}
