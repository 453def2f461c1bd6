//! Class: the node IR (spec.md §3.1, §3.2).

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::base::Span;
use crate::core::IStr;
use crate::ir::attribute::{Attribute, AttrTag};
use crate::ir::extension::Extension;
use crate::qname::QName;

/// Which XSD/WSDL construct produced a [`Class`]; used for emission
/// policy and tie-breaks when classes share a QName (spec.md invariant 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Element,
    ComplexType,
    SimpleType,
    BindingMessage,
}

/// Transform lifecycle. Monotonic: a class is never demoted
/// (spec.md invariant 4). Declaration order doubles as the lifecycle
/// order so `Status` derives `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Raw,
    Processing,
    Processed,
    Flattened,
}

/// A node in the IR: a named, typed, possibly-parameterized record with
/// attributes, inner classes, and inheritance links.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub qname: QName,
    pub tag: Tag,
    pub status: Status,
    pub abstract_: bool,
    pub mixed: bool,
    pub nillable: bool,
    pub namespace: Option<String>,
    /// Prefix → URI declared in scope where this class was read from,
    /// so a `Definitions` merged from multiple documents can still
    /// resolve what a `tns:`-style prefix meant at the class's origin
    /// (SPEC_FULL.md §3.1).
    pub namespace_map: IndexMap<IStr, IStr>,
    pub location: Option<Span>,
    /// Insertion order is semantic: it is the order emitted
    /// (spec.md invariant 3).
    pub attrs: Vec<Attribute>,
    pub extensions: Vec<Extension>,
    /// Nested classes declared in-place (e.g. anonymous complex types).
    pub inner: Vec<Class>,
    /// Non-owning identity of the enclosing class, set by [`Class::push_inner`]
    /// when this class is nested. Never dereferenced directly — resolved
    /// through [`Class::parent_map`] (spec.md §9).
    pub parent: Option<QName>,
    pub substitutions: std::collections::HashSet<QName>,
    pub meta: HashMap<String, String>,
}

impl Class {
    pub fn new(qname: QName, tag: Tag) -> Self {
        Self {
            qname,
            tag,
            status: Status::Raw,
            abstract_: false,
            mixed: false,
            nillable: false,
            namespace: None,
            namespace_map: IndexMap::new(),
            location: None,
            attrs: Vec::new(),
            extensions: Vec::new(),
            inner: Vec::new(),
            parent: None,
            substitutions: std::collections::HashSet::new(),
            meta: HashMap::new(),
        }
    }

    /// Append an inner class, wiring its non-owning `parent` back-link
    /// and preserving invariant 5 (inner classes are only ever reachable
    /// through their owner, never enqueued at top level).
    pub fn push_inner(&mut self, mut child: Class) {
        child.parent = Some(self.qname.clone());
        self.inner.push(child);
    }

    /// Advance `status` forward. Panics if `to` would demote the class —
    /// callers (the container, transform passes) are expected to only
    /// ever move lifecycle forward (spec.md invariant 4).
    pub fn advance_status(&mut self, to: Status) {
        assert!(
            to >= self.status,
            "status must not regress: {:?} -> {:?}",
            self.status,
            to
        );
        self.status = to;
    }

    /// True for classes derived from `<xs:simpleType>` that are not
    /// enumerations (restrictions, unions of primitives).
    pub fn is_simple(&self) -> bool {
        matches!(self.tag, Tag::SimpleType) && !self.is_enumeration()
    }

    /// True when every attribute is a fixed text member — the shape the
    /// flatten-enumerations pass leaves behind (spec.md §4.4 item 1).
    pub fn is_enumeration(&self) -> bool {
        matches!(self.tag, Tag::SimpleType)
            && !self.attrs.is_empty()
            && self
                .attrs
                .iter()
                .all(|attr| attr.tag == AttrTag::Text && attr.fixed)
    }

    /// True for any class that is not a bare value holder
    /// (spec.md §4.6: the filter's positive keep condition).
    pub fn is_complex(&self) -> bool {
        !self.is_simple() && !self.is_enumeration()
    }

    pub fn is_element(&self) -> bool {
        matches!(self.tag, Tag::Element)
    }

    /// Whether this class should survive to emission, independent of the
    /// filter's complex/simple split. A flattened class was absorbed into
    /// another and must never be emitted on its own.
    pub fn should_generate(&self) -> bool {
        self.status != Status::Flattened
    }

    /// The flattened set of QNames this class directly depends on: its
    /// attribute types (including nested choices) and its extension
    /// bases. Does not recurse into inner classes, which are resolved
    /// independently.
    pub fn target_types(&self) -> Vec<QName> {
        let mut targets = Vec::new();
        collect_attr_targets(&self.attrs, &mut targets);
        for ext in &self.extensions {
            targets.push(ext.base.clone());
        }
        targets
    }

    /// Find a nested class anywhere under `self.inner` by QName.
    pub fn find_inner(&self, target: &QName) -> Option<&Class> {
        for inner in &self.inner {
            if &inner.qname == target {
                return Some(inner);
            }
            if let Some(found) = inner.find_inner(target) {
                return Some(found);
            }
        }
        None
    }

    /// Given a nested-inner class's QName, walk `parent` links back to
    /// `self` by searching the `inner` tree, returning the chain of
    /// QNames from immediately-under-self (inclusive) down to `target`
    /// (inclusive). Returns `Some(vec![])` if `self.qname == target`.
    ///
    /// This is the non-owning counterpart of a parent pointer: the
    /// `parent` field only records identity, so recovering the full path
    /// requires a caller that holds the owning root (spec.md §4.2, §9).
    pub fn parent_map(&self, target: &QName) -> Option<Vec<QName>> {
        if &self.qname == target {
            return Some(Vec::new());
        }
        for inner in &self.inner {
            if let Some(mut chain) = inner.parent_map(target) {
                chain.insert(0, inner.qname.clone());
                return Some(chain);
            }
        }
        None
    }
}

fn collect_attr_targets(attrs: &[Attribute], out: &mut Vec<QName>) {
    for attr in attrs {
        for ty in &attr.types {
            out.push(ty.qname.clone());
        }
        collect_attr_targets(&attr.choices, out);
    }
}
