//! Attribute: a field on a [`crate::ir::Class`] (spec.md §3.1).

use crate::base::Span;
use crate::core::IStr;
use crate::qname::QName;

/// What XSD/WSDL construct an [`Attribute`] binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrTag {
    Element,
    Attribute,
    Text,
    Wildcard,
    /// `<xs:anyAttribute>` bound to a map rather than a single field.
    Attributes,
    /// Present in the schema but dropped before emission (e.g. an
    /// annotation-only particle).
    Ignore,
}

/// A reference to a type, as seen from an [`Attribute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrType {
    pub qname: QName,
    /// True when this resolves to an XSD primitive rather than another
    /// class in the container.
    pub native: bool,
    /// True when this is a back-reference into an enclosing class (an
    /// inner class referenced from its own ancestor chain).
    pub forward: bool,
    /// Set by the resolve-forward-references pass when a cycle is
    /// detected through the referencing class's own parent chain.
    pub circular: bool,
    /// Set when this type reference was substituted in by the
    /// merge-substitution-groups pass rather than present in the source
    /// schema.
    pub substituted: bool,
}

impl AttrType {
    pub fn native(qname: QName) -> Self {
        Self {
            qname,
            native: true,
            forward: false,
            circular: false,
            substituted: false,
        }
    }

    pub fn reference(qname: QName) -> Self {
        Self {
            qname,
            native: false,
            forward: false,
            circular: false,
            substituted: false,
        }
    }
}

/// Length/numeric/occurrence restrictions carried on an [`Attribute`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Restrictions {
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub min_inclusive: Option<f64>,
    pub max_inclusive: Option<f64>,
    pub min_exclusive: Option<f64>,
    pub max_exclusive: Option<f64>,
    pub pattern: Option<String>,
    pub total_digits: Option<u32>,
    pub fraction_digits: Option<u32>,
    pub required: bool,
    pub nillable: bool,
    pub min_occurs: u64,
    pub max_occurs: Option<u64>,
    /// `true` for `<xs:set>`-like unique-membership occurrence, `false`
    /// for ordinary sequence occurrence.
    pub is_set: bool,
}

impl Restrictions {
    /// The restrictions of a mandatory, single-valued field.
    pub fn required_single() -> Self {
        Self {
            required: true,
            min_occurs: 1,
            max_occurs: Some(1),
            ..Default::default()
        }
    }

    /// True when this attribute may occur more than once.
    pub fn is_list(&self) -> bool {
        self.max_occurs.is_none_or(|max| max > 1)
    }
}

/// A field on a [`crate::ir::Class`].
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub local_name: String,
    pub namespace: Option<String>,
    pub tag: AttrTag,
    /// Normally one entry; more than one when the schema expresses a
    /// union.
    pub types: Vec<AttrType>,
    /// Element alternatives from `<xs:choice>`.
    pub choices: Vec<Attribute>,
    pub default: Option<String>,
    pub fixed: bool,
    pub restrictions: Restrictions,
    pub location: Option<Span>,
    /// The wire name, set by the sanitize-names/calculate-field-types
    /// passes when `name` ends up differing from `local_name`
    /// (SPEC_FULL.md §3.1).
    pub alias: Option<IStr>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, tag: AttrTag) -> Self {
        let name = name.into();
        Self {
            local_name: name.clone(),
            name,
            namespace: None,
            tag,
            types: Vec::new(),
            choices: Vec::new(),
            default: None,
            fixed: false,
            restrictions: Restrictions::default(),
            location: None,
            alias: None,
        }
    }

    /// True if the schema expressed this attribute's type as a union
    /// (more than one `AttrType`).
    pub fn is_union(&self) -> bool {
        self.types.len() > 1
    }

    /// True if this attribute is choice-based (`<xs:choice>` /
    /// element alternatives).
    pub fn is_choice(&self) -> bool {
        !self.choices.is_empty()
    }
}
