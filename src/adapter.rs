//! Pluggable binding-shape strategy for the emitter: how wildcard and
//! substituted-element content is represented, how a class's fields are
//! ordered, and how default values are resolved (spec.md §4.7).
//!
//! Grounded on xsdata's `ClassType` / `ClassTypes` registry: a strategy
//! object per target binding model (there, `dataclasses`; here, the
//! built-in [`RecordAdapter`] for plain Rust structs), looked up by name
//! through an [`AdapterRegistry`] so a caller can register an
//! alternative without touching the transform pipeline.

use std::collections::HashMap;

use crate::error::XmlContextError;
use crate::ir::{Attribute, Class};

/// Identifiers the default transform pipeline's sanitize-names pass
/// treats as reserved in generated Rust source (spec.md §4.4 item 4).
pub const RUST_RESERVED_WORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
    "where", "while", "async", "await", "dyn", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try", "union",
];

/// Field names used to hold an `<xs:any>` wildcard binding's qname,
/// text, tail text, attributes, and nested children (spec.md §3.4,
/// grounded on `xsdata`'s `AnyElement`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnyElementShape {
    pub qname_field: &'static str,
    pub text_field: &'static str,
    pub tail_field: &'static str,
    pub attributes_field: &'static str,
    pub children_field: &'static str,
}

/// Field names used when a value's static type alone can't identify
/// which substitution-group member (or choice alternative) produced it
/// (spec.md §3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedElementShape {
    pub qname_field: &'static str,
    pub value_field: &'static str,
    pub type_field: &'static str,
}

/// A target binding model's strategy object (spec.md §4.7). Swapping
/// the adapter changes how the same IR is shaped for emission without
/// touching `ClassContainer` or the transform pipeline.
pub trait ClassTypeAdapter {
    fn name(&self) -> &'static str;

    fn any_element_shape(&self) -> AnyElementShape;

    fn derived_element_shape(&self) -> DerivedElementShape;

    /// `true` if `class` should be emitted as a model type rather than
    /// a bare value alias.
    fn is_model(&self, class: &Class) -> bool;

    fn verify_model(&self, class: &Class) -> Result<(), XmlContextError> {
        if self.is_model(class) {
            Ok(())
        } else {
            Err(XmlContextError::new(class.qname.to_clark()))
        }
    }

    /// `class`'s attributes in the order fields are emitted. Extension
    /// bases are already linearized into `attrs` by the
    /// flatten-extensions pass, so this is declaration order, not a
    /// separate MRO walk (spec.md §4.4 item 2, §4.7).
    fn fields_of<'a>(&self, class: &'a Class) -> Vec<&'a Attribute> {
        class.attrs.iter().collect()
    }

    /// The Rust expression to initialize `attr` with when the schema
    /// supplies no value, or `None` if the field must be required.
    fn default_value(&self, attr: &Attribute) -> Option<String>;

    fn default_choice_value(&self, choice: &Attribute) -> Option<String> {
        self.default_value(choice)
    }

    /// Score a candidate attribute by how concretely it's populated, used
    /// to pick the best-matching choice alternative when more than one
    /// could bind a given element (spec.md §4.4 item 5 follow-on). Weights
    /// mirror xsdata's `score_object`: an attribute with no resolvable
    /// type scores lowest, a bare text/string field scores above an
    /// absent-but-optional field, and anything else (structured, list,
    /// or union) scores highest.
    fn score_attribute(&self, attr: &Attribute) -> f64 {
        if attr.types.is_empty() {
            return -1.0;
        }
        if !attr.restrictions.required && attr.default.is_none() {
            return 0.0;
        }
        if attr.types.len() == 1 && attr.types[0].native {
            return 1.0;
        }
        1.5
    }

    /// Score a whole candidate class: `-1` if it has no fields at all,
    /// otherwise the sum of `score_attribute` over every field
    /// `fields_of` reports (spec.md §4.7 `score_object`: "sum over
    /// fields"). Ranks candidate model types against each other when
    /// more than one could match ambiguous substituted content — the
    /// structural counterpart of `score_attribute`, which only scores a
    /// single field in isolation.
    fn score_class(&self, class: &Class) -> f64 {
        let fields = self.fields_of(class);
        if fields.is_empty() {
            return -1.0;
        }
        fields.iter().map(|attr| self.score_attribute(attr)).sum()
    }
}

/// Strategy for emitting classes as plain Rust structs/enums — the
/// default, and the only adapter this crate ships.
pub struct RecordAdapter;

impl ClassTypeAdapter for RecordAdapter {
    fn name(&self) -> &'static str {
        "records"
    }

    fn any_element_shape(&self) -> AnyElementShape {
        AnyElementShape {
            qname_field: "qname",
            text_field: "text",
            tail_field: "tail",
            attributes_field: "attributes",
            children_field: "children",
        }
    }

    fn derived_element_shape(&self) -> DerivedElementShape {
        DerivedElementShape {
            qname_field: "qname",
            value_field: "value",
            type_field: "type_name",
        }
    }

    fn is_model(&self, class: &Class) -> bool {
        class.is_complex()
    }

    fn default_value(&self, attr: &Attribute) -> Option<String> {
        if let Some(default) = &attr.default {
            return Some(format!("{default:?}.to_string()"));
        }
        if attr.restrictions.is_list() {
            return Some("Vec::new()".to_string());
        }
        if !attr.restrictions.required {
            return Some("None".to_string());
        }
        None
    }
}

/// Lookup table of [`ClassTypeAdapter`]s by name (spec.md §4.7,
/// grounded on xsdata's `ClassTypes`).
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: HashMap<&'static str, Box<dyn ClassTypeAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// A registry pre-populated with [`RecordAdapter`] under the key
    /// `"records"`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(RecordAdapter);
        registry
    }

    pub fn register(&mut self, adapter: impl ClassTypeAdapter + 'static) {
        self.adapters.insert(adapter.name(), Box::new(adapter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn ClassTypeAdapter> {
        self.adapters.get(name).map(|a| a.as_ref())
    }
}
