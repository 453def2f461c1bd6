//! Pass 1: push enumeration members into the class; merge restrictions
//! (spec.md §4.4 item 1).
//!
//! When a `<xs:simpleType>` restricts another enumeration (e.g. a
//! restriction narrowing an existing enumeration's value space), the
//! base's members are absorbed into the derived class so each
//! enumeration class is self-contained by the time it reaches emission.

use crate::container::ClassContainer;
use crate::ir::Status;
use crate::qname::QName;

use super::Transform;

pub struct FlattenEnumerations;

impl Transform for FlattenEnumerations {
    fn name(&self) -> &'static str {
        "flatten_enumerations"
    }

    fn apply(&self, container: &mut ClassContainer, qname: &QName, index: usize) {
        let Some(class) = container.buckets().get(qname).and_then(|b| b.get(index)) else {
            return;
        };
        if !class.is_enumeration() {
            return;
        }

        let base_qnames: Vec<QName> = class
            .extensions
            .iter()
            .map(|ext| ext.base.clone())
            .collect();
        if base_qnames.is_empty() {
            return;
        }

        let mut absorbed = Vec::new();
        for base_qname in &base_qnames {
            if let Some(base) = container.find_any(base_qname) {
                if base.is_enumeration() {
                    absorbed.push(base.attrs.clone());
                }
            }
        }

        let Some(class) = container
            .buckets_mut()
            .get_mut(qname)
            .and_then(|b| b.get_mut(index))
        else {
            return;
        };
        if class.status != Status::Processing {
            return;
        }

        // Collect the members to prepend first and splice them in as one
        // block, preserving each base's own declaration order (invariant
        // 3: attribute order is semantic) instead of reversing it one
        // `insert(0, _)` at a time.
        let mut to_prepend = Vec::new();
        for base_attrs in absorbed {
            for attr in base_attrs {
                let already_present = class.attrs.iter().any(|a| a.name == attr.name)
                    || to_prepend.iter().any(|a: &crate::ir::Attribute| a.name == attr.name);
                if !already_present {
                    to_prepend.push(attr);
                }
            }
        }
        class.attrs.splice(0..0, to_prepend);

        // The base's enumeration members are now part of this class;
        // the extension link no longer needs to be walked by emission.
        class
            .extensions
            .retain(|ext| !base_qnames.contains(&ext.base));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Interner;
    use crate::ir::{AttrTag, Attribute, Class, Extension, Tag};

    fn qn(local: &str) -> QName {
        let mut interner = Interner::new();
        QName::parse(local, &mut interner)
    }

    fn enum_attr(name: &str) -> Attribute {
        let mut attr = Attribute::new(name, AttrTag::Text);
        attr.fixed = true;
        attr
    }

    #[test]
    fn absorbs_base_enumeration_members() {
        let mut base = Class::new(qn("Base"), Tag::SimpleType);
        base.attrs.push(enum_attr("RED"));
        base.attrs.push(enum_attr("GREEN"));

        let mut derived = Class::new(qn("Derived"), Tag::SimpleType);
        derived.attrs.push(enum_attr("RED"));
        derived.extensions.push(Extension::restriction(qn("Base")));

        let mut container = ClassContainer::from_list(vec![base, derived]);
        let derived_qname = qn("Derived");
        container.process_class(&derived_qname, 0);

        let class = container.find_any(&derived_qname).unwrap();
        let names: Vec<_> = class.attrs.iter().map(|a| a.name.as_str()).collect();
        assert!(names.contains(&"RED"));
        assert!(names.contains(&"GREEN"));
        assert!(class.extensions.is_empty());
    }

    #[test]
    fn preserves_base_member_declaration_order() {
        let mut base = Class::new(qn("Base"), Tag::SimpleType);
        base.attrs.push(enum_attr("RED"));
        base.attrs.push(enum_attr("GREEN"));
        base.attrs.push(enum_attr("BLUE"));

        let mut derived = Class::new(qn("Derived"), Tag::SimpleType);
        derived.extensions.push(Extension::restriction(qn("Base")));

        let mut container = ClassContainer::from_list(vec![base, derived]);
        let derived_qname = qn("Derived");
        container.process_class(&derived_qname, 0);

        let class = container.find_any(&derived_qname).unwrap();
        let names: Vec<_> = class.attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["RED", "GREEN", "BLUE"]);
    }
}
