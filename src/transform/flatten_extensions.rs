//! Pass 2: when a base class is a simple type or enumeration, absorb its
//! attributes; replace the extension link with an attribute prefix
//! (spec.md §4.4 item 2, §9 "Multi-inheritance-like extension").

use crate::container::ClassContainer;
use crate::ir::Status;
use crate::qname::QName;

use super::Transform;

pub struct FlattenExtensions;

impl Transform for FlattenExtensions {
    fn name(&self) -> &'static str {
        "flatten_extensions"
    }

    fn apply(&self, container: &mut ClassContainer, qname: &QName, index: usize) {
        let Some(class) = container.buckets().get(qname).and_then(|b| b.get(index)) else {
            return;
        };
        if class.is_enumeration() {
            // Handled by flatten_enumerations.
            return;
        }
        let candidates: Vec<QName> = class
            .extensions
            .iter()
            .map(|ext| ext.base.clone())
            .collect();
        if candidates.is_empty() {
            return;
        }

        let mut to_absorb = Vec::new();
        for base_qname in &candidates {
            if let Some(base) = container.find_any(base_qname) {
                if base.is_simple() || base.is_enumeration() {
                    to_absorb.push((base_qname.clone(), base.attrs.clone()));
                }
            }
        }
        if to_absorb.is_empty() {
            return;
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

        for (base_qname, base_attrs) in to_absorb {
            let prefix = base_qname.local_name().to_string();
            for mut attr in base_attrs {
                // "replace extension link with attribute prefix":
                // qualify the absorbed field's alias with the base's
                // local name so it doesn't collide with the derived
                // class's own fields of the same wire name.
                attr.alias
                    .get_or_insert_with(|| format!("{prefix}_{}", attr.local_name).into());
                class.attrs.push(attr);
            }
            class.extensions.retain(|ext| ext.base != base_qname);
        }
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

    #[test]
    fn absorbs_simple_type_base_attrs() {
        let mut base = Class::new(qn("Base"), Tag::SimpleType);
        base.attrs.push(Attribute::new("value", AttrTag::Text));

        let mut derived = Class::new(qn("Derived"), Tag::ComplexType);
        derived.extensions.push(Extension::extension(qn("Base")));

        let mut container = ClassContainer::from_list(vec![base, derived]);
        let derived_qname = qn("Derived");
        container.process_class(&derived_qname, 0);

        let class = container.find_any(&derived_qname).unwrap();
        assert!(class.attrs.iter().any(|a| a.local_name == "value"));
        assert!(class.extensions.is_empty());
    }

    #[test]
    fn leaves_complex_base_extension_untouched() {
        let base = Class::new(qn("Base"), Tag::ComplexType);
        let mut derived = Class::new(qn("Derived"), Tag::ComplexType);
        derived.extensions.push(Extension::extension(qn("Base")));

        let mut container = ClassContainer::from_list(vec![base, derived]);
        let derived_qname = qn("Derived");
        container.process_class(&derived_qname, 0);

        let class = container.find_any(&derived_qname).unwrap();
        assert_eq!(class.extensions.len(), 1);
    }
}
