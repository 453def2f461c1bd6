//! Pass 6: compute final emitted type expressions for each attribute —
//! unions flatten (deduplicated by target QName, first occurrence wins),
//! optionals collapse (the wire name is recorded as `alias` whenever the
//! sanitize-names pass changed the field's Rust-facing name) (spec.md
//! §4.4 item 6).

use crate::container::ClassContainer;
use crate::ir::{Attribute, Status};
use crate::qname::QName;

use super::Transform;

pub struct CalculateFieldTypes;

impl Transform for CalculateFieldTypes {
    fn name(&self) -> &'static str {
        "calculate_field_types"
    }

    fn apply(&self, container: &mut ClassContainer, qname: &QName, index: usize) {
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

        for attr in class.attrs.iter_mut() {
            finalize_attr(attr);
        }
    }
}

fn finalize_attr(attr: &mut Attribute) {
    let mut seen = std::collections::HashSet::new();
    attr.types.retain(|ty| seen.insert(ty.qname.clone()));

    if attr.alias.is_none() && attr.name != attr.local_name {
        attr.alias = Some(attr.local_name.clone().into());
    }

    for choice in attr.choices.iter_mut() {
        finalize_attr(choice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Interner;
    use crate::ir::{AttrTag, AttrType, Class, Tag};

    fn qn(local: &str) -> QName {
        let mut interner = Interner::new();
        QName::parse(local, &mut interner)
    }

    #[test]
    fn dedups_union_types_keeping_first() {
        let mut class = Class::new(qn("Widget"), Tag::ComplexType);
        let mut attr = Attribute::new("value", AttrTag::Text);
        attr.types.push(AttrType::native(qn("string")));
        attr.types.push(AttrType::native(qn("string")));
        attr.types.push(AttrType::native(qn("int")));
        class.attrs.push(attr);

        let mut container = ClassContainer::from_list(vec![class]);
        let qname = qn("Widget");
        container.process_class(&qname, 0);

        let class = container.find_any(&qname).unwrap();
        assert_eq!(class.attrs[0].types.len(), 2);
    }

    #[test]
    fn records_alias_when_sanitized() {
        let mut class = Class::new(qn("Widget"), Tag::ComplexType);
        let mut attr = Attribute::new("type", AttrTag::Element);
        attr.name = "type_value".to_string();
        class.attrs.push(attr);

        let mut container = ClassContainer::from_list(vec![class]);
        let qname = qn("Widget");
        container.process_class(&qname, 0);

        let class = container.find_any(&qname).unwrap();
        assert_eq!(class.attrs[0].alias.as_deref(), Some("type"));
    }
}
