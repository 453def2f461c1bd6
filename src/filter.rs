//! Keep only classes worth emitting (spec.md §4.6).
//!
//! Runs once, after every class has been processed and the whole-graph
//! dependency-order pass has run: positive condition is `is_complex()
//! && should_generate()`; if that leaves nothing, and the caller opted
//! in, fall back to keeping simple-type-derived classes instead of
//! emitting an empty module (SPEC_FULL.md §9, Open Question resolved to
//! default `true`).

use indexmap::IndexMap;

use crate::container::ClassContainer;
use crate::ir::Class;
use crate::qname::QName;

pub fn filter_classes(container: &mut ClassContainer, fallback_to_simple_types: bool) {
    let buckets = container.buckets_mut();

    let mut kept: IndexMap<QName, Vec<Class>> = IndexMap::with_capacity(buckets.len());
    for (qname, classes) in buckets.iter() {
        let survivors: Vec<Class> = classes
            .iter()
            .filter(|class| class.is_complex() && class.should_generate())
            .cloned()
            .collect();
        if !survivors.is_empty() {
            kept.insert(qname.clone(), survivors);
        }
    }

    if kept.is_empty() && fallback_to_simple_types {
        tracing::debug!("filter found no complex classes, falling back to simple types");
        for (qname, classes) in buckets.iter() {
            let survivors: Vec<Class> = classes
                .iter()
                .filter(|class| (class.is_simple() || class.is_enumeration()) && class.should_generate())
                .cloned()
                .collect();
            if !survivors.is_empty() {
                kept.insert(qname.clone(), survivors);
            }
        }
    }

    *buckets = kept;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Interner;
    use crate::ir::{AttrTag, Attribute, Tag};

    fn qn(local: &str) -> QName {
        let mut interner = Interner::new();
        QName::parse(local, &mut interner)
    }

    #[test]
    fn keeps_complex_drops_simple() {
        let complex = Class::new(qn("Widget"), Tag::ComplexType);
        let simple = Class::new(qn("PositiveInt"), Tag::SimpleType);

        let mut container = ClassContainer::from_list(vec![complex, simple]);
        filter_classes(&mut container, true);

        let names: Vec<_> = container
            .class_list()
            .iter()
            .map(|c| c.qname.local_name().to_string())
            .collect();
        assert_eq!(names, vec!["Widget".to_string()]);
    }

    #[test]
    fn falls_back_to_simple_types_when_nothing_complex_survives() {
        let mut enumeration = Class::new(qn("Color"), Tag::SimpleType);
        let mut red = Attribute::new("RED", AttrTag::Text);
        red.fixed = true;
        enumeration.attrs.push(red);

        let mut container = ClassContainer::from_list(vec![enumeration]);
        filter_classes(&mut container, true);

        assert_eq!(container.class_list().len(), 1);
    }

    #[test]
    fn fallback_disabled_leaves_container_empty() {
        let simple = Class::new(qn("PositiveInt"), Tag::SimpleType);
        let mut container = ClassContainer::from_list(vec![simple]);
        filter_classes(&mut container, false);
        assert!(container.class_list().is_empty());
    }
}
