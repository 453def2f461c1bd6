//! Item 7: designate abstract and dependency order — topologically sort
//! surviving classes so emitted code has base classes before derived
//! ones (spec.md §4.4 item 7).
//!
//! Unlike items 1-6 this runs once over the whole graph rather than per
//! class: a per-class `Transform` cannot reorder sibling buckets safely,
//! since two classes being compared might be visited by `process_class`
//! in either order. It runs after `filter_classes` so it only reorders
//! survivors (spec.md §5: "transform passes must preserve [iteration]
//! determinism").

use std::collections::{HashMap, VecDeque};

use indexmap::IndexMap;

use crate::container::ClassContainer;
use crate::ir::Class;
use crate::qname::QName;

/// Reorder `container`'s buckets into dependency order (bases before
/// derivees) via a stable topological sort, and mark classes that are
/// never referenced as a concrete leaf type (only ever appear as an
/// extension base) as `abstract_`.
pub fn run(container: &mut ClassContainer) {
    let qnames: Vec<QName> = container.buckets().keys().cloned().collect();

    let mut extension_bases: HashMap<QName, Vec<QName>> = HashMap::new();
    let mut referenced_as_base: std::collections::HashSet<QName> = std::collections::HashSet::new();
    for qname in &qnames {
        let bases: Vec<QName> = container
            .buckets()
            .get(qname)
            .into_iter()
            .flatten()
            .flat_map(|class| class.extensions.iter().map(|ext| ext.base.clone()))
            .filter(|base| container.buckets().contains_key(base))
            .collect();
        for base in &bases {
            referenced_as_base.insert(base.clone());
        }
        extension_bases.insert(qname.clone(), bases);
    }

    let order = topological_order(&qnames, &extension_bases);

    let buckets = container.buckets_mut();
    let mut reordered: IndexMap<QName, Vec<Class>> = IndexMap::with_capacity(buckets.len());
    for qname in order {
        if let Some(classes) = buckets.shift_remove(&qname) {
            reordered.insert(qname, classes);
        }
    }
    // Anything not reached by the topo sort (shouldn't happen, but keep
    // the container total rather than silently dropping classes).
    for (qname, classes) in buckets.drain(..) {
        reordered.insert(qname, classes);
    }
    *buckets = reordered;

    for qname in referenced_as_base {
        if let Some(classes) = container.buckets_mut().get_mut(&qname) {
            for class in classes {
                class.abstract_ = true;
            }
        }
    }
}

/// Kahn's algorithm, processing ready nodes in their original relative
/// order so ties don't scramble the otherwise-deterministic iteration
/// order (spec.md §5).
fn topological_order(qnames: &[QName], deps: &HashMap<QName, Vec<QName>>) -> Vec<QName> {
    let index_of: HashMap<&QName, usize> = qnames.iter().enumerate().map(|(i, q)| (q, i)).collect();

    let mut in_degree: HashMap<QName, usize> = qnames.iter().map(|q| (q.clone(), 0)).collect();
    let mut dependents: HashMap<QName, Vec<QName>> = HashMap::new();
    for qname in qnames {
        for base in deps.get(qname).into_iter().flatten() {
            if base == qname {
                continue; // a self-extension is nonsensical; ignore rather than deadlock
            }
            *in_degree.entry(qname.clone()).or_insert(0) += 1;
            dependents.entry(base.clone()).or_default().push(qname.clone());
        }
    }

    let mut ready: VecDeque<QName> = qnames
        .iter()
        .filter(|q| in_degree.get(*q).copied().unwrap_or(0) == 0)
        .cloned()
        .collect();
    // Stable order: process in original relative order, not insertion order into the queue.
    let mut ready_vec: Vec<QName> = ready.drain(..).collect();
    ready_vec.sort_by_key(|q| index_of.get(q).copied().unwrap_or(usize::MAX));
    ready = ready_vec.into();

    let mut order = Vec::with_capacity(qnames.len());
    let mut visited = std::collections::HashSet::new();

    while let Some(qname) = ready.pop_front() {
        if !visited.insert(qname.clone()) {
            continue;
        }
        order.push(qname.clone());

        let mut newly_ready = Vec::new();
        for dependent in dependents.get(&qname).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(dependent) {
                *degree -= 1;
                if *degree == 0 {
                    newly_ready.push(dependent.clone());
                }
            }
        }
        newly_ready.sort_by_key(|q| index_of.get(q).copied().unwrap_or(usize::MAX));
        for q in newly_ready {
            ready.push_back(q);
        }
    }

    // Any remaining qnames are part of a dependency cycle the schema
    // shouldn't have produced; append them in original order rather than
    // dropping them, so no class is ever silently lost.
    for qname in qnames {
        if visited.insert(qname.clone()) {
            order.push(qname.clone());
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Interner;
    use crate::ir::{Class, Extension, Tag};

    fn qn(local: &str) -> QName {
        let mut interner = Interner::new();
        QName::parse(local, &mut interner)
    }

    #[test]
    fn bases_come_before_derived_classes() {
        let base = Class::new(qn("Animal"), Tag::ComplexType);
        let mut dog = Class::new(qn("Dog"), Tag::ComplexType);
        dog.extensions.push(Extension::extension(qn("Animal")));

        // Insert derived before base to prove the sort, not insertion
        // order, decides the outcome.
        let mut container = ClassContainer::from_list(vec![dog, base]);
        run(&mut container);

        let names: Vec<_> = container
            .class_list()
            .iter()
            .map(|c| c.qname.local_name().to_string())
            .collect();
        assert_eq!(names, vec!["Animal".to_string(), "Dog".to_string()]);
    }

    #[test]
    fn base_referenced_by_extension_is_marked_abstract() {
        let base = Class::new(qn("Animal"), Tag::ComplexType);
        let mut dog = Class::new(qn("Dog"), Tag::ComplexType);
        dog.extensions.push(Extension::extension(qn("Animal")));

        let mut container = ClassContainer::from_list(vec![base, dog]);
        run(&mut container);

        let animal = container.find_any(&qn("Animal")).unwrap();
        assert!(animal.abstract_);
    }
}
