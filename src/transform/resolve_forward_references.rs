//! Pass 3: for each `AttrType.forward`, locate the enclosing parent class
//! containing a matching inner class; set `circular` if reachable
//! through the class's own parent chain (spec.md §4.4 item 3, §9).

use crate::container::ClassContainer;
use crate::ir::{Class, Status};
use crate::qname::QName;

use super::Transform;

pub struct ResolveForwardReferences;

impl Transform for ResolveForwardReferences {
    fn name(&self) -> &'static str {
        "resolve_forward_references"
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
        mark_circular_in_tree(class, &[]);
    }
}

/// `ancestors` is the chain of QNames from the container root (exclusive)
/// down to `node`'s own parent (inclusive). A forward `AttrType` resolves
/// here precisely when its target appears in that chain or is `node`
/// itself — i.e. the attribute's owner is nested somewhere under the
/// class it refers back to, which is what makes the reference circular.
fn mark_circular_in_tree(node: &mut Class, ancestors: &[QName]) {
    for attr in node.attrs.iter_mut() {
        for ty in attr.types.iter_mut().filter(|ty| ty.forward) {
            if ty.qname == node.qname || ancestors.contains(&ty.qname) {
                ty.circular = true;
            }
        }
    }

    let mut child_ancestors = ancestors.to_vec();
    child_ancestors.push(node.qname.clone());
    for child in node.inner.iter_mut() {
        mark_circular_in_tree(child, &child_ancestors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Interner;
    use crate::ir::{AttrTag, AttrType, Attribute, Tag};

    fn qn(local: &str) -> QName {
        let mut interner = Interner::new();
        QName::parse(local, &mut interner)
    }

    #[test]
    fn marks_reference_to_ancestor_circular() {
        let mut root = Class::new(qn("Root"), Tag::ComplexType);
        let mut inner = Class::new(qn("Node"), Tag::ComplexType);

        let mut parent_ref = AttrType::reference(qn("Root"));
        parent_ref.forward = true;
        let mut attr = Attribute::new("parent", AttrTag::Element);
        attr.types.push(parent_ref);
        inner.attrs.push(attr);

        root.push_inner(inner);

        let mut container = ClassContainer::from_list(vec![root]);
        let root_qname = qn("Root");
        container.process_class(&root_qname, 0);

        let class = container.find_any(&root_qname).unwrap();
        assert!(class.inner[0].attrs[0].types[0].circular);
    }

    #[test]
    fn leaves_non_forward_references_untouched() {
        let mut root = Class::new(qn("Root"), Tag::ComplexType);
        let plain_ref = AttrType::reference(qn("Other"));
        let mut attr = Attribute::new("other", AttrTag::Element);
        attr.types.push(plain_ref);
        root.attrs.push(attr);

        let mut container = ClassContainer::from_list(vec![root]);
        let root_qname = qn("Root");
        container.process_class(&root_qname, 0);

        let class = container.find_any(&root_qname).unwrap();
        assert!(!class.attrs[0].types[0].circular);
    }
}
