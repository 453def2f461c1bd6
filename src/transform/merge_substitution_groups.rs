//! Pass 5: for each substitution group, ensure every substitute appears
//! as a choice on the head (spec.md §4.4 item 5).
//!
//! Scope: this pass widens the head class's own self-referencing element
//! attribute (the one whose type is the head's own QName) with a choice
//! alternative per substitute. A head with no self-referencing attribute
//! (the substitution is only ever reached through other classes'
//! element references) can't be widened onto any one attribute here;
//! that case records a [`CodegenWarning::SubstitutionGroupUnwidened`]
//! rather than silently dropping the members, since `substitutions`
//! still carries them for the emitter to resolve directly.

use crate::container::ClassContainer;
use crate::error::CodegenWarning;
use crate::ir::{AttrTag, AttrType, Attribute, Status};
use crate::qname::QName;

use super::Transform;

pub struct MergeSubstitutionGroups;

impl Transform for MergeSubstitutionGroups {
    fn name(&self) -> &'static str {
        "merge_substitution_groups"
    }

    fn apply(&self, container: &mut ClassContainer, qname: &QName, index: usize) {
        let Some(class) = container.buckets().get(qname).and_then(|b| b.get(index)) else {
            return;
        };
        if class.substitutions.is_empty() {
            return;
        }
        let members: Vec<QName> = class.substitutions.iter().cloned().collect();
        let head_qname = class.qname.clone();

        let mut resolved_members = Vec::new();
        for member in &members {
            if let Some(member_class) = container.find_any(member) {
                resolved_members.push((member.clone(), member_class.qname.local_name().to_string()));
            }
        }
        if resolved_members.is_empty() {
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

        let self_ref_attr = class
            .attrs
            .iter_mut()
            .find(|attr| attr.tag == AttrTag::Element && attr.types.iter().any(|t| t.qname == head_qname));

        let mut widened = Vec::new();
        let mut unwidened = Vec::new();
        match self_ref_attr {
            Some(attr) => {
                for (member_qname, member_name) in &resolved_members {
                    let already = attr
                        .choices
                        .iter()
                        .any(|choice| choice.types.iter().any(|t| &t.qname == member_qname));
                    if !already {
                        let mut ty = AttrType::reference(member_qname.clone());
                        ty.substituted = true;
                        let mut choice = Attribute::new(member_name.clone(), AttrTag::Element);
                        choice.types.push(ty);
                        attr.choices.push(choice);
                        widened.push(member_name.clone());
                    }
                }
            }
            None => {
                unwidened = resolved_members.iter().map(|(_, name)| name.clone()).collect();
            }
        }

        for member_name in widened {
            container.push_warning(CodegenWarning::SubstitutionGroupWidened {
                head: head_qname.to_clark(),
                member: member_name,
            });
        }
        if !unwidened.is_empty() {
            container.push_warning(CodegenWarning::SubstitutionGroupUnwidened {
                head: head_qname.to_clark(),
                members: unwidened,
            });
        }
    }
}
