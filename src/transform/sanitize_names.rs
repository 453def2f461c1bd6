//! Pass 4: resolve clashes between attribute names, inner-class names,
//! and language keywords (spec.md §4.4 item 4). The reserved-word table
//! is supplied by the class-type adapter (spec.md §4.7); the default
//! pipeline uses [`crate::adapter::RUST_RESERVED_WORDS`].

use std::collections::HashSet;

use crate::container::ClassContainer;
use crate::error::CodegenWarning;
use crate::ir::Status;
use crate::qname::QName;

use super::Transform;

pub struct SanitizeNames {
    reserved: HashSet<&'static str>,
}

impl SanitizeNames {
    pub fn with_reserved_words(words: &[&'static str]) -> Self {
        Self {
            reserved: words.iter().copied().collect(),
        }
    }

    /// `true` if `candidate` needs renaming: it's a reserved word, or it
    /// already appears earlier in `taken`.
    fn needs_rename(&self, candidate: &str, taken: &HashSet<String>) -> bool {
        self.reserved.contains(candidate) || taken.contains(candidate)
    }

    fn sanitize(&self, candidate: &str, taken: &mut HashSet<String>) -> Option<String> {
        if !self.needs_rename(candidate, taken) {
            taken.insert(candidate.to_string());
            return None;
        }
        let mut attempt = format!("{candidate}_value");
        let mut suffix = 1;
        while taken.contains(&attempt) {
            suffix += 1;
            attempt = format!("{candidate}_value_{suffix}");
        }
        taken.insert(attempt.clone());
        Some(attempt)
    }
}

impl Transform for SanitizeNames {
    fn name(&self) -> &'static str {
        "sanitize_names"
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

        let mut taken = HashSet::new();
        let mut warnings = Vec::new();
        let class_qname = class.qname.to_clark();

        for attr in class.attrs.iter_mut() {
            if let Some(renamed) = self.sanitize(&attr.name, &mut taken) {
                warnings.push(CodegenWarning::NameCollisionRenamed {
                    class: class_qname.clone(),
                    original_name: attr.name.clone(),
                    renamed_to: renamed.clone(),
                });
                attr.name = renamed;
            }
        }

        let mut inner_taken = HashSet::new();
        for inner in class.inner.iter_mut() {
            let original = inner.qname.local_name().to_string();
            if let Some(renamed) = self.sanitize(&original, &mut inner_taken) {
                warnings.push(CodegenWarning::NameCollisionRenamed {
                    class: class_qname.clone(),
                    original_name: original,
                    renamed_to: renamed.clone(),
                });
                inner.meta.insert("sanitized_name".to_string(), renamed);
            }
        }

        for warning in warnings {
            container.push_warning(warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Interner;
    use crate::ir::{AttrTag, Attribute, Class, Tag};

    fn qn(local: &str) -> QName {
        let mut interner = Interner::new();
        QName::parse(local, &mut interner)
    }

    #[test]
    fn renames_reserved_word_attribute() {
        let mut class = Class::new(qn("Widget"), Tag::ComplexType);
        class.attrs.push(Attribute::new("type", AttrTag::Element));

        let mut container = ClassContainer::from_list(vec![class]);
        let qname = qn("Widget");
        container.process_class(&qname, 0);

        let class = container.find_any(&qname).unwrap();
        assert_eq!(class.attrs[0].name, "type_value");
        assert_eq!(container.warnings().len(), 1);
    }

    #[test]
    fn renames_duplicate_attribute_names() {
        let mut class = Class::new(qn("Widget"), Tag::ComplexType);
        class.attrs.push(Attribute::new("name", AttrTag::Element));
        class.attrs.push(Attribute::new("name", AttrTag::Attribute));

        let mut container = ClassContainer::from_list(vec![class]);
        let qname = qn("Widget");
        container.process_class(&qname, 0);

        let class = container.find_any(&qname).unwrap();
        assert_eq!(class.attrs[0].name, "name");
        assert_eq!(class.attrs[1].name, "name_value");
    }
}
