//! End-to-end tests driving the public `generate` entry point over small
//! hand-built schemas, exercising the pipeline invariants described in
//! SPEC_FULL.md §8 without reaching into any crate-internal module.

use rstest::rstest;

use schemabind::ir::{AttrTag, AttrType, Attribute, Class, Extension, Tag};
use schemabind::{generate, GenerationError, GeneratorConfig};

fn qn(local: &str) -> schemabind::QName {
    let mut interner = schemabind::core::Interner::new();
    schemabind::QName::parse(local, &mut interner)
}

#[rstest]
fn filters_down_to_complex_classes_only() {
    let complex = Class::new(qn("Widget"), Tag::ComplexType);
    let simple = Class::new(qn("PositiveInt"), Tag::SimpleType);

    let result = generate(vec![complex, simple], &GeneratorConfig::default()).unwrap();

    assert_eq!(result.classes.len(), 1);
    assert_eq!(result.classes[0].qname.local_name(), "Widget");
}

#[rstest]
fn keeps_simple_types_when_nothing_complex_survives() {
    let mut color = Class::new(qn("Color"), Tag::SimpleType);
    let mut red = Attribute::new("RED", AttrTag::Text);
    red.fixed = true;
    color.attrs.push(red);

    let result = generate(vec![color], &GeneratorConfig::default()).unwrap();
    assert_eq!(result.classes.len(), 1);
}

#[rstest]
fn dependency_order_places_extension_bases_first() {
    let base = Class::new(qn("Animal"), Tag::ComplexType);
    let mut dog = Class::new(qn("Dog"), Tag::ComplexType);
    dog.attrs.push(Attribute::new("breed", AttrTag::Element));
    dog.extensions.push(Extension::extension(qn("Animal")));

    // Insert Dog before Animal to prove the dependency-order pass, not
    // input order, decides emission order.
    let result = generate(vec![dog, base], &GeneratorConfig::default()).unwrap();

    let names: Vec<_> = result.classes.iter().map(|c| c.qname.local_name().to_string()).collect();
    assert_eq!(names, vec!["Animal".to_string(), "Dog".to_string()]);
}

#[rstest]
fn unresolved_class_type_adapter_is_a_fatal_error() {
    let config = GeneratorConfig {
        class_type_adapter: "does-not-exist".to_string(),
        ..GeneratorConfig::default()
    };
    let err = generate(Vec::new(), &config).unwrap_err();
    assert!(matches!(err, GenerationError::XmlContext(_)));
}

#[rstest]
fn forward_reference_to_an_ancestor_is_marked_circular() {
    let mut root = Class::new(qn("Tree"), Tag::ComplexType);
    let mut node = Class::new(qn("Node"), Tag::ComplexType);

    let mut parent_ref = AttrType::reference(qn("Tree"));
    parent_ref.forward = true;
    let mut parent_attr = Attribute::new("parent", AttrTag::Element);
    parent_attr.types.push(parent_ref);
    node.attrs.push(parent_attr);
    node.attrs.push(Attribute::new("label", AttrTag::Element));

    root.push_inner(node);
    root.attrs.push(Attribute::new("label", AttrTag::Element));

    let result = generate(vec![root], &GeneratorConfig::default()).unwrap();

    let tree = result.classes.iter().find(|c| c.qname.local_name() == "Tree").unwrap();
    let inner = &tree.inner[0];
    assert!(inner.attrs[0].types[0].circular);
}
