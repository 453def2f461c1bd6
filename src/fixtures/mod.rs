//! A minimal reference XSD reader used to build [`Class`] fixtures for
//! integration tests, gated behind the `xml-fixtures` feature
//! (SPEC_FULL.md §4.8).
//!
//! This is **not** a conformant XSD parser: it understands exactly the
//! subset of `xs:schema` needed to express the container/filter/merge
//! test scenarios this crate's test suite exercises — top-level
//! `xs:element` and `xs:complexType` declarations, an `xs:sequence` of
//! child `xs:element refs`, `xs:extension`/`xs:restriction` bases, and
//! `xs:simpleType` enumerations. Anything outside that subset is
//! silently ignored rather than rejected. A real parser collaborator
//! feeding this crate in production is expected to handle the full XSD
//! grammar; this module exists so tests don't have to build [`Class`]
//! graphs by hand for every fixture.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::Interner;
use crate::error::ParserError;
use crate::ir::{AttrTag, AttrType, Attribute, Class, Extension, Tag};
use crate::qname::QName;

/// Read the top-level `xs:element` and `xs:complexType` declarations of
/// `input` into a flat list of [`Class`]es, interning names against
/// `interner`. See the module documentation for exactly what subset of
/// XSD this understands.
#[doc(hidden)]
pub fn read_xsd_fixture(input: &str, interner: &mut Interner) -> Result<Vec<Class>, ParserError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut classes = Vec::new();
    let mut stack: Vec<Class> = Vec::new();
    // Mirrors the element nesting 1:1, recording whether the
    // corresponding start event pushed a `Class` frame onto `stack` — a
    // self-closing `<xs:element ref="..."/>` doesn't, so its matching
    // end event must not pop its parent's frame instead.
    let mut pushed_frame: Vec<bool> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| ParserError::new(format!("xsd fixture parse error: {e}")))?
        {
            Event::Start(ref e) => {
                let pushed = handle_start(local_name(e), e, &mut stack, interner);
                pushed_frame.push(pushed);
            }
            Event::Empty(ref e) => {
                if handle_start(local_name(e), e, &mut stack, interner) {
                    pop_frame(&mut stack, &mut classes);
                }
            }
            Event::End(_) => {
                if pushed_frame.pop().unwrap_or(false) {
                    pop_frame(&mut stack, &mut classes);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(classes)
}

fn local_name<'a>(e: &'a BytesStart<'a>) -> &'a str {
    let full = std::str::from_utf8(e.name().as_ref()).unwrap_or("");
    full.rsplit(':').next().unwrap_or(full)
}

fn attr_value(e: &BytesStart<'_>, name: &str) -> Option<String> {
    e.attributes().flatten().find_map(|a| {
        if a.key.as_ref() == name.as_bytes() {
            Some(String::from_utf8_lossy(&a.value).into_owned())
        } else {
            None
        }
    })
}

fn strip_prefix(qualified: &str) -> String {
    qualified.rsplit(':').next().unwrap_or(qualified).to_string()
}

/// Returns `true` if this start event pushed a new [`Class`] frame.
fn handle_start(tag: &str, e: &BytesStart<'_>, stack: &mut Vec<Class>, interner: &mut Interner) -> bool {
    match tag {
        "element" => {
            if let Some(name) = attr_value(e, "name") {
                let qname = QName::parse(&name, interner);
                let mut class = Class::new(qname, Tag::Element);
                if let Some(type_name) = attr_value(e, "type") {
                    let type_qname = QName::parse(&strip_prefix(&type_name), interner);
                    let mut attr = Attribute::new("value", AttrTag::Text);
                    attr.types.push(AttrType::reference(type_qname));
                    class.attrs.push(attr);
                }
                stack.push(class);
                return true;
            }
            if let (Some(child_name), Some(parent)) = (attr_value(e, "ref"), stack.last_mut()) {
                let qname = QName::parse(&strip_prefix(&child_name), interner);
                let mut attr = Attribute::new(qname.local_name().to_string(), AttrTag::Element);
                attr.types.push(AttrType::reference(qname));
                parent.attrs.push(attr);
            }
            false
        }
        "complexType" => {
            let Some(name) = attr_value(e, "name") else {
                // Anonymous complexType nested in its owning element:
                // its attributes land directly on that element's class.
                return false;
            };
            let qname = QName::parse(&name, interner);
            stack.push(Class::new(qname, Tag::ComplexType));
            true
        }
        "simpleType" => {
            let Some(name) = attr_value(e, "name") else {
                return false;
            };
            let qname = QName::parse(&name, interner);
            stack.push(Class::new(qname, Tag::SimpleType));
            true
        }
        "extension" => {
            if let (Some(base), Some(class)) = (attr_value(e, "base"), stack.last_mut()) {
                let base_qname = QName::parse(&strip_prefix(&base), interner);
                class.extensions.push(Extension::extension(base_qname));
            }
            false
        }
        "restriction" => {
            if let (Some(base), Some(class)) = (attr_value(e, "base"), stack.last_mut()) {
                let base_qname = QName::parse(&strip_prefix(&base), interner);
                class.extensions.push(Extension::restriction(base_qname));
            }
            false
        }
        "enumeration" => {
            if let (Some(value), Some(class)) = (attr_value(e, "value"), stack.last_mut()) {
                let mut attr = Attribute::new(value, AttrTag::Text);
                attr.fixed = true;
                class.attrs.push(attr);
            }
            false
        }
        _ => false,
    }
}

fn pop_frame(stack: &mut Vec<Class>, classes: &mut Vec<Class>) {
    if let Some(finished) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.push_inner(finished),
            None => classes.push(finished),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_top_level_complex_type_with_one_element() {
        let xsd = r#"
            <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
              <xs:complexType name="Widget">
                <xs:sequence>
                  <xs:element ref="xs:id"/>
                </xs:sequence>
              </xs:complexType>
            </xs:schema>
        "#;
        let mut interner = Interner::new();
        let classes = read_xsd_fixture(xsd, &mut interner).expect("fixture parses");
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].qname.local_name(), "Widget");
        assert_eq!(classes[0].attrs[0].name, "id");
    }

    #[test]
    fn reads_a_simple_type_enumeration() {
        let xsd = r#"
            <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
              <xs:simpleType name="Color">
                <xs:restriction base="xs:string">
                  <xs:enumeration value="RED"/>
                  <xs:enumeration value="BLUE"/>
                </xs:restriction>
              </xs:simpleType>
            </xs:schema>
        "#;
        let mut interner = Interner::new();
        let classes = read_xsd_fixture(xsd, &mut interner).expect("fixture parses");
        assert_eq!(classes.len(), 1);
        assert!(classes[0].is_enumeration());
    }

    #[test]
    fn reads_a_complex_type_extending_a_base() {
        let xsd = r#"
            <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
              <xs:complexType name="Base"/>
              <xs:complexType name="Derived">
                <xs:complexContent>
                  <xs:extension base="Base"/>
                </xs:complexContent>
              </xs:complexType>
            </xs:schema>
        "#;
        let mut interner = Interner::new();
        let classes = read_xsd_fixture(xsd, &mut interner).expect("fixture parses");
        let derived = classes.iter().find(|c| c.qname.local_name() == "Derived").unwrap();
        assert_eq!(derived.extensions[0].base.local_name(), "Base");
    }
}
