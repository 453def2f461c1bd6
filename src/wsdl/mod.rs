//! WSDL `definitions` document model (spec.md §4.5).
//!
//! Ported from xsdata's `models/wsdl.py`: a [`Definitions`] document
//! collects [`Message`]/[`PortType`]/[`Binding`]/[`Service`] entries,
//! each named, with a [`Definitions::merge`] operation that appends an
//! imported document's entries onto the root's own and `find_*` lookups
//! that resolve the first name match in that combined order — so a name
//! declared in the root document always wins over one pulled in later
//! through `<xs:import>`, regardless of which one the schema author
//! meant to win.

use indexmap::IndexMap;

use crate::error::DefinitionsValueError;

/// An extensibility element from a foreign namespace attached to a WSDL
/// construct (e.g. a SOAP binding annotation) — kept opaque rather than
/// parsed, since its shape isn't part of this crate's IR.
#[derive(Debug, Clone, PartialEq)]
pub struct AnyElement {
    pub qname: String,
    pub text: Option<String>,
    pub attributes: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Documentation {
    pub elements: Vec<AnyElement>,
}

/// Fields every WSDL construct carries (spec.md §4.5).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WsdlElement {
    pub name: String,
    pub documentation: Option<Documentation>,
    pub location: Option<String>,
    pub ns_map: IndexMap<String, String>,
}

/// A [`WsdlElement`] that may carry foreign-namespace extensibility
/// elements (bindings, port types, operations, `definitions` itself).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtensibleElement {
    pub wsdl: WsdlElement,
    pub extended: Vec<AnyElement>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Types {
    pub schemas: Vec<String>,
    pub documentation: Option<Documentation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub location: Option<String>,
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Part {
    pub wsdl: WsdlElement,
    pub type_: Option<String>,
    pub element: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message {
    pub wsdl: WsdlElement,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortTypeMessage {
    pub wsdl: WsdlElement,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortTypeOperation {
    pub wsdl: WsdlElement,
    pub input: PortTypeMessage,
    pub output: PortTypeMessage,
    pub faults: Vec<PortTypeMessage>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortType {
    pub extensible: ExtensibleElement,
    pub operations: Vec<PortTypeOperation>,
}

impl PortType {
    pub fn find_operation(&self, name: &str) -> Result<&PortTypeOperation, DefinitionsValueError> {
        find_or_die(&self.operations, name, "PortTypeOperation")
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BindingMessage {
    pub extensible: ExtensibleElement,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BindingOperation {
    pub extensible: ExtensibleElement,
    pub input: BindingMessage,
    pub output: BindingMessage,
    pub faults: Vec<BindingMessage>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Binding {
    pub extensible: ExtensibleElement,
    pub type_: String,
    pub operations: Vec<BindingOperation>,
}

impl Binding {
    /// One [`BindingOperation`] per distinct name: when the same
    /// operation name is declared more than once, the last declaration
    /// wins (spec.md §4.5, ported from xsdata's `group_by` + take-last).
    pub fn unique_operations(&self) -> Vec<&BindingOperation> {
        let mut by_name: IndexMap<&str, &BindingOperation> = IndexMap::new();
        for operation in &self.operations {
            by_name.insert(operation.extensible.wsdl.name.as_str(), operation);
        }
        by_name.into_values().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServicePort {
    pub extensible: ExtensibleElement,
    pub binding: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Service {
    pub wsdl: WsdlElement,
    pub ports: Vec<ServicePort>,
}

/// A WSDL `definitions` document: one schema's worth of messages, port
/// types, bindings and services, with imports merged in from other
/// documents (spec.md §4.5).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Definitions {
    pub extensible: ExtensibleElement,
    pub target_namespace: Option<String>,
    pub types: Option<Types>,
    pub imports: Vec<Import>,
    pub messages: Vec<Message>,
    pub port_types: Vec<PortType>,
    pub bindings: Vec<Binding>,
    pub services: Vec<Service>,
}

impl Definitions {
    pub fn schemas(&self) -> impl Iterator<Item = &String> {
        self.types.iter().flat_map(|types| types.schemas.iter())
    }

    pub fn find_binding(&self, name: &str) -> Result<&Binding, DefinitionsValueError> {
        find_or_die(&self.bindings, name, "Binding")
    }

    pub fn find_message(&self, name: &str) -> Result<&Message, DefinitionsValueError> {
        find_or_die(&self.messages, name, "Message")
    }

    pub fn find_port_type(&self, name: &str) -> Result<&PortType, DefinitionsValueError> {
        find_or_die(&self.port_types, name, "PortType")
    }

    /// Append `source`'s entries onto `self`'s own (spec.md §4.5). Schema
    /// imports merge *into* the existing `types.schemas` list rather than
    /// replacing it; every other list is a plain append, so a name
    /// declared in `self` is still reachable by `find_*` afterward
    /// because forward iteration visits it first.
    pub fn merge(&mut self, source: Definitions) {
        match (&mut self.types, source.types) {
            (types @ None, source_types) => *types = source_types,
            (Some(types), Some(source_types)) => types.schemas.extend(source_types.schemas),
            (Some(_), None) => {}
        }

        self.messages.extend(source.messages);
        self.port_types.extend(source.port_types);
        self.bindings.extend(source.bindings);
        self.services.extend(source.services);
        self.extensible.extended.extend(source.extensible.extended);
    }

    pub fn included(&self) -> impl Iterator<Item = &Import> {
        self.imports.iter()
    }
}

trait Named {
    fn wsdl_name(&self) -> &str;
}

impl Named for Binding {
    fn wsdl_name(&self) -> &str {
        &self.extensible.wsdl.name
    }
}
impl Named for Message {
    fn wsdl_name(&self) -> &str {
        &self.wsdl.name
    }
}
impl Named for PortType {
    fn wsdl_name(&self) -> &str {
        &self.extensible.wsdl.name
    }
}
impl Named for PortTypeOperation {
    fn wsdl_name(&self) -> &str {
        &self.wsdl.name
    }
}

/// First item whose name matches, in declaration order — see
/// [`Definitions::merge`] for why "first" is the semantics that matters.
fn find_or_die<'a, T: Named>(items: &'a [T], name: &str, type_name: &'static str) -> Result<&'a T, DefinitionsValueError> {
    items
        .iter()
        .find(|item| item.wsdl_name() == name)
        .ok_or_else(|| DefinitionsValueError::new(type_name, name))
}
