//! Error taxonomy (SPEC_FULL.md §7).
//!
//! Fatal errors abort the current generation run; none are retried.
//! [`CodegenWarning`]s are non-fatal and accumulated in
//! [`crate::container::ClassContainer`], returned alongside a successful
//! [`crate::pipeline::GenerationResult`].

use thiserror::Error;

/// Malformed input. Raised by the parser collaborator; fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("parser error: {message}")]
pub struct ParserError {
    pub message: String,
}

impl ParserError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A WSDL lookup (message / portType / binding / operation) for an unknown
/// name. Fatal — later passes would otherwise dereference a hole.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {type_name} name: {name}")]
pub struct DefinitionsValueError {
    pub type_name: &'static str,
    pub name: String,
}

impl DefinitionsValueError {
    pub fn new(type_name: &'static str, name: impl Into<String>) -> Self {
        Self {
            type_name,
            name: name.into(),
        }
    }
}

/// A value handed to a [`crate::adapter::ClassTypeAdapter`] is not a
/// recognized binding model. Fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{type_name}' is not a recognized binding model")]
pub struct XmlContextError {
    pub type_name: String,
}

impl XmlContextError {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

/// An `AttrType` could not be resolved to any known class or native type
/// after all transform passes ran. Fatal; reported with both the
/// unresolved QName and the class that referenced it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unresolved reference to '{target}' from class '{referencing_class}'")]
pub struct ResolutionError {
    pub target: String,
    pub referencing_class: String,
}

impl ResolutionError {
    pub fn new(target: impl Into<String>, referencing_class: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            referencing_class: referencing_class.into(),
        }
    }
}

/// Non-fatal diagnostics accumulated during a generation run and returned
/// with the result: a name collision resolved by rename, a substitution
/// group widened, etc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodegenWarning {
    /// A sanitize-names pass resolved a clash by renaming an attribute or
    /// inner class.
    NameCollisionRenamed {
        class: String,
        original_name: String,
        renamed_to: String,
    },
    /// A substitution group's head class was widened to accept a member
    /// that the merge-substitution-groups pass discovered.
    SubstitutionGroupWidened { head: String, member: String },
    /// A substitution group had members to widen onto its head, but the
    /// head has no self-referencing element attribute to widen — the
    /// members are still recorded on `Class::substitutions` for the
    /// emitter to resolve directly, but no choice alternative was added.
    SubstitutionGroupUnwidened { head: String, members: Vec<String> },
    /// A WSDL merge produced a duplicate name; the caller kept the last
    /// occurrence per the merge protocol (SPEC_FULL.md / spec.md §4.5).
    DuplicateDefinitionName { kind: &'static str, name: String },
}

impl std::fmt::Display for CodegenWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodegenWarning::NameCollisionRenamed {
                class,
                original_name,
                renamed_to,
            } => write!(
                f,
                "renamed '{original_name}' to '{renamed_to}' on class '{class}' to resolve a name collision"
            ),
            CodegenWarning::SubstitutionGroupWidened { head, member } => {
                write!(f, "widened substitution group head '{head}' with member '{member}'")
            }
            CodegenWarning::SubstitutionGroupUnwidened { head, members } => {
                write!(
                    f,
                    "substitution group head '{head}' has no self-referencing element to widen; members {} left unresolved in choices",
                    members.join(", ")
                )
            }
            CodegenWarning::DuplicateDefinitionName { kind, name } => {
                write!(f, "duplicate {kind} name '{name}'; kept the last occurrence")
            }
        }
    }
}

/// Aggregate fatal error type returned by the top-level generation entry
/// point (SPEC_FULL.md §7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    DefinitionsValue(#[from] DefinitionsValueError),
    #[error(transparent)]
    XmlContext(#[from] XmlContextError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}
