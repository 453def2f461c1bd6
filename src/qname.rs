//! Qualified names: the only cross-reference key in the IR (SPEC_FULL.md §4.1).

use std::fmt;

use crate::core::IStr;

/// A namespace URI + local name pair. Equality and hashing are structural;
/// no raw pointers cross the [`crate::container::ClassContainer`] boundary,
/// only `QName`s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    namespace: Option<IStr>,
    local_name: IStr,
}

impl QName {
    /// Construct from a namespace URI (if any) and a local name.
    pub fn new(namespace: Option<IStr>, local_name: impl Into<IStr>) -> Self {
        Self {
            namespace,
            local_name: local_name.into(),
        }
    }

    /// Construct a QName with no namespace.
    pub fn local(local_name: impl Into<IStr>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Parse Clark notation (`{namespace}local` or bare `local`).
    ///
    /// Interning happens through `interner` so repeated parses of the same
    /// namespace/local pair share storage.
    pub fn parse(clark: &str, interner: &mut crate::core::Interner) -> Self {
        if let Some(rest) = clark.strip_prefix('{') {
            if let Some(end) = rest.find('}') {
                let namespace = &rest[..end];
                let local = &rest[end + 1..];
                return Self {
                    namespace: Some(interner.intern(namespace)),
                    local_name: interner.intern(local),
                };
            }
        }
        Self {
            namespace: None,
            local_name: interner.intern(clark),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Render back to Clark notation (`{namespace}local`, or just `local`
    /// when there is no namespace).
    pub fn to_clark(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{{{ns}}}{}", self.local_name),
            None => self.local_name.to_string(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_clark())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Interner;

    #[test]
    fn parses_clark_notation() {
        let mut interner = Interner::new();
        let qname = QName::parse("{http://xsdata}foo", &mut interner);
        assert_eq!(qname.namespace(), Some("http://xsdata"));
        assert_eq!(qname.local_name(), "foo");
        assert_eq!(qname.to_clark(), "{http://xsdata}foo");
    }

    #[test]
    fn parses_bare_local_name() {
        let mut interner = Interner::new();
        let qname = QName::parse("foo", &mut interner);
        assert_eq!(qname.namespace(), None);
        assert_eq!(qname.to_clark(), "foo");
    }

    #[test]
    fn equality_is_structural() {
        let mut interner = Interner::new();
        let a = QName::parse("{xsdata}foo", &mut interner);
        let b = QName::parse("{xsdata}foo", &mut interner);
        assert_eq!(a, b);
        let c = QName::parse("{xsdata}foobar", &mut interner);
        assert_ne!(a, c);
    }
}
