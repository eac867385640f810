//! Identifier and vocabulary value types shared by the mapping model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a concept: `"{table}.{idColumn}"`.
///
/// Attributes and relations refer to concepts only through this key, so a key
/// that no longer matches a live concept is what the project cascade repairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptKey(String);

impl ConceptKey {
    /// Build the key for a table/column pair.
    pub fn new(table: &str, column: &str) -> Self {
        Self(format!("{}.{}", table, column))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConceptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConceptKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ConceptKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for ConceptKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ConceptKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// How row identifiers of a concept become globally unique URIs.
///
/// On the wire this is the `idPrefixColumn` string: empty when the identifiers
/// are already globally unique, otherwise the literal prefix to prepend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdPrefix {
    /// Identifiers are used as-is.
    #[default]
    None,
    /// Identifiers are prefixed, e.g. `occurrence.taxonID_`.
    Prefixed(String),
}

impl IdPrefix {
    /// The conventional prefix for a table/column pair: `"{table}.{column}_"`.
    pub fn for_column(table: &str, column: &str) -> Self {
        Self::Prefixed(format!("{}.{}_", table, column))
    }

    pub fn is_prefixed(&self) -> bool {
        matches!(self, Self::Prefixed(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "",
            Self::Prefixed(prefix) => prefix,
        }
    }
}

impl From<String> for IdPrefix {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Self::None
        } else {
            Self::Prefixed(s)
        }
    }
}

impl From<IdPrefix> for String {
    fn from(prefix: IdPrefix) -> Self {
        match prefix {
            IdPrefix::None => String::new(),
            IdPrefix::Prefixed(s) => s,
        }
    }
}

/// A named vocabulary term (class or property) as attached to the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VocabularyTerm {
    /// Short name, e.g. `dwc:Taxon` or `scientificName`.
    pub name: String,
    /// Full URI of the term.
    pub uri: String,
}

impl VocabularyTerm {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
        }
    }
}
