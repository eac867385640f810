//! Vocabularies supplying classes and properties to map onto.
//!
//! A vocabulary is read from the JSON document produced by the vocabulary
//! service:
//!
//! ```text
//! {
//!   "name": "Darwin Core",
//!   "classes":    [{"name", "uri", "subClasses": [...]}],
//!   "properties": [{"name", "uri", "subProperties": [...], "domain": [uri], "range": [uri]}]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{InputError, InputResult};
use crate::model::VocabularyTerm;

/// A vocabulary class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyClass {
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub sub_classes: Vec<VocabularyClass>,
}

/// A vocabulary property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyProperty {
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub sub_properties: Vec<VocabularyProperty>,
    /// URIs of the classes this property applies to.
    #[serde(default)]
    pub domain: Vec<String>,
    #[serde(default)]
    pub range: Vec<String>,
}

impl VocabularyProperty {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            sub_properties: Vec::new(),
            domain: Vec::new(),
            range: Vec::new(),
        }
    }

    /// Builder: set the domain class URIs.
    pub fn with_domain<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Does the domain include `class_uri`?
    pub fn applies_to(&self, class_uri: &str) -> bool {
        self.domain.iter().any(|uri| uri == class_uri)
    }

    /// The term to attach to an attribute.
    pub fn term(&self) -> VocabularyTerm {
        VocabularyTerm::new(&self.name, &self.uri)
    }
}

/// A vocabulary document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub classes: Vec<VocabularyClass>,
    #[serde(default)]
    pub properties: Vec<VocabularyProperty>,
}

impl Vocabulary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder: append a property.
    pub fn with_property(mut self, property: VocabularyProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Builder: append a class.
    pub fn with_class(mut self, name: impl Into<String>, uri: impl Into<String>) -> Self {
        self.classes.push(VocabularyClass {
            name: name.into(),
            uri: uri.into(),
            sub_classes: Vec::new(),
        });
        self
    }

    pub fn from_json_str(json: &str) -> InputResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> InputResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| InputError::io(path, e))?;
        Self::from_json_str(&content)
    }

    /// Top-level properties named `name`, in vocabulary order.
    pub fn properties_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a VocabularyProperty> + 'a {
        self.properties.iter().filter(move |p| p.name == name)
    }

    /// Find a class by name, searching sub-classes depth first.
    pub fn class_by_name(&self, name: &str) -> Option<&VocabularyClass> {
        fn search<'a>(classes: &'a [VocabularyClass], name: &str) -> Option<&'a VocabularyClass> {
            classes.iter().find_map(|class| {
                if class.name == name {
                    Some(class)
                } else {
                    search(&class.sub_classes, name)
                }
            })
        }
        search(&self.classes, name)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.properties.is_empty()
    }
}
