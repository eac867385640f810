//! Schema simplifiers for automatic mapping.
//!
//! A simplifier looks at a project's schema and proposes joins, concepts,
//! attributes and relations from naming conventions of a particular data
//! format. Simplifiers are picked by format code through a
//! [`SimplifierFactory`].
//!
//! # Example
//!
//! ```ignore
//! use triplifier::inference::SimplifierFactory;
//!
//! let factory = SimplifierFactory::default();
//! let simplifier = factory.simplifier("DwCA").unwrap();
//! let found_concepts = simplifier.simplify(&mut project, Some(&vocabulary));
//! ```

mod dwca;
mod rules;

use std::collections::BTreeMap;

use crate::config::SimplifierSettings;
use crate::project::Project;
use crate::vocabulary::Vocabulary;

pub use dwca::{DwcaConfig, DwcaSimplifier};
pub use rules::{id_column_stem, DwcaRules, DWCA_RULES, OCCURRENCE_URI};

/// A format-specific mapping heuristic.
pub trait Simplifier {
    /// Short code identifying the input format, e.g. `DwCA`.
    fn format_code(&self) -> &'static str;

    /// Human-readable format name.
    fn format_description(&self) -> &'static str;

    /// Propose mapping elements and write them to `project`.
    ///
    /// Each collection is only written when something new was found. Returns
    /// true if at least one concept was added. Attribute and relation
    /// inference need a vocabulary and are skipped without one.
    fn simplify(&self, project: &mut Project, vocabulary: Option<&Vocabulary>) -> bool;
}

type Constructor = Box<dyn Fn() -> Box<dyn Simplifier>>;

struct Registration {
    description: &'static str,
    constructor: Constructor,
}

/// Builds simplifiers by format code.
pub struct SimplifierFactory {
    simplifiers: BTreeMap<&'static str, Registration>,
}

impl SimplifierFactory {
    /// A factory with no simplifiers registered.
    pub fn empty() -> Self {
        Self {
            simplifiers: BTreeMap::new(),
        }
    }

    /// A factory with every built-in simplifier, configured from `settings`.
    pub fn new(settings: &SimplifierSettings) -> Self {
        let mut factory = Self::empty();
        let config = DwcaConfig::from(settings);
        factory.add_simplifier(move || DwcaSimplifier::new(config.clone()));
        factory
    }

    /// Register a simplifier under its own format code, replacing any
    /// previous registration for that code.
    pub fn add_simplifier<S, F>(&mut self, constructor: F)
    where
        S: Simplifier + 'static,
        F: Fn() -> S + 'static,
    {
        let sample = constructor();
        self.simplifiers.insert(
            sample.format_code(),
            Registration {
                description: sample.format_description(),
                constructor: Box::new(move || Box::new(constructor()) as Box<dyn Simplifier>),
            },
        );
    }

    /// Format codes mapped to their descriptions.
    pub fn formats(&self) -> BTreeMap<&'static str, &'static str> {
        self.simplifiers
            .iter()
            .map(|(code, registration)| (*code, registration.description))
            .collect()
    }

    /// A new simplifier for `format_code`, if one is registered.
    pub fn simplifier(&self, format_code: &str) -> Option<Box<dyn Simplifier>> {
        self.simplifiers
            .get(format_code)
            .map(|registration| (registration.constructor)())
    }
}

impl Default for SimplifierFactory {
    fn default() -> Self {
        Self::new(&SimplifierSettings::default())
    }
}

impl std::fmt::Debug for SimplifierFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplifierFactory")
            .field("formats", &self.formats())
            .finish()
    }
}
