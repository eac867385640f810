//! Darwin Core naming rules.
//!
//! Static tables describing which columns identify Darwin Core classes, which
//! record-level terms belong to occurrences, and which class pairs may be
//! related. The tables are built once and shared by every simplifier
//! instance.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::model::VocabularyTerm;

const DWC: &str = "http://rs.tdwg.org/dwc/terms/";

/// URI of the class that receives record-level terms.
pub const OCCURRENCE_URI: &str = "http://rs.tdwg.org/dwc/terms/Occurrence";

/// Matches `<name>ID` columns, capturing `<name>`.
static ID_COLUMN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.+)ID$").unwrap());

/// Shared Darwin Core rule tables.
pub static DWCA_RULES: LazyLock<DwcaRules> = LazyLock::new(DwcaRules::build);

/// Lookup tables driving the Darwin Core simplifier.
#[derive(Debug)]
pub struct DwcaRules {
    /// Identifier column name -> class.
    concept_columns: HashMap<&'static str, VocabularyTerm>,
    /// Record-level terms attached to occurrences regardless of their domain.
    record_level_occurrence: HashSet<&'static str>,
    /// Subject class -> object class -> predicate.
    relations: HashMap<&'static str, HashMap<&'static str, &'static str>>,
    /// Subject classes in the order they claim objects.
    subject_order: Vec<&'static str>,
}

impl DwcaRules {
    fn build() -> Self {
        let dwc = |name: &str| VocabularyTerm::new(format!("dwc:{}", name), format!("{}{}", DWC, name));

        let concept_columns = HashMap::from([
            ("taxonID", dwc("Taxon")),
            ("datasetID", dwc("Dataset")),
            (
                "locationID",
                VocabularyTerm::new("dcterms:Location", "http://purl.org/dc/terms/Location"),
            ),
            ("eventID", dwc("Event")),
            ("geologicalContextID", dwc("GeologicalContext")),
            ("identificationID", dwc("Identification")),
            ("measurementID", dwc("MeasurementOrFact")),
            ("occurrenceID", dwc("Occurrence")),
            ("resourceRelationshipID", dwc("ResourceRelationship")),
        ]);

        let record_level_occurrence = HashSet::from([
            "dcterms:type",
            "institutionID",
            "collectionID",
            "institutionCode",
            "collectionCode",
            "ownerInstitutionCode",
            "basisOfRecord",
        ]);

        let relations = HashMap::from([
            (
                "dwc:Identification",
                HashMap::from([
                    ("dwc:Taxon", "bsc:depends_on"),
                    ("dwc:Occurrence", "bsc:depends_on"),
                ]),
            ),
            (
                "dwc:Event",
                HashMap::from([
                    ("dcterms:Location", "bsc:related_to"),
                    ("dwc:GeologicalContext", "bsc:related_to"),
                ]),
            ),
            (
                "dwc:Occurrence",
                HashMap::from([
                    ("dwc:Event", "bsc:depends_on"),
                    ("dwc:GeologicalContext", "bsc:depends_on"),
                    ("dcterms:Location", "bsc:depends_on"),
                    ("dwc:Taxon", "bsc:related_to"),
                ]),
            ),
        ]);

        Self {
            concept_columns,
            record_level_occurrence,
            relations,
            subject_order: vec!["dwc:Identification", "dwc:Event", "dwc:Occurrence"],
        }
    }

    /// The class identified by `column`, if it is a known identifier column.
    pub fn concept_class(&self, column: &str) -> Option<&VocabularyTerm> {
        self.concept_columns.get(column)
    }

    /// Is `term` a record-level term that belongs to occurrences?
    pub fn is_record_level_occurrence(&self, term: &str) -> bool {
        self.record_level_occurrence.contains(term)
    }

    /// Predicate linking `subject` to `object`, if that pair is allowed.
    pub fn predicate(&self, subject: &str, object: &str) -> Option<&'static str> {
        self.relations.get(subject)?.get(object).copied()
    }

    /// Subject classes in priority order.
    pub fn subject_order(&self) -> &[&'static str] {
        &self.subject_order
    }
}

/// The `<name>` of a `<name>ID` column.
pub fn id_column_stem(column: &str) -> Option<&str> {
    ID_COLUMN_PATTERN
        .captures(column)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
