#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use triplifier::config::SimplifierSettings;
    use triplifier::inference::{DwcaSimplifier, Simplifier, SimplifierFactory};
    use triplifier::model::{Join, Table};
    use triplifier::project::{Project, ProjectObserver, PropertyName, PropertyValue};
    use triplifier::vocabulary::Vocabulary;

    const DWC_VOCABULARY: &str = r#"{
        "name": "Darwin Core",
        "classes": [
            {"name": "dwc:Occurrence", "uri": "http://rs.tdwg.org/dwc/terms/Occurrence"},
            {"name": "dwc:Taxon", "uri": "http://rs.tdwg.org/dwc/terms/Taxon"},
            {"name": "dwc:Event", "uri": "http://rs.tdwg.org/dwc/terms/Event"}
        ],
        "properties": [
            {"name": "scientificName", "uri": "http://rs.tdwg.org/dwc/terms/scientificName",
             "domain": ["http://rs.tdwg.org/dwc/terms/Taxon"]},
            {"name": "eventDate", "uri": "http://rs.tdwg.org/dwc/terms/eventDate",
             "domain": ["http://rs.tdwg.org/dwc/terms/Event"]},
            {"name": "basisOfRecord", "uri": "http://rs.tdwg.org/dwc/terms/basisOfRecord",
             "domain": ["http://www.w3.org/2000/01/rdf-schema#Resource"]}
        ]
    }"#;

    /// Counts change notifications.
    #[derive(Default)]
    struct Counter {
        changes: Cell<usize>,
    }

    impl ProjectObserver for Counter {
        fn project_property_changed(&self, _project: &Project, _property: PropertyName) {
            self.changes.set(self.changes.get() + 1);
        }
    }

    fn vocabulary() -> Vocabulary {
        Vocabulary::from_json_str(DWC_VOCABULARY).unwrap()
    }

    fn project_with(schema: Vec<Table>) -> Project {
        let mut project = Project::new("archive");
        project.set_property(PropertyValue::Schema(schema), None);
        project
    }

    fn keys(project: &Project) -> Vec<String> {
        project.entities().iter().map(|c| c.key().to_string()).collect()
    }

    fn relations(project: &Project) -> Vec<String> {
        project
            .relations()
            .iter()
            .map(|r| format!("{} {} {}", r.subject, r.predicate, r.object))
            .collect()
    }

    fn single_occurrence_table() -> Project {
        project_with(vec![Table::new("occurrence")
            .with_columns(["occurrenceID", "taxonID", "eventID"])
            .with_primary_key(["occurrenceID"])])
    }

    /// Main table with taxon and event extensions.
    fn star_archive() -> Project {
        project_with(vec![
            Table::new("maintable").with_columns([
                "id",
                "occurrenceID",
                "taxonID",
                "eventID",
                "basisOfRecord",
            ]),
            Table::new("taxon").with_columns(["id", "taxonID", "scientificName"]),
            Table::new("event").with_columns(["id", "eventID", "eventDate"]),
        ])
    }

    #[test]
    fn test_single_table_concepts() {
        let mut project = single_occurrence_table();
        assert!(DwcaSimplifier::default().simplify(&mut project, None));

        assert!(project.joins().is_empty());
        assert_eq!(
            keys(&project),
            vec!["occurrence.occurrenceID", "occurrence.taxonID", "occurrence.eventID"]
        );

        let classes: Vec<&str> = project.entities().iter().map(|c| c.class_name()).collect();
        assert_eq!(classes, vec!["dwc:Occurrence", "dwc:Taxon", "dwc:Event"]);
        assert_eq!(
            project.entities()[1].id_prefix.as_str(),
            "occurrence.taxonID_"
        );
    }

    #[test]
    fn test_no_vocabulary_yields_concepts_only() {
        let mut project = star_archive();
        assert!(DwcaSimplifier::default().simplify(&mut project, None));

        assert_eq!(project.joins().len(), 2);
        assert_eq!(project.entities().len(), 3);
        assert!(project.attributes().is_empty());
        assert!(project.relations().is_empty());
    }

    #[test]
    fn test_star_archive() {
        let mut project = star_archive();
        assert!(DwcaSimplifier::default().simplify(&mut project, Some(&vocabulary())));

        assert_eq!(
            project.joins(),
            &[
                Join::new("maintable", "taxonID", "taxon", "id"),
                Join::new("maintable", "eventID", "event", "id"),
            ]
        );
        assert_eq!(keys(&project), vec!["maintable.occurrenceID", "taxon.id", "event.id"]);
        assert_eq!(project.entities()[1].id_prefix.as_str(), "taxon.id_");

        let attributes: Vec<(String, &str)> = project
            .attributes()
            .iter()
            .map(|a| (a.concept.to_string(), a.column.as_str()))
            .collect();
        assert_eq!(
            attributes,
            vec![
                ("maintable.occurrenceID".to_string(), "basisOfRecord"),
                ("taxon.id".to_string(), "scientificName"),
                ("event.id".to_string(), "eventDate"),
            ]
        );

        assert_eq!(
            relations(&project),
            vec![
                "maintable.occurrenceID bsc:related_to taxon.id",
                "maintable.occurrenceID bsc:depends_on event.id",
            ]
        );
    }

    #[test]
    fn test_single_table_relations() {
        let mut project = single_occurrence_table();
        DwcaSimplifier::default().simplify(&mut project, Some(&vocabulary()));

        assert_eq!(
            relations(&project),
            vec![
                "occurrence.occurrenceID bsc:related_to occurrence.taxonID",
                "occurrence.occurrenceID bsc:depends_on occurrence.eventID",
            ]
        );
    }

    #[test]
    fn test_identification_claims_taxon_first() {
        let mut project = project_with(vec![Table::new("occurrence").with_columns([
            "occurrenceID",
            "taxonID",
            "identificationID",
        ])]);
        DwcaSimplifier::default().simplify(&mut project, Some(&vocabulary()));

        // Occurrence -> Taxon is allowed too, but Taxon is already consumed.
        assert_eq!(
            relations(&project),
            vec![
                "occurrence.identificationID bsc:depends_on occurrence.occurrenceID",
                "occurrence.identificationID bsc:depends_on occurrence.taxonID",
            ]
        );
    }

    #[test]
    fn test_unjoined_extension_gets_no_relation() {
        // No main table, so the extension stays unjoined.
        let mut project = project_with(vec![
            Table::new("core").with_columns(["occurrenceID", "taxonID"]),
            Table::new("taxon").with_columns(["id", "scientificName"]),
        ]);
        DwcaSimplifier::default().simplify(&mut project, Some(&vocabulary()));

        assert!(project.joins().is_empty());
        assert_eq!(keys(&project), vec!["core.occurrenceID", "taxon.id"]);
        assert!(project.relations().is_empty());
    }

    #[test]
    fn test_simplify_is_deterministic() {
        let vocabulary = vocabulary();
        let simplifier = DwcaSimplifier::default();

        let mut first = star_archive();
        simplifier.simplify(&mut first, Some(&vocabulary));
        let mut second = star_archive();
        simplifier.simplify(&mut second, Some(&vocabulary));

        assert_eq!(first.snapshot(), second.snapshot());
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let vocabulary = vocabulary();
        let simplifier = DwcaSimplifier::default();
        let mut project = star_archive();
        assert!(simplifier.simplify(&mut project, Some(&vocabulary)));
        let before = project.snapshot();

        let counter = Rc::new(Counter::default());
        project.register_observer(counter.clone());

        assert!(!simplifier.simplify(&mut project, Some(&vocabulary)));
        assert_eq!(counter.changes.get(), 0);
        assert_eq!(project.snapshot(), before);
    }

    #[test]
    fn test_dotted_table_concepts_not_duplicated() {
        let mut project = project_with(vec![Table::new("dwc.occurrence")
            .with_columns(["occurrenceID", "taxonID"])]);
        let simplifier = DwcaSimplifier::default();

        assert!(simplifier.simplify(&mut project, None));
        assert_eq!(
            keys(&project),
            vec!["dwc.occurrence.occurrenceID", "dwc.occurrence.taxonID"]
        );
        assert!(simplifier.infer_concepts(&project).is_empty());
        assert!(!simplifier.simplify(&mut project, None));
    }

    #[test]
    fn test_no_known_columns() {
        let mut project = project_with(vec![Table::new("notes").with_columns(["id", "text"])]);
        let counter = Rc::new(Counter::default());
        project.register_observer(counter.clone());

        assert!(!DwcaSimplifier::default().simplify(&mut project, Some(&vocabulary())));
        assert_eq!(counter.changes.get(), 0);
    }

    #[test]
    fn test_factory_builds_configured_simplifier() {
        let settings = SimplifierSettings {
            main_table: "core".to_string(),
            ..SimplifierSettings::default()
        };
        let factory = SimplifierFactory::new(&settings);
        assert_eq!(factory.formats().get("DwCA"), Some(&"Darwin Core Archive"));
        assert!(factory.simplifier("EML").is_none());

        let simplifier = factory.simplifier("DwCA").unwrap();
        assert_eq!(simplifier.format_code(), "DwCA");

        let mut project = project_with(vec![
            Table::new("core").with_columns(["id", "taxonID"]),
            Table::new("taxon").with_columns(["id", "scientificName"]),
        ]);
        assert!(simplifier.simplify(&mut project, None));
        assert_eq!(project.joins(), &[Join::new("core", "taxonID", "taxon", "id")]);
    }
}
