#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use triplifier::model::{Attribute, Concept, ConceptKey, Join, Relation, Table, VocabularyTerm};
    use triplifier::project::{Project, ProjectObserver, PropertyName, PropertyValue};

    /// Records (property, attributes, relations) sizes at each notification.
    #[derive(Default)]
    struct Journal {
        entries: RefCell<Vec<(PropertyName, usize, usize)>>,
    }

    impl ProjectObserver for Journal {
        fn project_property_changed(&self, project: &Project, property: PropertyName) {
            self.entries.borrow_mut().push((
                property,
                project.attributes().len(),
                project.relations().len(),
            ));
        }
    }

    fn class(name: &str) -> VocabularyTerm {
        VocabularyTerm::new(name, format!("http://example.org/{}", name))
    }

    fn concept(table: &str, column: &str) -> Concept {
        Concept::new(table, column, class("Thing"))
    }

    fn relation(subject: &str, object: &str) -> Relation {
        Relation::new(ConceptKey::from(subject), "bsc:related_to", ConceptKey::from(object))
    }

    fn attribute(key: &str, column: &str) -> Attribute {
        Attribute::new(ConceptKey::from(key), column, class(column))
    }

    /// Specimen database: specimen joined to site and taxon, collector joined to site.
    fn specimen_project() -> Project {
        let mut project = Project::new("specimens");
        project.set_property(
            PropertyValue::Schema(vec![
                Table::new("specimen").with_columns(["id", "site_id", "taxon_id", "catalog_no"]),
                Table::new("site").with_columns(["id", "locality"]),
                Table::new("taxon").with_columns(["id", "name"]),
                Table::new("collector").with_columns(["id", "site_id", "full_name"]),
            ]),
            None,
        );
        project.set_property(
            PropertyValue::Joins(vec![
                Join::new("specimen", "site_id", "site", "id"),
                Join::new("specimen", "taxon_id", "taxon", "id"),
                Join::new("collector", "site_id", "site", "id"),
            ]),
            None,
        );
        project.set_property(
            PropertyValue::Entities(vec![
                concept("specimen", "id"),
                concept("site", "id"),
                concept("taxon", "id"),
                concept("collector", "id"),
            ]),
            None,
        );
        project.set_property(
            PropertyValue::Attributes(vec![
                attribute("specimen.id", "catalog_no"),
                attribute("site.id", "locality"),
                attribute("taxon.id", "name"),
                attribute("collector.id", "full_name"),
            ]),
            None,
        );
        project.set_property(
            PropertyValue::Relations(vec![
                relation("specimen.id", "site.id"),
                relation("specimen.id", "taxon.id"),
                relation("collector.id", "site.id"),
                relation("specimen.id", "collector.id"),
            ]),
            None,
        );
        project
    }

    fn assert_invariants(project: &Project) {
        for attribute in project.attributes() {
            assert!(
                project.entity_by_key(&attribute.concept).is_some(),
                "orphaned attribute {:?}",
                attribute
            );
        }
        for relation in project.relations() {
            let subject = project.entity_by_key(&relation.subject).expect("subject");
            let object = project.entity_by_key(&relation.object).expect("object");
            assert!(project.is_relation_possible(subject, object));
            assert!(project.is_relation_valid(relation));
        }
    }

    #[test]
    fn test_fixture_is_consistent() {
        let project = specimen_project();
        assert_eq!(project.relations().len(), 4);
        assert_invariants(&project);
    }

    #[test]
    fn test_unjoined_tables_relation_deleted() {
        let mut project = Project::new("two tables");
        project.set_property(
            PropertyValue::Schema(vec![
                Table::new("t1").with_columns(["c1"]),
                Table::new("t2").with_columns(["c2"]),
            ]),
            None,
        );
        project.set_property(
            PropertyValue::Entities(vec![concept("t1", "c1"), concept("t2", "c2")]),
            None,
        );

        let (a, b) = (&project.entities()[0], &project.entities()[1]);
        assert!(!project.is_relation_possible(a, b));
        assert!(!project.is_relation_possible(b, a));

        project.set_property(PropertyValue::Relations(vec![relation("t1.c1", "t2.c2")]), None);
        assert!(project.relations().is_empty());
        assert_eq!(project.enforce_consistency(PropertyName::Relations), 0);
    }

    #[test]
    fn test_removing_sole_join_removes_only_dependent_relation() {
        let mut project = specimen_project();

        // specimen-taxon is the only path to taxon.
        project.set_property(
            PropertyValue::Joins(vec![
                Join::new("specimen", "site_id", "site", "id"),
                Join::new("collector", "site_id", "site", "id"),
            ]),
            None,
        );

        assert_eq!(
            project.relations(),
            &[
                relation("specimen.id", "site.id"),
                relation("collector.id", "site.id"),
                relation("specimen.id", "collector.id"),
            ]
        );
        assert_eq!(project.attributes().len(), 4);
        assert_invariants(&project);
    }

    #[test]
    fn test_one_notification_per_deletion() {
        let mut project = specimen_project();
        let journal = Rc::new(Journal::default());
        project.register_observer(journal.clone());

        // Removing site breaks one attribute and three relations.
        project.set_property(
            PropertyValue::Entities(vec![
                concept("specimen", "id"),
                concept("taxon", "id"),
                concept("collector", "id"),
            ]),
            None,
        );

        let entries = journal.entries.borrow();
        let properties: Vec<PropertyName> = entries.iter().map(|e| e.0).collect();
        assert_eq!(
            properties,
            vec![
                PropertyName::Entities,
                PropertyName::Attributes,
                PropertyName::Relations,
                PropertyName::Relations,
            ]
        );

        // Each notification observes exactly one more removal.
        let sizes: Vec<(usize, usize)> = entries.iter().map(|e| (e.1, e.2)).collect();
        assert_eq!(sizes, vec![(4, 4), (3, 4), (3, 3), (3, 2)]);
    }

    #[test]
    fn test_clearing_joins_removes_cross_table_relations() {
        let mut project = specimen_project();
        let journal = Rc::new(Journal::default());
        project.register_observer(journal.clone());

        project.set_property(PropertyValue::Joins(Vec::new()), None);

        // Only same-table relations could survive; there are none.
        assert!(project.relations().is_empty());
        let relation_events = journal
            .entries
            .borrow()
            .iter()
            .filter(|e| e.0 == PropertyName::Relations)
            .count();
        assert_eq!(relation_events, 4);
    }

    #[test]
    fn test_cascade_is_idempotent() {
        let mut project = specimen_project();

        // A mapping onto a table the schema never had.
        let mut joins = project.joins().to_vec();
        joins.push(Join::new("specimen", "site_id", "ghost", "id"));
        project.set_property(PropertyValue::Joins(joins), None);

        let mut entities = project.entities().to_vec();
        entities.push(concept("ghost", "id"));
        project.set_property(PropertyValue::Entities(entities), None);

        let mut attributes = project.attributes().to_vec();
        attributes.push(attribute("ghost.id", "label"));
        project.set_property(PropertyValue::Attributes(attributes), None);

        let mut relations = project.relations().to_vec();
        relations.push(relation("specimen.id", "ghost.id"));
        project.set_property(PropertyValue::Relations(relations), None);
        assert_eq!(project.relations().len(), 5);

        // Concept, its attribute and relation, then the join.
        assert_eq!(project.enforce_consistency(PropertyName::Schema), 4);
        assert_eq!(project.enforce_consistency(PropertyName::Schema), 0);

        assert_eq!(project.entities().len(), 4);
        assert_eq!(project.attributes().len(), 4);
        assert_eq!(project.relations().len(), 4);
        assert_eq!(project.joins().len(), 3);
        assert_invariants(&project);
    }

    #[test]
    fn test_dotted_table_names_keep_their_mapping() {
        let mut project = Project::new("schemas");
        project.set_property(
            PropertyValue::Schema(vec![
                Table::new("dbo.site").with_columns(["id", "locality"]),
                Table::new("dbo.sample").with_columns(["id", "site_id"]),
            ]),
            None,
        );
        project.set_property(
            PropertyValue::Joins(vec![Join::new("dbo.sample", "site_id", "dbo.site", "id")]),
            None,
        );
        project.set_property(
            PropertyValue::Entities(vec![concept("dbo.site", "id"), concept("dbo.sample", "id")]),
            None,
        );
        project.set_property(
            PropertyValue::Attributes(vec![attribute("dbo.site.id", "locality")]),
            None,
        );
        project.set_property(
            PropertyValue::Relations(vec![relation("dbo.sample.id", "dbo.site.id")]),
            None,
        );

        assert!(project.entity_by_key(&ConceptKey::from("dbo.site.id")).is_some());
        assert_eq!(project.attributes(), &[attribute("dbo.site.id", "locality")]);
        assert_eq!(project.relations().len(), 1);
        assert!(!project.is_column_available("dbo.site", "locality"));
        assert_eq!(project.enforce_consistency(PropertyName::Schema), 0);
        assert_invariants(&project);
    }

    #[test]
    fn test_invariants_hold_after_every_change() {
        let mut project = specimen_project();
        let steps = vec![
            PropertyValue::Joins(vec![Join::new("collector", "site_id", "site", "id")]),
            PropertyValue::Relations(vec![
                relation("collector.id", "site.id"),
                relation("specimen.id", "taxon.id"),
            ]),
            PropertyValue::Attributes(vec![
                attribute("site.id", "locality"),
                attribute("gone.id", "x"),
            ]),
            PropertyValue::Schema(vec![
                Table::new("site").with_columns(["id", "locality"]),
                Table::new("collector").with_columns(["id", "site_id"]),
            ]),
            PropertyValue::Entities(vec![concept("site", "id"), concept("collector", "id")]),
            PropertyValue::Relations(vec![relation("site.id", "collector.id")]),
        ];

        for step in steps {
            project.set_property(step, None);
            assert_invariants(&project);
        }

        assert_eq!(project.relations(), &[relation("site.id", "collector.id")]);
        assert_eq!(project.attributes(), &[attribute("site.id", "locality")]);
    }

    #[test]
    fn test_schema_replacement_drops_missing_tables() {
        let mut project = specimen_project();
        project.set_property(
            PropertyValue::Schema(vec![
                Table::new("specimen").with_columns(["id", "site_id", "taxon_id", "catalog_no"]),
                Table::new("site").with_columns(["id", "locality"]),
            ]),
            None,
        );

        let keys: Vec<String> = project.entities().iter().map(|c| c.key().to_string()).collect();
        assert_eq!(keys, vec!["specimen.id", "site.id"]);
        assert_eq!(project.joins(), &[Join::new("specimen", "site_id", "site", "id")]);
        assert_eq!(project.relations(), &[relation("specimen.id", "site.id")]);
        assert_invariants(&project);
    }
}
