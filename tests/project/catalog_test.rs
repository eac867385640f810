#[cfg(test)]
mod tests {
    use triplifier::model::{Concept, ConceptKey, Join, Relation, Table, VocabularyTerm};
    use triplifier::project::{Project, PropertyValue};

    fn concept(table: &str) -> Concept {
        Concept::new(table, "id", VocabularyTerm::new("ex:Thing", "http://example.org/Thing"))
    }

    /// A chain a - t1 - t2 - b.
    fn chain_project() -> Project {
        let mut project = Project::new("chain");
        project.set_property(
            PropertyValue::Schema(vec![
                Table::new("a").with_columns(["id", "t1_id"]),
                Table::new("t1").with_columns(["id", "t2_id"]),
                Table::new("t2").with_columns(["id"]),
                Table::new("b").with_columns(["id", "t2_id"]),
            ]),
            None,
        );
        project.set_property(
            PropertyValue::Joins(vec![
                Join::new("a", "t1_id", "t1", "id"),
                Join::new("t1", "t2_id", "t2", "id"),
                Join::new("b", "t2_id", "t2", "id"),
            ]),
            None,
        );
        project.set_property(
            PropertyValue::Entities(vec![concept("a"), concept("t1"), concept("t2"), concept("b")]),
            None,
        );
        project
    }

    #[test]
    fn test_one_intermediate_table_is_reachable() {
        let project = chain_project();
        let catalog = project.relation_catalog();

        assert!(catalog.contains(&"a.id".into(), &"t2.id".into()));
        assert!(catalog.contains(&"t2.id".into(), &"a.id".into()));
        assert!(catalog.contains(&"t1.id".into(), &"b.id".into()));
    }

    #[test]
    fn test_two_intermediate_tables_not_reachable() {
        let project = chain_project();
        let catalog = project.relation_catalog();

        assert!(!catalog.contains(&"a.id".into(), &"b.id".into()));
        assert!(!catalog.contains(&"b.id".into(), &"a.id".into()));

        let (a, b) = (&project.entities()[0], &project.entities()[3]);
        assert!(!project.is_relation_possible(a, b));
    }

    #[test]
    fn test_count_is_unordered_pairs() {
        let project = chain_project();

        // Six pairs among four concepts, minus a-b.
        assert_eq!(project.relation_catalog().count(), 5.0);
    }

    #[test]
    fn test_count_for_fully_connected_concepts() {
        let mut project = Project::new("star");
        project.set_property(
            PropertyValue::Schema(vec![
                Table::new("hub").with_columns(["id", "a_id", "b_id", "c_id", "d_id"]),
                Table::new("a").with_columns(["id"]),
                Table::new("b").with_columns(["id"]),
                Table::new("c").with_columns(["id"]),
                Table::new("d").with_columns(["id"]),
            ]),
            None,
        );
        project.set_property(
            PropertyValue::Joins(
                ["a", "b", "c", "d"]
                    .iter()
                    .map(|t| Join::new("hub", format!("{}_id", t), *t, "id"))
                    .collect(),
            ),
            None,
        );
        project.set_property(
            PropertyValue::Entities(
                ["hub", "a", "b", "c", "d"].iter().map(|t| concept(t)).collect(),
            ),
            None,
        );

        let n = project.entities().len() as f64;
        assert_eq!(project.relation_catalog().count(), n * (n - 1.0) / 2.0);
    }

    #[test]
    fn test_catalog_follows_join_changes() {
        let mut project = chain_project();
        project.set_property(
            PropertyValue::Joins(vec![Join::new("a", "t1_id", "t1", "id")]),
            None,
        );

        let catalog = project.relation_catalog();
        assert_eq!(catalog.count(), 1.0);
        assert_eq!(
            catalog.objects_for(&ConceptKey::from("a.id")),
            Some(&[ConceptKey::from("t1.id")][..])
        );
        assert_eq!(catalog.objects_for(&ConceptKey::from("b.id")), None);
    }

    #[test]
    fn test_relation_queries() {
        let mut project = chain_project();
        project.set_property(
            PropertyValue::Relations(vec![
                Relation::new("a.id".into(), "ex:partOf", "t1.id".into()),
                Relation::new("t2.id".into(), "ex:partOf", "t1.id".into()),
            ]),
            None,
        );

        let t1 = ConceptKey::from("t1.id");
        assert_eq!(project.relation_count_by_entity(&t1), 2);
        assert!(project
            .relation_by_entities(&t1, &ConceptKey::from("a.id"))
            .is_some());
        assert!(project
            .relation_by_entities(&ConceptKey::from("a.id"), &ConceptKey::from("t2.id"))
            .is_none());
    }

    #[test]
    fn test_catalog_display() {
        let project = chain_project();
        insta::assert_snapshot!(project.relation_catalog().to_string(), @r"
        possible relations: 5
        a.id -> t1.id, t2.id
        t1.id -> a.id, t2.id, b.id
        t2.id -> a.id, t1.id, b.id
        b.id -> t1.id, t2.id
        ");
    }
}
