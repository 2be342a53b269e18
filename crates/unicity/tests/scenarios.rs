use serde_json::{Value, json};
use unicity::{
    Position, SearchPaths, UniqueConstraint, UniquePolicy, UniqueRule, UniqueViolation,
    ValidationContext, validate,
};

const POLICIES: [UniquePolicy; 2] = [UniquePolicy::Counted, UniquePolicy::PositionAware];

fn rule(search: &[&str], policy: UniquePolicy) -> UniqueRule {
    UniqueRule::new(
        "records.[].id",
        UniqueConstraint::new("record-ids", search.iter().copied().collect::<SearchPaths>())
            .unwrap()
            .with_policy(policy),
    )
}

fn run(doc: &Value, search: &[&str], policy: UniquePolicy) -> Vec<String> {
    validate(doc, Some(doc), &[rule(search, policy)])
        .errors
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn id_at(index: usize) -> Position {
    Position::root().key("records").index(index).key("id")
}

#[test]
fn test_distinct_ids_are_unique() {
    let doc = json!({"records": [{"id": 1}, {"id": 2}]});
    for policy in POLICIES {
        assert!(run(&doc, &["records.[].id"], policy).is_empty(), "{policy:?}");
    }
}

#[test]
fn test_repeated_id_is_reported_counted() {
    let doc = json!({"records": [{"id": 1}, {"id": 2}, {"id": 2}]});
    assert_eq!(
        run(&doc, &["records.[].id"], UniquePolicy::Counted),
        vec![
            "records.1.id: \"2\" was required to be unique, but duplicate found",
            "records.2.id: \"2\" was required to be unique, but duplicate found",
        ]
    );
}

#[test]
fn test_repeated_id_is_reported_with_position() {
    let doc = json!({"records": [{"id": 1}, {"id": 2}, {"id": 2}]});
    assert_eq!(
        run(&doc, &["records.[].id"], UniquePolicy::PositionAware),
        vec![
            "records.1.id: \"2\" was required to be unique, but duplicate found at \"records.2.id\"",
            "records.2.id: \"2\" was required to be unique, but duplicate found at \"records.1.id\"",
        ]
    );
}

#[test]
fn test_alternate_path_duplicate() {
    let alternates = ["records.[].id", "records.[].altIds.[]"];
    let doc = json!({"records": [{"id": 1, "altIds": [3]}, {"id": 2}]});
    for policy in POLICIES {
        assert!(run(&doc, &alternates, policy).is_empty(), "{policy:?}");
    }

    let doc = json!({"records": [{"id": 1, "altIds": [3]}, {"id": 2}, {"id": 3}]});
    for policy in POLICIES {
        let errors = run(&doc, &alternates, policy);
        assert_eq!(errors.len(), 1, "{policy:?}");
        assert!(errors[0].starts_with("records.2.id: \"3\""), "{policy:?}");
    }
}

#[test]
fn test_alternate_path_position_aware_reports_alternate_location() {
    let doc = json!({"records": [{"id": 1, "altIds": [3]}, {"id": 2}]});
    let ctx = ValidationContext::new(&doc);
    let constraint = UniqueConstraint::new(
        "record-ids",
        ["records.[].id", "records.[].altIds.[]"].into_iter().collect(),
    )
    .unwrap()
    .with_policy(UniquePolicy::PositionAware);

    let err = constraint.check(&json!(3), Some(&id_at(2)), &ctx).unwrap_err();
    assert_eq!(
        err,
        UniqueViolation::DuplicateFound {
            rule: "record-ids".to_string(),
            value: json!(3),
            position: Some(Position::root().key("records").index(0).key("altIds").index(0)),
        }
    );
}

#[test]
fn test_missing_context_regardless_of_content() {
    let unique = json!({"records": [{"id": 1}, {"id": 2}]});
    let duplicated = json!({"records": [{"id": 1}, {"id": 1}]});
    let empty = json!({"records": []});
    let compound = json!({"records": [{"id": {"a": 1}}]});
    for doc in [&unique, &duplicated, &empty, &compound] {
        for policy in POLICIES {
            let output = validate(doc, None, &[rule(&["records.[].id"], policy)]);
            assert_eq!(output.errors.len(), 1);
            assert!(output.errors[0].violation.is_missing_context());
        }
    }
}

#[test]
fn test_adding_one_equal_value_flips_result() {
    let mut doc = json!({"records": [{"id": "a"}, {"id": "b"}, {"id": "c"}]});
    for policy in POLICIES {
        assert!(run(&doc, &["records.[].id"], policy).is_empty());
    }

    doc["records"]
        .as_array_mut()
        .unwrap()
        .push(json!({"id": "b"}));
    for policy in POLICIES {
        assert_eq!(run(&doc, &["records.[].id"], policy).len(), 2, "{policy:?}");
    }
}

#[test]
fn test_bulk_validation_builds_cache_once() {
    let records: Vec<Value> = (0..1000)
        .map(|i| json!({"id": format!("record-{i}")}))
        .collect();
    let doc = json!({ "records": records });
    let ctx = ValidationContext::new(&doc);
    let rule = rule(&["records.[].id"], UniquePolicy::Counted);

    unicity::validate_rule(&ctx, &doc, &rule);
    assert_eq!(ctx.cache_builds(), 1);
    // A second rule over the same search paths reuses the set.
    unicity::validate_rule(&ctx, &doc, &rule);
    assert_eq!(ctx.cache_builds(), 1);

    let output = ctx.finish();
    assert!(output.is_valid);
    assert!(output.warnings.is_empty());
}

#[test]
fn test_separate_context_document() {
    // Values come from a submitted document; duplicates are searched in a
    // reference document that already holds the stored records.
    let stored = json!({"records": [{"id": "toyota"}, {"id": "nissan"}]});
    let submitted = json!({"records": [{"id": "honda"}, {"id": "toyota"}]});
    for policy in POLICIES {
        let output = validate(&submitted, Some(&stored), &[rule(&["records.[].id"], policy)]);
        assert_eq!(output.errors.len(), 1, "{policy:?}");
        assert_eq!(output.errors[0].path, id_at(1));
    }
}

#[test]
fn test_stored_value_at_same_index_is_found() {
    let stored = json!({"records": [{"id": "toyota"}, {"id": "nissan"}]});
    let submitted = json!({"records": [{"id": "toyota"}]});
    for policy in POLICIES {
        let errors: Vec<String> = validate(
            &submitted,
            Some(&stored),
            &[rule(&["records.[].id"], policy)],
        )
        .errors
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(errors.len(), 1, "{policy:?}");
        assert!(errors[0].starts_with("records.0.id: \"toyota\""), "{policy:?}");
    }
}
