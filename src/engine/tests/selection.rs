use super::*;

#[test]
fn test_add_resource_creates_empty_selection() {
    let mut engine = test_engine();
    engine.add_resource(s3_resource("s3-test"));

    let selection = engine.selection("s3-test").unwrap();
    assert!(selection.actions.is_empty());
    assert!(selection.arn.is_none());
}

#[test]
fn test_re_adding_replaces_catalog_entry_but_keeps_selection() {
    let mut engine = test_engine();
    engine.add_resource(s3_resource("s3-test"));
    engine.set_actions("s3-test", ["s3:GetObject"]);
    engine.set_arn("s3-test", "arn:aws:s3:::b");

    engine.add_resource(s3_resource("s3-test").with_name("Renamed bucket"));

    assert_eq!(engine.resource("s3-test").unwrap().name, "Renamed bucket");
    let selection = engine.selection("s3-test").unwrap();
    assert_eq!(selection.actions, strings(&["s3:GetObject"]));
    assert_eq!(selection.arn.as_deref(), Some("arn:aws:s3:::b"));
    assert_eq!(engine.state().resources.len(), 1);
}

#[test]
fn test_set_actions_deduplicates_and_replaces() {
    let mut engine = test_engine();
    engine.add_resource(s3_resource("s3-test"));
    engine.set_actions("s3-test", ["s3:GetObject", "s3:GetObject", "s3:PutObject"]);
    assert_eq!(
        engine.selection("s3-test").unwrap().actions,
        strings(&["s3:GetObject", "s3:PutObject"])
    );

    engine.set_actions("s3-test", ["s3:PutObject"]);
    assert_eq!(
        engine.selection("s3-test").unwrap().actions,
        strings(&["s3:PutObject"])
    );
}

#[test]
fn test_set_actions_does_not_resolve_dependencies() {
    let mut engine = test_engine();
    engine.add_resource(s3_resource("s3-test"));
    engine.set_actions("s3-test", ["s3:GetObject"]);
    assert_eq!(
        engine.selection("s3-test").unwrap().actions,
        strings(&["s3:GetObject"])
    );
}

#[test]
fn test_set_arn_stores_raw_string() {
    let mut engine = test_engine();
    engine.add_resource(s3_resource("s3-test"));
    engine.set_arn("s3-test", "definitely not an arn");
    assert_eq!(
        engine.selection("s3-test").unwrap().arn.as_deref(),
        Some("definitely not an arn")
    );

    engine.clear_arn("s3-test");
    assert!(engine.selection("s3-test").unwrap().arn.is_none());
}

#[test]
fn test_unknown_resource_operations_are_no_ops() {
    let mut engine = test_engine();
    engine.set_actions("ghost", ["s3:GetObject"]);
    engine.set_arn("ghost", "arn:aws:s3:::ghost");
    engine.clear_arn("ghost");
    engine.remove_resource("ghost");

    assert!(engine.selection("ghost").is_none());
    assert!(engine.resolved_actions("ghost").is_none());
    assert_eq!(engine.state(), EngineState::default());
    assert!(engine.compile().is_empty());
}

#[test]
fn test_remove_resource_is_idempotent() {
    let mut engine = test_engine();
    engine.add_resource(s3_resource("s3-test"));
    engine.remove_resource("s3-test");
    engine.remove_resource("s3-test");
    assert!(engine.resource("s3-test").is_none());
    assert!(engine.selection("s3-test").is_none());
}

#[test]
fn test_state_snapshot_keeps_insertion_order() {
    let mut engine = test_engine();
    for id in ["zeta", "alpha", "mid"] {
        engine.add_resource(s3_resource(id));
    }
    engine.remove_resource("alpha");
    engine.add_resource(s3_resource("alpha"));

    let state = engine.state();
    let resource_ids: Vec<&str> = state.resources.iter().map(|r| r.id.as_str()).collect();
    let selection_ids: Vec<&str> = state
        .selections
        .iter()
        .map(|s| s.resource_id.as_str())
        .collect();
    assert_eq!(resource_ids, vec!["zeta", "mid", "alpha"]);
    assert_eq!(selection_ids, vec!["zeta", "mid", "alpha"]);
}

#[test]
fn test_state_is_a_copy() {
    let mut engine = test_engine();
    engine.add_resource(s3_resource("s3-test"));
    let mut state = engine.state();
    state.selections[0].actions.push("s3:DeleteObject".to_string());
    state.resources.clear();

    assert!(engine.selection("s3-test").unwrap().actions.is_empty());
    assert!(engine.resource("s3-test").is_some());
}

#[test]
fn test_state_serializes_camel_case() {
    let mut engine = test_engine();
    engine.add_resource(Resource::new("q", "sqs"));
    engine.set_actions("q", ["sqs:SendMessage"]);
    let json = serde_json::to_value(engine.state()).unwrap();
    assert_eq!(json["selections"][0]["resourceId"], "q");
    assert!(json["arnCatalog"].as_array().unwrap().is_empty());
}

fn arn_catalog() -> Vec<ArnItem> {
    vec![
        ArnItem::new("arn:aws:s3:::logs", "s3"),
        ArnItem::new("arn:aws:ec2:us-east-1:1:instance/i-1", "ec2").with_resource_type("instance"),
        ArnItem::new("arn:aws:ec2:us-east-1:1:volume/v-1", "ec2").with_resource_type("volume"),
        ArnItem::new("arn:aws:ec2:us-east-1:1:instance/i-2", "ec2").with_resource_type("instance"),
    ]
}

#[parameterized(
    by_service = { "ec2", None, &["arn:aws:ec2:us-east-1:1:instance/i-1", "arn:aws:ec2:us-east-1:1:volume/v-1", "arn:aws:ec2:us-east-1:1:instance/i-2"] },
    by_service_and_type = { "ec2", Some("instance"), &["arn:aws:ec2:us-east-1:1:instance/i-1", "arn:aws:ec2:us-east-1:1:instance/i-2"] },
    type_of_other_service = { "s3", Some("instance"), &[] },
    unknown_service = { "lambda", None, &[] },
)]
fn test_filtered_arns(service: &str, resource_type: Option<&str>, expected: &[&str]) {
    let mut engine = test_engine();
    engine.set_arn_catalog(arn_catalog());
    let found: Vec<String> = engine
        .filtered_arns(service, resource_type)
        .into_iter()
        .map(|i| i.arn)
        .collect();
    assert_eq!(found, strings(expected));
}

#[test]
fn test_reset_clears_everything_but_the_resolver() {
    let mut engine = test_engine();
    engine.add_resource(s3_resource("s3-test"));
    engine.set_actions("s3-test", ["s3:GetObject"]);
    engine.set_arn_catalog(arn_catalog());

    engine.reset();
    assert_eq!(engine.state(), EngineState::default());
    assert!(engine.compile().is_empty());

    engine.add_resource(s3_resource("s3-test"));
    engine.set_actions("s3-test", ["s3:GetObject"]);
    assert_eq!(
        engine.resolved_actions("s3-test").unwrap(),
        strings(&["s3:GetObject", "s3:ListBucket"])
    );
}

#[test]
fn test_soft_dependencies_and_descriptions() {
    let engine = test_engine();
    assert_eq!(
        engine.soft_dependencies("ec2", "ec2:RunInstances"),
        strings(&["ec2:CreateTags"])
    );
    assert_eq!(
        engine.describe_operation("ec2", "ec2:RunInstances").as_deref(),
        Some("Launch instances")
    );
    assert!(engine.soft_dependencies("s3", "s3:GetObject").is_empty());
    assert!(engine.describe_operation("s3", "s3:Missing").is_none());
    assert_eq!(engine.dependency_tables().len(), 2);
}
