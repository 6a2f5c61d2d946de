use projects_core::{Hours, Project};

#[test]
fn project_serialization_uses_expected_wire_fields() {
    let project = Project {
        id: Some(7),
        name: Some("Build shed".to_string()),
        estimated_hours: Some("12".parse().unwrap()),
        actual_hours: None,
        difficulty: Some(3),
        notes: Some("buy lumber first".to_string()),
    };

    let json = serde_json::to_value(&project).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "Build shed");
    assert_eq!(json["estimated_hours"], "12.00");
    assert!(json["actual_hours"].is_null());
    assert_eq!(json["difficulty"], 3);
    assert_eq!(json["notes"], "buy lumber first");

    let decoded: Project = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, project);
}

#[test]
fn hours_deserialization_rejects_malformed_text() {
    let err = serde_json::from_str::<Hours>("\"twelve\"").unwrap_err();
    assert!(err.to_string().contains("not a valid decimal number"));
}

#[test]
fn hours_deserialization_normalizes_fraction_digits() {
    let hours: Hours = serde_json::from_str("\"2.5\"").unwrap();
    assert_eq!(hours, Hours::from_hundredths(250));
    assert_eq!(serde_json::to_string(&hours).unwrap(), "\"2.50\"");
}

#[test]
fn named_project_has_no_id_and_empty_optional_fields() {
    let project = Project::named("Paint fence");

    assert_eq!(project.id, None);
    assert_eq!(project.name.as_deref(), Some("Paint fence"));
    assert_eq!(project.estimated_hours, None);
    assert_eq!(project.actual_hours, None);
    assert_eq!(project.difficulty, None);
    assert_eq!(project.notes, None);
}
