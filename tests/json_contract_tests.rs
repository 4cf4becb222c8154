use approx::assert_relative_eq;
use vizprep::api::{
    CHART_MODEL_JSON_SCHEMA_V1, ChartModel, ChartModelJsonContractV1, GraphModel, VizEngine,
    VizEngineConfig,
};
use vizprep::core::{Entity, Point, Relation};

fn graph() -> GraphModel {
    let engine = VizEngine::new(
        VizEngineConfig::default()
            .with_group_by_property("team")
            .with_seed(2),
    )
    .expect("engine init");
    let entities = vec![
        Entity::new("a").with_label("Person").with_property("team", "X"),
        Entity::new("b").with_label("Person").with_property("team", "X"),
        Entity::new("c").with_label("Company"),
    ];
    engine
        .prepare_graph(entities, &[Relation::new("r1", "WORKS_AT", "a", "c")])
        .expect("graph model")
}

#[test]
fn chart_model_json_uses_camel_case_and_lowercase_chart_type() {
    let model = ChartModel::from_points(vec![Point::new("a", 1.0), Point::new("b", 2.0)]);
    let json = model.to_json_pretty().expect("serialize");
    assert!(json.contains("\"chartType\": \"pie\""));
    assert!(!json.contains("\"x\""));
}

#[test]
fn chart_model_contract_round_trips() {
    let model = ChartModel::from_points(vec![Point::new("a", 1.0).with_xy(0.5, 2.0)]);
    let json = model.to_json_contract_v1_pretty().expect("serialize");

    let payload: ChartModelJsonContractV1 = serde_json::from_str(&json).expect("payload");
    assert_eq!(payload.schema_version, CHART_MODEL_JSON_SCHEMA_V1);

    let parsed = ChartModel::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed, model);
    let bare = ChartModel::from_json_compat_str(&model.to_json_pretty().expect("bare"))
        .expect("parse bare");
    assert_eq!(bare, model);
}

#[test]
fn graph_model_contract_round_trips() {
    let model = graph();
    let json = model.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains("\"parentId\": \"group-X\""));
    assert!(json.contains("\"kind\": \"group\""));
    assert!(json.contains("\"childIds\""));

    let parsed = GraphModel::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed.groups, model.groups);
    assert_eq!(parsed.edges, model.edges);
    assert_eq!(parsed.nodes.len(), model.nodes.len());
    for (back, original) in parsed.nodes.iter().zip(&model.nodes) {
        assert_eq!(back.id, original.id);
        assert_eq!(back.parent_id, original.parent_id);
        assert_eq!(back.kind, original.kind);
        assert_relative_eq!(back.x, original.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, original.y, epsilon = 1e-9);
    }
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let json = r#"{"schema_version": 2, "graph": {"nodes": [], "groups": [], "edges": []}}"#;
    let err = GraphModel::from_json_compat_str(json).expect_err("version 2 must fail");
    assert!(format!("{err}").contains("unsupported graph schema version"));
}
