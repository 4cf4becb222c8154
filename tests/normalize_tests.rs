use serde_json::json;
use vizprep::core::{DataInput, Entity, Point, PropertyMap, PropertyValue, Relation, normalize};

fn record(value: serde_json::Value) -> PropertyMap {
    match PropertyValue::from(value) {
        PropertyValue::Map(map) => map,
        other => panic!("expected object, got {other:?}"),
    }
}

fn records(values: Vec<serde_json::Value>) -> DataInput {
    DataInput::Records(values.into_iter().map(record).collect())
}

fn values(value: serde_json::Value) -> Vec<PropertyValue> {
    match PropertyValue::from(value) {
        PropertyValue::List(items) => items,
        other => panic!("expected array, got {other:?}"),
    }
}

#[test]
fn records_without_numeric_field_fall_back_to_frequency_counts() {
    let input = records(vec![
        json!({"city": "NYC"}),
        json!({"city": "NYC"}),
        json!({"city": "LA"}),
    ]);

    let points = normalize(&input);
    assert_eq!(points, vec![Point::new("NYC", 2.0), Point::new("LA", 1.0)]);
    let total: f64 = points.iter().map(|p| p.value).sum();
    assert_eq!(total, 3.0);
}

#[test]
fn empty_records_yield_no_points() {
    assert!(normalize(&DataInput::Records(Vec::new())).is_empty());
    assert!(normalize(&records(vec![json!({})])).is_empty());
}

#[test]
fn records_use_first_numeric_field_and_label_fallback_chain() {
    let input = records(vec![
        json!({"name": "alpha", "score": 3}),
        json!({"title": "beta", "score": 5}),
        json!({"id": 7, "score": null}),
        json!({"id": 8, "score": 4}),
        json!({"score": 2}),
    ]);

    let points = normalize(&input);
    assert_eq!(
        points,
        vec![
            Point::new("alpha", 3.0),
            Point::new("beta", 5.0),
            Point::new("8", 4.0),
            Point::new("Record 5", 2.0),
        ]
    );
}

#[test]
fn records_coerce_numeric_strings_and_drop_the_rest() {
    let input = records(vec![
        json!({"name": "a", "v": 1}),
        json!({"name": "b", "v": "2.5"}),
        json!({"name": "c", "v": "n/a"}),
        json!({"name": "d"}),
    ]);

    let points = normalize(&input);
    assert_eq!(points, vec![Point::new("a", 1.0), Point::new("b", 2.5)]);
}

#[test]
fn frequency_fallback_counts_missing_values_as_unknown() {
    let input = records(vec![
        json!({"kind": "x"}),
        json!({"other": 1}),
        json!({"kind": null}),
    ]);

    let points = normalize(&input);
    assert_eq!(points, vec![Point::new("x", 1.0), Point::new("Unknown", 2.0)]);
}

#[test]
fn nodes_are_counted_by_first_label() {
    let input = DataInput::Nodes(vec![
        Entity::new("1").with_label("Person").with_label("Employee"),
        Entity::new("2").with_label("Person"),
        Entity::new("3").with_label("Company"),
        Entity::new("4"),
    ]);

    let points = normalize(&input);
    assert_eq!(
        points,
        vec![
            Point::new("Person", 2.0),
            Point::new("Company", 1.0),
            Point::new("Unknown", 1.0),
        ]
    );
}

#[test]
fn relationships_are_counted_by_type() {
    let input = DataInput::Relationships(vec![
        Relation::new("r1", "KNOWS", "1", "2"),
        Relation::new("r2", "KNOWS", "2", "3"),
        Relation::new("r3", "", "3", "1"),
    ]);

    let points = normalize(&input);
    assert_eq!(points, vec![Point::new("KNOWS", 2.0), Point::new("Unknown", 1.0)]);
}

#[test]
fn arrays_of_objects_use_item_labels() {
    let input = DataInput::Array(values(json!([
        {"label": "first", "n": 1},
        {"n": 2},
        {"title": "third", "n": 3}
    ])));

    let points = normalize(&input);
    assert_eq!(
        points,
        vec![
            Point::new("first", 1.0),
            Point::new("Item 2", 2.0),
            Point::new("third", 3.0),
        ]
    );
}

#[test]
fn arrays_of_primitives_are_frequency_counted() {
    let input = DataInput::Array(values(json!(["a", "b", "a", 1, true])));

    let points = normalize(&input);
    assert_eq!(
        points,
        vec![
            Point::new("a", 2.0),
            Point::new("b", 1.0),
            Point::new("1", 1.0),
            Point::new("true", 1.0),
        ]
    );
}

#[test]
fn objects_emit_one_point_per_numeric_property() {
    let input = DataInput::Object(record(json!({"a": 1, "b": "x", "c": 2.5, "d": null})));

    let points = normalize(&input);
    assert_eq!(points, vec![Point::new("a", 1.0), Point::new("c", 2.5)]);
}

#[test]
fn records_with_x_and_y_carry_coordinates() {
    let input = records(vec![json!({"name": "p", "x": 1, "y": 2})]);

    let points = normalize(&input);
    assert_eq!(points, vec![Point::new("p", 1.0).with_xy(1.0, 2.0)]);
}

#[test]
fn tagged_json_payload_selects_the_input_shape() {
    let input = DataInput::from_json_str(
        r#"{"kind": "records", "data": [{"city": "NYC"}, {"city": "LA"}]}"#,
    )
    .expect("parse input");
    assert_eq!(input.kind(), "records");
    assert_eq!(normalize(&input).len(), 2);

    let nodes = DataInput::from_json_str(
        r#"{"kind": "nodes", "data": [{"id": "1", "labels": ["Person"], "properties": {}}]}"#,
    )
    .expect("parse nodes");
    assert_eq!(normalize(&nodes), vec![Point::new("Person", 1.0)]);

    let err = DataInput::from_json_str(r#"{"kind": "tables", "data": []}"#)
        .expect_err("unknown shape must fail");
    assert!(format!("{err}").contains("failed to parse data input"));
}
