//! Integration tests for schema parsing and the typed schema model.

use jsonvalidator::{
    EnumOptions, EnumRule, ErrorKind, IntegerRule, Rule, Schema, SchemaLevel, SchemaNode,
    StringRule, Validator,
};
use serde_json::json;

#[test]
fn test_parse_builds_typed_nodes() {
    let schema = Schema::try_from(&json!({
        "name": {"#type": "string", "#max_length": 10, "#required": true},
        "age": {"#type": "integer", "#min_value": 0},
        "kind": {"#type": "enum", "#options": ["a", "b"]},
        "later": {"#type": "placeholder"}
    }))
    .unwrap();

    let root = schema.root();
    assert_eq!(root.len(), 4);
    assert_eq!(
        root.get("name").unwrap().rule(),
        &Rule::String(StringRule::new().max_len(10))
    );
    assert!(root.get("name").unwrap().is_required());
    assert_eq!(
        root.get("age").unwrap().rule(),
        &Rule::Integer(IntegerRule::new().min(0))
    );
    match root.get("kind").unwrap().rule() {
        Rule::Enum(rule) => assert!(matches!(rule.options(), EnumOptions::List(items) if items.len() == 2)),
        other => panic!("expected enum, got {:?}", other),
    }
    assert_eq!(root.get("later").unwrap().type_tag(), "placeholder");
}

#[test]
fn test_parse_reports_every_problem() {
    let errors = Schema::try_from(&json!({
        "a": {"#type": "string", "#max_length": "ten"},
        "b": {"#type": "fieldset", "c": {"#required": true}},
        "d": 5,
        "e": {"#type": "enum", "#options": {"x": []}}
    }))
    .unwrap_err();

    assert_eq!(errors.len(), 4);
    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(
        paths,
        vec!["a.#max_length", "b.c", "d", "e.#options.x"]
    );
}

#[test]
fn test_parse_from_str() {
    let schema: Schema = r##"{"flag": {"#type": "boolean"}}"##.parse().unwrap();
    let mut v = Validator::new(schema);

    assert!(v.validate(&json!({"flag": true})).is_ok());
}

#[test]
fn test_schema_root_must_be_mapping() {
    let errors = Schema::try_from(&json!("string schema")).unwrap_err();
    assert_eq!(errors.first().code, "invalid_level");
}

#[test]
fn test_built_schema_matches_parsed_schema() {
    let built = Schema::from(
        SchemaLevel::new()
            .field(
                "type",
                SchemaNode::new(EnumRule::union().option(
                    "one",
                    SchemaLevel::new()
                        .field("sub_one", SchemaNode::new(StringRule::new().max_len(200)).required()),
                )),
            )
            .field("one", SchemaNode::placeholder()),
    );

    let parsed = Schema::try_from(&json!({
        "type": {
            "#type": "enum",
            "#options": {"one": {"sub_one": {"#type": "string", "#max_length": 200, "#required": true}}}
        },
        "one": {"#type": "placeholder"}
    }))
    .unwrap();

    let data = json!({"type": "one", "one": {}});
    let built_error = Validator::new(built).validate(&data).unwrap_err();
    let parsed_error = Validator::new(parsed).validate(&data).unwrap_err();

    assert_eq!(built_error, parsed_error);
    assert_eq!(built_error.kind, ErrorKind::MissingRequiredField);
}

#[test]
fn test_attributes_keep_raw_directives() {
    let schema = Schema::try_from(&json!({
        "content": {"#type": "fieldset", "#collapsible": true, "#weight": -10}
    }))
    .unwrap();

    let node = schema.root().get("content").unwrap();
    assert_eq!(node.attribute("collapsible"), Some(&json!(true)));
    assert_eq!(node.attribute("#type"), Some(&json!("fieldset")));
    assert_eq!(node.attributes().len(), 3);
}

#[test]
fn test_shared_schema_backs_many_validators() {
    let schema = std::sync::Arc::new(
        Schema::try_from(&json!({"n": {"#type": "integer"}})).unwrap(),
    );

    let mut a = Validator::new(schema.clone());
    let mut b = Validator::new(schema);

    assert!(a.validate(&json!({"n": 1})).is_ok());
    assert!(b.validate(&json!({"n": "x"})).is_err());
}
