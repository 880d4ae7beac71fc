//! Schema loader and patcher tests: version gate, shape validation, duplicates,
//! merging the browser and JS documents, and the built-in fixes.

use cdpgen::ast::{Leaf, PrimitiveKind, TypeBody};
use cdpgen::lint::{lint, LintRule};
use cdpgen::parser::{merge, parse, parse_value};
use cdpgen::patch::fix_protocol;
use cdpgen::{compile_protocol, CompileError};
use serde_json::json;

fn doc(domains: serde_json::Value) -> serde_json::Value {
    json!({"version": {"major": "1", "minor": "3"}, "domains": domains})
}

#[test]
fn test_version_mismatch_fails_fast() {
    let err = parse(r#"{"version": {"major": "1", "minor": "2"}, "domains": []}"#).unwrap_err();
    match err {
        CompileError::SchemaVersionMismatch { major, minor } => {
            assert_eq!(major, "1");
            assert_eq!(minor, "2");
        }
        other => panic!("expected version mismatch, got {:?}", other),
    }
}

#[test]
fn test_malformed_json_is_reported() {
    assert!(matches!(parse("{\"version\": "), Err(CompileError::Json(_))));
}

#[test]
fn test_leaf_shapes() {
    let p = parse_value(doc(json!([
        {"domain": "D", "types": [{"id": "T", "type": "object", "properties": [
            {"name": "flag", "type": "boolean"},
            {"name": "node", "$ref": "Node"},
            {"name": "ids", "type": "array", "items": {"type": "integer"}},
            {"name": "kind", "type": "string", "enum": ["a", "b"]}
        ]}]}
    ])))
    .expect("parse");
    let t = &p.domains[0].types[0];
    let props = match &t.body {
        TypeBody::Record(props) => props,
        other => panic!("expected record, got {:?}", other),
    };
    assert_eq!(props[0].leaf, Leaf::Primitive(PrimitiveKind::Boolean));
    assert_eq!(props[1].leaf.reference(), Some("Node"));
    assert!(matches!(props[2].leaf, Leaf::Repeated(_)));
    assert_eq!(props[3].leaf, Leaf::Primitive(PrimitiveKind::String));
    assert_eq!(props[3].enum_values.as_deref(), Some(&["a".to_string(), "b".to_string()][..]));
}

#[test]
fn test_ambiguous_leaf_is_rejected() {
    let err = parse_value(doc(json!([
        {"domain": "D", "commands": [{"name": "c", "parameters": [
            {"name": "p", "type": "string", "$ref": "Other"}
        ]}]}
    ])))
    .unwrap_err();
    match err {
        CompileError::AmbiguousReferenceShape { location } => assert_eq!(location, "D.c.p"),
        other => panic!("expected ambiguous shape, got {:?}", other),
    }
}

#[test]
fn test_invalid_shapes_are_rejected() {
    let cases = [
        json!({"name": "p"}),
        json!({"name": "p", "type": "array"}),
        json!({"name": "p", "type": "array", "items": {"type": "array"}}),
    ];
    for prop in cases {
        let err = parse_value(doc(json!([
            {"domain": "D", "events": [{"name": "e", "parameters": [prop]}]}
        ])))
        .unwrap_err();
        assert!(matches!(err, CompileError::InvalidShape { .. }), "got {:?}", err);
    }
}

#[test]
fn test_duplicate_type_is_rejected() {
    let err = parse_value(doc(json!([
        {"domain": "D", "types": [
            {"id": "T", "type": "string"},
            {"id": "T", "type": "integer"}
        ]}
    ])))
    .unwrap_err();
    match err {
        CompileError::DuplicateDeclaration { domain, name } => {
            assert_eq!(domain, "D");
            assert_eq!(name, "T");
        }
        other => panic!("expected duplicate, got {:?}", other),
    }
}

#[test]
fn test_duplicate_command_function_is_reported_by_compiler() {
    let p = parse_value(doc(json!([
        {"domain": "D", "commands": [{"name": "getDOM"}, {"name": "getDom"}]}
    ])))
    .expect("parse");
    let report = compile_protocol(&p);
    assert!(matches!(
        report.failures[0].error,
        CompileError::DuplicateDeclaration { ref name, .. } if name == "get_dom"
    ));
}

#[test]
fn test_merge_sorts_domains() {
    let browser = parse_value(doc(json!([{"domain": "Page"}, {"domain": "DOM"}]))).expect("browser");
    let js = parse_value(doc(json!([{"domain": "Runtime"}, {"domain": "Debugger"}]))).expect("js");
    let merged = merge(vec![browser, js]).expect("merged");
    let names: Vec<&str> = merged.domains.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["DOM", "Debugger", "Page", "Runtime"]);
    assert!(merge(Vec::new()).is_none());
}

#[test]
fn test_resolve_node_fix_sets_reference() {
    let mut p = parse_value(doc(json!([
        {"domain": "DOM", "types": [{"id": "BackendNodeId", "type": "integer"}],
         "commands": [{"name": "resolveNode", "parameters": [
            {"name": "nodeId", "type": "integer", "optional": true},
            {"name": "backendNodeId", "$ref": "DOM.BackendNodeId", "optional": true}
         ]}]}
    ])))
    .expect("parse");
    assert_eq!(fix_protocol(&mut p), 1);
    let param = &p.domains[0].commands[0].parameters[1];
    assert_eq!(param.leaf.reference(), Some("BackendNodeId"));
    assert!(param.optional);

    let patched = p.clone();
    fix_protocol(&mut p);
    assert_eq!(p, patched);
}

#[test]
fn test_fixes_can_be_skipped() {
    let p = parse_value(doc(json!([
        {"domain": "Network", "types": [{"id": "Cookie", "type": "object", "properties": [
            {"name": "expires", "type": "number"}]}]}
    ])))
    .expect("parse");
    let report = compile_protocol(&p);
    let cookie = report
        .module("Network")
        .and_then(|m| m.declaration("Cookie"))
        .expect("Cookie");
    match cookie {
        cdpgen::decl::Declaration::Record(r) => assert!(!r.fields[0].optional()),
        other => panic!("expected record, got {:?}", other),
    }
}

#[test]
fn test_lint_across_merged_documents() {
    let browser = parse_value(doc(json!([
        {"domain": "DOM", "dependencies": ["Runtime"], "commands": [{"name": "resolveNode", "returns": [
            {"name": "object", "$ref": "Runtime.RemoteObject"}]}]}
    ])))
    .expect("browser");
    let js = parse_value(doc(json!([
        {"domain": "Runtime", "types": [{"id": "RemoteObject", "type": "object", "properties": [
            {"name": "type", "type": "string"}]}]}
    ])))
    .expect("js");
    let alone = lint(&browser);
    assert_eq!(alone.len(), 1);
    assert_eq!(alone[0].rule, LintRule::UnresolvedReference);

    let merged = merge(vec![browser, js]).expect("merged");
    assert!(lint(&merged).is_empty());
}
