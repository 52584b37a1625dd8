//! Property-based tests for filtering, context building, and state synthesis

use proptest::prelude::*;
use serde_json::{Map, Value};
use statescope::context::{build_context, Context, ContextInputs, EnvironmentFacts};
use statescope::expression::TemplateResolver;
use statescope::query::{synthesize_query_state, PluginType, QueryDescriptor};
use statescope::search::{filter, Filtered};
use statescope::types::ValueKind;
use statescope::widget::{resolve_fields, FieldSchema};

const ALL_KINDS: [ValueKind; 7] = [
    ValueKind::String,
    ValueKind::Number,
    ValueKind::Boolean,
    ValueKind::Object,
    ValueKind::Array,
    ValueKind::Undefined,
    ValueKind::Null,
];

/// Arbitrary JSON without template markers
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-zA-Z]{1,6}", inner, 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn kind_set() -> impl Strategy<Value = Vec<ValueKind>> {
    prop::sample::subsequence(ALL_KINDS.to_vec(), 1..=ALL_KINDS.len())
}

/// Filtering with an empty query returns the tree unchanged
#[test]
fn test_empty_query_is_identity_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&json_value(), |value| {
            assert_eq!(filter(&value, ""), Filtered::Match(value.clone()));
            Ok(())
        })
        .unwrap();
}

/// Filtering a filtered tree with the same query changes nothing
#[test]
fn test_filter_is_idempotent_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(json_value(), "[a-zA-Z0-9]{1,3}"), |(value, query)| {
            if let Filtered::Match(once) = filter(&value, &query) {
                assert_eq!(filter(&once, &query), Filtered::Match(once.clone()));
            }
            Ok(())
        })
        .unwrap();
}

/// Identical inputs build identical contexts under identical fingerprints
#[test]
fn test_context_build_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(json_value(), any::<u64>(), "[a-z]{1,8}"),
            |(user, refresh_counter, environment)| {
                let inputs = ContextInputs {
                    facts: EnvironmentFacts {
                        current_user: Some(user),
                        environment: Some(environment),
                        ..EnvironmentFacts::default()
                    },
                    refresh_counter,
                    ..ContextInputs::default()
                };
                let copy = inputs.clone();

                assert_eq!(build_context(&inputs), build_context(&copy));
                assert_eq!(inputs.fingerprint(), copy.fingerprint());

                let mut bumped = inputs.clone();
                bumped.refresh_counter = refresh_counter.wrapping_add(1);
                assert_ne!(inputs.fingerprint(), bumped.fingerprint());
                assert_eq!(build_context(&inputs), build_context(&bumped));
                Ok(())
            },
        )
        .unwrap();
}

/// Every field that survives resolution has a kind its schema allows
#[test]
fn test_resolved_kinds_stay_within_schema_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::btree_map("[a-z]{1,4}", json_value(), 0..6), kind_set()),
            |(raw, allowed)| {
                let raw: Map<String, Value> = raw.into_iter().collect();
                let fields: Vec<FieldSchema> = raw
                    .keys()
                    .map(|key| FieldSchema::new(key.clone(), &allowed))
                    .collect();

                let out = resolve_fields(&raw, &fields, &Context::default(), &TemplateResolver);
                for (key, value) in &out.resolved {
                    assert!(
                        allowed.contains(&ValueKind::of(value)),
                        "field {} resolved to disallowed {}",
                        key,
                        ValueKind::of(value)
                    );
                }
                for key in raw.keys() {
                    assert!(out.resolved.contains_key(key) ^ out.omitted.contains(key));
                }
                Ok(())
            },
        )
        .unwrap();
}

/// An empty string in an optional boolean field always becomes `false`
#[test]
fn test_optional_boolean_coercion_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(kind_set(), "[a-z]{1,6}"), |(extra, key)| {
            let mut allowed = extra;
            allowed.push(ValueKind::Boolean);
            allowed.push(ValueKind::Undefined);
            let fields = vec![FieldSchema::new(key.clone(), &allowed)];
            let mut raw = Map::new();
            raw.insert(key.clone(), Value::String(String::new()));

            let out = resolve_fields(&raw, &fields, &Context::default(), &TemplateResolver);
            assert_eq!(out.resolved.get(&key), Some(&Value::Bool(false)));
            Ok(())
        })
        .unwrap();
}

/// Synthesis is total: any type string yields a fully populated record
#[test]
fn test_query_state_is_total_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(any::<String>(), prop::option::of(json_value())), |(query_type, config)| {
            let mut descriptor = QueryDescriptor::new("q1", "Query1", query_type.clone());
            if let Some(config) = config {
                descriptor = descriptor.with_config(config);
            }
            let state = synthesize_query_state(&descriptor, None).to_value();

            assert_eq!(
                state["pluginType"],
                Value::String(PluginType::from_discriminator(&query_type).as_str().to_string())
            );
            for key in [
                "data",
                "error",
                "status",
                "isFetching",
                "receivedAt",
                "showFailureToaster",
                "notificationDuration",
                "queryTimeout",
            ] {
                assert!(state.get(key).is_some(), "missing {}", key);
            }
            assert_eq!(state["isFetching"], Value::Bool(false));
            Ok(())
        })
        .unwrap();
}
