//! Tests for LevelConfig resolution

use std::sync::{Arc, Mutex};

use rstest::rstest;

use multimenu::domain::{
    build_forest, FieldNames, LevelConfig, LevelValue, MapRecord, MenuError, NodeRef, RecordKey,
};
use multimenu::util::testing;

type Probe = Arc<Mutex<Vec<(usize, Option<RecordKey>)>>>;

fn records() -> Vec<MapRecord> {
    vec![
        MapRecord::new().with("id", 1),
        MapRecord::new().with("id", 2).with("parentId", 1),
    ]
}

#[rstest]
#[case(0, "ul")]
#[case(1, "ol")]
#[case(2, "ol")]
#[case(5, "ol")]
#[case(100, "ol")]
fn given_per_level_list_when_resolving_then_last_entry_covers_deeper_levels(
    #[case] depth: usize,
    #[case] expected: &str,
) {
    let config: LevelConfig<String, MapRecord> = LevelConfig::levels(["ul".into(), "ol".into()]);

    assert_eq!(config.resolve(depth, None).unwrap(), expected);
}

#[rstest]
#[case(0)]
#[case(3)]
#[case(42)]
fn given_constant_when_resolving_then_same_value_on_every_level(#[case] depth: usize) {
    let config: LevelConfig<String, MapRecord> = "li".into();

    assert_eq!(config.resolve(depth, None).unwrap(), "li");
}

#[test]
fn given_computed_value_when_resolving_then_called_with_depth_and_node() {
    testing::init_test_setup();
    let forest = build_forest(records(), &FieldNames::default()).unwrap();
    let node = forest.find(&RecordKey::Int(2)).unwrap();

    let probe: Probe = Arc::default();
    let calls = Arc::clone(&probe);
    let config: LevelConfig<String, MapRecord> = LevelConfig::computed(move |depth, node| {
        calls
            .lock()
            .unwrap()
            .push((depth, node.map(|n| n.id().clone())));
        format!("level-{}", depth)
    });

    let value = config.resolve(3, Some(node)).unwrap();

    assert_eq!(value, "level-3");
    assert_eq!(*probe.lock().unwrap(), vec![(3, Some(RecordKey::Int(2)))]);
}

#[test]
fn given_computed_value_without_node_when_resolving_then_node_is_none() {
    let probe: Probe = Arc::default();
    let calls = Arc::clone(&probe);
    let config: LevelConfig<usize, MapRecord> = LevelConfig::computed(move |depth, node| {
        calls
            .lock()
            .unwrap()
            .push((depth, node.map(|n| n.id().clone())));
        depth * 10
    });

    assert_eq!(config.resolve(0, None).unwrap(), 0);
    assert_eq!(*probe.lock().unwrap(), vec![(0, None)]);
}

#[test]
fn given_computed_entry_in_list_when_resolving_then_only_that_level_is_computed() {
    let config: LevelConfig<String, MapRecord> = LevelConfig::PerLevel(vec![
        LevelValue::Value("top".to_string()),
        LevelValue::Computed(Arc::new(|depth: usize, _: Option<NodeRef<'_, MapRecord>>| {
            format!("sub-{}", depth)
        })),
    ]);

    assert_eq!(config.resolve(0, None).unwrap(), "top");
    assert_eq!(config.resolve(1, None).unwrap(), "sub-1");
    assert_eq!(config.resolve(4, None).unwrap(), "sub-4");
}

#[test]
fn given_empty_level_list_when_resolving_then_configuration_error() {
    let config: LevelConfig<String, MapRecord> = LevelConfig::levels(Vec::new());

    let result = config.resolve(0, None);

    match result {
        Err(MenuError::Configuration(message)) => {
            assert!(message.contains("level values are not defined"))
        }
        other => panic!("expected Configuration error, got {:?}", other),
    }
}

#[test]
fn given_empty_level_list_when_validating_then_error_names_the_option() {
    let config: LevelConfig<String, MapRecord> = LevelConfig::levels(Vec::new());

    let err = config.validate("main_container_tag").unwrap_err();

    assert!(err.to_string().contains("main_container_tag"));
}

#[test]
fn given_cloned_computed_value_when_resolving_then_shares_the_function() {
    let config: LevelConfig<String, MapRecord> =
        LevelConfig::computed(|depth, _| depth.to_string());
    let copy = config.clone();

    assert_eq!(copy.resolve(7, None).unwrap(), "7");
    assert_eq!(format!("{:?}", copy), "Computed(<fn>)");
}
