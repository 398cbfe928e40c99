#![cfg(feature = "serde")]

use tactics_goap::GoapPlannerConfig;

#[test]
fn planner_config_fields_default() {
    let config: GoapPlannerConfig = serde_json::from_str(r#"{"max_nodes": 10}"#).expect("config");
    assert_eq!(config.max_nodes, Some(10));
    assert!(config.prune_by_cost);

    let json = serde_json::to_string(&GoapPlannerConfig::default()).expect("serialize");
    let back: GoapPlannerConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, GoapPlannerConfig::default());
}
