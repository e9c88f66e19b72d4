use reelmaker_core::{Character, SCENE_COUNT, SceneDescriptor, StoryboardPlan};

fn scenes(count: usize) -> Vec<SceneDescriptor> {
    (1..=count)
        .map(|i| {
            let setting = if i == 1 { "A sunlit kitchen" } else { "" };
            SceneDescriptor::new(i, setting, format!("The person moves. Beat {}.", i))
        })
        .collect()
}

fn character() -> Character {
    Character::new("Emma", "A woman in her twenties with short dark hair")
}

#[test]
fn test_plan_requires_twelve_scenes() {
    assert!(StoryboardPlan::new(character(), "rain", scenes(SCENE_COUNT)).is_ok());

    let err = StoryboardPlan::new(character(), "rain", scenes(11)).unwrap_err();
    assert!(err.to_string().contains("expected 12 scenes, got 11"));

    assert!(StoryboardPlan::new(character(), "rain", scenes(13)).is_err());
}

#[test]
fn test_plan_rejects_out_of_order_indices() {
    let mut scenes = scenes(SCENE_COUNT);
    scenes.swap(3, 4);
    assert!(StoryboardPlan::new(character(), "rain", scenes).is_err());
}

#[test]
fn test_opening_scene_has_setting() {
    let plan = StoryboardPlan::new(character(), "rain", scenes(SCENE_COUNT)).unwrap();
    assert_eq!(plan.opening_scene().index, 1);
    assert!(plan.opening_scene().has_setting());
    assert!(!plan.scenes()[1].has_setting());
}

#[test]
fn test_deserialization_enforces_invariants() {
    let plan = StoryboardPlan::new(character(), "wind", scenes(SCENE_COUNT)).unwrap();
    let json = serde_json::to_string(&plan).unwrap();
    let restored: StoryboardPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, plan);

    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["scenes"].as_array_mut().unwrap().pop();
    assert!(serde_json::from_value::<StoryboardPlan>(value).is_err());
}
