use conjugator_core::{
    generate_irregular_conjugations, validate_conjugation, Cell, ConjugationCache,
    ConjugationEngine, ConjugationForms, ConjugationRequest, EngineConfig, Gender, Number, Person,
    Tense, VerbConjugation,
};

const PERFECT_3MS: Cell = Cell::new(Tense::Perfect, Person::Third, Number::Singular, Gender::Masculine);

#[test]
fn hollow_overlay_differs_from_regular_perfect() {
    let regular = conjugator_core::generate_conjugations("ق-و-ل", "form1").unwrap();
    let overlay = generate_irregular_conjugations("ق-و-ل", &["hollow"]).unwrap();
    let overridden = overlay.cells().filter(|(c, _)| c.tense == Tense::Perfect).count();
    assert!(overridden > 0);
    assert_ne!(overlay.get(PERFECT_3MS), regular.get(PERFECT_3MS));
}

#[test]
fn validator_reports_each_empty_field() {
    let record = VerbConjugation::new("", "", ConjugationForms::new(), vec![], vec![]);
    assert!(validate_conjugation(&record).len() >= 3);
}

#[test]
fn record_wire_shape() {
    let engine = ConjugationEngine::new();
    let record = engine
        .build_record("v-42", &ConjugationRequest::for_root("كتب"))
        .unwrap();
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["verbId"], "v-42");
    assert_eq!(json["rootForm"], "كتب");
    assert_eq!(json["patterns"], serde_json::json!(["form1"]));
    assert_eq!(json["irregularities"], serde_json::json!([]));
    assert_eq!(json["conjugations"]["perfect"]["third"]["singular"]["masculine"], "كَتَبَ");
    assert!(json["createdAt"].as_str().unwrap().contains('T'));

    let back: VerbConjugation = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn records_without_optional_lists_deserialize() {
    let json = r#"{
        "verbId": "v1",
        "rootForm": "كتب",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    }"#;
    let record: VerbConjugation = serde_json::from_str(json).unwrap();
    assert!(record.patterns.is_empty());
    let errors = validate_conjugation(&record);
    assert_eq!(errors.len(), 1, "{errors:?}");
}

#[test]
fn cache_round_trips() {
    let cache = ConjugationCache::in_memory();
    let forms = conjugator_core::generate_conjugations("كتب", "form1").unwrap();
    let record = VerbConjugation::new("v1", "كتب", forms.clone(), vec!["form1".into()], vec![]);

    cache.cache_conjugation(&record);
    assert_eq!(cache.get_conjugation("v1"), Some(record));
    assert_eq!(cache.get_conjugation("never"), None);

    cache.cache_generated_conjugations("كتب", "form1", &forms);
    assert_eq!(cache.get_generated_conjugations("كتب", "form1"), Some(forms));

    cache.invalidate_conjugation("v1");
    assert_eq!(cache.get_conjugation("v1"), None);
}

#[test]
fn cache_snapshot_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = EngineConfig::default();
    config.cache.snapshot_path = dir.path().join("cache.bin");

    let engine = ConjugationEngine::from_file_or_new(config.clone());
    let record = engine
        .build_record("v1", &ConjugationRequest::for_root("قول").with_irregularities(["hollow"]))
        .unwrap();
    engine.save_cache().unwrap();

    let restarted = ConjugationEngine::from_file_or_new(config);
    assert_eq!(restarted.get_record("v1"), Some(record));
    assert!(restarted
        .cache()
        .get_generated_conjugations("قول", "form1")
        .is_some());
}

#[test]
fn unreadable_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.bin");
    std::fs::write(&path, b"not bincode").unwrap();

    let mut config = EngineConfig::default();
    config.cache.snapshot_path = path;
    let engine = ConjugationEngine::from_file_or_new(config);
    assert!(engine.cache().store().is_empty());
}
