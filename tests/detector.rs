use langdetect::{
    Detections, Detector, DetectorConfig, DirSource, LangProfile, StaticSource, Vocabulary,
};
use rstest::rstest;

const TRAINING_EN: &str = "a a a b b c c d e";
const TRAINING_FR: &str = "a b b c c c d d d";
const TRAINING_JA: &str = "\u{3042} \u{3042} \u{3042} \u{3044} \u{3046} \u{3048} \u{3048}";

fn profile(name: &str, training: &str) -> LangProfile {
    let mut profile = LangProfile::new(name);
    for token in training.split(' ') {
        profile.add(token);
    }
    profile
}

/// Default set is the toy EN/FR/JA vocabulary; the "short-text" set swaps
/// the English statistics for the French ones.
fn toy_source() -> StaticSource {
    let mut source = StaticSource::default();
    source.insert(None, profile("en", TRAINING_EN));
    source.insert(None, profile("fr", TRAINING_FR));
    source.insert(None, profile("ja", TRAINING_JA));
    source.insert(Some("short-text"), profile("en", TRAINING_FR));
    source.insert(Some("short-text"), profile("fr", TRAINING_EN));
    source.insert(Some("short-text"), profile("ja", TRAINING_JA));
    source
}

fn toy_detector() -> Detector<StaticSource> {
    let config = DetectorConfig::new().languages(["en", "fr", "ja"]);
    Detector::new(toy_source(), config).unwrap()
}

#[rstest]
#[case("a", "en")]
#[case("b d", "fr")]
#[case("d e", "en")]
#[case("\u{3042}\u{3042}\u{3042}\u{3042}a", "ja")]
#[case("...", "unknown")]
fn test_detect(#[case] text: &str, #[case] expected: &str) {
    let detector = toy_detector();
    assert_eq!(detector.detect(text).unwrap(), expected);
}

#[test]
fn test_profile_set_switch_is_idempotent() {
    let detector = toy_detector();
    let original = detector.detect_all("b d").unwrap();

    detector.switch_profile_set(Some("short-text")).unwrap();
    assert_eq!(detector.profile_set().as_deref(), Some("short-text"));
    let switched = detector.detect_all("b d").unwrap();
    // the sets disagree on purpose
    assert_ne!(switched, original);
    assert_eq!(switched[0].language, "en");

    detector.switch_profile_set(None).unwrap();
    assert_eq!(detector.profile_set(), None);
    // back on the original set, the output is reproduced bit for bit
    assert_eq!(detector.detect_all("b d").unwrap(), original);
}

#[test]
fn test_dir_source_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("short-text")).unwrap();
    for (set, code, training) in [
        (None, "en", TRAINING_EN),
        (None, "fr", TRAINING_FR),
        (None, "ja", TRAINING_JA),
        (Some("short-text"), "en", TRAINING_FR),
        (Some("short-text"), "fr", TRAINING_EN),
        (Some("short-text"), "ja", TRAINING_JA),
    ] {
        let mut path = dir.path().to_path_buf();
        if let Some(set) = set {
            path.push(set);
        }
        path.push(code);
        let json = serde_json::to_vec(&profile(code, training)).unwrap();
        std::fs::write(path, json).unwrap();
    }

    let config = DetectorConfig::new().languages(["en", "fr", "ja"]);
    let from_dir = Detector::new(DirSource::new(dir.path()), config).unwrap();
    let in_memory = toy_detector();

    // serialized-then-deserialized profiles produce the same vocabulary,
    // hence bit-identical detection output
    for text in ["a", "b d", "d e", "a b c d"] {
        assert_eq!(
            from_dir.detect_all(text).unwrap(),
            in_memory.detect_all(text).unwrap()
        );
    }

    from_dir.switch_profile_set(Some("short-text")).unwrap();
    assert_eq!(from_dir.detect("b d").unwrap(), "en");
}

#[test]
fn test_vocabulary_vector_width() {
    let vocabulary = Vocabulary::from_profiles([
        profile("en", TRAINING_EN),
        profile("fr", TRAINING_FR),
        profile("ja", TRAINING_JA),
    ])
    .unwrap();
    for gram in vocabulary.grams() {
        assert_eq!(vocabulary.prob(gram).unwrap().len(), 3);
    }
}

#[test]
fn test_trained_profiles() {
    let mut en = LangProfile::new("en");
    en.train("this is a very small test of the detector");
    en.train("the quick brown fox jumps over the lazy dog");
    let mut ja = LangProfile::new("ja");
    ja.train("\u{3053}\u{308C}\u{306F}\u{30C6}\u{30B9}\u{30C8}\u{3067}\u{3059}");

    let mut source = StaticSource::default();
    source.insert(None, en);
    source.insert(None, ja);
    let config = DetectorConfig::new().languages(["en", "ja"]);
    let detector = Detector::new(source, config).unwrap();

    assert_eq!(detector.detect("small test").unwrap(), "en");
    assert_eq!(detector.detect("\u{3053}\u{3053}\u{3067}\u{306F}").unwrap(), "ja");
}

#[test]
fn test_wire_envelope() {
    let detector = toy_detector();
    let languages = detector.detect_all("b d").unwrap();
    let body = serde_json::to_string(&Detections {
        profile: None,
        languages: &languages,
    })
    .unwrap();
    assert!(body.starts_with(r#"{"languages":[{"language":"fr","probability":"#));

    detector.switch_profile_set(Some("short-text")).unwrap();
    let languages = detector.detect_all("b d").unwrap();
    let body = serde_json::to_string(&Detections {
        profile: detector.profile_set().as_deref(),
        languages: &languages,
    })
    .unwrap();
    assert!(body.starts_with(r#"{"profile":"short-text","languages":["#));
}

#[test]
fn test_no_nan_on_sparse_input() {
    let detector = toy_detector();
    // single known gram, heavy convergence pressure
    for text in ["e", "e e e", "\u{3046}"] {
        for language in detector.detect_all(text).unwrap() {
            assert!(language.probability.is_finite());
            assert!(language.probability > 0.0 && language.probability <= 1.0);
        }
    }
}
