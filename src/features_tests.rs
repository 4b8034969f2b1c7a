use super::*;

fn likert(v: u8) -> Likert {
    Likert::new(v).expect("test rating is in range")
}

fn uniform_answers(v: u8, yn: YesNo) -> AnswerSet {
    let l = likert(v);
    AnswerSet {
        catatan: l,
        diagram: l,
        baca: l,
        mendengarkan: l,
        diskusi: yn,
        rekaman: l,
        praktik: yn,
        mencoba: l,
        bosan: l,
        hadir: l,
        aktif: l,
    }
}

#[test]
fn test_likert_normalization_table() {
    let expected = [0.0, 0.25, 0.5, 0.75, 1.0];
    for (v, want) in (1..=5).zip(expected) {
        assert_eq!(likert(v).normalized(), want, "rating {v}");
    }
}

#[test]
fn test_likert_out_of_range() {
    for v in [0u8, 6, 255] {
        let err = Likert::for_field("hadir", v).unwrap_err();
        match err {
            LearnStyleError::InvalidInput { field, value, .. } => {
                assert_eq!(field, "hadir");
                assert_eq!(value, v.to_string());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn test_likert_parse_text() {
    assert_eq!(Likert::parse("baca", " 4 ").expect("valid").value(), 4);
    assert!(Likert::parse("baca", "four").is_err());
    assert!(Likert::parse("baca", "3.5").is_err());
    assert!(Likert::parse("baca", "-1").is_err());
    assert!(Likert::parse("baca", "300").is_err());
}

#[test]
fn test_likert_serde_rejects_out_of_range() {
    let ok: Likert = serde_json::from_str("2").expect("in range");
    assert_eq!(ok.value(), 2);
    assert!(serde_json::from_str::<Likert>("9").is_err());
}

#[test]
fn test_yes_no_tokens() {
    for token in ["ya", "Y", "YA", "yes", " y "] {
        assert_eq!(YesNo::parse("diskusi", token).expect(token).as_f64(), 1.0);
    }
    for token in ["tidak", "T", "no", "N", "TIDAK"] {
        assert_eq!(YesNo::parse("diskusi", token).expect(token).as_f64(), 0.0);
    }
}

#[test]
fn test_yes_no_unknown_token() {
    for token in ["", "maybe", "iya", "nope", "1"] {
        let err = YesNo::parse("praktik", token).unwrap_err();
        assert!(
            matches!(err, LearnStyleError::InvalidInput { ref field, .. } if field == "praktik"),
            "token {token:?} gave {err}"
        );
    }
}

#[test]
fn test_neutral_answers_feature_values() {
    let features = FeatureVector::from_answers(&uniform_answers(3, YesNo::No));

    assert!((features.academic_score - 0.5).abs() < 1e-12);
    // diskusi = 0.0, aktif = 0.5
    assert!((features.course_participation - 0.25).abs() < 1e-12);
    assert!((features.attendance_rate - 0.5).abs() < 1e-12);
    // praktik = 0.0, mencoba = 0.5, bosan = 0.5
    assert!((features.physical_activity - 1.0 / 3.0).abs() < 1e-12);
    assert!((features.emotional_engagement - 0.5).abs() < 1e-12);
}

#[test]
fn test_extreme_answers_stay_in_unit_interval() {
    let high = FeatureVector::from_answers(&uniform_answers(5, YesNo::Yes));
    assert_eq!(high.to_array(), [1.0; N_FEATURES]);

    let low = FeatureVector::from_answers(&uniform_answers(1, YesNo::No));
    assert_eq!(low.to_array(), [0.0; N_FEATURES]);
}

#[test]
fn test_features_only_depend_on_their_sources() {
    let base = uniform_answers(3, YesNo::No);
    let before = FeatureVector::from_answers(&base);

    // hadir only feeds AttendanceRate
    let mut changed = base;
    changed.hadir = likert(5);
    let after = FeatureVector::from_answers(&changed);
    assert_eq!(after.attendance_rate, 1.0);
    assert_eq!(after.academic_score, before.academic_score);
    assert_eq!(after.course_participation, before.course_participation);
    assert_eq!(after.physical_activity, before.physical_activity);
    assert_eq!(after.emotional_engagement, before.emotional_engagement);

    // aktif feeds both CourseParticipation and EmotionalEngagement
    let mut changed = base;
    changed.aktif = likert(5);
    let after = FeatureVector::from_answers(&changed);
    assert!(after.course_participation > before.course_participation);
    assert!(after.emotional_engagement > before.emotional_engagement);
    assert_eq!(after.academic_score, before.academic_score);
    assert_eq!(after.attendance_rate, before.attendance_rate);
    assert_eq!(after.physical_activity, before.physical_activity);
}

#[test]
fn test_array_roundtrip_order() {
    let v = FeatureVector::from_array([0.1, 0.2, 0.3, 0.4, 0.5]);
    assert_eq!(v.course_participation, 0.2);
    assert_eq!(v.emotional_engagement, 0.5);
    assert_eq!(v.to_array(), [0.1, 0.2, 0.3, 0.4, 0.5]);
}

#[test]
fn test_feature_vector_serializes_with_column_names() {
    let v = FeatureVector::from_array([0.0; N_FEATURES]);
    let json = serde_json::to_string(&v).expect("serializable");
    for name in FEATURE_NAMES {
        assert!(json.contains(name), "{name} missing from {json}");
    }
}

#[test]
fn test_raw_answers_parse() {
    let mut raw = RawAnswers::default();
    for q in QUESTIONS {
        let slot = raw.slot_mut(q.field).expect("every question has a slot");
        *slot = match q.kind {
            AnswerKind::Likert => "3".to_string(),
            AnswerKind::YesNo => "Tidak".to_string(),
        };
    }
    let answers = raw.parse().expect("all answers valid");
    assert_eq!(answers, uniform_answers(3, YesNo::No));
}

#[test]
fn test_raw_answers_report_first_bad_field() {
    let mut raw = RawAnswers::default();
    for q in QUESTIONS {
        *raw.slot_mut(q.field).expect("slot") = match q.kind {
            AnswerKind::Likert => "2".to_string(),
            AnswerKind::YesNo => "ya".to_string(),
        };
    }
    raw.bosan = "8".to_string();
    let err = raw.parse().unwrap_err();
    assert!(matches!(err, LearnStyleError::InvalidInput { ref field, .. } if field == "bosan"));
}

#[test]
fn test_questionnaire_covers_every_field_once() {
    let mut fields: Vec<&str> = QUESTIONS.iter().map(|q| q.field).collect();
    fields.sort_unstable();
    fields.dedup();
    assert_eq!(fields.len(), 11);

    let yes_no: Vec<&str> = QUESTIONS
        .iter()
        .filter(|q| q.kind == AnswerKind::YesNo)
        .map(|q| q.field)
        .collect();
    assert_eq!(yes_no, vec!["diskusi", "praktik"]);
    assert!(RawAnswers::default().slot_mut("unknown").is_none());
}
