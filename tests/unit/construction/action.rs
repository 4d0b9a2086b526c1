use super::*;

#[test]
fn targets_and_references() {
    assert_eq!(Action::create("baseline").target(), Some("baseline"));
    assert_eq!(Action::ClearCaption.target(), None);

    let morph = Action::morph("dot_0", "dot_1");
    let refs: Vec<&str> = morph.references().collect();
    assert_eq!(refs, vec!["dot_0", "dot_1"]);
}

#[test]
fn introduction_and_stage_requirements_do_not_overlap() {
    let all = [
        Action::add("x"),
        Action::create("x"),
        Action::fade_in("x"),
        Action::fade_out("x"),
        Action::dim("x", 0.5),
        Action::indicate("x"),
        Action::flash("x"),
        Action::fill("x", 1.0),
        Action::draw_then_fill("x"),
        Action::morph("x", "y"),
        Action::remove("x"),
    ];
    for a in &all {
        assert!(!(a.introduces() && a.requires_on_stage()), "{a:?}");
    }
    assert!(!Action::flash("x").introduces());
    assert!(!Action::flash("x").requires_on_stage());
}

#[test]
fn rates_follow_action_kind() {
    assert_eq!(Action::indicate("x").rate(), Ease::ThereAndBack);
    assert_eq!(Action::add("x").rate(), Ease::Instant);
    assert_eq!(Action::create("x").rate(), Ease::Smooth);
    assert_eq!(Action::draw_then_fill("x").rate(), Ease::DoubleSmooth);
}

#[test]
fn validate_checks_amounts() {
    assert!(Action::dim("x", 0.75).validate().is_ok());
    assert!(Action::dim("x", 1.5).validate().is_err());
    assert!(Action::fill("x", -0.1).validate().is_err());
    assert!(Action::fill("x", f64::NAN).validate().is_err());
}

#[test]
fn serializes_with_op_tag() {
    let v = serde_json::to_value(Action::dim("arc_a", 0.5)).unwrap();
    assert_eq!(v["op"], "dim");
    assert_eq!(v["id"], "arc_a");
    let back: Action = serde_json::from_value(v).unwrap();
    assert_eq!(back, Action::dim("arc_a", 0.5));
}

#[test]
fn empty_beat_is_a_wait() {
    assert!(Beat::wait(1.0).is_wait());
    assert!(!Beat::new(vec![Action::create("x")], 1.0).is_wait());
}
