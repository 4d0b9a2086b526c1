use super::*;
use crate::{construction::palette::Palette, foundation::core::Line};

fn builder() -> ScriptBuilder {
    let config = StarConfig {
        radius: 1.0,
        palette: Palette::default(),
    };
    let star = StarGeometry::regular(Point::ORIGIN, 1.0, 6, 2).unwrap();
    let outline = star.outline.vertices().to_vec();
    let mut b = ScriptBuilder::new(StarKind::SixPoint, "Test", config, star);
    b.shape(
        BASELINE_ID,
        Geometry::Line(Line::new((-2.0, 0.0), (2.0, 0.0))),
        ShapeStyle::stroke(Color::BLACK),
    )
    .unwrap();
    b.shape("circle", Geometry::Circle(kurbo::Circle::new(Point::ORIGIN, 1.0)), ShapeStyle::stroke(Color::BLACK))
        .unwrap();
    b.shape(
        STAR_ID,
        Geometry::Polygon(outline),
        ShapeStyle::filled(Color::BLACK),
    )
    .unwrap();
    b
}

fn finish(b: &mut ScriptBuilder) {
    b.step("star", "Reveal").play([Action::create(STAR_ID)]).unwrap();
}

#[test]
fn numbers_steps_and_skips_continuations() {
    let mut b = builder();
    b.step("baseline", "Draw a line").play([Action::create(BASELINE_ID)]).unwrap();
    b.continued("more", "still the line").wait(1.0).unwrap();
    b.step("circle", "Draw a circle").play([Action::create("circle")]).unwrap();
    finish(&mut b);
    assert_eq!(b.instruction_count(), 3);

    let script = b.build().unwrap();
    let numbers: Vec<Option<u32>> = script.steps.iter().map(|s| s.number).collect();
    assert_eq!(numbers, vec![Some(1), None, Some(2), Some(3)]);
    assert_eq!(script.steps[0].caption().as_deref(), Some("1. Draw a line"));
    assert_eq!(script.steps[1].caption().as_deref(), Some("still the line"));
    assert!(script.steps.iter().enumerate().all(|(i, s)| s.index == i));
}

#[test]
fn caption_rides_on_the_first_beat_of_a_step() {
    let mut b = builder();
    b.step("baseline", "Draw a line");
    b.play([Action::create(BASELINE_ID)]).unwrap();
    b.play([Action::indicate(BASELINE_ID)]).unwrap();
    finish(&mut b);
    let script = b.build().unwrap();

    let beats = &script.steps[0].beats;
    assert_eq!(
        beats[0].actions[0],
        Action::Caption {
            text: "1. Draw a line".to_string()
        }
    );
    assert!(
        !beats[1]
            .actions
            .iter()
            .any(|a| matches!(a, Action::Caption { .. }))
    );
}

#[test]
fn silent_steps_have_no_caption() {
    let mut b = builder();
    b.silent_step("baseline").play([Action::create(BASELINE_ID)]).unwrap();
    finish(&mut b);
    let script = b.build().unwrap();
    assert_eq!(script.steps[0].caption(), None);
    assert_eq!(script.steps[0].beats[0].actions, vec![Action::create(BASELINE_ID)]);
}

#[test]
fn beats_before_the_first_step_form_the_prelude() {
    let mut b = builder();
    b.instant([Action::add(STAR_ID)]).unwrap();
    b.wait(2.0).unwrap();
    b.play([Action::fade_out(STAR_ID)]).unwrap();
    b.step("baseline", "Draw a line").play([Action::create(BASELINE_ID)]).unwrap();
    finish(&mut b);
    let script = b.build().unwrap();

    assert_eq!(script.prelude.len(), 3);
    assert_eq!(script.steps.len(), 2);
    assert!((script.duration_secs() - 5.0).abs() < 1e-12);
    assert_eq!(script.beats().filter(|(step, _)| step.is_none()).count(), 3);
}

#[test]
fn unknown_shape_is_a_missing_dependency() {
    let mut b = builder();
    b.step("baseline", "Draw a line");
    let err = b.play([Action::create("ghost")]).err().unwrap();
    assert!(matches!(err, StellateError::MissingDependency(_)), "{err}");
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn dimming_an_off_stage_shape_fails_at_build() {
    let mut b = builder();
    b.step("baseline", "Draw a line").play([Action::create(BASELINE_ID)]).unwrap();
    b.step("circle", "Fade").play([Action::dim("circle", 0.5)]).unwrap();
    finish(&mut b);
    let err = b.build().unwrap_err();
    assert!(matches!(err, StellateError::MissingDependency(_)), "{err}");
    assert!(err.to_string().contains("circle"));
}

#[test]
fn first_step_must_introduce_the_baseline() {
    let mut b = builder();
    b.step("circle", "Draw a circle").play([Action::create("circle")]).unwrap();
    b.step("baseline", "Draw a line").play([Action::create(BASELINE_ID)]).unwrap();
    finish(&mut b);
    assert!(matches!(b.build(), Err(StellateError::Validation(_))));

    let empty = builder();
    assert!(matches!(empty.build(), Err(StellateError::Validation(_))));
}

#[test]
fn script_must_end_with_the_filled_star() {
    let mut b = builder();
    b.step("baseline", "Draw a line").play([Action::create(BASELINE_ID)]).unwrap();
    b.step("star", "Trace").play([Action::create(STAR_ID)]).unwrap();
    b.play([Action::fill(STAR_ID, 0.4)]).unwrap();
    let err = b.build().unwrap_err();
    assert!(matches!(err, StellateError::Validation(_)), "{err}");
}

#[test]
fn rejects_bad_run_times_and_duplicate_shapes() {
    let mut b = builder();
    assert!(matches!(
        b.wait(-1.0),
        Err(StellateError::InvalidArgument(_))
    ));
    assert!(b.play_for(f64::NAN, [Action::create(BASELINE_ID)]).is_err());
    assert!(matches!(
        b.shape(STAR_ID, Geometry::Polygon(Vec::new()), ShapeStyle::filled(Color::WHITE)),
        Err(StellateError::Validation(_))
    ));
}

#[test]
fn repeated_actions_in_one_beat_collapse() {
    let mut b = builder();
    b.step("baseline", "Draw a line");
    b.play([Action::create(BASELINE_ID), Action::create(BASELINE_ID)])
        .unwrap();
    finish(&mut b);
    let script = b.build().unwrap();
    assert_eq!(script.steps[0].beats[0].actions.len(), 2);
}

#[test]
fn captions_sit_below_the_construction() {
    let mut b = builder();
    b.step("baseline", "Draw a line").play([Action::create(BASELINE_ID)]).unwrap();
    finish(&mut b);
    let script = b.build().unwrap();
    assert_eq!(script.caption.anchor, Point::new(0.0, -4.9));
    assert!((script.caption.size - 0.3).abs() < 1e-12);
    assert_eq!(script.caption.wrap, 34);
}
