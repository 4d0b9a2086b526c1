use super::*;
use crate::construction::script::BASELINE_ID;

fn script(kind: StarKind) -> ConstructionScript {
    build_script(kind, &kind.default_config()).unwrap()
}

#[test]
fn six_point_numbering_matches_the_instructions() {
    let s = script(StarKind::SixPoint);
    let numbers: Vec<Option<u32>> = s.steps.iter().map(|st| st.number).collect();
    assert_eq!(
        numbers,
        vec![Some(1), Some(2), Some(3), None, Some(4), Some(5)]
    );
    assert_eq!(
        s.steps[0].caption().as_deref(),
        Some("1. Draw a straight line")
    );
    assert_eq!(
        s.steps[3].caption().as_deref(),
        Some("this creates six points on the circle")
    );
}

#[test]
fn eight_point_has_nine_numbered_steps() {
    let s = script(StarKind::EightPoint);
    let numbers: Vec<u32> = s.steps.iter().filter_map(|st| st.number).collect();
    assert_eq!(numbers, (1..=9).collect::<Vec<_>>());
    assert_eq!(s.steps.len(), 9);
}

#[test]
fn concept_is_uncaptioned_on_a_dark_backdrop() {
    let s = script(StarKind::Concept);
    assert!(s.steps.iter().all(|st| st.caption().is_none()));
    assert_eq!(s.backdrop, Some(Color::BLACK));
    assert_eq!(s.config.palette, Palette::sketch());
}

#[test]
fn every_script_starts_from_the_baseline_and_ends_on_the_star() {
    for kind in StarKind::ALL {
        let s = script(kind);
        let snaps = s.snapshots().unwrap();
        assert_eq!(snaps.len(), s.steps.len() + 1, "{kind:?}");

        let prelude = &snaps[0].state;
        assert!(!prelude.shape(STAR_ID).unwrap().on_stage, "{kind:?}");
        assert!(prelude.shape("plane").unwrap().on_stage, "{kind:?}");
        assert!(!prelude.shape(BASELINE_ID).unwrap().on_stage, "{kind:?}");

        assert!(snaps[1].state.shape(BASELINE_ID).unwrap().on_stage, "{kind:?}");

        let last = snaps.last().unwrap();
        let star = last.state.shape(STAR_ID).unwrap();
        assert!(star.on_stage && star.fill_opacity >= 1.0 - 1e-9, "{kind:?}");
        assert_eq!(last.state.caption, None, "{kind:?}");
    }
}

#[test]
fn six_point_step_reveals_numbered_points() {
    let s = script(StarKind::SixPoint);
    let snaps = s.snapshots().unwrap();
    let state = &snaps
        .iter()
        .find(|sn| sn.label == "six_points")
        .unwrap()
        .state;
    for i in 0..6 {
        assert!(state.shape(&format!("point_{i}")).unwrap().on_stage);
        assert!(state.shape(&format!("label_{i}")).unwrap().on_stage);
    }
    assert!(!state.shape("dot_a").unwrap().on_stage);
    let baseline = state.shape(BASELINE_ID).unwrap();
    assert!((baseline.opacity - 0.125).abs() < 1e-9);

    match &s.shapes.get("label_2").unwrap().geometry {
        Geometry::LabeledDot { label, center, .. } => {
            assert_eq!(label, "3");
            assert!((center.to_vec2().hypot() - 3.5).abs() < 1e-12);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn scripts_use_the_star_geometry() {
    let six = script(StarKind::SixPoint);
    assert_eq!(six.star.outline.len(), 12);
    for p in six.star.inner.iter() {
        assert!((p.to_vec2().hypot() - 3.0 / 3f64.sqrt()).abs() < 1e-9);
    }
    let eight = script(StarKind::EightPoint);
    assert_eq!(eight.star.outline.len(), 16);
    assert!(eight.shapes.contains("vertex_15"));

    match &eight.shapes.get("dot_c").unwrap().geometry {
        Geometry::Dot { center, .. } => {
            assert!(center.x.abs() < 1e-9);
            assert!((center.y - 2.0 * 3f64.sqrt()).abs() < 1e-9);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn custom_radius_scales_the_construction() {
    let config = StarConfig {
        radius: 1.5,
        ..StarKind::SixPoint.default_config()
    };
    let s = build_script(StarKind::SixPoint, &config).unwrap();
    assert!((s.star.circle().radius - 1.5).abs() < 1e-12);
}

#[test]
fn rejects_non_positive_radius() {
    for radius in [0.0, -2.0, f64::INFINITY] {
        let config = StarConfig {
            radius,
            ..StarKind::EightPoint.default_config()
        };
        assert!(matches!(
            build_script(StarKind::EightPoint, &config),
            Err(StellateError::InvalidArgument(_))
        ));
    }
}

#[test]
fn scripts_are_deterministic() {
    for kind in StarKind::ALL {
        let a = serde_json::to_string(&script(kind)).unwrap();
        let b = serde_json::to_string(&script(kind)).unwrap();
        assert_eq!(a, b);
    }
}
