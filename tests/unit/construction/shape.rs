use super::*;

fn dot(id: &str) -> Shape {
    Shape {
        id: id.to_string(),
        geometry: Geometry::Dot {
            center: Point::ORIGIN,
            radius: DOT_RADIUS,
        },
        style: ShapeStyle::filled(Color::BLACK),
    }
}

#[test]
fn wrap_words_respects_width_and_newlines() {
    let lines = wrap_words("Join the alternate dots,\ncreating two triangles", 12);
    assert_eq!(
        lines,
        vec!["Join the", "alternate", "dots,", "creating two", "triangles"]
    );

    let long = wrap_words("perpendicular", 4);
    assert_eq!(long, vec!["perpendicular"]);
    assert!(wrap_words("", 10).is_empty());
}

#[test]
fn outlines_exist_only_for_stroked_geometry() {
    let line = Geometry::Line(Line::new((0.0, 0.0), (1.0, 0.0)));
    assert!(line.outline().is_some());
    assert!(!line.is_closed());

    let circle = Geometry::Circle(Circle::new(Point::ORIGIN, 2.0));
    assert!(circle.outline().is_some());
    assert!(circle.is_closed());

    assert!(dot("d").geometry.outline().is_none());
    assert_eq!(dot("d").geometry.dot_center(), Some(Point::ORIGIN));
}

#[test]
fn arc_outline_starts_at_start_angle() {
    let arc = Geometry::Arc {
        center: Point::new(-3.0, 0.0),
        radius: 3.0,
        start_angle: -std::f64::consts::FRAC_PI_2,
        sweep: std::f64::consts::PI,
    };
    let path = arc.outline().unwrap();
    let first = match path.elements()[0] {
        kurbo::PathEl::MoveTo(p) => p,
        ref other => panic!("unexpected {other:?}"),
    };
    assert!(first.distance(Point::new(-3.0, -3.0)) < 1e-9);

    let b = arc.bounds();
    assert!(b.x1.abs() < 1e-2);
    assert!((b.y0 + 3.0).abs() < 1e-2 && (b.y1 - 3.0).abs() < 1e-2);
}

#[test]
fn dash_pattern_splits_the_period() {
    let dash = Dash::scaled(1.0);
    assert_eq!(dash.count, 64);
    let (on, off) = dash.pattern(64.0);
    assert!((on - 0.6).abs() < 1e-12);
    assert!((off - 0.4).abs() < 1e-12);
    assert_eq!(Dash::scaled(0.001).count, 1);
}

#[test]
fn shape_set_rejects_duplicates_and_reports_missing() {
    let mut set = ShapeSet::default();
    set.insert(dot("a")).unwrap();
    assert!(matches!(
        set.insert(dot("a")),
        Err(StellateError::Validation(_))
    ));
    assert!(set.insert(dot(" ")).is_err());
    assert!(set.contains("a"));
    assert!(matches!(
        set.require("nope"),
        Err(StellateError::MissingDependency(_))
    ));
}

#[test]
fn paint_order_is_stable_by_z() {
    let mut set = ShapeSet::default();
    let mut high = dot("high");
    high.style = high.style.z(10);
    set.insert(high).unwrap();
    set.insert(dot("first")).unwrap();
    set.insert(dot("second")).unwrap();
    let ids: Vec<&str> = set.paint_order().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "high"]);
}

#[test]
fn text_bounds_grow_with_lines() {
    let block = TextBlock {
        anchor: Point::ORIGIN,
        text: "one two three four".to_string(),
        size: 0.4,
        bold: false,
        italic: true,
        serif: true,
        wrap: Some(8),
    };
    assert_eq!(block.lines().len(), 3);
    let b = Geometry::Text(block).bounds();
    assert!((b.height() - 3.0 * 0.5).abs() < 1e-12);
}
