use crate::{
    construction::{
        StarKind, VERTEX_DOT_RADIUS,
        action::Action,
        dots, each,
        palette::StarConfig,
        plane,
        script::{BASELINE_ID, ConstructionScript, STAR_ID, ScriptBuilder},
        shape::{DOT_RADIUS, Geometry, ShapeStyle},
        title_card,
    },
    foundation::{
        core::{Circle, Line, Point},
        error::StellateResult,
    },
    geometry::{ring::point_on_circle, star::StarGeometry},
};

/// Counter-clockwise arc with angles in degrees.
fn arc(center: Point, radius: f64, start_deg: f64, sweep_deg: f64) -> Geometry {
    Geometry::Arc {
        center,
        radius,
        start_angle: start_deg.to_radians(),
        sweep: sweep_deg.to_radians(),
    }
}

/// Octagram: bisect the circle with a perpendicular, then with the diagonals, and join
/// alternate points into two squares.
pub(crate) fn script(config: &StarConfig) -> StellateResult<ConstructionScript> {
    let r = config.radius;
    let palette = config.palette.clone();
    let star = StarGeometry::regular(Point::ORIGIN, r, 8, 2)?;
    let ring = star.ring.clone();
    let vertices = star.outline.vertices().to_vec();
    let mut b = ScriptBuilder::new(
        StarKind::EightPoint,
        "Eight-Point Star",
        config.clone(),
        star,
    );
    let construction = ShapeStyle::stroke(palette.construction);
    let reference = |center: Point| Geometry::Dot {
        center,
        radius: DOT_RADIUS,
    };

    plane(&mut b, palette.grid)?;
    b.shape(
        BASELINE_ID,
        Geometry::Line(Line::new((-4.0, 0.0), (4.0, 0.0))),
        construction.clone(),
    )?;
    b.shape(
        "center",
        reference(Point::ORIGIN),
        ShapeStyle::filled(palette.reference),
    )?;
    b.shape(
        "circle",
        Geometry::Circle(Circle::new(Point::ORIGIN, r)),
        construction.clone().dashed(1.0),
    )?;

    // A/B on the baseline, E/F on the perpendicular; each carries an arc of radius r
    // sweeping just past a half turn.
    let a = Point::new(r, 0.0);
    for (id, center, start) in [
        ("a", a, 85.0),
        ("b", Point::new(-r, 0.0), 265.0),
        ("e", Point::new(0.0, r), 175.0),
        ("f", Point::new(0.0, -r), -5.0),
    ] {
        b.shape(
            format!("dot_{id}"),
            reference(center),
            ShapeStyle::filled(palette.reference),
        )?;
        b.shape(
            format!("arc_{id}"),
            arc(center, r, start, 190.0),
            construction.clone().dashed(0.5),
        )?;
    }

    // Circle points at 60° steps; short arcs from each cross above and below A.
    let marks = ["a", "b", "c", "d"];
    let small_arcs = ["upper_right", "upper_left", "lower_left", "lower_right"];
    for ((mark, arc_id), (at, toward)) in marks
        .iter()
        .zip(small_arcs)
        .zip([(60.0, 120.0), (120.0, 60.0), (240.0, 300.0), (300.0, 240.0)])
    {
        let center = point_on_circle(Point::ORIGIN, r, f64::to_radians(at));
        b.shape(
            format!("mark_{mark}"),
            reference(center),
            ShapeStyle::filled(palette.reference),
        )?;
        b.shape(
            format!("arc_{arc_id}"),
            arc(center, r, toward - 5.0, 10.0),
            construction.clone().dashed(0.1).z(10),
        )?;
    }
    let mark_ids: Vec<String> = marks.iter().map(|m| format!("mark_{m}")).collect();
    let small_arc_ids: Vec<String> = small_arcs.iter().map(|a| format!("arc_{a}")).collect();

    // Arcs of radius 2r from A meet the perpendicular through the center.
    let c = point_on_circle(a, 2.0 * r, 120f64.to_radians());
    let d = point_on_circle(a, 2.0 * r, 240f64.to_radians());
    b.shape("dot_c", reference(c), ShapeStyle::filled(palette.reference))?;
    b.shape("dot_d", reference(d), ShapeStyle::filled(palette.reference))?;
    b.shape(
        "perpendicular",
        Geometry::Line(Line::new(c, d)),
        construction.clone().dashed(0.8),
    )?;

    let corners = [
        Point::new(r, r),
        Point::new(-r, r),
        Point::new(-r, -r),
        Point::new(r, -r),
    ];
    let corner_ids = dots(&mut b, "corner", &corners, DOT_RADIUS, palette.reference)?;
    b.shape(
        "diagonal_a",
        Geometry::Line(Line::new(corners[0], corners[2])),
        construction.clone().dashed(0.8),
    )?;
    b.shape(
        "diagonal_b",
        Geometry::Line(Line::new(corners[1], corners[3])),
        construction.clone().dashed(0.8),
    )?;

    let points = dots(&mut b, "point", ring.points(), DOT_RADIUS, palette.reference)?;
    for (i, offset) in [0, 1].into_iter().enumerate() {
        b.shape(
            format!("square_{}", i + 1),
            Geometry::Polygon(ring.every(2, offset)),
            construction.clone().dashed(0.8),
        )?;
    }
    let vertex_dots = dots(&mut b, "vertex", &vertices, VERTEX_DOT_RADIUS, palette.star)?;

    title_card(&mut b, "Eight-Point Star")?;

    b.step("baseline", "Draw a straight line");
    b.announce()?;
    b.play([Action::create(BASELINE_ID)])?;

    b.step("circle", "Draw a circle on the line");
    b.announce()?;
    b.play([Action::indicate("center")])?;
    b.play([Action::create("circle")])?;
    b.wait(1.0)?;

    b.step(
        "arcs",
        "From the intersection of the line and circle, draw arcs cutting the circle.",
    );
    b.play([Action::fade_in("dot_a"), Action::fade_in("dot_b")])?;
    for id in ["a", "b"] {
        b.play([Action::indicate(format!("dot_{id}"))])?;
        b.play([Action::create(format!("arc_{id}"))])?;
    }
    b.wait(1.0)?;

    b.step("perpendicular", "Draw perpendicular to the baseline.");
    b.play([Action::dim(BASELINE_ID, 0.75), Action::dim("center", 0.75)])?;
    for (i, (mark, small)) in mark_ids.iter().zip(&small_arc_ids).enumerate() {
        b.play([Action::indicate(mark)])?;
        b.play_for(0.3, [Action::create(small)])?;
        if i == 1 {
            b.wait(0.5)?;
        }
    }
    b.play(each(&mark_ids, |id| Action::dim(id, 0.75)))?;
    b.play([Action::indicate("dot_c"), Action::indicate("dot_d")])?;
    b.play([Action::create("perpendicular")])?;
    b.wait(1.0)?;
    b.instant(each(&mark_ids, |id| Action::remove(id)))?;

    b.step(
        "perpendicular_arcs",
        "From the intersection of the perpendicular line and the circle, \
         draw arcs cutting the previous two arcs.",
    );
    let mut cross = vec![
        Action::fade_in("dot_e"),
        Action::fade_in("dot_f"),
        Action::fade_out("dot_c"),
        Action::fade_out("dot_d"),
    ];
    cross.extend(each(&small_arc_ids, |id| Action::dim(id, 0.75)));
    b.play(cross)?;
    for id in ["e", "f"] {
        b.play([Action::indicate(format!("dot_{id}"))])?;
        b.play([Action::create(format!("arc_{id}"))])?;
    }
    b.wait(1.0)?;

    b.step("diagonals", "Draw diagonal lines intersecting the circle.");
    let mut diagonals = vec![Action::dim("perpendicular", 0.75)];
    diagonals.extend(each(&corner_ids, |id| Action::fade_in(id)));
    diagonals.extend(["arc_a", "arc_b", "arc_e", "arc_f"].map(|id| Action::dim(id, 0.75)));
    b.play(diagonals)?;
    for (ends, line) in [([0, 2], "diagonal_a"), ([1, 3], "diagonal_b")] {
        b.play(ends.map(|i| Action::indicate(&corner_ids[i])))?;
        b.play([Action::create(line)])?;
    }
    b.wait(1.0)?;

    b.step("eight_points", "Mark where the lines cross the circle.");
    let mut mark = each(&corner_ids, |id| Action::fade_out(id));
    mark.extend(["diagonal_a", "diagonal_b"].map(|id| Action::dim(id, 0.75)));
    mark.extend(each(&points, |id| Action::fade_in(id)));
    b.play(mark)?;
    b.instant(["dot_a", "dot_b", "dot_e", "dot_f"].map(Action::remove))?;

    b.step(
        "squares",
        "This creates eight equally spaced points on the circle. \
         Join alternate points to create two overlapping squares.",
    );
    b.play([Action::dim("circle", 0.5)])?;
    for (offset, square) in [(0, "square_1"), (1, "square_2")] {
        b.play(
            points
                .iter()
                .skip(offset)
                .step_by(2)
                .map(|id| Action::indicate(id)),
        )?;
        b.play([Action::create(square)])?;
    }

    b.step(
        "star",
        "Draw along the outline of the two squares to create the 8-point star",
    );
    b.announce()?;
    let mut trace = each(&points, |id| Action::dim(id, 0.75));
    trace.extend(["square_1", "square_2"].map(|id| Action::dim(id, 0.5)));
    trace.extend(each(&vertex_dots, |id| Action::fade_in(id)));
    b.play(trace)?;
    b.instant([Action::fill(STAR_ID, 0.0)])?;
    b.play_for(3.0, [Action::create(STAR_ID)])?;

    let mut finale = vec![Action::ClearCaption];
    finale.extend(each(vertex_dots.iter().chain(&points), |id| Action::fade_out(id)));
    finale.extend(
        [
            "square_1",
            "square_2",
            "arc_a",
            "arc_b",
            "arc_e",
            "arc_f",
            "diagonal_a",
            "diagonal_b",
            "perpendicular",
        ]
        .map(Action::fade_out),
    );
    finale.extend(each(&small_arc_ids, |id| Action::fade_out(id)));
    finale.extend([BASELINE_ID, "center", "circle", "plane"].map(Action::fade_out));
    finale.extend([Action::fade_in("title"), Action::fill(STAR_ID, 1.0)]);
    b.play_for(2.0, finale)?;
    b.wait(1.0)?;

    b.build()
}
