use std::f64::consts::{FRAC_PI_2, PI};

use crate::{
    construction::{
        VERTEX_DOT_RADIUS, StarKind,
        action::Action,
        dots, each, labels, plane,
        palette::StarConfig,
        script::{BASELINE_ID, ConstructionScript, STAR_ID, ScriptBuilder},
        shape::{DOT_RADIUS, Geometry, ShapeStyle},
        title_card,
    },
    foundation::{
        core::{Circle, Line, Point},
        error::StellateResult,
    },
    geometry::{ring::points_on_circle, star::StarGeometry},
};

/// Hexagram: a circle, two arcs of the same radius, and two interlocking triangles.
pub(crate) fn script(config: &StarConfig) -> StellateResult<ConstructionScript> {
    let r = config.radius;
    let palette = config.palette.clone();
    let star = StarGeometry::regular(Point::ORIGIN, r, 6, 2)?;
    let ring = star.ring.clone();
    let vertices = star.outline.vertices().to_vec();
    let mut b = ScriptBuilder::new(StarKind::SixPoint, "Six-Point Star", config.clone(), star);

    plane(&mut b, palette.grid)?;
    b.shape(
        BASELINE_ID,
        Geometry::Line(Line::new((-4.0, 0.0), (4.0, 0.0))),
        ShapeStyle::stroke(palette.construction),
    )?;
    b.shape(
        "center",
        Geometry::Dot {
            center: Point::ORIGIN,
            radius: DOT_RADIUS,
        },
        ShapeStyle::filled(palette.reference),
    )?;
    b.shape(
        "circle",
        Geometry::Circle(Circle::new(Point::ORIGIN, r)),
        ShapeStyle::stroke(palette.construction),
    )?;
    for (id, x, start) in [("a", -r, 3.0 * FRAC_PI_2), ("b", r, FRAC_PI_2)] {
        b.shape(
            format!("dot_{id}"),
            Geometry::Dot {
                center: Point::new(x, 0.0),
                radius: DOT_RADIUS,
            },
            ShapeStyle::filled(palette.reference),
        )?;
        b.shape(
            format!("arc_{id}"),
            Geometry::Arc {
                center: Point::new(x, 0.0),
                radius: r,
                start_angle: start,
                sweep: PI,
            },
            ShapeStyle::stroke(palette.construction).dashed(1.0),
        )?;
    }

    let points = dots(&mut b, "point", ring.points(), DOT_RADIUS, palette.reference)?;
    let label_at = points_on_circle(Point::ORIGIN, r + 0.5, 6, 0.0)?;
    let label_ids = labels(&mut b, &label_at, (1..=6).map(|n| n.to_string()))?;

    for (i, offset) in [0, 1].into_iter().enumerate() {
        b.shape(
            format!("triangle_{}", i + 1),
            Geometry::Polygon(ring.every(2, offset)),
            ShapeStyle::stroke(palette.construction).dashed(1.0),
        )?;
    }
    let vertex_dots = dots(&mut b, "vertex", &vertices, VERTEX_DOT_RADIUS, palette.star)?;

    title_card(&mut b, "Six-Point Star")?;

    b.step("baseline", "Draw a straight line");
    b.announce()?;
    b.play([Action::create(BASELINE_ID)])?;

    b.step("circle", "Draw a circle on the line");
    b.announce()?;
    b.play([Action::fade_in("center")])?;
    b.play([Action::create("circle")])?;
    b.wait(1.0)?;

    b.step(
        "arcs",
        "From the intersection of the line and circle, draw arcs cutting the circle.",
    );
    b.play([Action::fade_in("dot_a"), Action::fade_in("dot_b")])?;
    b.play([Action::flash("dot_a"), Action::flash("dot_b")])?;
    b.play([Action::create("arc_a"), Action::create("arc_b")])?;
    b.wait(1.0)?;

    b.continued("six_points", "this creates six points on the circle");
    b.play([Action::dim(BASELINE_ID, 0.5)])?;
    let mut reveal = vec![
        Action::dim(BASELINE_ID, 0.75),
        Action::dim("center", 0.75),
        Action::fade_out("dot_a"),
        Action::fade_out("dot_b"),
    ];
    reveal.extend(each(&points, |id| Action::fade_in(id)));
    reveal.extend(each(&label_ids, |id| Action::fade_in(id)));
    b.play(reveal)?;
    b.play(each(&points, |id| Action::flash(id)))?;
    b.wait(1.0)?;

    b.step("triangles", "Join the alternate dots,\ncreating two triangles");
    b.play(["circle", "arc_a", "arc_b"].map(|id| Action::dim(id, 0.5)))?;
    b.play(["circle", "arc_a", "arc_b"].map(|id| Action::dim(id, 0.75)))?;
    b.play_for(2.0, [Action::create("triangle_1")])?;
    b.play_for(2.0, [Action::create("triangle_2")])?;
    b.wait(1.0)?;

    b.step(
        "star",
        "Draw along the outline of the two triangles to create the 6-point star",
    );
    let mut trace = vec![
        Action::dim("triangle_1", 0.5),
        Action::dim("triangle_2", 0.5),
    ];
    trace.extend(each(&label_ids, |id| Action::fade_out(id)));
    trace.extend(each(&points, |id| Action::fade_out(id)));
    trace.extend(each(&vertex_dots, |id| Action::fade_in(id)));
    b.play(trace)?;
    b.instant([Action::fill(STAR_ID, 0.0)])?;
    b.play_for(5.0, [Action::create(STAR_ID)])?;

    let mut finale = each(&vertex_dots, |id| Action::fade_out(id));
    finale.extend(
        [
            "arc_a",
            "arc_b",
            "triangle_1",
            "triangle_2",
            BASELINE_ID,
            "circle",
            "center",
            "plane",
        ]
        .map(Action::fade_out),
    );
    finale.extend([
        Action::ClearCaption,
        Action::fade_in("title"),
        Action::fill(STAR_ID, 1.0),
    ]);
    b.play_for(2.0, finale)?;
    b.wait(2.0)?;

    b.build()
}
