use crate::{
    construction::{
        StarKind,
        action::Action,
        dots, each, labels, plane,
        palette::StarConfig,
        script::{BASELINE_ID, ConstructionScript, STAR_ID, ScriptBuilder},
        shape::{DOT_RADIUS, Geometry, ShapeStyle, TextBlock},
    },
    foundation::{
        color::Color,
        core::{Circle, Line, Point},
        error::StellateResult,
    },
    geometry::{ring::points_on_circle, star::StarGeometry},
};

/// The octagram idea in a few beats: walk the eight points, draw the two squares, show
/// the star. No compass work.
pub(crate) fn script(config: &StarConfig) -> StellateResult<ConstructionScript> {
    let r = config.radius;
    let palette = config.palette.clone();
    let star = StarGeometry::regular(Point::ORIGIN, r, 8, 2)?;
    let ring = star.ring.clone();
    let outline = star.outline.vertices().to_vec();
    let mut b = ScriptBuilder::new(StarKind::Concept, "Core Concept", config.clone(), star);
    b.backdrop(Color::BLACK);

    plane(&mut b, palette.grid)?;
    b.shape(
        BASELINE_ID,
        Geometry::Line(Line::new((-3.0, 0.0), (3.0, 0.0))),
        ShapeStyle::stroke(palette.construction).dashed(0.8),
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
        ShapeStyle::stroke(palette.construction).dashed(1.0),
    )?;

    // The walker starts on point 0; each hop morphs one dot onto the next position.
    b.shape(
        "walker",
        Geometry::Dot {
            center: ring.at(0),
            radius: DOT_RADIUS,
        },
        ShapeStyle::filled(palette.reference),
    )?;
    let points = dots(&mut b, "point", ring.points(), DOT_RADIUS, palette.reference)?;
    let label_at = points_on_circle(Point::ORIGIN, r + 0.5, 8, 0.0)?;
    let label_ids = labels(&mut b, &label_at, (1..=8).map(|n| n.to_string()))?;

    for (i, offset) in [0, 1].into_iter().enumerate() {
        b.shape(
            format!("square_{}", i + 1),
            Geometry::Polygon(ring.every(2, offset)),
            ShapeStyle::stroke(palette.star)
                .with_fill(palette.star, 0.5)
                .dashed(0.8),
        )?;
    }

    let star_shape = Geometry::Polygon(outline);
    let top = star_shape.bounds().y1;
    b.shape(
        STAR_ID,
        star_shape,
        ShapeStyle::stroke(palette.star).with_fill(palette.star, 1.0),
    )?;
    b.shape(
        "title",
        Geometry::Text(TextBlock {
            anchor: Point::new(0.0, top + 0.5),
            text: "Core Concept".to_string(),
            size: 0.4,
            bold: false,
            italic: true,
            serif: false,
            wrap: None,
        }),
        ShapeStyle::filled(palette.star),
    )?;

    b.instant([Action::add("plane"), Action::add("title"), Action::add(STAR_ID)])?;
    b.instant([Action::dim("plane", 0.75)])?;
    b.wait(1.0)?;
    b.play([Action::fade_out("title"), Action::fade_out(STAR_ID)])?;

    b.silent_step("setup");
    b.play([
        Action::fade_in("center"),
        Action::fade_in("circle"),
        Action::create(BASELINE_ID),
    ])?;

    b.silent_step("walk");
    let walkers: Vec<&str> = std::iter::once("walker")
        .chain(points.iter().map(String::as_str))
        .collect();
    for (hop, label) in walkers.windows(2).zip(&label_ids) {
        b.play_for(0.3, [Action::morph(hop[0], hop[1]), Action::fade_in(label)])?;
    }
    b.play(each(&label_ids, |id| Action::fade_out(id)))?;

    b.silent_step("squares");
    b.play([Action::draw_then_fill("square_1")])?;
    b.play([Action::draw_then_fill("square_2")])?;

    b.silent_step("reveal");
    // The last point only ever served as a morph target.
    let mut reveal: Vec<Action> = walkers[..walkers.len() - 1]
        .iter()
        .map(|id| Action::fade_out(*id))
        .collect();
    reveal.extend(
        ["circle", BASELINE_ID, "center", "square_1", "square_2"].map(Action::fade_out),
    );
    reveal.push(Action::fade_in(STAR_ID));
    b.play(reveal)?;
    b.wait(5.0)?;

    b.build()
}
