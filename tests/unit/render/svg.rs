use super::*;
use crate::{
    construction::{StarKind, build_script},
    render::settings::RenderSettings,
};

fn frame() -> SceneFrame {
    RenderSettings::default().scene_frame().unwrap()
}

#[test]
fn trim_path_keeps_the_leading_fraction() {
    let mut line = BezPath::new();
    line.move_to((0.0, 0.0));
    line.line_to((4.0, 0.0));
    line.line_to((4.0, 4.0));

    assert!((path_length(&line) - 8.0).abs() < 1e-6);
    assert!((path_length(&trim_path(&line, 0.25)) - 2.0).abs() < 1e-3);
    assert!((path_length(&trim_path(&line, 0.75)) - 6.0).abs() < 1e-3);
    assert!(trim_path(&line, 0.0).elements().is_empty());
    assert_eq!(trim_path(&line, 1.0), line);
}

#[test]
fn xml_text_is_escaped() {
    assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    assert_eq!(num(1.5000), "1.5");
    assert_eq!(num(-0.0001), "0");
    assert_eq!(num(2.0), "2");
}

#[test]
fn document_uses_canvas_pixels() {
    let script = build_script(StarKind::SixPoint, &StarKind::SixPoint.default_config()).unwrap();
    let snaps = script.snapshots().unwrap();
    let svg = scene_svg(&script, &snaps[0].state, frame()).unwrap();
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1080" height="1920""#));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn one_outline_element_per_visible_shape() {
    for kind in StarKind::ALL {
        let script = build_script(kind, &kind.default_config()).unwrap();
        for snap in script.snapshots().unwrap() {
            let svg = scene_svg(&script, &snap.state, frame()).unwrap();
            let mut expected = 0;
            for shape in script.shapes.iter() {
                if shape.geometry.outline().is_none() {
                    continue;
                }
                let s = snap.state.shape(&shape.id).unwrap();
                let marker = format!(r#"<path id="{}""#, shape.id);
                if s.is_visible() && s.drawn > 0.0 {
                    expected += 1;
                    assert!(svg.contains(&marker), "{kind:?}/{}: {} missing", snap.label, shape.id);
                } else {
                    assert!(!svg.contains(&marker), "{kind:?}/{}: {} drawn", snap.label, shape.id);
                }
            }
            assert_eq!(svg.matches("<path id=").count(), expected, "{kind:?}/{}", snap.label);
        }
    }
}

#[test]
fn step_caption_is_written_below_the_grid() {
    let script = build_script(StarKind::SixPoint, &StarKind::SixPoint.default_config()).unwrap();
    let snaps = script.snapshots().unwrap();
    let svg = scene_svg(&script, &snaps[1].state, frame()).unwrap();
    assert!(svg.contains(">1. "), "{svg}");
    assert!(svg.contains(r#"font-style="italic""#));

    let prelude = scene_svg(&script, &snaps[0].state, frame()).unwrap();
    assert!(!prelude.contains(">1. "));
}

#[test]
fn dashed_shapes_carry_a_dash_array() {
    let script = build_script(StarKind::SixPoint, &StarKind::SixPoint.default_config()).unwrap();
    let snaps = script.snapshots().unwrap();
    let triangles = snaps.iter().find(|s| s.label == "triangles").unwrap();
    let svg = scene_svg(&script, &triangles.state, frame()).unwrap();
    let start = svg.find(r#"<path id="triangle_1""#).unwrap();
    let element = &svg[start..start + svg[start..].find("/>").unwrap()];
    assert!(element.contains("stroke-dasharray"), "{element}");
}
