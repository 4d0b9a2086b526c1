use super::*;

const EPS: f64 = 1e-9;

fn angle_between(center: Point, a: Point, b: Point) -> f64 {
    let da = (a - center).atan2();
    let db = (b - center).atan2();
    (db - da).rem_euclid(std::f64::consts::TAU)
}

#[test]
fn points_lie_on_the_circle_with_uniform_spacing() {
    let center = Point::new(1.5, -2.0);
    for n in 3..=12usize {
        let pts = points_on_circle(center, 3.0, n, 0.25).unwrap();
        assert_eq!(pts.len(), n);
        let expected = 360.0 / n as f64;
        for i in 0..n {
            assert!((pts[i].distance(center) - 3.0).abs() < EPS);
            let step = angle_between(center, pts[i], pts[(i + 1) % n]).to_degrees();
            assert!((step - expected).abs() < 1e-7, "n={n} i={i} step={step}");
        }
    }
}

#[test]
fn first_point_sits_at_start_angle_and_direction_is_ccw() {
    let pts = points_on_circle(Point::ORIGIN, 2.0, 4, 0.0).unwrap();
    assert!((pts[0].x - 2.0).abs() < EPS && pts[0].y.abs() < EPS);
    // Counter-clockwise: the second point is straight up.
    assert!(pts[1].x.abs() < EPS && (pts[1].y - 2.0).abs() < EPS);
}

#[test]
fn rotation_consistency_about_center() {
    let center = Point::new(-0.5, 0.75);
    let theta = 37f64.to_radians();
    let base = points_on_circle(center, 2.5, 7, 0.0).unwrap();
    let rotated = points_on_circle(center, 2.5, 7, theta).unwrap();
    let rot = kurbo::Affine::rotate_about(theta, center);
    for (b, r) in base.iter().zip(&rotated) {
        let expect = rot * *b;
        assert!(expect.distance(*r) < EPS);
    }
}

#[test]
fn identical_inputs_give_bit_identical_outputs() {
    let a = points_on_circle(Point::ORIGIN, 3.0, 6, 0.1).unwrap();
    let b = points_on_circle(Point::ORIGIN, 3.0, 6, 0.1).unwrap();
    for (p, q) in a.iter().zip(&b) {
        assert_eq!(p.x.to_bits(), q.x.to_bits());
        assert_eq!(p.y.to_bits(), q.y.to_bits());
    }
}

#[test]
fn invalid_count_and_radius_are_rejected() {
    let bad = [
        points_on_circle(Point::ORIGIN, 3.0, 0, 0.0),
        points_on_circle(Point::ORIGIN, 0.0, 6, 0.0),
        points_on_circle(Point::ORIGIN, -1.0, 6, 0.0),
        points_on_circle(Point::ORIGIN, f64::INFINITY, 6, 0.0),
        points_on_circle(Point::new(f64::NAN, 0.0), 1.0, 6, 0.0),
        points_on_circle(Point::ORIGIN, 1.0, 6, f64::NAN),
    ];
    for r in bad {
        assert!(matches!(r, Err(StellateError::InvalidArgument(_))));
    }
}

#[test]
fn single_point_ring_is_allowed() {
    let pts = points_on_circle(Point::ORIGIN, 1.0, 1, 0.0).unwrap();
    assert_eq!(pts.len(), 1);
}

#[test]
fn ring_indexing_wraps_both_ways() {
    let ring = PointRing::new(Circle::new(Point::ORIGIN, 3.0), 6, 0.0).unwrap();
    assert_eq!(ring.len(), 6);
    assert_eq!(ring.at(6), ring.at(0));
    assert_eq!(ring.at(7), ring.at(1));
    assert_eq!(ring.at(-1), ring.at(5));
    assert_eq!(ring.at(-7), ring.at(5));
    assert!((ring.angle_step().to_degrees() - 60.0).abs() < EPS);
}

#[test]
fn every_other_point_forms_the_two_triangles() {
    let ring = PointRing::new(Circle::new(Point::ORIGIN, 3.0), 6, 0.0).unwrap();
    let t1 = ring.every(2, 0);
    let t2 = ring.every(2, 1);
    assert_eq!(t1, vec![ring.at(0), ring.at(2), ring.at(4)]);
    assert_eq!(t2, vec![ring.at(1), ring.at(3), ring.at(5)]);
    assert!(ring.every(0, 0).is_empty());
}

#[test]
fn ring_rotation_is_carried_by_its_points() {
    let quarter = std::f64::consts::FRAC_PI_2;
    let ring = PointRing::new(Circle::new(Point::ORIGIN, 2.0), 4, quarter).unwrap();
    assert!(ring.at(0).x.abs() < EPS && (ring.at(0).y - 2.0).abs() < EPS);
    let json = serde_json::to_value(&ring).unwrap();
    assert!(json.get("start_angle").is_none());
    assert_eq!(json["points"].as_array().map(Vec::len), Some(4));
}
