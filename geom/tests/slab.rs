use proptest::prelude::*;

use rf::geom::Ray;
use rf::math::{ApproxEq, Point3, Vec3, pt3, vec3};
use rf::Error;
use rayform_geom::{BBox, Intersect};

fn pt3s(r: f64) -> impl Strategy<Value = Point3> {
    (-r..r, -r..r, -r..r).prop_map(|(x, y, z)| pt3(x, y, z))
}

fn boxes() -> impl Strategy<Value = BBox> {
    (pt3s(10.0), pt3s(10.0))
        .prop_filter("too thin", |(a, b)| {
            (0..3).all(|i| (a[i] - b[i]).abs() > 0.1)
        })
        .prop_map(|(a, b)| BBox::new(a, b))
}

fn dirs() -> impl Strategy<Value = Vec3> {
    (-1.0..1.0, -1.0..1.0, -1.0..1.0)
        .prop_map(|(x, y, z)| vec3(x, y, z))
        .prop_filter("too short", |v: &Vec3| v.len() > 0.1)
}

/// Returns the point with the given fractional coordinates in `b`.
fn lerp(b: &BBox, f: [f64; 3]) -> Point3 {
    let (l, u) = (b.min(), b.max());
    pt3(
        l.x() + f[0] * (u.x() - l.x()),
        l.y() + f[1] * (u.y() - l.y()),
        l.z() + f[2] * (u.z() - l.z()),
    )
}

fn on_boundary(b: &BBox, p: &Point3) -> bool {
    let eps = 1e-9;
    let (l, u) = (b.min(), b.max());
    b.expand(eps).contains(p)
        && (0..3).any(|i| (p[i] - l[i]).abs() < eps || (p[i] - u[i]).abs() < eps)
}

#[test]
fn unit_box_head_on() {
    let b: BBox = BBox::new(pt3(0.0, 0.0, 0.0), pt3(1.0, 1.0, 1.0));
    let r: Ray<Point3> = Ray(pt3(0.5, 0.5, -5.0), vec3(0.0, 0.0, 1.0));

    let t = b.intersect(&r, 0.0, 1000.0);
    assert_eq!(t, Some(5.0));
    assert_eq!(r.intersect(&b), Some((5.0, pt3(0.5, 0.5, 0.0))));
}

#[test]
fn from_points_edge_cases() {
    let one: BBox = BBox::from_points([pt3(1.0, 1.0, 1.0)]).unwrap();
    assert_eq!(one.min(), pt3(1.0, 1.0, 1.0));
    assert_eq!(one.max(), pt3(1.0, 1.0, 1.0));

    let none: Vec<Point3> = Vec::new();
    assert!(matches!(
        BBox::from_points(none),
        Err(Error::InvalidArgument(_))
    ));
}

proptest! {
    #[test]
    fn ray_from_inside_exits_through_boundary(
        b in boxes(),
        f in prop::array::uniform3(0.05..0.95),
        d in dirs(),
    ) {
        let r = Ray(lerp(&b, f), d);
        let t = b.intersect(&r, 0.0, f64::MAX);
        prop_assert!(t.is_some());
        let t = t.unwrap();
        prop_assert!(t.is_finite() && t > 0.0);
        let p = r.at(t);
        prop_assert!(on_boundary(&b, &p), "{p:?} not on {b:?}");
    }

    #[test]
    fn ray_from_outside_aimed_at_inside_point_hits(
        b in boxes(),
        f in prop::array::uniform3(0.05..0.95),
        from in pt3s(100.0),
    ) {
        prop_assume!(!b.contains(&from));
        let target = lerp(&b, f);
        let r = Ray(from, target - from);
        let (t, p) = r.intersect(&b).unwrap();
        // The entry point comes before the target point
        prop_assert!(0.0 < t && t <= 1.0 + 1e-9);
        prop_assert!(on_boundary(&b, &p), "{p:?} not on {b:?}");
    }

    #[test]
    fn ray_aimed_away_misses(
        b in boxes(),
        from in pt3s(100.0),
    ) {
        prop_assume!(!b.contains(&from));
        let away = from - b.center();
        let r = Ray(from, away);
        // A point outside a convex box, moving away from its center,
        // cannot enter the box.
        prop_assert!(b.intersect(&r, 0.0, f64::MAX).is_none());
    }

    #[test]
    fn closest_point_is_inside_and_fixes_inner_points(
        b in boxes(),
        p in pt3s(20.0),
        f in prop::array::uniform3(0.0..=1.0),
    ) {
        let c = b.closest_point(&p);
        prop_assert!(b.contains(&c));
        prop_assert_eq!(b.contains(&p), c == p);

        let q = lerp(&b, f);
        prop_assert!(b.contains(&q));
        prop_assert_eq!(b.closest_point(&q), q);
    }

    #[test]
    fn from_points_bounds_all(
        pts in prop::collection::vec(pt3s(50.0), 1..32),
    ) {
        let b = BBox::from_points(pts.iter().copied()).unwrap();
        prop_assert!(pts.iter().all(|p| b.contains(p)));
        prop_assert!(pts.iter().any(|p| p[0] == b.min()[0]));
        prop_assert!(pts.iter().any(|p| p[2] == b.max()[2]));
    }

    #[test]
    fn union_contains_both(a in boxes(), b in boxes()) {
        let u = a.union(&b);
        for c in a.corners().iter().chain(&b.corners()) {
            prop_assert!(u.contains(c));
        }
        prop_assert_eq!(u, b.union(&a));
    }

    #[test]
    fn refit_contains_transformed_corners(
        b in boxes(),
        s in 0.5..2.0,
        angle in -3.0..3.0,
    ) {
        use rf::math::{Apply, Mat4, rotate_y, scale};

        let m: Mat4 = scale(vec3(s, 1.0, 1.0)).then(&rotate_y(angle));
        let t: BBox = b.transform(&m);
        for c in b.corners() {
            let tc = m.apply(&c);
            prop_assert!(t.expand(1e-9).contains(&tc));
        }
        let center = m.apply(&b.center());
        prop_assert!(t.center().approx_eq_eps(&center, &1e-9));
    }
}
