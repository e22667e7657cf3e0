// Host-side tests for half-space membership, segment clipping and the
// projection entry points.

use lorenz_core::{
    project_vec3_to_screen, project_vec4_to_screen, ClipPlanes, Mat4, Plane, Vec3, Vec4, Viewport,
};
use rand::prelude::*;

fn tilted_plane() -> Plane {
    Plane::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.3, -2.0, 0.7))
}

fn signed(plane: &Plane, p: Vec3) -> f64 {
    plane.normal.dot(p - plane.position)
}

#[test]
fn contains_uses_normal_side_inclusive() {
    let plane = Plane::new(Vec3::new(0.0, 0.0, 1.0), Vec3::UNIT_Z);
    assert!(plane.contains(Vec3::new(5.0, -3.0, 1.0)));
    assert!(plane.contains(Vec3::new(0.0, 0.0, 7.0)));
    assert!(!plane.contains(Vec3::new(0.0, 0.0, 0.999)));
    // fractional distances are not truncated towards the plane
    assert!(!plane.contains(Vec3::new(0.0, 0.0, 0.5)));
}

#[test]
fn contains_is_false_for_nan() {
    let plane = Plane::new(Vec3::ZERO, Vec3::UNIT_X);
    assert!(!plane.contains(Vec3::new(f64::NAN, 0.0, 0.0)));
}

#[test]
fn clip_keeps_segment_fully_inside() {
    let plane = Plane::new(Vec3::ZERO, Vec3::UNIT_Y);
    let a = Vec3::new(1.0, 1.0, 0.0);
    let b = Vec3::new(-4.0, 3.0, 2.0);
    assert_eq!(plane.clip_segment(a, b), Some((a, b)));
}

#[test]
fn clip_culls_segment_fully_outside() {
    let plane = Plane::new(Vec3::ZERO, Vec3::UNIT_Y);
    assert_eq!(
        plane.clip_segment(Vec3::new(1.0, -1.0, 0.0), Vec3::new(3.0, -0.1, 9.0)),
        None
    );
}

#[test]
fn clip_replaces_outside_endpoint_with_intersection() {
    let plane = Plane::new(Vec3::new(0.0, 0.0, 1.0), Vec3::UNIT_Z);
    let inside = Vec3::new(2.0, 0.0, 3.0);
    let outside = Vec3::new(0.0, 4.0, -1.0);

    let (a, b) = plane.clip_segment(inside, outside).unwrap();
    assert_eq!(a, inside);
    assert!((b.z - 1.0).abs() < 1e-12);
    assert!((b - Vec3::new(1.0, 2.0, 1.0)).magnitude() < 1e-12);

    let (a, b) = plane.clip_segment(outside, inside).unwrap();
    assert_eq!(b, inside);
    assert!((a - Vec3::new(1.0, 2.0, 1.0)).magnitude() < 1e-12);
}

#[test]
fn replaced_endpoint_lies_on_plane() {
    let plane = tilted_plane();
    let mut rng = StdRng::seed_from_u64(5);
    let mut checked = 0;
    while checked < 300 {
        let mut random_point = || {
            Vec3::new(
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
            )
        };
        let a = random_point();
        let b = random_point();
        if plane.contains(a) == plane.contains(b) {
            continue;
        }
        let (ca, cb) = plane.clip_segment(a, b).unwrap();
        let replaced = if plane.contains(a) { cb } else { ca };
        let kept = if plane.contains(a) { ca } else { cb };
        assert_eq!(kept, if plane.contains(a) { a } else { b });
        assert!(signed(&plane, replaced).abs() < 1e-9);
        checked += 1;
    }
}

#[test]
fn clip_planes_track_viewport() {
    let mut planes = ClipPlanes::new(1.0, 100.0, Viewport::new(800, 450));
    assert!(planes.right.contains(Vec3::new(800.0, 10.0, 0.0)));
    assert!(!planes.right.contains(Vec3::new(800.5, 10.0, 0.0)));
    assert!(!planes.bottom.contains(Vec3::new(10.0, 451.0, 0.0)));

    planes.resize(Viewport::new(1024, 768));
    assert!(planes.right.contains(Vec3::new(1000.0, 10.0, 0.0)));
    assert!(planes.bottom.contains(Vec3::new(10.0, 700.0, 0.0)));
    assert!(!planes.bottom.contains(Vec3::new(10.0, 769.0, 0.0)));
    assert_eq!(planes.near.position.z, 1.0);
    assert_eq!(planes.far.position.z, 100.0);
}

#[test]
fn view_planes_bound_depth() {
    let planes = ClipPlanes::new(1.0, 100.0, Viewport::new(800, 450));
    let [near, far] = planes.view_planes();
    assert!(!near.contains(Vec3::new(0.0, 0.0, 0.5)));
    assert!(near.contains(Vec3::new(0.0, 0.0, 1.0)));
    assert!(far.contains(Vec3::new(0.0, 0.0, 100.0)));
    assert!(!far.contains(Vec3::new(0.0, 0.0, 100.5)));
}

#[test]
fn viewport_contains_rejects_non_finite() {
    let vp = Viewport::new(800, 450);
    assert!(vp.contains(0.0, 0.0));
    assert!(vp.contains(800.0, 450.0));
    assert!(!vp.contains(-0.1, 10.0));
    assert!(!vp.contains(f64::NAN, 10.0));
    assert!(!vp.contains(10.0, f64::INFINITY));
}

#[test]
fn project_vec3_follows_divide_and_viewport_mapping() {
    let vp = Viewport::new(800, 450);
    let proj = Mat4::projection(std::f64::consts::FRAC_PI_2, 0.1, 100.0, vp.aspect());
    let p = Vec3::new(2.0, 1.0, 10.0);
    let s = project_vec3_to_screen(&proj, p, vp);

    let f = 1.0; // 1 / tan(pi/4)
    let q = 100.0 / (100.0 - 0.1);
    let ndc_x = vp.aspect() * f * p.x / p.z;
    let ndc_y = f * p.y / p.z;
    let ndc_z = (q * p.z - 0.1 * q) / p.z;
    assert!((s.x - (ndc_x + 1.0) / 2.0 * 800.0).abs() < 1e-9);
    assert!((s.y - (450.0 - (ndc_y + 1.0) / 2.0 * 450.0)).abs() < 1e-9);
    assert!((s.z - (ndc_z + 1.0) / 2.0).abs() < 1e-12);
}

#[test]
fn project_centre_of_view_hits_screen_centre() {
    let vp = Viewport::new(640, 480);
    let proj = Mat4::projection(1.0, 0.1, 100.0, vp.aspect());
    let s = project_vec3_to_screen(&proj, Vec3::new(0.0, 0.0, 42.0), vp);
    assert!((s.x - 320.0).abs() < 1e-9);
    assert!((s.y - 240.0).abs() < 1e-9);
}

#[test]
fn projection_entry_points_differ_only_by_x_mirror() {
    let vp = Viewport::new(800, 450);
    let proj = Mat4::projection(std::f64::consts::FRAC_PI_2, 0.1, 100.0, vp.aspect());
    let p = Vec3::new(-3.0, 2.5, 12.0);
    let a = project_vec3_to_screen(&proj, p, vp);
    let b = project_vec4_to_screen(&proj, p.extend(1.0), vp);
    assert!((b.x - (800.0 - a.x)).abs() < 1e-9);
    assert!((b.y - a.y).abs() < 1e-12);
    assert!((b.z - a.z).abs() < 1e-12);
}

#[test]
fn project_vec4_honours_explicit_w() {
    let vp = Viewport::new(100, 100);
    let proj = Mat4::identity();
    // identity keeps w, so (0.5, 0.5) / 2 -> ndc (0.25, 0.25)
    let s = project_vec4_to_screen(&proj, Vec4::new(0.5, 0.5, 0.0, 2.0), vp);
    assert!((s.x - (100.0 - 62.5)).abs() < 1e-12);
    assert!((s.y - (100.0 - 62.5)).abs() < 1e-12);
    assert!((s.z - 0.5).abs() < 1e-12);
}
