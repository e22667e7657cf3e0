// Host-side tests for vector and matrix algebra.
// glam's f64 builders serve as an independent reference: our row-major,
// row-vector matrices share the memory layout of glam's column-major,
// column-vector ones, so `DMat4::from_cols_array_2d(&m.m)` is the same map.

use glam::{DMat4, DVec3};
use lorenz_core::{Mat4, Vec3, Vec4};
use rand::prelude::*;

const EPS: f64 = 1e-9;

fn random_unit(rng: &mut StdRng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let m = v.magnitude();
        if m > 0.1 && m <= 1.0 {
            return v.normalize();
        }
    }
}

fn random_matrix(rng: &mut StdRng) -> Mat4 {
    let mut m = [[0.0; 4]; 4];
    for row in m.iter_mut() {
        for cell in row.iter_mut() {
            *cell = rng.gen_range(-2.0..2.0);
        }
    }
    Mat4::from_rows(m)
}

fn random_rigid(rng: &mut StdRng) -> Mat4 {
    let r = Mat4::multiply(
        &Mat4::rotation_z(rng.gen_range(-3.0..3.0)),
        &Mat4::multiply(
            &Mat4::rotation_y(rng.gen_range(-3.0..3.0)),
            &Mat4::rotation_x(rng.gen_range(-3.0..3.0)),
        ),
    );
    let t = Mat4::translation(Vec3::new(
        rng.gen_range(-50.0..50.0),
        rng.gen_range(-50.0..50.0),
        rng.gen_range(-50.0..50.0),
    ));
    Mat4::multiply(&t, &r)
}

fn as_glam(m: &Mat4) -> DMat4 {
    DMat4::from_cols_array_2d(&m.m)
}

fn assert_vec_close(a: Vec3, b: Vec3, eps: f64) {
    assert!(
        (a - b).magnitude() < eps,
        "vectors differ: {:?} vs {:?}",
        a,
        b
    );
}

#[test]
fn vector_arithmetic_basics() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(4.0, -5.0, 6.0);
    assert_eq!(a + b, Vec3::new(5.0, -3.0, 9.0));
    assert_eq!(a - b, Vec3::new(-3.0, 7.0, -3.0));
    assert_eq!(a.mul_components(b), Vec3::new(4.0, -10.0, 18.0));
    assert_eq!(b.div_components(a), Vec3::new(4.0, -2.5, 2.0));
    assert_eq!(a.dot(b), 12.0);
    assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
    assert!((Vec3::new(3.0, 4.0, 0.0).magnitude() - 5.0).abs() < EPS);
    assert_eq!(Vec3::UNIT_X.cross(Vec3::UNIT_Y), Vec3::UNIT_Z);
}

#[test]
fn normalize_zero_vector_is_non_finite() {
    let n = Vec3::ZERO.normalize();
    assert!(!n.is_finite());
}

#[test]
fn cross_product_is_orthogonal_to_inputs() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let u = random_unit(&mut rng);
        let v = random_unit(&mut rng);
        if u.cross(v).magnitude() < 1e-3 {
            continue; // nearly parallel
        }
        let c = u.cross(v);
        assert!(c.dot(u).abs() < 1e-12);
        assert!(c.dot(v).abs() < 1e-12);
    }
}

#[test]
fn multiply_is_associative() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..100 {
        let a = random_matrix(&mut rng);
        let b = random_matrix(&mut rng);
        let c = random_matrix(&mut rng);
        let left = Mat4::multiply(&Mat4::multiply(&a, &b), &c);
        let right = Mat4::multiply(&a, &Mat4::multiply(&b, &c));
        assert!(left.max_abs_diff(&right) < 1e-9);
    }
}

#[test]
fn identity_is_neutral_on_both_sides() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let m = random_matrix(&mut rng);
        assert_eq!(Mat4::multiply(&Mat4::IDENTITY, &m), m);
        assert_eq!(Mat4::multiply(&m, &Mat4::IDENTITY), m);
    }
}

#[test]
fn multiply_applies_second_operand_first() {
    let t = Mat4::translation(Vec3::new(10.0, 0.0, 0.0));
    let s = Mat4::scaling(Vec3::new(2.0, 2.0, 2.0));
    let p = Vec3::new(1.0, 1.0, 1.0);

    // translate, then scale
    let scale_after_translate = Mat4::multiply(&s, &t);
    let moved = scale_after_translate.multiply_vec3(p);
    assert_vec_close(moved, Vec3::new(22.0, 2.0, 2.0), EPS);

    // scale, then translate
    let translate_after_scale = Mat4::multiply(&t, &s);
    let moved = translate_after_scale.multiply_vec3(p);
    assert_vec_close(moved, Vec3::new(12.0, 2.0, 2.0), EPS);
}

#[test]
fn quick_inverse_undoes_rigid_transforms() {
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..100 {
        let m = random_rigid(&mut rng);
        let inv = m.quick_inverse();
        let left = Mat4::multiply(&inv, &m);
        let right = Mat4::multiply(&m, &inv);
        assert!(left.max_abs_diff(&Mat4::IDENTITY) < 1e-9);
        assert!(right.max_abs_diff(&Mat4::IDENTITY) < 1e-9);
    }
}

#[test]
fn quick_inverse_transposes_rotation_block() {
    let r = Mat4::multiply(&Mat4::rotation_y(0.4), &Mat4::rotation_x(-1.1));
    let inv = r.quick_inverse();
    assert!(inv.max_abs_diff(&r.transpose()) < 1e-12);
}

#[test]
fn quick_inverse_is_wrong_for_scaled_matrices() {
    let m = Mat4::scaling(Vec3::new(2.0, 2.0, 2.0));
    let product = Mat4::multiply(&m.quick_inverse(), &m);
    assert!(product.max_abs_diff(&Mat4::IDENTITY) > 1.0);
}

#[test]
fn projection_matches_glam_left_handed_perspective() {
    let fov = std::f64::consts::FRAC_PI_2;
    let (w, h) = (800.0, 450.0);
    let ours = Mat4::projection(fov, 0.1, 100.0, h / w);
    // glam's aspect is width / height; ours is height / width
    let reference = DMat4::perspective_lh(fov, w / h, 0.1, 100.0);
    assert!(as_glam(&ours).abs_diff_eq(reference, 1e-12));
}

#[test]
fn projection_entries_follow_formula() {
    let fov = 1.2_f64;
    let f = 1.0 / (fov / 2.0).tan();
    let q = 50.0 / (50.0 - 0.5);
    let m = Mat4::projection(fov, 0.5, 50.0, 0.75);
    assert!((m.m[0][0] - 0.75 * f).abs() < EPS);
    assert!((m.m[1][1] - f).abs() < EPS);
    assert!((m.m[2][2] - q).abs() < EPS);
    assert_eq!(m.m[2][3], 1.0);
    assert!((m.m[3][2] + 0.5 * q).abs() < EPS);
    assert_eq!(m.m[3][3], 0.0);
}

#[test]
fn point_at_inverse_matches_glam_look_at() {
    let eye = Vec3::new(3.0, 4.0, -20.0);
    let target = Vec3::new(-1.0, 0.5, 2.0);
    let up = Vec3::UNIT_Y;
    let view = Mat4::point_at(eye, target, up).quick_inverse();
    let reference = DMat4::look_at_lh(
        DVec3::from(eye.to_array()),
        DVec3::from(target.to_array()),
        DVec3::Y,
    );
    assert!(as_glam(&view).abs_diff_eq(reference, 1e-9));
}

#[test]
fn point_at_basis_is_orthonormal() {
    let m = Mat4::point_at(
        Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(-4.0, 0.0, 9.0),
        Vec3::new(0.2, 1.0, 0.1),
    );
    let row = |i: usize| Vec3::new(m.m[i][0], m.m[i][1], m.m[i][2]);
    for i in 0..3 {
        assert!((row(i).magnitude() - 1.0).abs() < 1e-12);
        for j in (i + 1)..3 {
            assert!(row(i).dot(row(j)).abs() < 1e-12);
        }
    }
    assert_eq!(row(3), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn translation_and_scaling_match_glam() {
    let t = Mat4::translation(Vec3::new(1.0, -2.0, 3.0));
    let s = Mat4::scaling(Vec3::new(0.5, 2.0, 4.0));
    let t_ref = DMat4::from_translation(DVec3::new(1.0, -2.0, 3.0));
    let s_ref = DMat4::from_scale(DVec3::new(0.5, 2.0, 4.0));
    assert!(as_glam(&t).abs_diff_eq(t_ref, 0.0));
    assert!(as_glam(&s).abs_diff_eq(s_ref, 0.0));
}

#[test]
fn rotations_turn_the_opposite_way_to_glam() {
    // Row-vector builders rotate by -theta relative to the column-vector ones.
    let theta = 0.7;
    let pairs = [
        (Mat4::rotation_x(theta), DMat4::from_rotation_x(-theta)),
        (Mat4::rotation_y(theta), DMat4::from_rotation_y(-theta)),
        (Mat4::rotation_z(theta), DMat4::from_rotation_z(-theta)),
    ];
    for (ours, reference) in pairs {
        assert!(as_glam(&ours).abs_diff_eq(reference, 1e-12));
    }
}

#[test]
fn multiply_vec3_ignores_w_and_multiply_vec4_keeps_it() {
    let proj = Mat4::projection(std::f64::consts::FRAC_PI_2, 0.1, 100.0, 1.0);
    let p = Vec3::new(1.0, 2.0, 5.0);
    let full = proj.multiply_vec4(p.extend(1.0));
    assert!((full.w - 5.0).abs() < EPS);
    let affine = proj.multiply_vec3(p);
    assert_vec_close(affine, full.truncate(), EPS);
}

#[test]
fn multiply_vec4_matches_glam() {
    let mut rng = StdRng::seed_from_u64(23);
    let m = random_matrix(&mut rng);
    let v = Vec4::new(0.3, -1.5, 2.0, 0.7);
    let ours = m.multiply_vec4(v);
    let theirs = as_glam(&m) * glam::DVec4::new(v.x, v.y, v.z, v.w);
    assert!((ours.x - theirs.x).abs() < EPS);
    assert!((ours.y - theirs.y).abs() < EPS);
    assert!((ours.z - theirs.z).abs() < EPS);
    assert!((ours.w - theirs.w).abs() < EPS);
}
