use std::ops::{Neg, Add, Sub, Mul, Div};
use std::fmt;

use crate::geometry::{Vec3, EPSILON};
use crate::matrix::Mat4;

/// A quaternion `re + iv.dx i + iv.dy j + iv.dz k`. Unit quaternions are
/// used to represent rotations of 3-space.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Quat {
    pub re: f32,
    pub iv: Vec3,
}
impl Quat {
    pub fn new(re: f32, iv: Vec3) -> Self {
        Self { re, iv }
    }

    /// The multiplicative identity, i.e. no rotation.
    pub fn identity() -> Self {
        Self::new(1.0, Vec3::zero())
    }

    pub fn with_components(qs: [f32; 4]) -> Self {
        Self::new(qs[0], Vec3::new(qs[1], qs[2], qs[3]))
    }

    /// The pure quaternion `0 + v`.
    pub fn of_vector(v: Vec3) -> Self {
        Self::new(0.0, v)
    }

    /// Rotation by `angle` radians around the axis `around`.
    pub fn for_rotation(angle: f32, around: Vec3) -> Self {
        let half_angle = angle / 2.0;
        let axis = around.unit();
        Self::new(half_angle.cos(), axis * half_angle.sin())
    }

    pub fn components(&self) -> [f32; 4] {
        [self.re, self.iv.dx, self.iv.dy, self.iv.dz]
    }

    pub fn scalar(&self) -> f32 {
        self.re
    }

    pub fn vector(&self) -> Vec3 {
        self.iv
    }

    pub fn scale(&self, amount: f32) -> Self {
        Self::new(self.re * amount, self.iv * amount)
    }

    pub fn conj(&self) -> Self {
        Self::new(self.re, -self.iv)
    }

    pub fn norm2(&self) -> f32 {
        self.re*self.re + self.iv.dot(self.iv)
    }

    pub fn norm(&self) -> f32 {
        self.norm2().sqrt()
    }

    /// Multiplicative inverse.
    pub fn recip(&self) -> Self {
        self.conj().scale(1.0 / self.norm2())
    }

    /// The versor of this quaternion.
    pub fn unit(&self) -> Self {
        self.scale(1.0 / self.norm())
    }

    /// `v` rotated by the rotation this quaternion represents.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        (*self * Self::of_vector(v) / *self).vector()
    }

    /// The rotation as an angle in radians around an Euler axis.
    pub fn as_rotation(&self) -> (f32, Vec3) {
        let q = self.unit();
        // Rounding can push |re| a hair past one.
        let half_theta = q.re.clamp(-1.0, 1.0).acos();
        if half_theta < EPSILON {
            (0.0, Vec3::unit_x())
        }
        else {
            (2.0 * half_theta, q.iv / half_theta.sin())
        }
    }

    /// Column-major rotation matrix whose columns are the images of the
    /// standard basis.
    pub fn as_matrix(&self) -> Mat4 {
        let u = self.rotate(Vec3::unit_x());
        let v = self.rotate(Vec3::unit_y());
        let w = self.rotate(Vec3::unit_z());
        Mat4::from_cols(
            [u.dx, u.dy, u.dz, 0.0],
            [v.dx, v.dy, v.dz, 0.0],
            [w.dx, w.dy, w.dz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        )
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}

impl Neg for Quat {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.re, -self.iv)
    }
}

impl Add for Quat {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.re + other.re, self.iv + other.iv)
    }
}

impl Sub for Quat {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self + (-other)
    }
}

impl Mul for Quat {
    type Output = Self;

    /// Hamilton product.
    fn mul(self, other: Self) -> Self::Output {
        let re = self.re*other.re - self.iv.dot(other.iv);
        let iv = other.iv * self.re + self.iv * other.re + self.iv.cross(other.iv);
        Self::new(re, iv)
    }
}

impl Div for Quat {
    type Output = Self;

    fn div(self, other: Self) -> Self::Output {
        self * other.recip()
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn pm(value: f32) -> &'static str {
            if value < 0.0 { "" } else { "+" }
        }
        let [a, b, c, d] = self.components();
        write!(f, "{a}{}{b}i{}{c}j{}{d}k", pm(b), pm(c), pm(d))
    }
}


#[cfg(test)]
fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[cfg(test)]
fn close_vec(a: Vec3, b: Vec3) -> bool {
    close(a.dx, b.dx) && close(a.dy, b.dy) && close(a.dz, b.dz)
}

#[test]
fn hamilton_units() {
    let i = Quat::with_components([0.0, 1.0, 0.0, 0.0]);
    let j = Quat::with_components([0.0, 0.0, 1.0, 0.0]);
    let k = Quat::with_components([0.0, 0.0, 0.0, 1.0]);
    let minus_one = Quat::with_components([-1.0, 0.0, 0.0, 0.0]);

    assert!(i * j == k);
    assert!(j * k == i);
    assert!(k * i == j);
    assert!(j * i == -k);
    assert!(i * i == minus_one);
    assert!(i * j * k == minus_one);
}

#[test]
fn recip_inverts() {
    let q = Quat::with_components([1.0, -2.0, 0.5, 3.0]);
    let one = q * q.recip();
    assert!(close(one.re, 1.0));
    assert!(close_vec(one.iv, Vec3::zero()));

    let back = (q / q.conj()) * q.conj();
    for (a, b) in back.components().iter().zip(q.components()) {
        assert!(close(*a, b));
    }
}

#[test]
fn rotate_quarter_turn_about_z() {
    let q = Quat::for_rotation(std::f32::consts::FRAC_PI_2, Vec3::unit_z());
    assert!(close_vec(q.rotate(Vec3::unit_x()), Vec3::unit_y()));
    assert!(close_vec(q.rotate(Vec3::unit_y()), -Vec3::unit_x()));
    assert!(close_vec(q.rotate(Vec3::unit_z()), Vec3::unit_z()));
}

#[test]
fn rotate_preserves_length() {
    let q = Quat::for_rotation(1.1, Vec3::new(1.0, 2.0, -0.5));
    let v = Vec3::new(-3.0, 0.25, 7.0);
    assert!((q.rotate(v).norm() - v.norm()).abs() < 1e-4);
}

#[test]
fn rotation_round_trips_through_angle_axis() {
    let axis = Vec3::new(1.0, 1.0, 0.0).unit();
    let (angle, back) = Quat::for_rotation(0.75, axis).as_rotation();
    assert!(close(angle, 0.75));
    assert!(close_vec(back, axis));
}

#[test]
fn identity_has_no_rotation() {
    let (angle, axis) = Quat::identity().as_rotation();
    assert!(angle == 0.0);
    assert!(axis == Vec3::unit_x());
}

#[test]
fn composition_is_sequential_rotation() {
    let a = Quat::for_rotation(0.3, Vec3::unit_x());
    let b = Quat::for_rotation(-1.2, Vec3::new(0.0, 1.0, 1.0));
    let v = Vec3::new(0.5, -1.0, 2.0);
    assert!(close_vec((b * a).rotate(v), b.rotate(a.rotate(v))));
}

#[test]
fn unit_rotation_matrix_is_orthonormal() {
    let q = Quat::for_rotation(2.1, Vec3::new(-1.0, 0.3, 0.8));
    let m = q.as_matrix();
    let cols = [m.col(0), m.col(1), m.col(2)];
    for i in 0..3 {
        for j in 0..3 {
            let dot: f32 = (0..3).map(|r| cols[i][r] * cols[j][r]).sum();
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((dot - expected).abs() < 1e-4);
        }
    }
    assert!(m.col(3) == [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn display_signs() {
    let q = Quat::with_components([1.0, -2.0, 3.0, -0.5]);
    assert_eq!(q.to_string(), "1-2i+3j-0.5k");
}
