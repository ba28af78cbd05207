//! Points and vectors of 3-space, kept as separate types so that only the
//! affine operations are expressible: point + vector, point - point, and
//! so on. Adding two points does not type check.
use std::ops::{Neg, Add, AddAssign, Sub, Mul, Div};
use std::f32::consts::PI;
use std::fmt;

use crate::random::Randf32;

/// Lengths and angles below this are treated as zero.
pub const EPSILON: f32 = 0.00000001;

/// The point at the origin.
pub const ORIGIN: Point3 = Point3 { x: 0.0, y: 0.0, z: 0.0 };

/// A location in 3-space.
#[derive(PartialEq, Clone, Copy, Default, Debug)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}
impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        ORIGIN
    }

    pub fn with_components(cs: [f32; 3]) -> Self {
        Self::new(cs[0], cs[1], cs[2])
    }

    pub fn components(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn dist2(&self, other: Point3) -> f32 {
        (*self - other).norm2()
    }

    pub fn dist(&self, other: Point3) -> f32 {
        (*self - other).norm()
    }

    /// Affine combination: moves `scalar` of the way from `self` to `other`.
    pub fn combo(&self, scalar: f32, other: Point3) -> Self {
        *self + (other - *self) * scalar
    }

    /// Affine combination of `self` with each of `others`, weighted by
    /// `scalars`. Extra entries in the longer slice are ignored.
    pub fn combos(&self, scalars: &[f32], others: &[Point3]) -> Self {
        scalars.iter()
            .zip(others)
            .fold(*self, |p, (s, q)| p + (*q - *self) * *s)
    }

    pub fn max(&self, other: Point3) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    pub fn min(&self, other: Point3) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }
}

impl Add<Vec3> for Point3 {
    type Output = Point3;

    fn add(self, offset: Vec3) -> Self::Output {
        Point3::new(self.x + offset.dx, self.y + offset.dy, self.z + offset.dz)
    }
}

impl Sub for Point3 {
    type Output = Vec3;

    fn sub(self, other: Point3) -> Self::Output {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Sub<Vec3> for Point3 {
    type Output = Point3;

    fn sub(self, offset: Vec3) -> Self::Output {
        Point3::new(self.x - offset.dx, self.y - offset.dy, self.z - offset.dz)
    }
}

impl From<[f32; 3]> for Point3 {
    fn from(arr: [f32; 3]) -> Point3 {
        Point3::with_components(arr)
    }
}

impl From<Point3> for [f32; 3] {
    fn from(p: Point3) -> [f32; 3] {
        p.components()
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}


/// An offset between two points of 3-space.
#[derive(PartialEq, Clone, Copy, Default, Debug)]
pub struct Vec3 {
    pub dx: f32,
    pub dy: f32,
    pub dz: f32,
}
impl Vec3 {
    pub fn new(dx: f32, dy: f32, dz: f32) -> Self {
        Self { dx, dy, dz }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    pub fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    pub fn with_components(cs: [f32; 3]) -> Self {
        Self::new(cs[0], cs[1], cs[2])
    }

    pub fn components(&self) -> [f32; 3] {
        [self.dx, self.dy, self.dz]
    }

    pub fn dot(&self, other: Vec3) -> f32 {
        self.dx*other.dx + self.dy*other.dy + self.dz*other.dz
    }

    pub fn cross(&self, other: Vec3) -> Self {
        Self::new(
            self.dy*other.dz - self.dz*other.dy,
            self.dz*other.dx - self.dx*other.dz,
            self.dx*other.dy - self.dy*other.dx,
        )
    }

    pub fn norm2(&self) -> f32 {
        self.dot(*self)
    }

    pub fn norm(&self) -> f32 {
        self.norm2().sqrt()
    }

    /// Unit vector in the same direction. A (near) zero vector has no
    /// direction, so the +x axis is returned instead.
    pub fn unit(&self) -> Self {
        let n = self.norm();
        if n < EPSILON {
            Self::unit_x()
        }
        else {
            *self / n
        }
    }

    /// A random unit vector, uniform over the sphere.
    pub fn random_unit(rand: &mut Randf32) -> Self {
        let phi = rand.next() * PI * 2.0;
        let theta = (2.0 * rand.next() - 1.0).acos();
        Self::new(
            theta.sin() * phi.cos(),
            theta.sin() * phi.sin(),
            theta.cos(),
        )
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.dx, -self.dy, -self.dz)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.dx + other.dx, self.dy + other.dy, self.dz + other.dz)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self + (-other)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self::Output {
        Self::new(self.dx * scalar, self.dy * scalar, self.dz * scalar)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;

    fn mul(self, vec: Vec3) -> Self::Output {
        vec * self
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;

    fn div(self, scalar: f32) -> Self::Output {
        self * (1.0 / scalar)
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(arr: [f32; 3]) -> Vec3 {
        Vec3::with_components(arr)
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> [f32; 3] {
        v.components()
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.dx, self.dy, self.dz)
    }
}


#[cfg(test)]
fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn cross_test() {
    let v  = Vec3::new(4.0, 3.0, 6.0);
    let v2 = Vec3::new(2.0, 9.0, 3.0);

    let cross = v.cross(v2);
    assert!(cross == Vec3::new(-45.0, 0.0, 30.0));
}

#[test]
fn cross_anticommutes_and_is_orthogonal() {
    let a = Vec3::new(1.5, -2.0, 0.25);
    let b = Vec3::new(-3.0, 0.5, 4.0);

    assert!(a.cross(b) == -b.cross(a));
    assert!(close(a.cross(b).dot(a), 0.0));
    assert!(close(a.cross(b).dot(b), 0.0));
}

#[test]
fn dot_test() {
    let v  = Vec3::new(4.0, 3.0, 6.0);
    let v2 = Vec3::new(2.0, 9.0, 3.0);

    let dot = v.dot(v2);
    assert!(dot == 53.0);
}

#[test]
fn unit_of_zero_is_x_axis() {
    assert!(Vec3::zero().unit() == Vec3::unit_x());
    assert!(Vec3::new(1e-10, 0.0, 0.0).unit() == Vec3::unit_x());
}

#[test]
fn unit_has_length_one() {
    let u = Vec3::new(3.0, -4.0, 12.0).unit();
    assert!(close(u.norm(), 1.0));
    assert!(close(u.dx, 3.0 / 13.0));
}

#[test]
fn point_vector_arithmetic() {
    let p = Point3::new(1.0, 2.0, 3.0);
    let q = Point3::new(4.0, 6.0, 3.0);

    assert!(q - p == Vec3::new(3.0, 4.0, 0.0));
    assert!(p + (q - p) == q);
    assert!(q - (q - p) == p);
    assert!(p.dist(q) == 5.0);
    assert!(p.dist2(q) == 25.0);
}

#[test]
fn combo_interpolates() {
    let p = Point3::new(0.0, 0.0, 0.0);
    let q = Point3::new(2.0, 4.0, -6.0);

    assert!(p.combo(0.0, q) == p);
    assert!(p.combo(1.0, q) == q);
    assert!(p.combo(0.5, q) == Point3::new(1.0, 2.0, -3.0));
}

#[test]
fn combos_uses_shorter_list() {
    let p = Point3::new(1.0, 1.0, 0.0);
    let others = [Point3::new(3.0, 1.0, 0.0), Point3::new(1.0, 5.0, 0.0)];

    let centroid_ish = p.combos(&[0.5, 0.25], &others);
    assert!(centroid_ish == Point3::new(2.0, 2.0, 0.0));

    let first_only = p.combos(&[0.5], &others);
    assert!(first_only == Point3::new(2.0, 1.0, 0.0));
}

#[test]
fn max_min_componentwise() {
    let p = Point3::new(1.0, -2.0, 3.0);
    let q = Point3::new(-1.0, 2.0, 5.0);

    assert!(p.max(q) == Point3::new(1.0, 2.0, 5.0));
    assert!(p.min(q) == Point3::new(-1.0, -2.0, 3.0));
}

#[test]
fn random_unit_is_unit() {
    let mut rand = Randf32::seed(7);
    for _ in 0..100 {
        assert!(close(Vec3::random_unit(&mut rand).norm(), 1.0));
    }
}
