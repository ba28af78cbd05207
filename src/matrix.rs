use std::ops::Mul;

use crate::geometry::{Point3, Vec3};
use crate::quaternion::Quat;

/// Column-major 4 x 4 matrix, laid out the way the shader expects it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Mat4 {
    pub c0: [f32; 4],
    pub c1: [f32; 4],
    pub c2: [f32; 4],
    pub c3: [f32; 4],
}
impl Mat4 {
    pub fn from_cols(c0: [f32; 4], c1: [f32; 4], c2: [f32; 4], c3: [f32; 4]) -> Self {
        Self { c0, c1, c2, c3 }
    }

    pub fn identity() -> Self {
        Self::from_cols(
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        )
    }

    pub fn from_translation(v: Vec3) -> Self {
        Self::from_cols(
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [v.dx, v.dy, v.dz, 1.0],
        )
    }

    pub fn from_nonuniform_scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self::from_cols(
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        )
    }

    /// Counter-clockwise rotation by `degrees` around `axis`, the same
    /// matrix `glRotatef` builds.
    pub fn from_axis_angle(degrees: f32, axis: Vec3) -> Self {
        let a = axis.unit();
        let (x, y, z) = (a.dx, a.dy, a.dz);
        let (s, c) = degrees.to_radians().sin_cos();
        let t = 1.0 - c;
        Self::from_cols(
            [t*x*x + c,   t*x*y + s*z, t*x*z - s*y, 0.0],
            [t*x*y - s*z, t*y*y + c,   t*y*z + s*x, 0.0],
            [t*x*z + s*y, t*y*z - s*x, t*z*z + c,   0.0],
            [0.0,         0.0,         0.0,         1.0],
        )
    }

    pub fn col(&self, i: usize) -> [f32; 4] {
        match i {
            0 => self.c0,
            1 => self.c1,
            2 => self.c2,
            _ => self.c3,
        }
    }

    fn apply(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (k, col) in [self.c0, self.c1, self.c2, self.c3].iter().enumerate() {
            for r in 0..4 {
                out[r] += col[r] * v[k];
            }
        }
        out
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        let [x, y, z, _] = self.apply([p.x, p.y, p.z, 1.0]);
        Point3::new(x, y, z)
    }

    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let [dx, dy, dz, _] = self.apply([v.dx, v.dy, v.dz, 0.0]);
        Vec3::new(dx, dy, dz)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        Mat4::from_cols(
            self.apply(other.c0),
            self.apply(other.c1),
            self.apply(other.c2),
            self.apply(other.c3),
        )
    }
}

impl From<Mat4> for [[f32; 4]; 4] {
    fn from(mat: Mat4) -> [[f32; 4]; 4] {
        [mat.c0, mat.c1, mat.c2, mat.c3]
    }
}

impl From<Mat4> for cgmath::Matrix4<f32> {
    fn from(mat: Mat4) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from([mat.c0, mat.c1, mat.c2, mat.c3])
    }
}

impl From<Quat> for Mat4 {
    /// Convert the quaternion to a 4 x 4 rotation matrix.
    fn from(quat: Quat) -> Mat4 {
        quat.as_matrix()
    }
}

#[cfg(test)]
fn close_point(a: Point3, b: Point3) -> bool {
    (a - b).norm() < 1e-5
}

#[test]
fn mat_multiply() {
    let mat1 = Mat4::from_cols(
        [1.0, 5.0, 9.0, 4.0],
        [2.0, 6.0, 1.0, 5.0],
        [3.0, 7.0, 2.0, 6.0],
        [4.0, 8.0, 3.0, 7.0],
    );
    let mat2 = Mat4::from_cols(
        [10.0, 14.0, 18.0, 12.0],
        [11.0, 15.0, 19.0, 13.0],
        [12.0, 16.0, 10.0, 14.0],
        [13.0, 17.0, 11.0, 15.0],
    );
    let res = mat1 * mat2;

    assert!(res == Mat4::from_cols(
        [140.0, 356.0, 176.0, 302.0],
        [150.0, 382.0, 191.0, 324.0],
        [130.0, 338.0, 186.0, 286.0],
        [140.0, 364.0, 201.0, 308.0],
    ));
}

#[test]
fn translate_then_scale_order() {
    // T * S applies the scale first.
    let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 0.0))
        * Mat4::from_nonuniform_scale(2.0, 3.0, 1.0);
    assert!(m.transform_point(Point3::new(1.0, 1.0, 0.0)) == Point3::new(3.0, 5.0, 0.0));
    assert!(m.transform_vector(Vec3::new(1.0, 1.0, 0.0)) == Vec3::new(2.0, 3.0, 0.0));
}

#[test]
fn axis_angle_matches_quaternion() {
    let axis = Vec3::new(0.3, -1.0, 0.6);
    let m = Mat4::from_axis_angle(57.0, axis);
    let q = Mat4::from(Quat::for_rotation(57f32.to_radians(), axis));
    let p = Point3::new(1.0, 2.0, 3.0);
    assert!(close_point(m.transform_point(p), q.transform_point(p)));
}

#[test]
fn quarter_turn_about_z() {
    let m = Mat4::from_axis_angle(90.0, Vec3::unit_z());
    assert!(close_point(m.transform_point(Point3::new(1.0, 0.0, 0.0)), Point3::new(0.0, 1.0, 0.0)));
}

#[test]
fn converts_to_cgmath_columns() {
    let m = Mat4::from_translation(Vec3::new(4.0, 5.0, 6.0));
    let cg: cgmath::Matrix4<f32> = m.into();
    assert!(cg.w == cgmath::Vector4::new(4.0, 5.0, 6.0, 1.0));
}
