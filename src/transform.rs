use crate::error::{TableauError, TableauResult};
use crate::geometry::Vec3;
use crate::matrix::Mat4;
use crate::quaternion::Quat;

/// Model-view matrix stack. Every transform post-multiplies the top
/// matrix, so the last transform issued is the first applied to a model.
#[derive(Clone, Debug)]
pub struct TransformStack {
    stack: Vec<Mat4>,
}
impl TransformStack {
    pub fn new() -> Self {
        Self {
            stack: vec![Mat4::identity()],
        }
    }

    /// Drop everything and start over from the identity.
    pub fn load_identity(&mut self) {
        self.stack.clear();
        self.stack.push(Mat4::identity());
    }

    pub fn top(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or_default()
    }

    fn top_mut(&mut self) -> &mut Mat4 {
        if self.stack.is_empty() {
            self.stack.push(Mat4::identity());
        }
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Number of saved matrices above the base.
    pub fn depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    pub fn push(&mut self) {
        let top = self.top();
        self.stack.push(top);
    }

    pub fn pop(&mut self) -> TableauResult<()> {
        if self.stack.len() <= 1 {
            return Err(TableauError::StackUnderflow);
        }
        self.stack.pop();
        Ok(())
    }

    pub fn mult(&mut self, m: Mat4) {
        let top = self.top_mut();
        *top = *top * m;
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.mult(Mat4::from_translation(Vec3::new(x, y, z)));
    }

    pub fn rotate(&mut self, degrees: f32, x: f32, y: f32, z: f32) {
        self.mult(Mat4::from_axis_angle(degrees, Vec3::new(x, y, z)));
    }

    /// Rotate by the rotation a quaternion represents.
    pub fn rotate_quat(&mut self, q: &Quat) {
        let (angle, axis) = q.as_rotation();
        self.rotate(angle.to_degrees(), axis.dx, axis.dy, axis.dz);
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.mult(Mat4::from_nonuniform_scale(x, y, z));
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
use crate::geometry::Point3;

#[cfg(test)]
fn close_point(a: Point3, b: Point3) -> bool {
    (a - b).norm() < 1e-5
}

#[test]
fn push_pop_restores_top() {
    let mut stack = TransformStack::new();
    stack.translate(1.0, 0.0, 0.0);
    let saved = stack.top();

    stack.push();
    stack.scale(2.0, 2.0, 2.0);
    stack.rotate(45.0, 0.0, 0.0, 1.0);
    assert!(stack.depth() == 1);
    assert!(stack.top() != saved);

    stack.pop().unwrap();
    assert!(stack.depth() == 0);
    assert!(stack.top() == saved);
}

#[test]
fn pop_on_base_underflows() {
    let mut stack = TransformStack::new();
    assert!(matches!(stack.pop(), Err(TableauError::StackUnderflow)));
    assert!(stack.top() == Mat4::identity());
}

#[test]
fn last_transform_applies_first() {
    let mut stack = TransformStack::new();
    stack.translate(1.0, 0.0, 0.0);
    stack.scale(2.0, 2.0, 2.0);
    let p = stack.top().transform_point(Point3::new(1.0, 1.0, 0.0));
    assert!(p == Point3::new(3.0, 2.0, 0.0));
}

#[test]
fn rotate_quat_matches_quaternion() {
    let q = Quat::for_rotation(0.8, Vec3::new(1.0, -1.0, 2.0));
    let mut stack = TransformStack::new();
    stack.rotate_quat(&q);
    let p = Point3::new(0.5, 2.0, -1.0);
    let expected = Point3::origin() + q.rotate(p - Point3::origin());
    assert!(close_point(stack.top().transform_point(p), expected));
}

#[test]
fn load_identity_clears_saved_state() {
    let mut stack = TransformStack::new();
    stack.push();
    stack.push();
    stack.translate(3.0, 3.0, 3.0);
    stack.load_identity();
    assert!(stack.depth() == 0);
    assert!(stack.top() == Mat4::identity());
}
