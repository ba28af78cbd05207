use cgmath::{SquareMatrix, Vector4};

use crate::error::{TableauError, TableauResult};
use crate::geometry::Point3;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0, // Reduce z(-1.0, 1.0) to z(-0.5, 0.5)
    0.0, 0.0, 0.5, 1.0, // Translate z(-0.5, 0.5) to z(0.0, 1.0)
);

/// Half the extent of the shorter window side, in world units.
pub const HALF_EXTENT: f32 = 2.0;

/// Orthographic view of the world. The shorter window side always spans
/// [-2, 2]; the longer one is stretched to keep the aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub width:  u32,
    pub height: u32,
    pub left:   f32,
    pub right:  f32,
    pub bottom: f32,
    pub top:    f32,
    pub near:   f32,
    pub far:    f32,
}
impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        let mut proj = Self {
            width,
            height,
            left:   -HALF_EXTENT,
            right:  HALF_EXTENT,
            bottom: -HALF_EXTENT,
            top:    HALF_EXTENT,
            near:   -HALF_EXTENT,
            far:    HALF_EXTENT,
        };
        proj.resize(width, height);
        proj
    }

    /// Refit to a new window size. Minimised (zero-sized) windows are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.width = width;
        self.height = height;
        let (w, h) = (width as f32, height as f32);
        if w > h {
            self.left   = -w / h * HALF_EXTENT;
            self.right  = w / h * HALF_EXTENT;
            self.bottom = -HALF_EXTENT;
            self.top    = HALF_EXTENT;
        }
        else {
            self.left   = -HALF_EXTENT;
            self.right  = HALF_EXTENT;
            self.bottom = -h / w * HALF_EXTENT;
            self.top    = h / w * HALF_EXTENT;
        }
        true
    }

    /// Projection in OpenGL clip-space conventions.
    pub fn matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::ortho(self.left, self.right, self.bottom, self.top, self.near, self.far)
    }

    pub fn uniform(&self) -> ProjectionUniform {
        ProjectionUniform {
            proj: (OPENGL_TO_WGPU_MATRIX * self.matrix()).into(),
        }
    }

    /// World coordinates of a point in window pixels, origin top-left.
    pub fn world_coords(&self, mouse_x: f32, mouse_y: f32) -> TableauResult<Point3> {
        if self.width == 0 || self.height == 0 {
            return Err(TableauError::SingularProjection(self.width, self.height));
        }
        let inverse = self.matrix()
            .invert()
            .ok_or(TableauError::SingularProjection(self.width, self.height))?;
        let ndc = Vector4::new(
            2.0 * mouse_x / self.width as f32 - 1.0,
            1.0 - 2.0 * mouse_y / self.height as f32,
            0.0,
            1.0,
        );
        let world = inverse * ndc;
        Ok(Point3::new(world.x, world.y, 0.0))
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ProjectionUniform {
    pub proj: [[f32; 4]; 4],
}
impl ProjectionUniform {
    pub fn new() -> Self {
        Self {
            proj: cgmath::Matrix4::identity().into(),
        }
    }
}
impl Default for ProjectionUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn wide_window_stretches_x() {
    let proj = Projection::new(800, 400);
    assert!(close(proj.left, -4.0) && close(proj.right, 4.0));
    assert!(close(proj.bottom, -2.0) && close(proj.top, 2.0));
}

#[test]
fn tall_window_stretches_y() {
    let proj = Projection::new(400, 800);
    assert!(close(proj.left, -2.0) && close(proj.right, 2.0));
    assert!(close(proj.bottom, -4.0) && close(proj.top, 4.0));
}

#[test]
fn zero_size_is_ignored() {
    let mut proj = Projection::new(800, 640);
    assert!(!proj.resize(0, 640));
    assert!(proj == Projection::new(800, 640));
}

#[test]
fn zero_size_has_no_world_coords() {
    let proj = Projection::new(0, 640);
    assert!(matches!(
        proj.world_coords(10.0, 10.0),
        Err(TableauError::SingularProjection(0, 640))
    ));
    let proj = Projection::new(800, 0);
    assert!(proj.world_coords(10.0, 10.0).is_err());
}

#[test]
fn mouse_corners_map_to_view_bounds() {
    let proj = Projection::new(800, 400);
    let centre = proj.world_coords(400.0, 200.0).unwrap();
    assert!(close(centre.x, 0.0) && close(centre.y, 0.0));

    let top_left = proj.world_coords(0.0, 0.0).unwrap();
    assert!(close(top_left.x, -4.0) && close(top_left.y, 2.0));

    let bottom_right = proj.world_coords(800.0, 400.0).unwrap();
    assert!(close(bottom_right.x, 4.0) && close(bottom_right.y, -2.0));
}

#[test]
fn uniform_maps_depth_into_unit_range() {
    let proj = Projection::new(640, 640);
    let m: cgmath::Matrix4<f32> = proj.uniform().proj.into();
    // The far plane of the ortho box sits at z = -2 in eye space.
    let far = m * Vector4::new(0.0, 0.0, -2.0, 1.0);
    let near = m * Vector4::new(0.0, 0.0, 2.0, 1.0);
    assert!(close(far.z / far.w, 1.0));
    assert!(close(near.z / near.w, 0.0));
}
