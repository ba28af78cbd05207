use std::f32::consts::PI;
use std::mem;

/// Number of pie slices in the disk.
pub const DISK_SIDES: usize = 100;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

pub trait VertexLayout {
    fn layout() -> wgpu::VertexBufferLayout<'static>;
}
impl VertexLayout for Vertex {
    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

fn v(x: f32, y: f32, z: f32) -> Vertex {
    Vertex { position: [x, y, z] }
}

/// The fixed shapes every figure is assembled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Model {
    /// Isosceles right triangle, corner at the origin, unit legs along +x and +y.
    RightTriangle,
    /// Unit disk centred at the origin.
    Disk,
    /// Unit square centred at the origin.
    Square,
    /// Edges of the unit cube centred at the origin.
    WireCube,
}
impl Model {
    pub const ALL: [Model; 4] = [
        Model::RightTriangle,
        Model::Disk,
        Model::Square,
        Model::WireCube,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Model::RightTriangle => "RTRI",
            Model::Disk          => "DISK",
            Model::Square        => "Square",
            Model::WireCube      => "WireCube",
        }
    }

    pub fn topology(&self) -> wgpu::PrimitiveTopology {
        match self {
            Model::WireCube => wgpu::PrimitiveTopology::LineList,
            _ => wgpu::PrimitiveTopology::TriangleList,
        }
    }

    pub fn vertices(&self) -> Vec<Vertex> {
        match self {
            Model::RightTriangle => vec![
                v(0.0, 0.0, 0.0),
                v(1.0, 0.0, 0.0),
                v(0.0, 1.0, 0.0),
            ],
            Model::Disk => {
                let dtheta = 2.0 * PI / DISK_SIDES as f32;
                (0..DISK_SIDES)
                    .flat_map(|i| {
                        let theta = i as f32 * dtheta;
                        [
                            v(0.0, 0.0, 0.0),
                            v(theta.cos(), theta.sin(), 0.0),
                            v((theta + dtheta).cos(), (theta + dtheta).sin(), 0.0),
                        ]
                    })
                    .collect()
            }
            Model::Square => vec![
                v(-0.5,  0.5, 0.0),
                v(-0.5, -0.5, 0.0),
                v( 0.5, -0.5, 0.0),
                v(-0.5,  0.5, 0.0),
                v( 0.5, -0.5, 0.0),
                v( 0.5,  0.5, 0.0),
            ],
            Model::WireCube => vec![
                // front-back
                v( 0.5,  0.5,  0.5), v( 0.5,  0.5, -0.5),
                v( 0.5, -0.5,  0.5), v( 0.5, -0.5, -0.5),
                v(-0.5, -0.5,  0.5), v(-0.5, -0.5, -0.5),
                v(-0.5,  0.5,  0.5), v(-0.5,  0.5, -0.5),
                // side-side
                v(-0.5,  0.5,  0.5), v( 0.5,  0.5,  0.5),
                v(-0.5,  0.5, -0.5), v( 0.5,  0.5, -0.5),
                v(-0.5, -0.5, -0.5), v( 0.5, -0.5, -0.5),
                v(-0.5, -0.5,  0.5), v( 0.5, -0.5,  0.5),
                // down-up
                v( 0.5, -0.5,  0.5), v( 0.5,  0.5,  0.5),
                v( 0.5, -0.5, -0.5), v( 0.5,  0.5, -0.5),
                v(-0.5, -0.5, -0.5), v(-0.5,  0.5, -0.5),
                v(-0.5, -0.5,  0.5), v(-0.5,  0.5,  0.5),
            ],
        }
    }
}

#[test]
fn vertex_counts_fit_topology() {
    for model in Model::ALL {
        let n = model.vertices().len();
        match model.topology() {
            wgpu::PrimitiveTopology::LineList => assert!(n % 2 == 0),
            _ => assert!(n % 3 == 0),
        }
    }
    assert!(Model::Disk.vertices().len() == DISK_SIDES * 3);
    assert!(Model::WireCube.vertices().len() == 24);
}

#[test]
fn wire_cube_edges_have_unit_length() {
    let verts = Model::WireCube.vertices();
    for edge in verts.chunks(2) {
        let [a, b] = [edge[0].position, edge[1].position];
        let len2: f32 = (0..3).map(|i| (a[i] - b[i]) * (a[i] - b[i])).sum();
        assert!(len2 == 1.0);
    }
}

#[test]
fn disk_rim_on_unit_circle() {
    for vert in Model::Disk.vertices() {
        let [x, y, z] = vert.position;
        let r = (x*x + y*y).sqrt();
        assert!(z == 0.0);
        assert!(r < 1e-6 || (r - 1.0).abs() < 1e-5);
    }
}

#[test]
fn square_is_centred() {
    let verts = Model::Square.vertices();
    let sum: f32 = verts.iter().map(|v| v.position[0] + v.position[1]).sum();
    assert!(sum == 0.0);
}
