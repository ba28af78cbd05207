use crate::error::TableauResult;
use crate::matrix::Mat4;
use crate::model::Model;
use crate::quaternion::Quat;
use crate::transform::TransformStack;

pub type Color = [f32; 4];

/// One model drawn with the transform and color current at the time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub model:     Model,
    pub transform: Mat4,
    pub color:     Color,
}

/// Immediate-mode drawing surface. Figures issue color, transform and
/// draw calls against it; the renderer replays the recorded commands.
#[derive(Debug)]
pub struct Canvas {
    stack:    TransformStack,
    color:    Color,
    clear:    Color,
    commands: Vec<DrawCommand>,
}
impl Canvas {
    pub fn new() -> Self {
        Self {
            stack:    TransformStack::new(),
            color:    [1.0, 1.0, 1.0, 1.0],
            clear:    [0.0, 0.0, 0.0, 1.0],
            commands: Vec::new(),
        }
    }

    /// Forget last frame's commands and reset the transform stack.
    pub fn begin_frame(&mut self, clear: Color) {
        self.clear = clear;
        self.commands.clear();
        self.stack.load_identity();
    }

    pub fn clear_color(&self) -> Color {
        self.clear
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, r: f32, g: f32, b: f32) {
        self.set_color4(r, g, b, 1.0);
    }

    pub fn set_color4(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.color = [r, g, b, a];
    }

    pub fn push(&mut self) {
        self.stack.push();
    }

    pub fn pop(&mut self) -> TableauResult<()> {
        self.stack.pop()
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.stack.translate(x, y, z);
    }

    pub fn rotate(&mut self, degrees: f32, x: f32, y: f32, z: f32) {
        self.stack.rotate(degrees, x, y, z);
    }

    pub fn rotate_quat(&mut self, q: &Quat) {
        self.stack.rotate_quat(q);
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.stack.scale(x, y, z);
    }

    pub fn draw(&mut self, model: Model) {
        self.commands.push(DrawCommand {
            model,
            transform: self.stack.top(),
            color: self.color,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn transform(&self) -> Mat4 {
        self.stack.top()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn draw_captures_current_state() {
    let mut canvas = Canvas::new();
    canvas.set_color(0.5, 0.25, 0.0);
    canvas.push();
    canvas.translate(1.0, 2.0, 0.0);
    canvas.draw(Model::Square);
    canvas.pop().unwrap();
    canvas.set_color4(0.0, 0.0, 1.0, 0.5);
    canvas.draw(Model::Disk);

    let cmds = canvas.commands();
    assert!(cmds.len() == 2);
    assert!(cmds[0].color == [0.5, 0.25, 0.0, 1.0]);
    assert!(cmds[0].transform.c3 == [1.0, 2.0, 0.0, 1.0]);
    assert!(cmds[1].model == Model::Disk);
    assert!(cmds[1].transform == Mat4::identity());
    assert!(cmds[1].color[3] == 0.5);
}

#[test]
fn begin_frame_resets() {
    let mut canvas = Canvas::new();
    canvas.push();
    canvas.draw(Model::WireCube);
    canvas.begin_frame([0.1, 0.2, 0.3, 1.0]);
    assert!(canvas.commands().is_empty());
    assert!(canvas.stack_depth() == 0);
    assert!(canvas.clear_color() == [0.1, 0.2, 0.3, 1.0]);
}
