use log::{debug, info};

use crate::arm::WavingArm;
use crate::canvas::{Canvas, Color};
use crate::carpet::draw_squarepinski;
use crate::config::Config;
use crate::error::TableauResult;
use crate::geometry::{Point3, Vec3};
use crate::projection::Projection;
use crate::quaternion::Quat;
use crate::shapes::{draw_house, draw_street, TreeAngles};

const SKY: Color = [0.8, 0.9, 1.0, 1.0];
const SLATE: Color = [0.4, 0.45, 0.5, 1.0];

/// Degrees a bracket key bends a tree branch.
const ANGLE_STEP: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SceneKind {
    /// Bird, pine tree and car.
    Street,
    /// Sun, lawn, house and tree.
    House,
    /// Waving arm, reorientable by dragging.
    Animation,
    /// Sierpinski carpet.
    Recursive,
}

/// Rotation for a trackball drag of `(dx, dy)` world units: around the
/// in-plane axis perpendicular to the drag, by the arcsine of its length.
pub fn trackball_rotation(dx: f32, dy: f32) -> Quat {
    let axis = Vec3::new(-dy, dx, 0.0).unit();
    let angle = (dx*dx + dy*dy).sqrt().min(1.0).asin();
    Quat::for_rotation(angle, axis)
}

/// Everything the scenes and the input callbacks share.
pub struct App {
    scene:       SceneKind,
    orientation: Quat,
    mouse_start: Point3,
    mouse_drag:  bool,
    levels:      u32,
    max_levels:  u32,
    tree_angles: TreeAngles,
    sun:         Point3,
    bird:        Point3,
    arm:         WavingArm,
    projection:  Projection,
}
impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            scene:       config.scene,
            orientation: Quat::identity(),
            mouse_start: Point3::origin(),
            mouse_drag:  false,
            levels:      config.levels.min(config.max_levels),
            max_levels:  config.max_levels,
            tree_angles: TreeAngles {
                first:  config.tree_angle1,
                second: config.tree_angle2,
            },
            sun:         Point3::new(-1.5, 1.0, 0.0),
            bird:        Point3::new(-1.5, 1.0, 0.0),
            arm:         WavingArm { animate: !config.paused, ..WavingArm::new() },
            projection:  Projection::new(config.width, config.height),
        }
    }

    pub fn scene(&self) -> SceneKind {
        self.scene
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn levels(&self) -> u32 {
        self.levels
    }

    pub fn tree_angles(&self) -> TreeAngles {
        self.tree_angles
    }

    pub fn bird(&self) -> Point3 {
        self.bird
    }

    pub fn arm(&self) -> &WavingArm {
        &self.arm
    }

    pub fn is_dragging(&self) -> bool {
        self.mouse_drag
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn set_scene(&mut self, scene: SceneKind) {
        if self.scene != scene {
            info!("switching to {scene:?}");
        }
        self.scene = scene;
    }

    pub fn set_levels(&mut self, levels: u32) {
        self.levels = levels.min(self.max_levels);
        debug!("carpet levels: {}", self.levels);
    }

    pub fn set_tree_angles(&mut self, angles: TreeAngles) {
        self.tree_angles = angles;
        debug!("tree angles: {}, {}", angles.first, angles.second);
    }

    /// Handle a typed character. Returns whether anything changed.
    pub fn handle_key(&mut self, key: char) -> bool {
        match key {
            's' => self.set_scene(SceneKind::Street),
            'h' => self.set_scene(SceneKind::House),
            'r' => self.set_scene(SceneKind::Recursive),
            'a' => {
                if self.scene == SceneKind::Animation {
                    self.arm.animate = !self.arm.animate;
                }
                else {
                    self.set_scene(SceneKind::Animation);
                    self.arm.animate = true;
                }
            }
            ' ' => self.arm.animate = !self.arm.animate,
            '0'..='9' => {
                let level = key.to_digit(10).unwrap_or(0);
                self.set_levels(level);
            }
            '[' | ']' | '{' | '}' => {
                let mut angles = self.tree_angles;
                match key {
                    '[' => angles.first -= ANGLE_STEP,
                    ']' => angles.first += ANGLE_STEP,
                    '{' => angles.second -= ANGLE_STEP,
                    _   => angles.second += ANGLE_STEP,
                }
                self.set_tree_angles(angles);
            }
            _ => return false,
        }
        true
    }

    /// A mouse button went down (`pressed`) or up at window pixel `(x, y)`.
    pub fn handle_mouse_click(&mut self, pressed: bool, x: f32, y: f32) -> TableauResult<bool> {
        self.mouse_start = self.projection.world_coords(x, y)?;
        self.mouse_drag = pressed;
        if self.scene == SceneKind::Street {
            self.bird = self.mouse_start;
        }
        Ok(true)
    }

    /// The mouse moved to window pixel `(x, y)`. Only drags do anything.
    pub fn handle_mouse_motion(&mut self, x: f32, y: f32) -> TableauResult<bool> {
        if !self.mouse_drag {
            return Ok(false);
        }
        let now = self.projection.world_coords(x, y)?;
        let delta = now - self.mouse_start;
        self.mouse_start = now;

        match self.scene {
            SceneKind::Animation => {
                self.orientation = trackball_rotation(delta.dx, delta.dy) * self.orientation;
            }
            SceneKind::Street => {
                self.bird = now;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.projection.resize(width, height)
    }

    /// Advance the animation by one step.
    pub fn tick(&mut self) {
        if self.scene == SceneKind::Animation {
            self.arm.step();
        }
    }

    pub fn clear_color(&self) -> Color {
        match self.scene {
            SceneKind::Street | SceneKind::House => SKY,
            _ => SLATE,
        }
    }

    /// Record the current scene into `canvas`.
    pub fn draw(&self, canvas: &mut Canvas) -> TableauResult<()> {
        canvas.begin_frame(self.clear_color());

        match self.scene {
            SceneKind::Street => draw_street(canvas, self.bird)?,
            SceneKind::House => draw_house(canvas, self.sun, self.tree_angles)?,
            SceneKind::Animation => {
                canvas.push();
                // Reorient according to the trackball drags.
                canvas.rotate_quat(&self.orientation);
                self.arm.draw(canvas)?;
                canvas.pop()?;
            }
            SceneKind::Recursive => {
                canvas.set_color(0.5, 0.3, 0.55);
                canvas.push();
                canvas.scale(3.0, 3.0, 3.0);
                draw_squarepinski(canvas, self.levels)?;
                canvas.pop()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
use crate::model::Model;

#[cfg(test)]
fn app() -> App {
    App::new(&Config::default())
}

#[test]
fn scene_keys() {
    let mut app = app();
    assert!(app.scene() == SceneKind::Street);
    assert!(app.handle_key('h'));
    assert!(app.scene() == SceneKind::House);
    assert!(app.handle_key('r'));
    assert!(app.scene() == SceneKind::Recursive);
    assert!(app.handle_key('s'));
    assert!(app.scene() == SceneKind::Street);
    assert!(!app.handle_key('x'));
}

#[test]
fn a_enters_then_toggles_animation() {
    let mut app = App::new(&Config { paused: true, ..Config::default() });
    assert!(!app.arm().animate);

    app.handle_key('a');
    assert!(app.scene() == SceneKind::Animation);
    assert!(app.arm().animate);

    app.handle_key('a');
    assert!(app.scene() == SceneKind::Animation);
    assert!(!app.arm().animate);

    app.handle_key(' ');
    assert!(app.arm().animate);
}

#[test]
fn digits_set_clamped_levels() {
    let mut app = app();
    app.handle_key('0');
    assert!(app.levels() == 0);
    app.handle_key('4');
    assert!(app.levels() == 4);
    app.handle_key('9');
    assert!(app.levels() == Config::default().max_levels);
}

#[test]
fn brackets_bend_branches() {
    let mut app = app();
    app.handle_key(']');
    app.handle_key('{');
    app.handle_key('{');
    assert!(app.tree_angles() == TreeAngles { first: -25.0, second: -40.0 });
}

#[test]
fn click_moves_bird_in_street() {
    let mut app = app();
    app.handle_mouse_click(true, 400.0, 320.0).unwrap();
    assert!(app.is_dragging());
    assert!(app.bird().dist(Point3::origin()) < 1e-5);

    app.handle_mouse_motion(800.0, 320.0).unwrap();
    // 800x640 spans x in [-2.5, 2.5].
    assert!((app.bird().x - 2.5).abs() < 1e-5);

    app.handle_mouse_click(false, 800.0, 320.0).unwrap();
    assert!(!app.is_dragging());
    assert!(!app.handle_mouse_motion(0.0, 0.0).unwrap());
    assert!((app.bird().x - 2.5).abs() < 1e-5);
}

#[test]
fn drag_rotates_arm() {
    let mut app = app();
    app.handle_key('a');
    app.handle_mouse_click(true, 400.0, 320.0).unwrap();
    app.handle_mouse_motion(464.0, 320.0).unwrap();

    // A rightward drag turns about +y.
    let (angle, axis) = app.orientation().as_rotation();
    assert!(angle > 0.0);
    assert!((axis - Vec3::unit_y()).norm() < 1e-4);
    assert!((app.orientation().norm() - 1.0).abs() < 1e-5);
}

#[test]
fn trackball_saturates_at_quarter_turn() {
    let (angle, _) = trackball_rotation(3.0, 4.0).as_rotation();
    assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    assert!(trackball_rotation(0.0, 0.0) == Quat::identity());
}

#[test]
fn tick_only_animates_arm_scene() {
    let mut app = app();
    let rest = *app.arm();
    app.tick();
    assert!(*app.arm() == rest);

    app.handle_key('a');
    app.tick();
    assert!(app.arm().shoulder > rest.shoulder);
}

#[test]
fn every_scene_draws_balanced() {
    let mut canvas = Canvas::new();
    let mut app = app();
    for key in ['s', 'h', 'a', 'r'] {
        app.handle_key(key);
        app.draw(&mut canvas).unwrap();
        assert!(canvas.stack_depth() == 0);
        assert!(!canvas.commands().is_empty());
    }
}

#[test]
fn recursive_scene_draws_carpet() {
    let mut canvas = Canvas::new();
    let mut app = app();
    app.handle_key('r');
    app.handle_key('2');
    app.draw(&mut canvas).unwrap();
    assert!(canvas.clear_color() == SLATE);
    assert!(canvas.commands().len() == 64);
    assert!(canvas.commands().iter().all(|c| c.model == Model::Square));
    assert!(canvas.commands()[0].color == [0.5, 0.3, 0.55, 1.0]);
}
