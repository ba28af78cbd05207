use std::f32::consts::PI;

use crate::canvas::Canvas;
use crate::error::TableauResult;
use crate::model::Model;

const LENGTH: f32 = 0.8;
const WIDTH: f32 = 0.25;

/// An arm with shoulder, elbow and wrist joints, waving. Joint phases are
/// in radians and advance by a fixed amount per animation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WavingArm {
    pub shoulder: f32,
    pub elbow:    f32,
    pub wrist:    f32,
    pub animate:  bool,
}
impl WavingArm {
    pub fn new() -> Self {
        Self {
            shoulder: 0.0,
            elbow:    0.0,
            wrist:    15.0 / PI,
            animate:  true,
        }
    }

    /// Advance one frame of waving, if animating.
    pub fn step(&mut self) {
        if self.animate {
            self.shoulder += 7.5 / 180.0 * PI;
            self.elbow    += 7.5 / 180.0 * PI;
            self.wrist    += 15.0 / 180.0 * PI;
        }
    }

    /// Shoulder, elbow and wrist bend in degrees.
    pub fn joint_angles(&self) -> (f32, f32, f32) {
        (
            20.0 * self.shoulder.cos() + 20.0,
            40.0 * self.elbow.sin() + 40.0,
            -75.0 * self.wrist.sin(),
        )
    }

    pub fn draw(&self, canvas: &mut Canvas) -> TableauResult<()> {
        let (shoulder, elbow, wrist) = self.joint_angles();

        canvas.set_color(0.5, 0.6, 0.2);

        canvas.push();
        canvas.scale(1.5, 1.5, 1.5);
        canvas.translate(-LENGTH * 1.5, -LENGTH * 1.25, 0.0);
        canvas.rotate(shoulder, 0.0, 0.0, 1.0);

        // Upper arm.
        canvas.push();
        canvas.translate(LENGTH / 2.0, 0.0, 0.0);
        canvas.scale(LENGTH, WIDTH, WIDTH);
        canvas.draw(Model::WireCube);
        canvas.pop()?;

        canvas.translate(LENGTH, 0.0, 0.0);
        canvas.rotate(elbow, 0.0, 0.0, 1.0);

        // Forearm.
        canvas.push();
        canvas.translate(1.5 * LENGTH / 2.0, 0.0, 0.0);
        canvas.scale(1.4 * LENGTH, 0.8 * WIDTH, 0.8 * WIDTH);
        canvas.draw(Model::WireCube);
        canvas.pop()?;

        canvas.translate(1.5 * LENGTH, 0.0, 0.0);
        canvas.rotate(wrist, 0.0, 0.0, 1.0);

        // Palm.
        canvas.push();
        canvas.translate(WIDTH, 0.0, 0.0);
        canvas.push();
        canvas.scale(2.0 * WIDTH, WIDTH, WIDTH / 2.0);
        canvas.draw(Model::WireCube);
        canvas.pop()?;

        // Fingers.
        for f in 0..4 {
            canvas.push();
            canvas.rotate(f as f32 * 15.0 - 15.0, 0.0, 0.0, 1.0);
            canvas.translate(WIDTH * 2.0, 0.0, 0.0);
            canvas.scale(WIDTH * 1.5, WIDTH / 4.0, WIDTH / 4.0);
            canvas.draw(Model::WireCube);
            canvas.pop()?;
        }

        // Thumb.
        canvas.push();
        canvas.rotate(90.0, 0.0, 0.0, 1.0);
        canvas.translate(WIDTH, 0.0, 0.0);
        canvas.scale(WIDTH, WIDTH / 3.0, WIDTH / 3.0);
        canvas.draw(Model::WireCube);
        canvas.pop()?;

        canvas.pop()?;
        canvas.pop()
    }
}

impl Default for WavingArm {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn step_advances_only_when_animating() {
    let mut arm = WavingArm::new();
    arm.step();
    assert!((arm.shoulder - 7.5f32.to_radians()).abs() < 1e-6);
    assert!((arm.wrist - (15.0 / PI + 15f32.to_radians())).abs() < 1e-6);

    arm.animate = false;
    let frozen = arm;
    arm.step();
    assert!(arm == frozen);
}

#[test]
fn rest_pose_angles() {
    let arm = WavingArm { wrist: 0.0, ..WavingArm::new() };
    assert!(arm.joint_angles() == (40.0, 40.0, 0.0));
}

#[test]
fn draws_seven_balanced_pieces() {
    let mut canvas = Canvas::new();
    WavingArm::new().draw(&mut canvas).unwrap();
    assert!(canvas.stack_depth() == 0);
    assert!(canvas.commands().len() == 7);
    assert!(canvas.commands().iter().all(|c| c.model == Model::WireCube));
}

#[test]
fn upper_arm_hangs_from_shoulder() {
    let mut canvas = Canvas::new();
    WavingArm { shoulder: PI / 2.0, ..WavingArm::new() }.draw(&mut canvas).unwrap();
    // cos(90°) leaves a 20° shoulder bend; the cube centre sits half a
    // length along it from the shoulder at (-1.8, -1.5).
    let centre = canvas.commands()[0].transform
        .transform_point(crate::geometry::Point3::origin());
    let bend = 20f32.to_radians();
    assert!((centre.x - (-1.8 + 1.5 * 0.4 * bend.cos())).abs() < 1e-4);
    assert!((centre.y - (-1.5 + 1.5 * 0.4 * bend.sin())).abs() < 1e-4);
}
