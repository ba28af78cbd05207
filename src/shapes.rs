//! The house and street pictures, built from right triangles and disks.
//!
//! Each helper draws with its lower-left corner (or centre, for round
//! things) at the current origin and leaves the transform stack as it
//! found it.
use crate::canvas::Canvas;
use crate::error::TableauResult;
use crate::geometry::Point3;
use crate::model::Model;

/// Branch angles of the house tree, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeAngles {
    pub first:  f32,
    pub second: f32,
}
impl Default for TreeAngles {
    fn default() -> Self {
        Self {
            first:  -30.0,
            second: -30.0,
        }
    }
}

pub fn rtri(canvas: &mut Canvas) {
    canvas.draw(Model::RightTriangle);
}

pub fn disk(canvas: &mut Canvas) {
    canvas.draw(Model::Disk);
}

/// Unit square with lower-left corner at the origin.
pub fn unit_box(canvas: &mut Canvas) -> TableauResult<()> {
    rtri(canvas);
    canvas.push();
    canvas.translate(1.0, 1.0, 0.0);
    canvas.rotate(180.0, 0.0, 0.0, 1.0);
    rtri(canvas);
    canvas.pop()
}

/// 1 wide, 2 high rectangle with lower-left corner at the origin.
pub fn rect(canvas: &mut Canvas) -> TableauResult<()> {
    unit_box(canvas)?;
    canvas.push();
    canvas.translate(0.0, 1.0, 0.0);
    unit_box(canvas)?;
    canvas.pop()
}

pub fn window(canvas: &mut Canvas) -> TableauResult<()> {
    canvas.set_color(1.0, 1.0, 1.0);
    canvas.push();
    canvas.scale(0.2, 0.2, 0.2);
    unit_box(canvas)?;
    canvas.pop()
}

pub fn door(canvas: &mut Canvas) -> TableauResult<()> {
    canvas.set_color(0.6, 0.6, 0.8);
    canvas.push();
    canvas.scale(0.2, 0.2, 0.2);
    rect(canvas)?;
    canvas.pop()
}

pub fn house(canvas: &mut Canvas) -> TableauResult<()> {
    canvas.set_color(0.5, 0.125, 0.125);
    unit_box(canvas)?;

    for (x, y) in [(0.2, 0.2), (0.2, 0.6), (0.6, 0.6)] {
        canvas.push();
        canvas.translate(x, y, 0.0);
        window(canvas)?;
        canvas.pop()?;
    }

    canvas.push();
    canvas.translate(0.6, 0.0, 0.0);
    door(canvas)?;
    canvas.pop()?;

    // Roof.
    canvas.set_color(0.25, 0.25, 0.25);
    canvas.push();
    canvas.translate(0.5, 1.5, 0.0);
    canvas.scale(1.1, 0.8, 1.1);
    canvas.rotate(-135.0, 0.0, 0.0, 1.0);
    rtri(canvas);
    canvas.pop()
}

pub fn tree(canvas: &mut Canvas, angles: TreeAngles) -> TableauResult<()> {
    canvas.set_color(0.5, 0.5, 0.25);

    canvas.push();

    // Trunk.
    canvas.translate(-0.5, 0.0, 0.0);
    for _ in 0..3 {
        unit_box(canvas)?;
        canvas.translate(0.0, 1.0, 0.0);
    }

    // Branch 1.
    canvas.push();
    canvas.rotate(angles.first, 0.0, 0.0, 1.0);
    canvas.scale(0.3, 0.6, 0.3);
    rtri(canvas);
    canvas.pop()?;

    // Branch 2.
    canvas.push();
    canvas.translate(1.0, 0.0, 0.0);
    canvas.rotate(-90.0, 0.0, 0.0, 1.0);
    canvas.rotate(angles.second, 0.0, 0.0, 1.0);
    canvas.scale(0.3, 0.6, 0.3);
    rtri(canvas);
    canvas.pop()?;

    canvas.pop()?;

    // Leaves.
    canvas.set_color4(0.1, 0.5, 0.2, 0.7);
    canvas.push();
    canvas.translate(0.0, 3.0, 0.01);
    canvas.scale(1.75, 1.75, 1.75);
    disk(canvas);
    canvas.pop()
}

/// Evergreen with a brown trunk and two stacked triangles of needles.
/// Draws one unit down and to the left of the current origin.
pub fn pine(canvas: &mut Canvas) -> TableauResult<()> {
    canvas.push();
    canvas.translate(-1.0, -1.0, 0.0);

    canvas.push();
    canvas.scale(0.5, 0.5, 0.5);
    canvas.set_color(0.57, 0.34, 0.15);
    rect(canvas)?;
    canvas.pop()?;

    canvas.push();
    canvas.translate(0.25, 1.71, 0.0);
    canvas.rotate(-135.0, 0.0, 0.0, 1.0);
    canvas.set_color4(0.1, 0.5, 0.2, 0.7);
    rtri(canvas);
    canvas.pop()?;

    canvas.push();
    canvas.translate(0.25, 2.0, 0.0);
    canvas.rotate(-135.0, 0.0, 0.0, 1.0);
    canvas.scale(0.8, 0.8, 0.0);
    canvas.set_color4(0.1, 0.5, 0.2, 0.7);
    rtri(canvas);
    canvas.pop()?;

    canvas.pop()
}

pub fn sun(canvas: &mut Canvas, at: Point3) -> TableauResult<()> {
    canvas.push();
    canvas.translate(at.x, at.y, -2.0);

    canvas.push();
    canvas.scale(0.15, 0.15, 0.15);
    canvas.set_color(1.0, 0.8, 0.3);
    disk(canvas);
    canvas.pop()?;

    canvas.pop()
}

pub fn bird(canvas: &mut Canvas, at: Point3) -> TableauResult<()> {
    canvas.push();
    canvas.translate(at.x, at.y, 0.0);

    // Body.
    canvas.push();
    canvas.scale(0.15, 0.15, 0.15);
    canvas.set_color(1.0, 1.0, 0.0);
    disk(canvas);
    canvas.pop()?;

    // Head and eye.
    canvas.push();
    canvas.translate(0.25, 0.0, 0.0);
    canvas.scale(0.1, 0.1, 0.1);
    canvas.set_color(1.0, 1.0, 0.0);
    disk(canvas);
    canvas.translate(0.0, 0.5, 0.0);
    canvas.scale(0.25, 0.25, 0.25);
    canvas.set_color(0.0, 0.0, 0.0);
    disk(canvas);
    canvas.pop()?;

    // Wings.
    canvas.push();
    canvas.translate(0.0, 0.35, 0.0);
    canvas.scale(0.2, 0.3, 0.0);
    canvas.rotate(-135.0, 0.0, 0.0, 1.0);
    canvas.set_color(1.0, 1.0, 0.0);
    rtri(canvas);
    canvas.pop()?;

    canvas.push();
    canvas.translate(0.0, -0.35, 0.0);
    canvas.scale(0.2, 0.3, 0.0);
    canvas.rotate(-135.0, 0.0, 0.0, 1.0);
    canvas.rotate(180.0, 0.0, 0.0, 1.0);
    canvas.set_color(1.0, 1.0, 0.0);
    rtri(canvas);
    canvas.pop()?;

    // Tail.
    canvas.push();
    canvas.translate(-0.15, 0.0, 0.0);
    canvas.rotate(135.0, 0.0, 0.0, 1.0);
    canvas.scale(0.2, 0.2, 0.0);
    canvas.set_color(1.0, 1.0, 0.0);
    rtri(canvas);
    canvas.pop()?;

    // Beak.
    canvas.push();
    canvas.translate(0.38, 0.0, 0.0);
    canvas.rotate(135.0, 0.0, 0.0, 1.0);
    canvas.scale(0.05, 0.05, 0.0);
    canvas.set_color(1.0, 0.0, 0.0);
    rtri(canvas);
    canvas.pop()?;

    canvas.pop()
}

pub fn car(canvas: &mut Canvas) -> TableauResult<()> {
    // Body, a rect laid on its side.
    canvas.push();
    canvas.translate(0.0, 1.0, 0.0);
    canvas.rotate(-90.0, 0.0, 0.0, 1.0);
    canvas.set_color(0.8, 0.0, 0.0);
    rect(canvas)?;
    canvas.pop()?;

    for x in [0.5, 1.5] {
        canvas.push();
        canvas.set_color(0.5, 0.5, 0.5);
        canvas.translate(x, 0.0, 0.0);
        canvas.scale(0.25, 0.25, 0.5);
        disk(canvas);
        canvas.pop()?;
    }

    // Windows.
    canvas.push();
    canvas.set_color(1.0, 1.0, 1.0);
    canvas.translate(0.2, 0.75, 0.0);
    canvas.scale(0.8, 0.4, 0.0);
    canvas.rotate(-90.0, 0.0, 0.0, 1.0);
    rect(canvas)?;
    canvas.pop()
}

/// Sun, lawn, house and a tree.
pub fn draw_house(canvas: &mut Canvas, sun_at: Point3, angles: TreeAngles) -> TableauResult<()> {
    sun(canvas, sun_at)?;

    canvas.push();
    canvas.translate(0.0, -1.5, 0.0);

    // Yard.
    canvas.set_color(0.1, 0.3, 0.1);
    canvas.push();
    canvas.translate(5.0, 0.0, 0.0);
    canvas.rotate(180.0, 0.0, 0.0, 1.0);
    canvas.scale(10.0, 10.0, 10.0);
    unit_box(canvas)?;
    canvas.pop()?;

    house(canvas)?;

    // A happy little tree.
    canvas.push();
    canvas.translate(-1.0, 0.0, 0.0);
    canvas.scale(0.25, 0.25, 0.25);
    tree(canvas, angles)?;
    canvas.pop()?;

    canvas.pop()
}

/// Bird, pine and car.
pub fn draw_street(canvas: &mut Canvas, bird_at: Point3) -> TableauResult<()> {
    bird(canvas, bird_at)?;

    canvas.push();
    canvas.translate(-1.0, -0.5, 0.0);
    pine(canvas)?;
    canvas.pop()?;

    canvas.push();
    canvas.translate(-0.5, -1.5, 0.0);
    car(canvas)?;
    canvas.pop()
}

#[cfg(test)]
fn count(canvas: &Canvas, model: Model) -> usize {
    canvas.commands().iter().filter(|c| c.model == model).count()
}

#[test]
fn box_and_rect_triangle_counts() {
    let mut canvas = Canvas::new();
    unit_box(&mut canvas).unwrap();
    assert!(count(&canvas, Model::RightTriangle) == 2);

    let mut canvas = Canvas::new();
    rect(&mut canvas).unwrap();
    assert!(count(&canvas, Model::RightTriangle) == 4);
    assert!(canvas.stack_depth() == 0);
}

#[test]
fn box_covers_unit_square() {
    let mut canvas = Canvas::new();
    unit_box(&mut canvas).unwrap();
    // The second triangle's corner lands on (1, 1).
    let corner = canvas.commands()[1].transform.transform_point(Point3::origin());
    assert!((corner - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-6);
}

#[test]
fn house_picture_is_balanced() {
    let mut canvas = Canvas::new();
    draw_house(&mut canvas, Point3::new(-1.5, 1.0, 0.0), TreeAngles::default()).unwrap();
    assert!(canvas.stack_depth() == 0);
    // sun + canopy
    assert!(count(&canvas, Model::Disk) == 2);
    // yard 2, house 2, three windows 6, door 4, roof 1, trunk 6, branches 2
    assert!(count(&canvas, Model::RightTriangle) == 23);
}

#[test]
fn street_picture_is_balanced() {
    let mut canvas = Canvas::new();
    draw_street(&mut canvas, Point3::new(0.5, 0.5, 0.0)).unwrap();
    assert!(canvas.stack_depth() == 0);
    // bird body, head, eye + two wheels
    assert!(count(&canvas, Model::Disk) == 5);
}

#[test]
fn bird_is_drawn_where_asked() {
    let mut canvas = Canvas::new();
    let at = Point3::new(0.7, -0.3, 0.0);
    bird(&mut canvas, at).unwrap();
    let body = canvas.commands()[0].transform.transform_point(Point3::origin());
    assert!((body - at).norm() < 1e-6);
}

#[test]
fn canopy_is_translucent() {
    let mut canvas = Canvas::new();
    tree(&mut canvas, TreeAngles::default()).unwrap();
    let last = canvas.commands().last().copied().unwrap();
    assert!(last.model == Model::Disk);
    assert!(last.color == [0.1, 0.5, 0.2, 0.7]);
}

#[test]
fn pine_restores_origin() {
    let mut canvas = Canvas::new();
    canvas.translate(0.5, 0.25, 0.0);
    let before = canvas.transform();
    pine(&mut canvas).unwrap();
    assert!(canvas.transform() == before);
    assert!(canvas.stack_depth() == 0);
    // The trunk still starts one unit down and to the left.
    let trunk = canvas.commands()[0].transform.transform_point(Point3::origin());
    assert!((trunk - Point3::new(-0.5, -0.75, 0.0)).norm() < 1e-6);
}
