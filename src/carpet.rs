use crate::canvas::Canvas;
use crate::error::TableauResult;
use crate::model::Model;

/// Sierpinski carpet filling the unit square centred at the origin.
/// Level 0 is a solid square; each further level keeps the eight outer
/// thirds of every square and drops the middle one.
pub fn draw_squarepinski(canvas: &mut Canvas, levels: u32) -> TableauResult<()> {
    if levels == 0 {
        canvas.draw(Model::Square);
        return Ok(());
    }
    canvas.push();
    canvas.scale(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0);
    for i in -1..=1 {
        for j in -1..=1 {
            if i != 0 || j != 0 {
                canvas.push();
                canvas.translate(i as f32, j as f32, 0.0);
                draw_squarepinski(canvas, levels - 1)?;
                canvas.pop()?;
            }
        }
    }
    canvas.pop()
}

/// Number of squares a carpet of the given depth is made of.
pub fn square_count(levels: u32) -> usize {
    8usize.pow(levels)
}

#[cfg(test)]
use crate::geometry::Point3;

#[test]
fn square_counts_per_level() {
    for levels in 0..4 {
        let mut canvas = Canvas::new();
        draw_squarepinski(&mut canvas, levels).unwrap();
        assert!(canvas.commands().len() == square_count(levels));
        assert!(canvas.stack_depth() == 0);
    }
}

#[test]
fn level_one_leaves_centre_empty() {
    let mut canvas = Canvas::new();
    draw_squarepinski(&mut canvas, 1).unwrap();
    for cmd in canvas.commands() {
        let c = cmd.transform.transform_point(Point3::origin());
        assert!(c.x.abs() > 0.3 || c.y.abs() > 0.3);
        assert!(c.x.abs() < 0.34 && c.y.abs() < 0.34);
        assert!((cmd.transform.c0[0] - 1.0 / 3.0).abs() < 1e-6);
    }
}
