use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use nalgebra::Point2;

use crate::error::{Error, Result};
use crate::intercepts;
use crate::lines::Line;

#[derive(Debug, Clone, Copy)]
struct Segment {
    from: Point2<i32>,
    to: Point2<i32>,
    color: Rgba<u8>,
}

/// Records pen moves and lines, then draws them all in one go.
#[derive(Debug, Clone)]
pub struct Canvas {
    color: Rgba<u8>,
    position: Point2<i32>,
    ops: Vec<Segment>,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas {
            color: Rgba([255, 255, 255, 255]),
            position: Point2::origin(),
            ops: vec![],
        }
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&mut self, color: Rgba<u8>) {
        self.color = color;
    }

    pub fn move_to(&mut self, p: Point2<i32>) {
        self.position = p;
    }

    /// Line from the pen position to `p`; the pen ends up at `p`.
    pub fn line_to(&mut self, p: Point2<i32>) {
        self.ops.push(Segment { from: self.position, to: p, color: self.color });
        self.position = p;
    }

    /// Draws the recorded ops in order, stopping at the first one that
    /// leaves the image.
    pub fn render(&self, image: &mut RgbaImage) -> Result<()> {
        for op in self.ops.iter() {
            draw_line(image, op.from, op.to, op.color)?;
        }
        Ok(())
    }
}

fn check_bounds(image: &RgbaImage, p: Point2<i32>) -> Result<()> {
    let (width, height) = image.dimensions();
    if p.x < 0 || p.y < 0 || p.x as u32 >= width || p.y as u32 >= height {
        return Err(Error::OutOfBounds { x: p.x as i64, y: p.y as i64, width, height });
    }
    Ok(())
}

pub fn draw_line(image: &mut RgbaImage, from: Point2<i32>, to: Point2<i32>, color: Rgba<u8>) -> Result<()> {
    check_bounds(image, from)?;
    check_bounds(image, to)?;
    draw_line_segment_mut(
        image,
        (from.x as f32, from.y as f32),
        (to.x as f32, to.y as f32),
        color,
    );
    Ok(())
}

/// Draws every visible line across the whole image and returns how many
/// were drawn.
pub fn draw_lines(image: &mut RgbaImage, lines: &[Line], color: Rgba<u8>) -> Result<usize> {
    let (width, height) = image.dimensions();
    let mut canvas = Canvas::new();
    canvas.color(color);

    let mut drawn = 0;
    for line in lines {
        if let Some([from, to]) = intercepts::segment(line, width, height) {
            canvas.move_to(from);
            canvas.line_to(to);
            drawn += 1;
        }
    }
    canvas.render(image)?;
    Ok(drawn)
}
