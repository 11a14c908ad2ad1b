use nalgebra::Point2;

use crate::accumulator::Gray16Image;

/// A 4-connected region of equal valued pixels.
#[derive(Debug, Clone, Default)]
pub struct Blob {
    pub points: Vec<(u32, u32)>,
}

impl Blob {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn centre(&self) -> Point2<f64> {
        let n = self.points.len().max(1) as f64;
        let (tx, ty) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(tx, ty), &(x, y)| (tx + x as f64, ty + y as f64));
        Point2::new(tx / n, ty / n)
    }
}

/// Finds the regions of `image` whose pixels equal `color`, in row major
/// order of their first pixel.
pub fn find(image: &Gray16Image, color: u16) -> Vec<Blob> {
    let (width, height) = image.dimensions();
    let mut found = vec![false; (width * height) as usize];
    let mut blobs = vec![];
    let mut stack = vec![];

    for y in 0..height {
        for x in 0..width {
            if found[(y * width + x) as usize] || image.get_pixel(x, y)[0] != color {
                continue;
            }

            let mut blob = Blob::default();
            found[(y * width + x) as usize] = true;
            stack.push((x, y));

            while let Some((x, y)) = stack.pop() {
                blob.points.push((x, y));

                let neighbours = [
                    (x as i64, y as i64 - 1),
                    (x as i64, y as i64 + 1),
                    (x as i64 - 1, y as i64),
                    (x as i64 + 1, y as i64),
                ];
                for &(nx, ny) in neighbours.iter() {
                    if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                        continue;
                    }
                    let (nx, ny) = (nx as u32, ny as u32);
                    let i = (ny * width + nx) as usize;
                    if !found[i] && image.get_pixel(nx, ny)[0] == color {
                        found[i] = true;
                        stack.push((nx, ny));
                    }
                }
            }

            blobs.push(blob);
        }
    }

    blobs
}
