use image::{ImageBuffer, Luma};

use crate::norm::Normaliser;

pub type Gray16Image = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Vote histogram: `distances` rows by `angles` columns of saturating
/// counters. The cell for distance bucket `d` and angle bucket `t` lives at
/// `pix[d * angles + t]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    pub distances: usize,
    pub angles: usize,
    pub pix: Vec<u16>,
    /// Highest value currently present in `pix`.
    pub max_val: u16,
}

impl Accumulator {
    pub fn new(distances: usize, angles: usize) -> Self {
        Accumulator {
            distances,
            angles,
            pix: vec![0; distances * angles],
            max_val: 0,
        }
    }

    #[inline]
    pub fn offset(&self, distance: usize, angle: usize) -> usize {
        distance * self.angles + angle
    }

    #[inline]
    pub fn get(&self, distance: usize, angle: usize) -> u16 {
        self.pix[self.offset(distance, angle)]
    }

    /// Adds `amount` to the cell at `offset`, clamping at `u16::MAX`, and
    /// returns the cell's new score.
    #[inline]
    pub fn add(&mut self, offset: usize, amount: u16) -> u16 {
        let val = self.pix[offset].saturating_add(amount);
        self.pix[offset] = val;
        if val > self.max_val {
            self.max_val = val;
        }
        val
    }

    /// Elementwise saturating sum, used to reduce per-thread partial results.
    pub fn merge(mut self, other: &Accumulator) -> Accumulator {
        debug_assert_eq!((self.distances, self.angles), (other.distances, other.angles));
        for (a, b) in self.pix.iter_mut().zip(other.pix.iter()) {
            *a = a.saturating_add(*b);
        }
        self.max_val = self.pix.iter().copied().max().unwrap_or(0);
        self
    }

    pub fn clear(&mut self) {
        self.pix.iter_mut().for_each(|v| *v = 0);
        self.max_val = 0;
    }

    /// Stretches `[0, max_val]` over the full counter range for display.
    pub fn normalised(&self) -> Vec<u16> {
        let n = match Normaliser::new(0.0, self.max_val as f64, 0.0, u16::MAX as f64) {
            Ok(n) => n,
            // all zero, nothing to stretch
            Err(_) => return self.pix.clone(),
        };
        self.pix
            .iter()
            .map(|&v| (n.normalise(v as f64) + 0.5) as u16)
            .collect()
    }

    /// The normalised histogram as an image, angle along x and distance along y.
    pub fn to_image(&self) -> Gray16Image {
        let mut image = Gray16Image::new(self.angles as u32, self.distances as u32);
        for (dst, src) in image.pixels_mut().zip(self.normalised()) {
            *dst = Luma([src]);
        }
        image
    }
}

/// Marks the pixels that stand out from their 3x3 neighbourhood: a pixel
/// becomes `u16::MAX` when it exceeds the neighbourhood mean (itself
/// included) by more than `c`, and 0 otherwise. Neighbours outside the image
/// read as 0, which favours the borders.
///
/// Run over `to_image()` it turns the peaks into regions for `blob::find`.
pub fn adaptive_threshold(image: &Gray16Image, c: f64) -> Gray16Image {
    let (width, height) = image.dimensions();
    let at = |x: i64, y: i64| -> u32 {
        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            0
        } else {
            image.get_pixel(x as u32, y as u32)[0] as u32
        }
    };

    ImageBuffer::from_fn(width, height, |x, y| {
        let (x, y) = (x as i64, y as i64);
        let mut sum = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                sum += at(x + dx, y + dy);
            }
        }
        if at(x, y) as f64 > sum as f64 / 9.0 + c {
            Luma([u16::MAX])
        } else {
            Luma([0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob;

    #[test]
    fn saturates_instead_of_wrapping() {
        let mut acc = Accumulator::new(2, 3);
        let offset = acc.offset(1, 2);
        let mut prev = 0;
        for _ in 0..10_000 {
            let val = acc.add(offset, 10);
            assert!(val >= prev);
            prev = val;
        }
        assert_eq!(acc.get(1, 2), u16::MAX);
        assert_eq!(acc.add(offset, 1), u16::MAX);
        assert_eq!(acc.max_val, u16::MAX);
        assert_eq!(acc.get(0, 0), 0);
    }

    #[test]
    fn tracks_max_value() {
        let mut acc = Accumulator::new(4, 4);
        acc.add(acc.offset(0, 1), 7);
        acc.add(acc.offset(3, 3), 4);
        assert_eq!(acc.max_val, 7);
        acc.add(acc.offset(3, 3), 4);
        assert_eq!(acc.max_val, 8);
    }

    #[test]
    fn merge_saturates() {
        let mut a = Accumulator::new(1, 2);
        let mut b = Accumulator::new(1, 2);
        a.add(0, 60_000);
        b.add(0, 60_000);
        b.add(1, 3);
        let merged = a.merge(&b);
        assert_eq!(merged.pix, vec![u16::MAX, 3]);
        assert_eq!(merged.max_val, u16::MAX);
    }

    #[test]
    fn normalises_for_display() {
        let mut acc = Accumulator::new(2, 2);
        assert_eq!(acc.normalised(), vec![0, 0, 0, 0]);

        acc.add(0, 10);
        acc.add(3, 5);
        assert_eq!(acc.normalised(), vec![u16::MAX, 0, 0, 32768]);

        let image = acc.to_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0)[0], u16::MAX);
        assert_eq!(image.get_pixel(1, 1)[0], 32768);
    }

    #[test]
    fn clear_resets_counts() {
        let mut acc = Accumulator::new(3, 3);
        acc.add(4, 9);
        acc.clear();
        assert_eq!(acc, Accumulator::new(3, 3));
    }

    #[test]
    fn adaptive_threshold_keeps_local_peaks() {
        let mut image = Gray16Image::new(7, 5);
        image.put_pixel(3, 2, Luma([60_000]));
        image.put_pixel(4, 2, Luma([1_000]));

        let peaks = adaptive_threshold(&image, 32_767.0);
        let found = blob::find(&peaks, u16::MAX);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].points, vec![(3, 2)]);
        assert_eq!(peaks.get_pixel(4, 2)[0], 0);
    }

    #[test]
    fn adaptive_threshold_reads_outside_as_zero() {
        let image = Gray16Image::from_pixel(4, 4, Luma([60_000]));
        let peaks = adaptive_threshold(&image, 32_767.0);

        // only the corners have five missing neighbours, enough to clear c
        for (x, y, p) in peaks.enumerate_pixels() {
            let corner = (x == 0 || x == 3) && (y == 0 || y == 3);
            assert_eq!(p[0] == u16::MAX, corner, "pixel ({}, {})", x, y);
        }

        let flat = adaptive_threshold(&Gray16Image::from_pixel(3, 3, Luma([500])), 0.0);
        assert_eq!(flat.get_pixel(1, 1)[0], 0);
    }
}
