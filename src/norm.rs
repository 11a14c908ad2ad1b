use crate::error::{Error, Result};

/// Affine map from `[src_min, src_max]` onto `[dst_min, dst_max]`.
///
/// Both endpoints map exactly, so repeated conversions never drift off the
/// ends of the destination range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normaliser {
    ratio: f64,
    src_min: f64,
    src_max: f64,
    dst_min: f64,
    dst_max: f64,
}

impl Normaliser {
    pub fn new(src_min: f64, src_max: f64, dst_min: f64, dst_max: f64) -> Result<Self> {
        let finite = [src_min, src_max, dst_min, dst_max].iter().all(|v| v.is_finite());
        if !finite || src_min == src_max {
            return Err(Error::InvalidRange { src_min, src_max });
        }

        Ok(Normaliser {
            ratio: (dst_max - dst_min) / (src_max - src_min),
            src_min,
            src_max,
            dst_min,
            dst_max,
        })
    }

    #[inline]
    pub fn normalise(&self, value: f64) -> f64 {
        if value == self.src_max {
            return self.dst_max;
        }
        self.ratio * (value - self.src_min) + self.dst_min
    }

    /// The map going the other way, `[dst_min, dst_max]` onto `[src_min, src_max]`.
    pub fn inverse(&self) -> Result<Self> {
        Normaliser::new(self.dst_min, self.dst_max, self.src_min, self.src_max)
    }
}
