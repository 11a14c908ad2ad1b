use crate::error::{Error, Result};
use crate::norm::Normaliser;

/// Everything the voting loop needs that only depends on the image size and
/// the accumulator resolution. Build once and reuse across frames.
#[derive(Debug, Clone)]
pub struct Parameters {
    pub width: u32,
    pub height: u32,
    pub mid_x: f64,
    pub mid_y: f64,
    pub distances: usize,
    pub angles: usize,
    pub max_distance: f64,
    /// `(cos, sin)` of each angle bucket.
    pub trigs: Vec<(f64, f64)>,
    angle_norm: Normaliser,
    distance_norm: Normaliser,
    bucket_norm: Normaliser,
}

impl Parameters {
    pub fn new(width: u32, height: u32, distances: usize, angles: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "image size must be positive, got {}x{}",
                width, height
            )));
        }
        if angles == 0 {
            return Err(Error::InvalidConfiguration(
                "angle_divisions must be positive".to_string(),
            ));
        }
        // a single distance bucket has no distance axis to map back onto
        if distances < 2 {
            return Err(Error::InvalidConfiguration(format!(
                "distance_divisions must be at least 2, got {}",
                distances
            )));
        }

        // bucket t covers angle t * pi / angles, so the last bucket stays below pi
        let angle_norm = Normaliser::new(0.0, angles as f64, 0.0, std::f64::consts::PI)?;
        let trigs = (0..angles)
            .map(|t| {
                let theta = angle_norm.normalise(t as f64);
                (theta.cos(), theta.sin())
            })
            .collect();

        let (w, h) = (width as f64, height as f64);
        let max_distance = (w * w + h * h).sqrt() / 2.0;
        let distance_norm =
            Normaliser::new(-max_distance, max_distance, 0.0, (distances - 1) as f64)?;
        let bucket_norm = distance_norm.inverse()?;

        Ok(Parameters {
            width,
            height,
            mid_x: w / 2.0,
            mid_y: h / 2.0,
            distances,
            angles,
            max_distance,
            trigs,
            angle_norm,
            distance_norm,
            bucket_norm,
        })
    }

    /// Angle in radians represented by bucket `t`.
    #[inline]
    pub fn angle(&self, t: usize) -> f64 {
        self.angle_norm.normalise(t as f64)
    }

    /// Fractional bucket coordinate of a signed distance from the image centre.
    #[inline]
    pub fn distance_bucket(&self, distance: f64) -> f64 {
        self.distance_norm.normalise(distance)
    }

    /// Signed distance from the image centre represented by bucket `d`.
    #[inline]
    pub fn distance(&self, d: usize) -> f64 {
        self.bucket_norm.normalise(d as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_4, PI};

    #[test]
    fn precomputes_trig_tables() {
        let p = Parameters::new(640, 480, 400, 360).unwrap();
        assert_eq!(p.trigs.len(), 360);
        assert_eq!(p.trigs[0], (1.0, 0.0));
        assert_abs_diff_eq!(p.trigs[90].0, FRAC_PI_4.cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(p.trigs[90].1, FRAC_PI_4.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(p.trigs[180].0, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.trigs[180].1, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.angle(180), PI / 2.0, epsilon = 1e-12);
        assert!(p.angle(359) < PI);
    }

    #[test]
    fn maps_distances_onto_buckets() {
        let p = Parameters::new(30, 40, 101, 10).unwrap();
        assert_eq!(p.max_distance, 25.0);
        assert_eq!(p.mid_x, 15.0);
        assert_eq!(p.mid_y, 20.0);
        assert_eq!(p.distance_bucket(-25.0), 0.0);
        assert_eq!(p.distance_bucket(25.0), 100.0);
        assert_abs_diff_eq!(p.distance_bucket(0.0), 50.0, epsilon = 1e-9);
        assert_eq!(p.distance(0), -25.0);
        assert_eq!(p.distance(100), 25.0);
    }

    #[test]
    fn rejects_bad_configuration() {
        let cases = [(0, 10, 10, 10), (10, 0, 10, 10), (10, 10, 1, 10), (10, 10, 10, 0)];
        for &(w, h, d, a) in cases.iter() {
            assert!(matches!(
                Parameters::new(w, h, d, a),
                Err(Error::InvalidConfiguration(_))
            ));
        }
    }
}
