use nalgebra::Point2;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::lines::Line;

const EPSILON: f64 = 1e-9;

/// Axis aligned rectangle, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Bounds {
            min: Point2::new(min_x, min_y),
            max: Point2::new(max_x, max_y),
        }
    }

    pub fn centre(&self) -> Point2<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    fn clamp_x(&self, x: f64) -> Option<f64> {
        clamp(x, self.min.x, self.max.x)
    }

    fn clamp_y(&self, y: f64) -> Option<f64> {
        clamp(y, self.min.y, self.max.y)
    }
}

// within [min, max] give or take rounding noise
fn clamp(v: f64, min: f64, max: f64) -> Option<f64> {
    if v >= min - EPSILON && v <= max + EPSILON {
        Some(v.max(min).min(max))
    } else {
        None
    }
}

/// Points where the line `distance = x cos(angle) + y sin(angle)` crosses the
/// edge of `bounds`, with `(x, y)` relative to the centre of `bounds`. The
/// points are returned in the rectangle's own coordinates.
///
/// Anything other than two points means the line does not pass through the
/// rectangle; a line that only touches a corner yields one.
///
/// Angles are read literally in normal form, so `angle == π` is the vertical
/// line at `x = -distance` from the centre (its normal points along -x).
/// `Line` angles stay in `[0, π)` and never reach that case.
pub fn intersect(angle: f64, distance: f64, bounds: &Bounds) -> Vec<Point2<f64>> {
    let centre = bounds.centre();
    let mut points = Vec::with_capacity(2);

    let a = angle.rem_euclid(PI);
    if a < EPSILON || PI - a < EPSILON {
        // vertical, the normal points along +x or -x
        if let Some(x) = bounds.clamp_x(centre.x + distance * angle.cos().signum()) {
            points.push(Point2::new(x, bounds.min.y));
            points.push(Point2::new(x, bounds.max.y));
        }
        return points;
    }
    if (a - FRAC_PI_2).abs() < EPSILON {
        if let Some(y) = bounds.clamp_y(centre.y + distance * angle.sin().signum()) {
            points.push(Point2::new(bounds.min.x, y));
            points.push(Point2::new(bounds.max.x, y));
        }
        return points;
    }

    let gradient = (angle + FRAC_PI_2).tan();
    let x0 = centre.x + distance * angle.cos();
    let y0 = centre.y + distance * angle.sin();

    for &x in [bounds.min.x, bounds.max.x].iter() {
        if let Some(y) = bounds.clamp_y(y0 + gradient * (x - x0)) {
            points.push(Point2::new(x, y));
        }
    }

    for &y in [bounds.min.y, bounds.max.y].iter() {
        if points.len() == 2 {
            break;
        }
        if let Some(x) = bounds.clamp_x(x0 + (y - y0) / gradient) {
            let p = Point2::new(x, y);
            if !points.iter().any(|q| nalgebra::distance(q, &p) < 1e-6) {
                points.push(p);
            }
        }
    }

    points
}

/// Endpoints of `line` in pixel coordinates of a `width` by `height` image,
/// or `None` when the line misses the image.
pub fn segment(line: &Line, width: u32, height: u32) -> Option<[Point2<i32>; 2]> {
    let bounds = Bounds::new(0.0, 0.0, width as f64, height as f64);
    let points = intersect(line.angle, line.distance, &bounds);
    if points.len() != 2 {
        return None;
    }

    let pixel = |p: &Point2<f64>| {
        Point2::new(
            (p.x.floor() as i32).min(width as i32 - 1).max(0),
            (p.y.floor() as i32).min(height as i32 - 1).max(0),
        )
    };
    Some([pixel(&points[0]), pixel(&points[1])])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_4;

    fn square() -> Bounds {
        Bounds::new(-10.0, -10.0, 10.0, 10.0)
    }

    fn assert_same_points(actual: &[Point2<f64>], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len(), "got {:?}", actual);
        for &(x, y) in expected {
            assert!(
                actual.iter().any(|p| (p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9),
                "expected ({}, {}) in {:?}",
                x,
                y,
                actual
            );
        }
    }

    #[test]
    fn horizontal_lines() {
        let points = intersect(FRAC_PI_2, -10.0, &square());
        assert_same_points(&points, &[(-10.0, -10.0), (10.0, -10.0)]);

        for y in -10..=10 {
            let points = intersect(FRAC_PI_2, y as f64, &square());
            assert_same_points(&points, &[(-10.0, y as f64), (10.0, y as f64)]);
        }
    }

    #[test]
    fn vertical_lines() {
        for x in -10..=10 {
            let points = intersect(0.0, x as f64, &square());
            assert_same_points(&points, &[(x as f64, -10.0), (x as f64, 10.0)]);
        }
        // the normal flips at pi
        let points = intersect(PI, 4.0, &square());
        assert_same_points(&points, &[(-4.0, -10.0), (-4.0, 10.0)]);
    }

    #[test]
    fn diagonal_through_corners() {
        let points = intersect(FRAC_PI_4, 0.0, &square());
        assert_same_points(&points, &[(-10.0, 10.0), (10.0, -10.0)]);
    }

    #[test]
    fn general_line() {
        // x cos(60) + y sin(60) = 2
        let angle = PI / 3.0;
        let points = intersect(angle, 2.0, &square());
        assert_eq!(points.len(), 2);
        for p in points.iter() {
            assert_abs_diff_eq!(p.x * angle.cos() + p.y * angle.sin(), 2.0, epsilon = 1e-9);
            let on_edge = (p.x.abs() - 10.0).abs() < 1e-9 || (p.y.abs() - 10.0).abs() < 1e-9;
            assert!(on_edge, "{:?} not on the boundary", p);
        }
    }

    #[test]
    fn lines_outside_are_not_visible() {
        assert!(intersect(0.0, 15.0, &square()).is_empty());
        assert!(intersect(FRAC_PI_2, -10.5, &square()).is_empty());
        assert!(intersect(FRAC_PI_4, 20.0, &square()).is_empty());
        // touches the (10, 10) corner only
        assert!(intersect(FRAC_PI_4, 200f64.sqrt(), &square()).len() < 2);
    }

    #[test]
    fn offset_rectangle() {
        let bounds = Bounds::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(bounds.centre(), Point2::new(50.0, 25.0));
        let points = intersect(FRAC_PI_2, 5.0, &bounds);
        assert_same_points(&points, &[(0.0, 30.0), (100.0, 30.0)]);
    }

    #[test]
    fn pixel_segments_stay_in_image() {
        let [a, b] = segment(&Line::new(0.0, 0.0), 40, 30).unwrap();
        assert_eq!(a, Point2::new(20, 0));
        assert_eq!(b, Point2::new(20, 29));

        let [a, b] = segment(&Line::new(FRAC_PI_2, -15.0), 40, 30).unwrap();
        assert_eq!(a, Point2::new(0, 0));
        assert_eq!(b, Point2::new(39, 0));

        assert!(segment(&Line::new(0.0, 21.0), 40, 30).is_none());
    }
}
