use std::fmt;

use crate::accumulator::Accumulator;
use crate::params::Parameters;

/// A line in normal form: `distance = x cos(angle) + y sin(angle)`, with
/// `(x, y)` measured from the image centre and `angle` in `[0, pi)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub angle: f64,
    pub distance: f64,
}

impl Line {
    pub fn new(angle: f64, distance: f64) -> Self {
        Line { angle, distance }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Angle: {:.2} Distance: {:.2}", self.angle.to_degrees(), self.distance)
    }
}

/// Keeps the `capacity` best scoring lines seen so far.
///
/// Callers compare against `boundary()` before calling `add_line`, which
/// keeps the common sub-threshold case down to one comparison. When several
/// entries tie for the lowest score, the first one in insertion order is the
/// one evicted.
#[derive(Debug, Clone)]
pub struct TopLines {
    entries: Vec<(Line, u16)>,
    capacity: usize,
    boundary: u16,
}

impl TopLines {
    pub fn new(capacity: usize) -> Self {
        TopLines {
            entries: Vec::with_capacity(capacity),
            capacity,
            // nothing can ever get in
            boundary: if capacity == 0 { u16::MAX } else { 0 },
        }
    }

    /// Minimum score a candidate must exceed to be worth adding.
    #[inline]
    pub fn boundary(&self) -> u16 {
        self.boundary
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds a line whose score is above `boundary()`. A line that is already
    /// tracked has its score updated in place. Scores at or below the
    /// boundary are ignored, so nothing stronger is ever evicted.
    pub fn add_line(&mut self, line: Line, score: u16) {
        if self.capacity == 0 || score <= self.boundary {
            return;
        }

        if let Some(entry) = self.entries.iter_mut().find(|(l, _)| *l == line) {
            entry.1 = score;
        } else if self.entries.len() == self.capacity {
            let min = self.min_element();
            self.entries[min] = (line, score);
        } else {
            self.entries.push((line, score));
        }

        if self.entries.len() == self.capacity {
            self.boundary = self.entries[self.min_element()].1;
        }
    }

    /// Index of the entry with the lowest score.
    fn min_element(&self) -> usize {
        let mut min_score = u16::MAX;
        let mut min_index = 0;
        for (i, &(_, score)) in self.entries.iter().enumerate() {
            if score < min_score {
                min_score = score;
                min_index = i;
            }
        }
        min_index
    }

    /// Lines in insertion/replacement order, not score order.
    pub fn lines(&self) -> Vec<Line> {
        self.entries.iter().map(|&(l, _)| l).collect()
    }

    pub fn scored(&self) -> &[(Line, u16)] {
        &self.entries
    }

    /// Lines ranked by descending score.
    pub fn into_sorted(mut self) -> Vec<Line> {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries.into_iter().map(|(l, _)| l).collect()
    }
}

/// Runs a tracker over a finished accumulator.
pub fn top_lines(accumulator: &Accumulator, parameters: &Parameters, count: usize) -> TopLines {
    let mut top = TopLines::new(count);
    for d in 0..accumulator.distances {
        for t in 0..accumulator.angles {
            let score = accumulator.get(d, t);
            if score > top.boundary() {
                top.add_line(Line::new(parameters.angle(t), parameters.distance(d)), score);
            }
        }
    }
    top
}
