use log::debug;
use rayon::prelude::*;

use crate::accumulator::Accumulator;
use crate::error::{Error, Result};
use crate::lines::{Line, TopLines};
use crate::params::Parameters;
use crate::pixel::{Foreground, PixelSource};

/// How each foreground pixel votes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoteOptions {
    /// Total added per (pixel, angle), split between the two nearest
    /// distance buckets.
    pub weight: u16,
    pub foreground: Foreground,
}

impl Default for VoteOptions {
    fn default() -> Self {
        VoteOptions {
            weight: 10,
            foreground: Foreground::ChannelAnd,
        }
    }
}

/// Fills `hough` with the votes of every foreground pixel in `source`.
pub fn calculate(
    source: &dyn PixelSource,
    parameters: &Parameters,
    options: &VoteOptions,
    hough: &mut Accumulator,
) -> Result<()> {
    prepare(source, parameters, hough)?;
    for y in 0..source.height() {
        vote_row(source, parameters, options, y, hough, None);
    }
    Ok(())
}

/// Same as `calculate`, offering every cell whose score rises above the
/// tracker's boundary as a candidate line while voting.
pub fn calculate_with_lines(
    source: &dyn PixelSource,
    parameters: &Parameters,
    options: &VoteOptions,
    hough: &mut Accumulator,
    lines: &mut TopLines,
) -> Result<()> {
    prepare(source, parameters, hough)?;
    for y in 0..source.height() {
        vote_row(source, parameters, options, y, hough, Some(&mut *lines));
    }
    Ok(())
}

/// Same result as `calculate`, with rows split across the rayon pool. Each
/// worker votes into its own accumulator and the partials are summed.
pub fn calculate_parallel(
    source: &dyn PixelSource,
    parameters: &Parameters,
    options: &VoteOptions,
    hough: &mut Accumulator,
) -> Result<()> {
    prepare(source, parameters, hough)?;
    let (distances, angles) = (parameters.distances, parameters.angles);

    *hough = (0..source.height())
        .into_par_iter()
        .fold(
            || Accumulator::new(distances, angles),
            |mut partial, y| {
                vote_row(source, parameters, options, y, &mut partial, None);
                partial
            },
        )
        .reduce(|| Accumulator::new(distances, angles), |a, b| a.merge(&b));
    Ok(())
}

fn prepare(source: &dyn PixelSource, parameters: &Parameters, hough: &mut Accumulator) -> Result<()> {
    if (source.width(), source.height()) != (parameters.width, parameters.height) {
        return Err(Error::InvalidConfiguration(format!(
            "source is {}x{} but parameters were built for {}x{}",
            source.width(),
            source.height(),
            parameters.width,
            parameters.height
        )));
    }

    debug!(
        "hough: input {}x{}, max distance {:.3}, accumulator {}x{}",
        parameters.width, parameters.height, parameters.max_distance, parameters.angles, parameters.distances
    );

    if (hough.distances, hough.angles) == (parameters.distances, parameters.angles) {
        hough.clear();
    } else {
        *hough = Accumulator::new(parameters.distances, parameters.angles);
    }
    Ok(())
}

fn vote_row(
    source: &dyn PixelSource,
    parameters: &Parameters,
    options: &VoteOptions,
    y: u32,
    hough: &mut Accumulator,
    mut lines: Option<&mut TopLines>,
) {
    let weight = options.weight;
    let py = y as f64 - parameters.mid_y;

    for x in 0..source.width() {
        if !options.foreground.is_foreground(source.channels_at(x, y)) {
            continue;
        }
        let px = x as f64 - parameters.mid_x;

        for (t, &(cos, sin)) in parameters.trigs.iter().enumerate() {
            let bucket = parameters.distance_bucket(px * cos + py * sin);
            let floor = bucket.floor();
            // the two shares always add up to exactly `weight`
            let upper = (weight as f64 * (bucket - floor)).round() as u16;
            let lower = weight - upper;
            let d = floor as i64;

            for &(d, amount) in [(d, lower), (d + 1, upper)].iter() {
                if amount == 0 || d < 0 || d as usize >= parameters.distances {
                    continue;
                }
                let d = d as usize;
                let score = hough.add(hough.offset(d, t), amount);

                if let Some(lines) = lines.as_deref_mut() {
                    if score > lines.boundary() {
                        lines.add_line(Line::new(parameters.angle(t), parameters.distance(d)), score);
                    }
                }
            }
        }
    }
}
