use log::debug;
use std::time::{Duration, Instant};

pub mod accumulator;
pub mod blob;
pub mod canvas;
pub mod config;
pub mod error;
pub mod hough;
pub mod intercepts;
pub mod lines;
pub mod norm;
pub mod params;
pub mod pixel;

pub use crate::accumulator::Accumulator;
pub use crate::config::HoughConfig;
pub use crate::error::{Error, Result};
pub use crate::lines::{Line, TopLines};
pub use crate::params::Parameters;
pub use crate::pixel::{Foreground, PixelSource};

#[derive(Debug, Default, Clone)]
pub struct ProcessingTimes {
    pub hough: Duration,
    pub lines: Duration,
}

/// Buffers that survive between frames of the same size.
pub struct ProcessingBuffers {
    pub parameters: Parameters,
    pub hough: Accumulator,
    pub lines: TopLines,
}

impl ProcessingBuffers {
    pub fn new(width: u32, height: u32, config: &HoughConfig) -> Result<Self> {
        config.validate()?;
        let parameters = Parameters::new(width, height, config.distance_divisions, config.angle_divisions)?;

        Ok(ProcessingBuffers {
            hough: Accumulator::new(parameters.distances, parameters.angles),
            lines: TopLines::new(config.line_count),
            parameters,
        })
    }
}

pub struct Detector {
    pub config: HoughConfig,
    pub buffers: ProcessingBuffers,
}

impl Detector {
    pub fn new(width: u32, height: u32, config: HoughConfig) -> Result<Self> {
        let buffers = ProcessingBuffers::new(width, height, &config)?;
        Ok(Detector { config, buffers })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.buffers.parameters
    }

    pub fn accumulator(&self) -> &Accumulator {
        &self.buffers.hough
    }

    /// Votes `source` into the accumulator and collects the strongest lines,
    /// in the order they were found.
    pub fn process(&mut self, source: &dyn PixelSource) -> Result<(ProcessingTimes, Vec<Line>)> {
        let mut times = ProcessingTimes::default();
        let options = self.config.vote_options();
        let buffers = &mut self.buffers;
        buffers.lines = TopLines::new(self.config.line_count);

        let mut time = Instant::now();

        if self.config.parallel {
            hough::calculate_parallel(source, &buffers.parameters, &options, &mut buffers.hough)?;
            times.hough = time.elapsed();
            time = Instant::now();

            buffers.lines = lines::top_lines(&buffers.hough, &buffers.parameters, self.config.line_count);
            times.lines = time.elapsed();
        } else {
            hough::calculate_with_lines(
                source,
                &buffers.parameters,
                &options,
                &mut buffers.hough,
                &mut buffers.lines,
            )?;
            times.hough = time.elapsed();
        }

        debug!(
            "[{:?}] hough, [{:?}] lines, max score {}, {} lines",
            times.hough,
            times.lines,
            buffers.hough.max_val,
            buffers.lines.len()
        );

        Ok((times, buffers.lines.lines()))
    }
}
