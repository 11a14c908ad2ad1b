use hough_lines::*;
use log::info;
use std::path::Path;
use std::time::Instant;

fn usage() -> Error {
    Error::InvalidConfiguration(
        "usage: hough-detect <input> <accumulator.png> <lines.png> [config.json]".to_string(),
    )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let input = args.next().ok_or_else(usage)?;
    let accumulator_out = args.next().ok_or_else(usage)?;
    let lines_out = args.next().ok_or_else(usage)?;
    let config = match args.next() {
        Some(path) => HoughConfig::load(Path::new(&path))?,
        None => HoughConfig::default(),
    };

    let decoded = image::open(&input)?;
    let source = pixel::from_dynamic(&decoded)?;
    info!("{}: {}x{}", input, source.width(), source.height());

    let time = Instant::now();
    let mut detector = Detector::new(source.width(), source.height(), config)?;
    let (times, lines) = detector.process(&*source)?;

    info!("[{:?}] hough", times.hough);
    info!("[{:?}] lines", times.lines);
    info!("[{:?}] processed {}", time.elapsed(), input);
    for line in lines.iter() {
        info!("{}", line);
    }

    detector.accumulator().to_image().save(&accumulator_out)?;

    let mut overlay = decoded.to_rgba8();
    let drawn = canvas::draw_lines(&mut overlay, &lines, image::Rgba([255, 0, 0, 255]))?;
    overlay.save(&lines_out)?;
    info!("drew {} of {} lines into {}", drawn, lines.len(), lines_out);

    Ok(())
}
