//! Reads criterion's estimates back and plots them for the scaling and parallelism benches.

use plotters::coord::CoordTranslate;
use plotters::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct Estimates {
    mean: Stats,
}

#[derive(Deserialize)]
struct Stats {
    point_estimate: f64,
    confidence_interval: ConfidenceInterval,
}

#[derive(Deserialize)]
struct ConfidenceInterval {
    lower_bound: f64,
    upper_bound: f64,
}

/// Mean time of one benchmark input with its confidence bounds, in milliseconds.
pub struct Sample {
    pub x: f64,
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
}

pub type Series = BTreeMap<&'static str, Vec<Sample>>;

/// Loads `target/criterion/<group>/<method>/<input>/base/estimates.json` for every
/// method and input that ran. Inputs are expected in increasing order.
pub fn load_series(
    group: &str,
    methods: &[&'static str],
    inputs: &[usize],
) -> Result<Series, Box<dyn Error>> {
    let root = Path::new("target/criterion").join(group);
    let ms = |ns: f64| ns / 1_000_000.0;
    let mut data = Series::new();
    for &method in methods {
        let mut samples = Vec::new();
        for &input in inputs {
            let path = root.join(method).join(input.to_string()).join("base/estimates.json");
            if !path.exists() {
                continue;
            }
            let estimates: Estimates = serde_json::from_reader(BufReader::new(File::open(&path)?))?;
            let mean = estimates.mean;
            samples.push(Sample {
                x: input as f64,
                mean: ms(mean.point_estimate),
                lower: ms(mean.confidence_interval.lower_bound),
                upper: ms(mean.confidence_interval.upper_bound),
            });
        }
        if !samples.is_empty() {
            data.insert(method, samples);
        }
    }
    Ok(data)
}

/// Path of `benches/results/<name>.png`, creating the directory.
pub fn output_file(name: &str) -> std::io::Result<PathBuf> {
    let dir = Path::new("benches/results");
    std::fs::create_dir_all(dir)?;
    Ok(dir.join(format!("{}.png", name)))
}

/// Draws each method as a line with markers over its shaded confidence band, then the legend.
pub fn draw_samples<'a, DB, CT>(
    chart: &mut ChartContext<'a, DB, CT>,
    data: &Series,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    CT: CoordTranslate<From = (f64, f64)>,
{
    let colors = [RED, BLUE, GREEN, MAGENTA, CYAN];
    for (i, (method, samples)) in data.iter().enumerate() {
        let color = colors[i % colors.len()];
        let band = samples
            .iter()
            .map(|s| (s.x, s.upper))
            .chain(samples.iter().rev().map(|s| (s.x, s.lower)))
            .collect::<Vec<_>>();
        chart.draw_series(std::iter::once(Polygon::new(band, color.mix(0.2).filled())))?;

        let means = || samples.iter().map(|s| (s.x, s.mean));
        chart
            .draw_series(LineSeries::new(means(), &color))?
            .label(*method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        chart.draw_series(means().map(|c| Circle::new(c, 5, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}
