use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use polytri::*;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path to output image (.svg, or a raster format such as .png).
    output: PathBuf,
    /// Config file (.json, .ron or .yaml). Flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Canvas dimensions.
    #[arg(short, long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    dims: Option<Vec<f64>>,
    /// Grid spacing.
    #[arg(short = 's', long)]
    cell_size: Option<f64>,
    /// Point jitter as a fraction of the cell size.
    #[arg(short, long)]
    variance: Option<f64>,
    /// Outline width of each triangle (SVG output only).
    #[arg(long)]
    stroke_width: Option<f64>,
    /// Seed for the palette. Without one the palette is random.
    #[arg(long)]
    color_seed: Option<String>,
    /// Seed for the point field. Without one the shape is random.
    #[arg(long)]
    shape_seed: Option<String>,
    /// Number of gradient stops (at least 2).
    #[arg(long)]
    stops: Option<usize>,
    /// Let vertical position affect color as well as horizontal.
    #[arg(long)]
    two_axis: bool,
}

impl Cli {
    fn poly_config(&self) -> Result<PolyTriangle, PolyError> {
        let mut cfg = match &self.config {
            Some(path) => PolyTriangle::from_file(path)?,
            None => PolyTriangle::default(),
        };

        if let Some(dims) = &self.dims {
            cfg.width = dims[0];
            cfg.height = dims[1];
        }
        if let Some(cell_size) = self.cell_size {
            cfg.cell_size = cell_size;
        }
        if let Some(variance) = self.variance {
            cfg.variance = variance;
        }
        if let Some(stroke_width) = self.stroke_width {
            cfg.stroke_width = stroke_width;
        }
        if self.color_seed.is_some() {
            cfg.color_seed = self.color_seed.clone();
        }
        if self.shape_seed.is_some() {
            cfg.shape_seed = self.shape_seed.clone();
        }
        if let Some(stops) = self.stops {
            cfg.gradient_stops = stops;
        }
        cfg.two_axis |= self.two_axis;

        Ok(cfg)
    }
}

fn run() -> Result<(), PolyError> {
    let cli = Cli::parse();
    let cfg = cli.poly_config()?;

    println!("Generating triangles...");

    let before_run = std::time::Instant::now();

    let items = cfg.generate()?;
    render::save(&cli.output, &cfg, &items)?;

    let dur = before_run.elapsed();

    println!(
        "Completed! Drew {} triangles in {}.{:03} seconds. Output written to '{}'",
        items.len(),
        dur.as_secs(),
        dur.subsec_millis(),
        cli.output.display()
    );

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
