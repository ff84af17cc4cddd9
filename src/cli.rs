// resyze/src/cli.rs
use crate::core::BatchConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "resyze",
    author,
    version,
    about = "Resize images to reduce their resolution, keeping EXIF metadata",
    long_about = None
)]
pub struct Cli {
    /// Input image file or directory containing images
    pub input: PathBuf,

    /// Output file (single image) or directory (directory input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Scale factor (0.5 = half size, 0.25 = quarter size, 2 = double)
    #[arg(short, long, default_value_t = 0.5, value_parser = parse_scale)]
    pub scale: f64,

    /// Process directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Worker threads for directory runs (1 = sequential, 0 = one per CPU)
    #[arg(short = 'j', long, default_value_t = 1)]
    pub threads: usize,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> BatchConfig {
        BatchConfig {
            input_root: self.input,
            output_root: self.output,
            scale: self.scale,
            recursive: self.recursive,
            threads: self.threads,
        }
    }
}

fn parse_scale(raw: &str) -> Result<f64, String> {
    let scale: f64 = raw
        .parse()
        .map_err(|_| format!("`{}` is not a number", raw))?;

    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(format!("scale must be greater than zero, got {}", raw))
    }
}
