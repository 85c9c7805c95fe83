use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use focal_sensor_sim::camera::{CaptureSession, SensorConfig};
use focal_sensor_sim::logger;

use tracing::{error, info};

/// Simulates a camera sensor over a focal-stack scene and writes the
/// processed picture as a bitmap.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Binary scene file holding the focal stack
    scene_file: PathBuf,

    /// Bitmap to write the processed picture to
    output_file: PathBuf,

    /// Disable sensor noise (for debugging)
    #[arg(long)]
    nonoise: bool,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut builder = SensorConfig::builder().lens_cap(false);
    if args.nonoise {
        builder = builder.noise_magnitude(0.0);
    }
    let config = builder.build();
    info!("Noise magnitude: {}", config.noise_magnitude);

    let mut session = CaptureSession::new(config);
    let timings = session
        .capture_file(&args.scene_file, &args.output_file)
        .with_context(|| {
            format!(
                "capturing {} into {}",
                args.scene_file.display(),
                args.output_file.display()
            )
        })?;

    timings.log_summary();
    Ok(())
}

fn main() -> ExitCode {
    logger::init();

    let args = Args::parse();
    info!("Starting sensor simulation...");

    match run(&args) {
        Ok(()) => {
            info!("Wrote {}", args.output_file.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
