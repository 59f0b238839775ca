use std::{io, path::PathBuf};

use clap::Parser;
use color_eyre as ey;
use ey::eyre::Context;
use log::info;
use prism_dataset::{reshape, ClippingMode, ExecutableVariant, ReshapeConfig, Settings};

const SETTINGS_FILE_NAME: &str = "settings.ini";

/// Converts a legacy reconstruction output into a scene bundle for the Prism renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CommandLineArguments {
    /// Source directory containing the legacy reconstruction output
    #[arg(short = 'i', long = "idir")]
    idir: PathBuf,

    /// Destination directory for the scene bundle (defaults to the source directory)
    #[arg(short = 'd', long = "dest")]
    dest: Option<PathBuf>,

    /// Use the release-with-debug-symbols variant of the companion executables
    #[arg(short = 'r')]
    release_with_debug_info: bool,

    /// Pair every image with its own line of clipping_planes.txt instead of
    /// broadcasting the first line to all of them
    #[arg(long)]
    per_image_clipping: bool,
}

fn main() -> ey::Result<()> {
    // Setup logging
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(io::stdout())
        .apply()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let command_line_arguments = CommandLineArguments::parse();

    let settings_path = command_line_arguments.idir.join(SETTINGS_FILE_NAME);
    if settings_path.is_file() {
        let settings = Settings::load(&settings_path).wrap_err("Failed to load settings")?;
        info!("Loaded {} settings entries from {settings_path:?}", settings.len());
    }

    let config = ReshapeConfig {
        source: command_line_arguments.idir,
        destination: command_line_arguments.dest,
        clipping_mode: if command_line_arguments.per_image_clipping {
            ClippingMode::PerImage
        } else {
            ClippingMode::BroadcastFirst
        },
        executable_variant: if command_line_arguments.release_with_debug_info {
            ExecutableVariant::ReleaseWithDebugInfo
        } else {
            ExecutableVariant::Release
        },
    };

    let report = reshape(&config).wrap_err("Failed to reshape dataset")?;
    info!(
        "Scene bundle with {} images written to {:?}",
        report.image_count, report.destination
    );
    Ok(())
}
