use clap::{Parser, Subcommand, ValueEnum};
use scan_rename::loader::load_image;
use scan_rename::{
    ConsoleSink, DetectionMode, DetectionResult, Detector, FolderProcessor, LogSink,
    RenameOptions, RunConfig,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "scan_rename=warn";

#[derive(Parser)]
#[command(
    name = "scanrename",
    version,
    about = "Rename scanned images after the barcode in each one"
)]
struct Cli {
    /// Emit per-attempt diagnostics on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// One decode pass on the image as loaded
    Plain,
    /// One decode pass on the grayscale image
    Grayscale,
    /// Contrast enhancement plus rotation and scale sweep (slow)
    Exhaustive,
}

impl From<ModeArg> for DetectionMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Plain => DetectionMode::Plain,
            ModeArg::Grayscale => DetectionMode::Grayscale,
            ModeArg::Exhaustive => DetectionMode::ExhaustiveRotateScale,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Rename every image in a directory after its barcode
    Rename {
        /// Directory holding the scans
        dir: PathBuf,
        #[arg(long, value_enum, default_value = "plain", env = "SCAN_RENAME_MODE")]
        mode: ModeArg,
        /// Drop leading zeros from the payload
        #[arg(long, env = "SCAN_RENAME_STRIP_ZEROS")]
        strip_leading_zeros: bool,
        /// Drop the last four characters of the payload
        #[arg(long, env = "SCAN_RENAME_STRIP_LAST_FOUR")]
        strip_last_four: bool,
    },
    /// Run detection on a single image without renaming it
    Detect {
        image: PathBuf,
        #[arg(long, value_enum, default_value = "plain", env = "SCAN_RENAME_MODE")]
        mode: ModeArg,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("scan_rename=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Rename {
            dir,
            mode,
            strip_leading_zeros,
            strip_last_four,
        } => rename_cmd(dir, mode.into(), RenameOptions::new(strip_leading_zeros, strip_last_four)),
        Command::Detect { image, mode } => detect_cmd(&image, mode.into()),
    }
}

fn rename_cmd(dir: PathBuf, mode: DetectionMode, options: RenameOptions) -> ExitCode {
    let config = RunConfig::new(dir).with_mode(mode).with_options(options);
    let mut sink = ConsoleSink;
    let start = Instant::now();

    match FolderProcessor::new().run(&config, &mut sink) {
        Ok(summary) => {
            tracing::info!(entries = summary.total(), elapsed = ?start.elapsed(), "completed");
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}

fn detect_cmd(image: &Path, mode: DetectionMode) -> ExitCode {
    let mut sink = ConsoleSink;
    let loaded = match load_image(image) {
        Ok(img) => img,
        Err(err) => {
            sink.append(&format!("Failed to load image {}: {}", image.display(), err));
            return ExitCode::FAILURE;
        }
    };

    sink.append(&format!(
        "Image: {} ({}x{}), mode: {}",
        image.display(),
        loaded.width(),
        loaded.height(),
        mode.name()
    ));

    let start = Instant::now();
    let result = Detector::new().detect(mode, &loaded, &mut sink);
    let elapsed = start.elapsed();

    match result {
        DetectionResult::Found {
            payload,
            angle,
            scale,
        } => sink.append(&format!(
            "Payload: {payload} (angle {angle}, scale {scale:.1}, {elapsed:.2?})"
        )),
        DetectionResult::NotFound => sink.append(&format!("No barcode found ({elapsed:.2?})")),
    }
    ExitCode::SUCCESS
}
