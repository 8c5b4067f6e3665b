use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use qrpaint::helper::{save_image, to_svg_string, to_text};
use qrpaint::{CapacityPolicy, QrCode, RenderOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Encode text as a QR code and write it as an image, an SVG, or terminal art.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Text to encode.
    text: String,

    /// Error correction level: L, M, Q or H. Anything else means M.
    #[arg(short, long, default_value = "M")]
    level: String,

    /// Output width and height in pixels (at least 48).
    #[arg(short, long, default_value_t = qrpaint::options::DEFAULT_SIZE)]
    size: u32,

    /// Quiet zone in modules.
    #[arg(short, long, default_value_t = qrpaint::options::DEFAULT_MARGIN)]
    margin: u32,

    /// Fail instead of truncating text that does not fit in version 10.
    #[arg(long)]
    strict: bool,

    /// Output file. `.svg` writes SVG, other extensions go through the image encoder.
    /// Without it the symbol is printed to the terminal.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = RenderOptions::default()
        .with_size(args.size)
        .with_margin(args.margin)
        .with_level_name(&args.level)
        .with_capacity_policy(if args.strict {
            CapacityPolicy::Reject
        } else {
            CapacityPolicy::Clamp
        });
    options.validate()?;

    let qr = QrCode::encode_text(&args.text, options.level, options.capacity)?;
    info!(
        version = qr.version().value(),
        level = ?qr.error_correction_level(),
        mask = qr.mask().value(),
        "encoded"
    );

    match args.output {
        None => print!("{}", to_text(&qr, options.margin)),
        Some(path) if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("svg")) => {
            std::fs::write(&path, to_svg_string(&qr, options.margin))
                .with_context(|| format!("writing {}", path.display()))?;
        }
        Some(path) => {
            save_image(&qr, &path, &options).with_context(|| format!("writing {}", path.display()))?;
        }
    }
    Ok(())
}
