use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use qrforge::{CharacterSet, ECLevel, EncodeOptions, MaskPattern, QRBuilder, Version};

#[derive(Parser)]
#[command(name = "qrforge", version, about = "Encode text into a QR Code symbol")]
struct Cli {
    /// Text to encode
    content: String,
    /// Error correction level: L, M, Q or H
    #[arg(short, long)]
    ec_level: Option<ECLevel>,
    /// Character set name for byte mode content, e.g. UTF-8 or Shift_JIS
    #[arg(short, long)]
    charset: Option<CharacterSet>,
    /// Minimum symbol version, 1 to 40
    #[arg(long)]
    qr_version: Option<usize>,
    /// Force a mask pattern, 0 to 7
    #[arg(long)]
    mask: Option<u8>,
    /// Quiet zone in modules
    #[arg(long)]
    margin: Option<usize>,
    /// Pixels or characters per module
    #[arg(long, default_value_t = 1)]
    module_size: usize,
    /// Write a PNG instead of printing to the terminal
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let cli = Cli::parse();

    let mut options = EncodeOptions::new();
    if let Some(margin) = cli.margin {
        options = options.margin(margin);
    }

    let mut builder = QRBuilder::new(&cli.content);
    builder.options(options);
    if let Some(ecl) = cli.ec_level {
        builder.ec_level(ecl);
    }
    if let Some(charset) = cli.charset {
        builder.character_set(charset);
    }
    if let Some(v) = cli.qr_version {
        builder.version(Version::new(v)?);
    }
    if let Some(mask) = cli.mask {
        builder.mask(MaskPattern::new(mask)?);
    }
    let qr = builder.build()?;
    tracing::info!("Encoded {qr}");

    match cli.output {
        Some(path) => qr.to_image(cli.module_size)?.save(path)?,
        None => println!("{}", qr.to_str(cli.module_size)?),
    }
    Ok(())
}
