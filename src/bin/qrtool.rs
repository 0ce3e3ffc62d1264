use clap::{Args, Parser, Subcommand, ValueEnum};
use qr_forge::tools::{render_text, save_png};
use qr_forge::{ECLevel, EncodeOptions, Payload, QrCode, QrEncoder, encode};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "qrtool", version, about = "qr_forge CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a payload and print the symbol
    Encode {
        #[command(flatten)]
        input: InputArgs,
        /// Write a PNG to this path as well
        #[arg(long)]
        png: Option<PathBuf>,
        /// Pixels per module in the PNG
        #[arg(long, default_value_t = 8)]
        scale: u32,
        /// Quiet zone width in modules
        #[arg(long, default_value_t = 4)]
        border: u32,
    },
    /// Print the penalty of every mask and the one selected
    Penalties {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Text payload (segmented automatically)
    #[arg(long, conflicts_with = "hex", required_unless_present = "hex")]
    text: Option<String>,
    /// Binary payload as hex digits
    #[arg(long)]
    hex: Option<String>,
    /// Error correction level
    #[arg(long, value_enum, default_value_t = Level::M)]
    ecl: Level,
    #[arg(long, default_value_t = 1)]
    min_version: u8,
    #[arg(long, default_value_t = 40)]
    max_version: u8,
    /// Pin a mask (0-7) instead of choosing by penalty
    #[arg(long)]
    mask: Option<u8>,
    /// Keep the requested level even if a stronger one fits
    #[arg(long)]
    no_boost: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    L,
    M,
    Q,
    H,
}

impl From<Level> for ECLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::L => ECLevel::L,
            Level::M => ECLevel::M,
            Level::Q => ECLevel::Q,
            Level::H => ECLevel::H,
        }
    }
}

fn main() -> ExitCode {
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Encode {
            input,
            png,
            scale,
            border,
        } => encode_cmd(&input, png, scale, border),
        Command::Penalties { input } => penalties_cmd(&input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{msg}");
            ExitCode::FAILURE
        }
    }
}

fn encode_input(input: &InputArgs) -> Result<QrCode, String> {
    let opts = EncodeOptions::new()
        .version_range(input.min_version, input.max_version)
        .boost_ecl(!input.no_boost);
    let opts = match input.mask {
        Some(mask) => opts.mask(mask),
        None => opts,
    };

    let bytes;
    let payload = match (&input.text, &input.hex) {
        (Some(text), _) => Payload::Text(text),
        (None, Some(hex)) => {
            bytes = parse_hex(hex)?;
            Payload::Binary(&bytes)
        }
        (None, None) => return Err("one of --text or --hex is required".to_string()),
    };

    encode(payload, input.ecl.into(), &opts).map_err(|err| format!("Failed to encode: {err}"))
}

fn encode_cmd(input: &InputArgs, png: Option<PathBuf>, scale: u32, border: u32) -> Result<(), String> {
    let qr = encode_input(input)?;
    print!("{}", render_text(&qr, border as usize));
    println!(
        "version={} size={} error_correction={:?} mask={}",
        qr.version(),
        qr.size(),
        qr.ec_level(),
        qr.mask().index()
    );

    if let Some(path) = png {
        save_png(&qr, &path, border, scale)
            .map_err(|err| format!("Failed to write {}: {}", path.display(), err))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn penalties_cmd(input: &InputArgs) -> Result<(), String> {
    let qr = encode_input(input)?;
    let scores = QrEncoder::mask_penalties(&qr);
    println!("version={} error_correction={:?}", qr.version(), qr.ec_level());
    for (index, score) in scores.iter().enumerate() {
        let marker = if index == qr.mask().index() as usize { " <- selected" } else { "" };
        println!("  mask {index}: {score}{marker}");
    }
    Ok(())
}

fn parse_hex(hex: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<u8> = hex.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err("hex payload must have an even number of digits".to_string());
    }
    digits
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| format!("invalid hex byte {:?}", String::from_utf8_lossy(pair)))
        })
        .collect()
}
