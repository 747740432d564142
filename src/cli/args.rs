//! CLI argument parsing with clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{GlyphSetArg, SegmentationArg};

/// Parse and validate gamma (finite, > 0)
fn parse_gamma(s: &str) -> Result<f32, String> {
    let gamma: f32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(format!("Gamma must be a positive number, got {}", gamma));
    }
    Ok(gamma)
}

/// Parse and validate preprocess strength (0-10)
fn parse_strength(s: &str) -> Result<u8, String> {
    let strength: u8 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid strength", s))?;
    if strength > 10 {
        return Err(format!("Strength must be between 0 and 10, got {}", strength));
    }
    Ok(strength)
}

/// Parse and validate an image dimension (> 0)
fn parse_dimension(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid dimension", s))?;
    if n == 0 {
        return Err("Dimension must be greater than 0".to_string());
    }
    Ok(n)
}

/// Render raw RGBA pixels as ASCII or braille text
#[derive(Parser, Debug)]
#[command(name = "glyphcast")]
#[command(version, about = "Render raw RGBA images as ASCII or braille text", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a raw RGBA file
    Render(RenderArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Config file path
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
    /// Create default config file
    Init,
}

/// Options for the `render` subcommand.
///
/// Flags override the config file. Each on/off switch has a `--no-` form
/// that wins over both the switch and the config.
#[derive(ClapArgs, Debug, Clone)]
pub struct RenderArgs {
    /// Raw RGBA input file (width * height * 4 bytes), or '-' for stdin
    pub input: PathBuf,

    /// Image width in pixels
    #[arg(long, short = 'W', value_parser = parse_dimension)]
    pub width: usize,

    /// Image height in pixels
    #[arg(long, short = 'H', value_parser = parse_dimension)]
    pub height: usize,

    /// Glyph set
    #[arg(long, short = 'g')]
    pub glyph_set: Option<GlyphSetArg>,

    /// Custom glyph ramp, darkest first (e.g. "#. ")
    #[arg(long)]
    pub glyphs: Option<String>,

    /// Tone curve exponent
    #[arg(long, value_parser = parse_gamma)]
    pub gamma: Option<f32>,

    /// Enable Floyd-Steinberg dithering
    #[arg(long)]
    pub dither: bool,

    /// Disable dithering (overrides --dither and the config file)
    #[arg(long)]
    pub no_dither: bool,

    /// Render the full frame without cropping
    #[arg(long)]
    pub compact: bool,

    /// Crop to the foreground (overrides --compact and the config file)
    #[arg(long)]
    pub no_compact: bool,

    /// Invert colors before rendering
    #[arg(long)]
    pub invert: bool,

    /// Keep original colors (overrides --invert and the config file)
    #[arg(long)]
    pub no_invert: bool,

    /// Simplify tones before mapping
    #[arg(long)]
    pub preprocess: bool,

    /// Skip tone simplification (overrides --preprocess and the config file)
    #[arg(long)]
    pub no_preprocess: bool,

    /// Detail kept by --preprocess (0 = simplified, 10 = original)
    #[arg(long, value_parser = parse_strength)]
    pub strength: Option<u8>,

    /// Background classifier
    #[arg(long)]
    pub segmentation: Option<SegmentationArg>,

    /// Morphology passes for adaptive/soft segmentation
    #[arg(long)]
    pub refine_passes: Option<usize>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the SHA-256 of the rendered text after rendering
    #[arg(long)]
    pub digest: bool,
}
