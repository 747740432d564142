//! Subcommand handlers for render and config actions.

use sha2::{Digest, Sha256};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::args::{ConfigAction, RenderArgs};
use crate::ascii::{render_text, GlyphSet, RenderError, RenderOptions};
use crate::config::{default_path as get_config_path, Config, ConfigError, DEFAULT_CONFIG};

/// Errors surfaced by CLI subcommands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    #[error("config file already exists: {0}")]
    ConfigExists(PathBuf),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CliError + '_ {
    move |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Load config for a subcommand.
///
/// An explicit path must exist. Problems with the default path fall back to
/// built-in defaults with a warning.
pub fn load_config(path: Option<&Path>) -> Result<Config, CliError> {
    match path {
        Some(path) => Ok(Config::load_from_explicit(path)?),
        None => match Config::load(None) {
            Ok(config) => Ok(config),
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Ok(Config::default())
            }
        },
    }
}

/// `--no-x` wins, then `--x`, then whatever the config resolved to.
fn switch(on: bool, off: bool, configured: bool) -> bool {
    if off {
        false
    } else if on {
        true
    } else {
        configured
    }
}

/// Merge settings: CLI args > config file > built-in defaults.
pub fn resolve_options(args: &RenderArgs, config: &Config) -> RenderOptions {
    let mut options = config.render.to_options();

    if let Some(set) = args.glyph_set {
        let set = GlyphSet::from(set);
        options.glyph_set = set;
        if config.render.glyphs.is_none() {
            options.glyphs = set.glyphs().to_vec();
        }
    }
    if let Some(ref glyphs) = args.glyphs {
        options.glyphs = glyphs.chars().collect();
    }
    if let Some(gamma) = args.gamma {
        options.gamma = gamma;
    }
    if let Some(strength) = args.strength {
        options.preprocess_strength = strength;
    }
    if let Some(segmentation) = args.segmentation {
        options.segmentation = segmentation.into();
    }
    if let Some(passes) = args.refine_passes {
        options.refine_passes = passes;
    }
    options.dithering = switch(args.dither, args.no_dither, options.dithering);
    options.compact = switch(args.compact, args.no_compact, options.compact);
    options.invert = switch(args.invert, args.no_invert, options.invert);
    options.preprocess = switch(args.preprocess, args.no_preprocess, options.preprocess);

    options
}

/// SHA-256 of the rendered text as lowercase hex.
pub fn digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(io_error(path))?;
        Ok(buf)
    } else {
        std::fs::read(path).map_err(io_error(path))
    }
}

/// Render a raw RGBA file and write the text out.
pub fn run_render(args: &RenderArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let options = resolve_options(args, &config);
    let pixels = read_input(&args.input)?;

    log::debug!(
        "rendering {} ({} bytes) as {}x{}",
        args.input.display(),
        pixels.len(),
        args.width,
        args.height
    );
    let text = render_text(&pixels, args.width, args.height, &options)?;

    match args.output {
        Some(ref path) => {
            let mut contents = text.clone();
            contents.push('\n');
            std::fs::write(path, contents).map_err(io_error(path))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{}", text).map_err(io_error(Path::new("<stdout>")))?;
        }
    }

    if args.digest {
        eprintln!("sha256: {}", digest(&text));
    }

    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction) -> Result<(), CliError> {
    match action {
        ConfigAction::Show { config } => {
            let path = config.clone().unwrap_or_else(get_config_path);
            let options = load_config(config.as_deref())?.render.to_options();

            println!("Current configuration:");
            println!("  Glyph set: {}", options.glyph_set);
            println!("  Glyphs: {:?}", options.glyphs.iter().collect::<String>());
            println!("  Gamma: {}", options.gamma);
            println!("  Dithering: {}", yes_no(options.dithering));
            println!("  Compact: {}", yes_no(options.compact));
            println!("  Invert: {}", yes_no(options.invert));
            println!(
                "  Preprocess: {} (strength {})",
                yes_no(options.preprocess),
                options.preprocess_strength
            );
            println!("  Segmentation: {}", options.segmentation.name());
            println!("  Refine passes: {}", options.refine_passes);
            println!();

            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found)", path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            let config_path = get_config_path();
            init_config(&config_path)?;
            println!("Created config file: {}", config_path.display());
            Ok(())
        }
    }
}

/// Write the default config template, refusing to overwrite.
pub fn init_config(path: &Path) -> Result<(), CliError> {
    if path.exists() {
        return Err(CliError::ConfigExists(path.to_path_buf()));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    std::fs::write(path, DEFAULT_CONFIG).map_err(io_error(path))
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}
