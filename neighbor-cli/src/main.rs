use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use neighbor_theme::{
    PaletteMode, PaletteOptions, SpacingArg, Theme, ThemeOptions, contrast_ratio, contrast_text,
    create_spacing, create_theme, merge_into, palette::DEFAULT_CONTRAST_THRESHOLD,
};
use tracing::debug;

#[derive(Parser)]
#[command(name = "neighbor-theme")]
#[command(version, about = "Resolve and inspect Neighbor themes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved theme as JSON
    Resolve {
        /// Theme options file (.json or .toml)
        #[arg(short, long)]
        options: Option<PathBuf>,
        /// Override the palette mode (light or dark)
        #[arg(short, long)]
        mode: Option<PaletteMode>,
    },
    /// Print the contrast ratio of two colors and the text color to use on the background
    Contrast {
        /// Foreground color
        foreground: String,
        /// Background color
        background: String,
    },
    /// Print a breakpoint media query
    Media {
        /// Query kind
        #[arg(value_enum)]
        kind: MediaKind,
        /// Breakpoint tier, or a literal width
        tier: String,
        /// Upper tier for `between`
        end: Option<String>,
        /// Theme options file (.json or .toml)
        #[arg(short, long)]
        options: Option<PathBuf>,
    },
    /// Print a spacing value
    Spacing {
        /// Up to four factors or lengths
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
        /// Grid unit in pixels
        #[arg(short, long)]
        unit: Option<f64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MediaKind {
    Up,
    Down,
    Between,
    Only,
    Not,
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,neighbor_theme=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_theme(options: Option<PathBuf>, mode: Option<PaletteMode>) -> Result<Theme> {
    let mut theme_options = match options {
        Some(path) => ThemeOptions::load(&path)
            .with_context(|| format!("failed to load theme options from {}", path.display()))?,
        None => ThemeOptions::default(),
    };
    if let Some(mode) = mode {
        merge_into(
            &mut theme_options,
            ThemeOptions {
                palette: Some(PaletteOptions {
                    mode: Some(mode),
                    ..PaletteOptions::default()
                }),
                ..ThemeOptions::default()
            },
        );
    }
    debug!("resolving theme");
    Ok(create_theme(theme_options))
}

fn main() -> Result<()> {
    init_tracing();
    let Cli { command } = Cli::parse();

    match command {
        Commands::Resolve { options, mode } => {
            let theme = load_theme(options, mode)?;
            let json = serde_json::to_string_pretty(&theme).context("failed to serialize theme")?;
            println!("{json}");
        }
        Commands::Contrast {
            foreground,
            background,
        } => {
            let ratio = contrast_ratio(&foreground, &background)?;
            let text = contrast_text(&background, DEFAULT_CONTRAST_THRESHOLD)?;
            println!("contrast ratio: {ratio:.2}:1");
            println!("text on {background}: {text}");
        }
        Commands::Media {
            kind,
            tier,
            end,
            options,
        } => {
            let theme = load_theme(options, None)?;
            let breakpoints = &theme.breakpoints;
            let query = match (kind, end) {
                (MediaKind::Between, Some(end)) => breakpoints.between(&tier, &end)?,
                (MediaKind::Between, None) => bail!("`between` needs an end tier"),
                (_, Some(end)) => bail!("unexpected end tier `{end}`"),
                (MediaKind::Up, None) => breakpoints.up(&tier)?,
                (MediaKind::Down, None) => breakpoints.down(&tier)?,
                (MediaKind::Only, None) => breakpoints.only(&tier)?,
                (MediaKind::Not, None) => breakpoints.not(&tier)?,
            };
            println!("{query}");
        }
        Commands::Spacing { args, unit } => {
            let spacing = create_spacing(unit);
            println!("{}", spacing.apply(args.into_iter().map(SpacingArg::from)));
        }
    }

    Ok(())
}
