use anyhow::{Context, Result};
use clap::Parser;
use diffpane::app::{App, DiffViewer, Exporter, RenderMode, ViewerOptions};
use diffpane::config::Config;
use diffpane::model::document::Language;
use diffpane::services::tracing_setup;
use diffpane::view::theme::ThemeKind;
use std::path::{Path, PathBuf};

/// Side-by-side and inline diff viewer for the terminal
#[derive(Parser, Debug)]
#[command(name = "diffpane", version, about)]
struct Args {
    /// The original (left) file
    original: PathBuf,

    /// The modified (right) file
    modified: PathBuf,

    /// Language for highlighting; detected from the modified file's
    /// extension when omitted. Unknown names render as plain text.
    #[arg(long)]
    language: Option<String>,

    /// Label of the original pane (default: its path)
    #[arg(long)]
    original_label: Option<String>,

    /// Label of the modified pane (default: its path)
    #[arg(long)]
    modified_label: Option<String>,

    /// Color theme: dark or light
    #[arg(long)]
    theme: Option<ThemeKind>,

    /// Start in inline (unified) mode
    #[arg(long)]
    inline: bool,

    /// Start fullscreen
    #[arg(long)]
    fullscreen: bool,

    /// Lines the diff engine scans ahead to realign after a mismatch (at most 1000)
    #[arg(long)]
    lookahead: Option<usize>,

    /// Print the unified inline diff to stdout and exit
    #[arg(long)]
    print: bool,

    /// Configuration file (default: <config dir>/diffpane/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for exports (default: from config, else the current directory)
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Log file (default: diffpane.log in the temp directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<Config> {
    if let Some(path) = &args.config {
        return Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let Some(path) = Config::default_path() else {
        return Ok(Config::default());
    };
    match Config::load_or_default(&path) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::warn!("Ignoring config at {}: {}", path.display(), e);
            Ok(Config::default())
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn viewer_options(args: &Args, config: &Config) -> Result<ViewerOptions> {
    let language = args
        .language
        .clone()
        .unwrap_or_else(|| Language::from_path(&args.modified).as_str().to_string());

    let render_mode = if args.inline {
        RenderMode::Inline
    } else {
        config.viewer.render_mode
    };

    Ok(ViewerOptions {
        original_code: read_input(&args.original)?,
        modified_code: read_input(&args.modified)?,
        language,
        original_label: args
            .original_label
            .clone()
            .or_else(|| config.viewer.original_label.clone())
            .or_else(|| Some(args.original.display().to_string())),
        modified_label: args
            .modified_label
            .clone()
            .or_else(|| config.viewer.modified_label.clone())
            .or_else(|| Some(args.modified.display().to_string())),
        theme: Some(args.theme.unwrap_or(config.viewer.theme)),
        render_mode,
        fullscreen: args.fullscreen,
        lookahead: config.viewer.lookahead,
        show_line_numbers: config.viewer.show_line_numbers,
        tab_size: config.viewer.tab_size,
        read_only: true,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(tracing_setup::default_log_path);
    tracing_setup::init_global(&log_path);

    let mut config = load_config(&args)?;
    if let Some(lookahead) = args.lookahead {
        config.viewer.lookahead = lookahead;
        config.validate().context("Invalid --lookahead")?;
    }
    let options = viewer_options(&args, &config)?;
    tracing::info!(
        original = %args.original.display(),
        modified = %args.modified.display(),
        "starting diffpane"
    );

    let mut viewer = DiffViewer::new(options);

    if args.print {
        print!("{}", viewer.diff().to_unified_text());
        return Ok(());
    }

    let export_dir = args
        .export_dir
        .clone()
        .unwrap_or_else(|| config.export.directory_or_current());
    let mut app = App::new(viewer, Exporter::new(export_dir));

    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();

    result.context("Terminal I/O failed")
}
