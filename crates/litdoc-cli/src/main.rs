use anyhow::{Context, Result, bail};
use clap::Parser;
use litdoc_config::Config;
use litdoc_engine::{
    DEFAULT_THEME, GenerateOptions, Generator, Highlighter, PlainHighlighter, RunSummary,
    SourceFilter, SyntectHighlighter,
};
use litdoc_syntax::JavaScriptParser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "litdoc")]
#[command(about = "Generate side-by-side HTML documentation from commented JavaScript")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Files or directories to document
    inputs: Vec<PathBuf>,

    /// Output directory (default: `docs` next to each input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Template directory whose assets are copied into the output
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Glob of files to leave out, relative to the documentation root (repeatable)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Glob of files to document (repeatable, default: **/*.js)
    #[arg(long)]
    include: Vec<String>,

    /// Text for the page footer
    #[arg(short, long)]
    footer: Option<String>,

    /// Config file (default: ./litdoc.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Syntax highlighting theme
    #[arg(long)]
    theme: Option<String>,

    /// Escape code without syntax highlighting
    #[arg(long)]
    plain: bool,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

/// Settings after merging the command line over the config file.
#[derive(Debug)]
struct Settings {
    options: GenerateOptions,
    theme: Option<String>,
    highlight: bool,
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file not found: {}", path.display())),
        None => Ok(Config::load()?.unwrap_or_default()),
    }
}

fn resolve(cli: Cli, config: Config) -> Result<Settings> {
    let inputs = if cli.inputs.is_empty() {
        config.inputs
    } else {
        cli.inputs
    };
    if inputs.is_empty() {
        bail!("No input given: pass files or directories, or set `inputs` in litdoc.toml");
    }

    let include = if cli.include.is_empty() {
        config.include
    } else {
        cli.include
    };
    let mut exclude = config.exclude;
    exclude.extend(cli.exclude);
    let filter = SourceFilter::new(&include, &exclude)?;

    Ok(Settings {
        options: GenerateOptions {
            inputs,
            output: cli.output.or(config.output),
            filter,
            footer: cli.footer.or(config.footer),
            template: cli.template.or(config.template),
        },
        theme: cli.theme.or(config.theme),
        highlight: config.highlight && !cli.plain,
    })
}

fn highlighter(settings: &Settings) -> Result<Box<dyn Highlighter>> {
    if !settings.highlight {
        return Ok(Box::new(PlainHighlighter));
    }
    let theme = settings.theme.as_deref().unwrap_or(DEFAULT_THEME);
    let highlighter = SyntectHighlighter::with_theme(theme).with_context(|| {
        format!(
            "Available themes: {}",
            SyntectHighlighter::theme_names().join(", ")
        )
    })?;
    Ok(Box::new(highlighter))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = load_config(&cli)?;
    let settings = resolve(cli, config)?;
    let highlighter = highlighter(&settings)?;
    let parser = JavaScriptParser::new();

    let summary = Generator::new(&parser, highlighter.as_ref()).run(&settings.options)?;

    println!("Wrote {} page(s)", summary.written.len());
    for line in skipped_report(&summary) {
        eprintln!("{line}");
    }

    // Skipped files do not fail the run; only errors returned above do.
    Ok(())
}

/// Lines listing the files left out of the documentation, empty if none were.
fn skipped_report(summary: &RunSummary) -> Vec<String> {
    if summary.skipped.is_empty() {
        return Vec::new();
    }
    std::iter::once(format!("Skipped {} file(s):", summary.skipped.len()))
        .chain(
            summary
                .skipped
                .iter()
                .map(|skipped| format!("  {}: {}", skipped.path.display(), skipped.error)),
        )
        .collect()
}
