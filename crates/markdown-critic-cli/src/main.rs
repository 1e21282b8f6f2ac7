use anyhow::{Context, Result};
use clap::Parser;
use markdown_critic_config::{Config, Unclosed, View};
use markdown_critic_engine::{Filter, TransduceOptions, io, markdown_to_html, transduce_with};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "markdown-critic")]
#[command(version)]
#[command(about = "Rewrite CriticMarkup annotations in a Markdown document into HTML")]
struct Cli {
    /// Input file (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render the result through the Markdown stage
    #[arg(long = "md")]
    markdown: bool,

    /// Keep only the original text of each edit
    #[arg(long, conflicts_with = "edited")]
    original: bool,

    /// Keep only the edited text of each edit
    #[arg(long)]
    edited: bool,

    /// Strip tags and comments, leaving plain source
    #[arg(long)]
    raw: bool,

    /// Drop comments (and with them all tags)
    #[arg(long)]
    hide_comments: bool,

    /// Drop generated tags, keeping all text
    #[arg(long)]
    hide_tags: bool,

    /// Named filters applied in order after the flags above, e.g. only-edited-raw
    #[arg(long = "filter", value_name = "NAME")]
    filters: Vec<Filter>,

    /// What to do with an annotation still open at end of input
    #[arg(long, value_enum)]
    unclosed: Option<UnclosedArg>,

    /// Config file (default: ~/.config/markdown-critic/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum UnclosedArg {
    Close,
    Passthrough,
}

impl From<UnclosedArg> for Unclosed {
    fn from(value: UnclosedArg) -> Self {
        match value {
            UnclosedArg::Close => Unclosed::Close,
            UnclosedArg::Passthrough => Unclosed::Passthrough,
        }
    }
}

impl Cli {
    /// Flags override the config file field by field.
    fn apply_to(&self, mut config: Config) -> Config {
        if self.original {
            config.view = View::Original;
        } else if self.edited {
            config.view = View::Edited;
        }
        config.raw |= self.raw;
        config.hide_comments |= self.hide_comments;
        config.hide_tags |= self.hide_tags;
        config.markdown |= self.markdown;
        if let Some(unclosed) = self.unclosed {
            config.unclosed = unclosed.into();
        }
        config
    }

    fn options(&self, config: &Config) -> TransduceOptions {
        let mut options = config.options();
        options.policy = self
            .filters
            .iter()
            .fold(options.policy, |policy, filter| filter.apply(policy));
        options
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => {
            let path = Config::expand_path(path).unwrap_or_else(|| path.to_path_buf());
            log::debug!("Loading config from {}", path.display());
            let config = Config::load_from_path(&path)?;
            if config.is_none() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            config
        }
        None => {
            log::debug!("Checking config file at {}", Config::config_path().display());
            Config::load()?
        }
    };
    Ok(loaded.unwrap_or_default())
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.apply_to(load_config(cli.config.as_deref())?);
    let options = cli.options(&config);
    log::debug!("Using {config:?}");

    let input = cli.input.as_deref();
    let output = cli.output.as_deref();

    if !config.markdown {
        let read = io::transduce_file(input, output, &options)
            .context("Error during critic parsing")?;
        log::debug!("Transduced {read} bytes");
        return Ok(());
    }

    let reader = io::read_source(input)?;
    let mut critic = Vec::new();
    transduce_with(reader, &mut critic, &options).context("Error during critic parsing")?;
    let html = markdown_to_html(&String::from_utf8_lossy(&critic));

    let mut sink = io::open_sink(output)?;
    sink.write_all(html.as_bytes())
        .and_then(|()| sink.flush())
        .context("Error while writing result")?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("markdown-critic: {e:#}");
        process::exit(1);
    }
}
