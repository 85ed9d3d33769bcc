use clap::Parser;
use directories::ProjectDirs;
use slidemark::{
    BlockHandlerRegistry, CodeHighlighter, Config, ConfigLoadError, Document, ImageLoader, Presenter, ViewportGeometry,
};
use std::{
    env,
    fs::File,
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

/// Present slides written in a simple markup language in your terminal.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// The path to the file that contains the presentation.
    path: PathBuf,

    /// The path to the configuration file.
    #[clap(short, long)]
    config_file: Option<PathBuf>,

    /// Write logs to this file.
    #[clap(long, env = "SLIDEMARK_LOG_FILE")]
    log_file: Option<PathBuf>,
}

fn default_config_path() -> Option<PathBuf> {
    let configs_path: PathBuf = match env::var("XDG_CONFIG_HOME") {
        Ok(path) => Path::new(&path).join("slidemark"),
        Err(_) => ProjectDirs::from("", "", "slidemark")?.config_dir().into(),
    };
    Some(configs_path.join("config.yaml"))
}

fn load_config(config_file_path: Option<&Path>) -> Result<Config, ConfigLoadError> {
    if let Some(path) = config_file_path {
        return Config::load(path);
    }
    let Some(path) = default_config_path() else {
        return Ok(Config::default());
    };
    match Config::load(&path) {
        Err(ConfigLoadError::NotFound) => Ok(Config::default()),
        other => other,
    }
}

fn init_logging(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path).map_err(|e| format!("creating log file {}: {e}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false).with_writer(file).init();
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    let config = load_config(cli.config_file.as_deref())?;
    let document = Document::load(&cli.path)?;

    let highlighter = CodeHighlighter::new(&config.defaults.highlight_theme)?;
    let resources_path = cli.path.parent().unwrap_or(Path::new("/"));
    let images = ImageLoader::new(resources_path, config.defaults.image_load_timeout());
    let handlers = BlockHandlerRegistry::new(highlighter, images)?;

    let viewport = ViewportGeometry::current()?;
    let presenter = Presenter::new(document, handlers, viewport)?;
    presenter.present()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
