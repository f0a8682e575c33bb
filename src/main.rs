//! builddocs CLI
//!
//! Usage:
//!   builddocs [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>          Build configuration (TOML format)
//!   -m, --main <FILE>            Main template with `@name` placeholder lines
//!   -i, --items <FILE>           Item data written by the comment reader (JSON)
//!   -f, --format <FORMAT>        Output format: html or markdown
//!   -t, --templates <DIR>        Templates that shadow the built-in ones
//!   --allow-unresolved-types     Render unknown types without a link
//!   -o, --output <FILE>          Write to a file instead of stdout
//!   -v, --verbose                Log build progress to stderr
//!   -h, --help                   Print help

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use builddocs::{build, BuildError, Config};

#[derive(Parser)]
#[command(name = "builddocs")]
#[command(about = "Build API documentation from documented items and a main template")]
struct Cli {
    /// Build configuration (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Main template with `@name` placeholder lines
    #[arg(short, long)]
    main: Option<PathBuf>,

    /// Item data written by the comment reader (JSON)
    #[arg(short, long)]
    items: Option<PathBuf>,

    /// Output format: html or markdown
    #[arg(short, long)]
    format: Option<String>,

    /// Directory of templates that shadow the built-in ones
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Render types that cannot be linked as plain text instead of failing
    #[arg(long)]
    allow_unresolved_types: bool,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log build progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<(Config, Option<PathBuf>), BuildError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(main) = self.main {
            config.main = main;
        }
        if let Some(items) = self.items {
            config.items = Some(items);
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(templates) = self.templates {
            config.templates = Some(templates);
        }
        if self.allow_unresolved_types {
            config.allow_unresolved_types = true;
        }
        Ok((config, self.output))
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "builddocs=debug" } else { "builddocs=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (config, output) = match cli.into_config() {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if config.main.as_os_str().is_empty() {
        eprintln!("Error: no main template given (use --main or set `main` in the config)");
        std::process::exit(1);
    }

    let doc = match build(&config, None) {
        Ok(doc) => doc,
        Err(e) => {
            // Placement errors point into the main template
            let source = fs::read_to_string(&config.main).unwrap_or_default();
            let filename = config.main.display().to_string();
            eprintln!("Error: {}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(&path, doc) {
                eprintln!("Error writing file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => print!("{}", doc),
    }
}
