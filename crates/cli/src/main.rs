use clap::{Args, Parser, Subcommand};
use sitebind_core::{viewport, Page, RenderOptions, SiteConfig, SiteError};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sitebind", about = "Bind a page template to its site configuration")]
struct Cli {
    #[command(flatten)]
    log: LogArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Logging controls.
#[derive(Args)]
struct LogArgs {
    /// Log level for our crates (error|warn|info|debug|trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Explicit tracing filter directive (overrides --log-level and RUST_LOG)
    #[arg(long, global = true)]
    log_filter: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template and print the bound HTML
    Render {
        /// The HTML template to render (use - for stdin)
        template: String,

        /// Site configuration JSON
        #[arg(long)]
        config: String,

        /// Viewport size as WxH (default: 1920x1080)
        #[arg(long, default_value = "1920x1080")]
        viewport: String,

        /// Year for the #year stamp (default: current year)
        #[arg(long)]
        year: Option<i32>,

        /// Page URL; its fragment selects the active nav link
        #[arg(long)]
        location: Option<String>,
    },
    /// Print the configuration value at a dot path as JSON
    Resolve {
        /// Site configuration JSON
        #[arg(long)]
        config: String,

        /// Dot path, e.g. text.hero.title
        path: String,
    },
}

fn filter_for(args: &LogArgs) -> EnvFilter {
    if let Some(directive) = &args.log_filter {
        return EnvFilter::new(directive);
    }
    if let Some(level) = &args.log_level {
        let level = level.to_ascii_lowercase();
        return EnvFilter::new(format!("sitebind={level},sitebind_core={level}"));
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn init_logging(args: &LogArgs) {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(args))
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(file: &str) -> Result<String, SiteError> {
    if file == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| SiteError::Read {
                path: "<stdin>".into(),
                source,
            })?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file).map_err(|source| SiteError::Read {
            path: file.into(),
            source,
        })
    }
}

fn run(command: Commands) -> Result<(), SiteError> {
    match command {
        Commands::Render {
            template,
            config,
            viewport,
            year,
            location,
        } => {
            let html = read_input(&template)?;
            let config = SiteConfig::load(&config)?;
            let mut options = RenderOptions::default();
            if let Some(year) = year {
                options.year = year;
            }
            let viewport = viewport::parse_viewport(&viewport);
            info!(template = %template, width = viewport.width, year = options.year, "rendering");
            let mut page = Page::from_html(&html, config)?
                .with_viewport(viewport)
                .with_options(options);
            page.init(location.as_deref());
            println!("{}", page.to_html());
        }
        Commands::Resolve { config, path } => {
            let config = SiteConfig::load(&config)?;
            debug!(path = %path, "resolving");
            match config.resolve(&path) {
                Some(node) => println!(
                    "{}",
                    serde_json::to_string_pretty(node).unwrap_or_default()
                ),
                None => {
                    eprintln!("No value at {}", path);
                    std::process::exit(2);
                }
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
