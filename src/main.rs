use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gallerywall::page::write_document;
use gallerywall::{GalleryConfig, LoadState};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gallerywall", version, about = "Build an infinitely scrolling image wall from a Cloudinary folder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch, shuffle and write the page
    Build(BuildArgs),
    /// Fetch and print the projected records as JSON (usable as a fixture)
    Fetch(FetchArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Cloudinary cloud name (overrides CLOUDINARY_CLOUD_NAME)
    #[arg(long)]
    cloud_name: Option<String>,
    /// Source folder (overrides CLOUDINARY_FOLDER)
    #[arg(long)]
    folder: Option<String>,
    /// Read records from a JSON file instead of the API
    #[arg(long)]
    fixture: Option<PathBuf>,
    /// Maximum number of records to fetch
    #[arg(long)]
    max_results: Option<u32>,
    /// API request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(Args)]
struct BuildArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Output file
    #[arg(short, long, default_value = "dist/index.html")]
    out: PathBuf,
    /// Number of images kept after shuffling
    #[arg(long)]
    count: Option<usize>,
    /// Fixed shuffle seed (overrides GALLERY_SEED)
    #[arg(long)]
    seed: Option<u64>,
    /// Document title
    #[arg(long)]
    title: Option<String>,
    /// Alt text for every image
    #[arg(long)]
    alt: Option<String>,
    /// SVG/PNG logo shown on the splash
    #[arg(long)]
    logo: Option<PathBuf>,
    /// Seconds for one marquee loop
    #[arg(long)]
    scroll_secs: Option<u32>,
    /// Write the post-load document without splash or script
    #[arg(long)]
    no_splash: bool,
}

#[derive(Args)]
struct FetchArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Write to a file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn load_config(args: &SourceArgs) -> Result<GalleryConfig> {
    let mut config = GalleryConfig::from_env().context("reading configuration from environment")?;
    if let Some(v) = &args.cloud_name {
        config.cloud_name = v.clone();
    }
    if let Some(v) = &args.folder {
        config.folder = v.clone();
    }
    if let Some(v) = &args.fixture {
        config.fixture = Some(v.clone());
    }
    if let Some(v) = args.max_results {
        config.max_results = v;
    }
    if let Some(v) = args.timeout_ms {
        config.timeout_ms = v;
    }
    Ok(config)
}

async fn build(args: BuildArgs) -> Result<()> {
    let mut config = load_config(&args.source)?;
    if let Some(v) = args.count {
        config.display_count = v;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(v) = args.title {
        config.title = v;
    }
    if let Some(v) = args.alt {
        config.alt_text = v;
    }
    if args.logo.is_some() {
        config.logo = args.logo;
    }
    if let Some(v) = args.scroll_secs {
        config.scroll_secs = v;
    }
    config.validate()?;

    let page = gallerywall::async_api::build_page(config)
        .await
        .context("building page")?;

    let state = if args.no_splash {
        LoadState::Loaded
    } else {
        LoadState::Loading
    };
    let fingerprint = page.write_state_to(&args.out, state)?;
    log::info!(
        "Built {} tiles ({}), fingerprint {}",
        page.gallery().len(),
        state.as_str(),
        fingerprint
    );
    Ok(())
}

async fn fetch(args: FetchArgs) -> Result<()> {
    let config = load_config(&args.source)?;
    config.validate()?;

    let records = gallerywall::async_api::fetch_records(config)
        .await
        .context("fetching records")?;
    let json = serde_json::to_string_pretty(&records)?;
    match args.out {
        Some(path) => {
            write_document(&path, json.as_bytes())
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("Wrote {} records to {}", records.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // A missing .env file is normal; real parse errors are worth a warning.
    let dotenv = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = dotenv {
        if !e.not_found() {
            log::warn!("Ignoring .env: {}", e);
        }
    }

    let cli = Cli::parse();
    let res = match cli.command {
        Command::Build(args) => build(args).await,
        Command::Fetch(args) => fetch(args).await,
    };

    if let Err(e) = res {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
