use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use stixis::api;
use stixis::assets::AssetLoader;
use stixis::models::{AppConfig, ProcessingParams};
use stixis::server;
use stixis::services::{run_grid_search, HalftoneService};

#[derive(Parser)]
#[command(name = "stixis")]
#[command(about = "Stixis - turn images into grids of brightness-sized circles")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one image to a PNG file
    Render {
        /// Input image (png, jpg or jpeg)
        image: PathBuf,

        /// Directory for the output file
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        params: ParamArgs,
    },
    /// Render every combination of colors, divisions, smoothing and contrast
    Search {
        /// Input image (png, jpg or jpeg)
        image: PathBuf,

        /// Directory in which `<name>_stixis_patterns/` is created
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Preset whose other settings (threshold, curve, color...) apply to every combination
        #[arg(short, long)]
        preset: Option<String>,
    },
    /// Start the HTTP server
    Serve,
    /// Write the embedded config.yaml to CONFIG_FILE (or ./config.yaml)
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// Processing flags shared by the render command
#[derive(Args, Debug, Default)]
struct ParamArgs {
    /// Preset from config.yaml
    #[arg(short, long)]
    preset: Option<String>,

    /// Number of tones, 2-10 (also the grid divisions unless --grid-size is given)
    #[arg(short, long)]
    colors: Option<u32>,

    /// Grid divisions along the shorter side (4 to half the shorter side)
    #[arg(short, long)]
    grid_size: Option<u32>,

    /// Apply Gaussian smoothing and the neighborhood heuristic
    #[arg(long)]
    smooth: bool,

    /// Smoothing strength, 0.5-3.0
    #[arg(long)]
    sigma: Option<f64>,

    /// Stretch contrast between two percentiles
    #[arg(long)]
    contrast: bool,

    /// Low percentile for --contrast
    #[arg(long)]
    low: Option<f64>,

    /// High percentile for --contrast
    #[arg(long)]
    high: Option<f64>,

    /// Minimum brightness (0-1) for a circle to be drawn
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Invert the output
    #[arg(long)]
    invert: bool,

    /// Brightness curve: linear, logarithmic, exponential, sigmoid, power, adaptive
    #[arg(short, long)]
    mapping: Option<String>,

    /// Gamma for the power and adaptive curves
    #[arg(long)]
    gamma: Option<f64>,

    /// Apply the brightness curve without --smooth as well
    #[arg(long)]
    curve_always: bool,

    /// Integer upscale factor: 1, 2, 4 or 8
    #[arg(short, long)]
    upscale: Option<u32>,

    /// Fill circles with colors from an image palette
    #[arg(long)]
    color: bool,

    /// Palette entries in color mode
    #[arg(short = 'k', long)]
    palette_size: Option<u32>,

    /// Palette algorithm: median-cut or kmeans
    #[arg(long)]
    strategy: Option<String>,
}

impl ParamArgs {
    /// Explicit flags as overrides; unset switches leave presets in charge.
    fn to_params(&self) -> ProcessingParams {
        let switch = |on: bool| on.then_some(true);
        ProcessingParams {
            num_colors: self.colors,
            grid_size: self.grid_size,
            smoothing: switch(self.smooth),
            smoothing_sigma: self.sigma,
            darkness_threshold: self.threshold,
            enhance_contrast: switch(self.contrast),
            contrast_low: self.low,
            contrast_high: self.high,
            invert: switch(self.invert),
            brightness_mapping: self.mapping.clone(),
            gamma: self.gamma,
            curve_always: switch(self.curve_always),
            upscale_factor: self.upscale,
            color: switch(self.color),
            palette_size: self.palette_size,
            palette_strategy: self.strategy.clone(),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stixis API",
        description = "Halftone circle rendering of uploaded images",
        version = "0.3.0",
        license(name = "MIT")
    ),
    paths(api::handle_process),
    components(schemas(api::ProcessForm, api::ProcessJsonResponse)),
    tags(
        (name = "Processing", description = "Image upload and rendering")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            image,
            output_dir,
            params,
        }) => run_render_command(&image, &output_dir, &params),
        Some(Commands::Search {
            image,
            output_dir,
            preset,
        }) => run_search_command(&image, &output_dir, preset.as_deref()),
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Init { force }) => run_init_command(force),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stixis=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn load_service() -> HalftoneService {
    let loader = AssetLoader::from_env();
    HalftoneService::new(Arc::new(AppConfig::load_from_assets(&loader)))
}

/// Render one image to a PNG file (no server needed)
fn run_render_command(image: &Path, output_dir: &Path, args: &ParamArgs) -> anyhow::Result<()> {
    init_cli_logging();

    let service = load_service();
    let config = service.resolve_config(args.preset.as_deref(), &args.to_params())?;
    let output = service.render_file(image, output_dir, &config)?;

    println!("Processed image saved as {}", output.display());
    Ok(())
}

/// Render the parameter sweep for one image
fn run_search_command(image: &Path, output_dir: &Path, preset: Option<&str>) -> anyhow::Result<()> {
    init_cli_logging();

    let service = load_service();
    let base = service.resolve_config(preset, &ProcessingParams::default())?;

    println!("Running grid search on {} ...", image.display());
    let report = run_grid_search(image, output_dir, &base)?;

    if report.total() == 0 {
        println!("Image is too small for any grid of at least 4 divisions; nothing rendered.");
        return Ok(());
    }

    println!(
        "Wrote {} of {} combinations to {}",
        report.written.len(),
        report.total(),
        report.output_dir.display()
    );
    for (name, error) in &report.failed {
        println!("  ! {name}: {error}");
    }
    Ok(())
}

/// Write the embedded config to disk for customization
fn run_init_command(force: bool) -> anyhow::Result<()> {
    let report = AssetLoader::from_env().init_config(force)?;

    for f in &report.written {
        println!("  + {f}");
    }
    for f in &report.skipped {
        println!("  - {f} exists (use --force to overwrite)");
    }
    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Stixis v{VERSION}");
    println!("Halftone circle renderer\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("\nConfig: {config_source}");

    let config = AppConfig::load_from_assets(&AssetLoader::from_env());
    let presets = config.preset_names();
    if presets.is_empty() {
        println!("Presets: (none)");
    } else {
        println!("Presets: {}", presets.join(", "));
    }

    println!("\nCommands:");
    println!("  stixis render   Render an image to a PNG file");
    println!("  stixis search   Render a grid of parameter combinations");
    println!("  stixis serve    Start the HTTP server");
    println!("  stixis init     Extract the default config.yaml");
    println!("\nRun 'stixis --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stixis=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let asset_loader = Arc::new(AssetLoader::from_env());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    tracing::info!(
        config = %asset_loader
            .config_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
        "Config source"
    );

    let state = server::create_app_state(asset_loader)?;

    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Stixis server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_flags_become_overrides() {
        let cli = Cli::parse_from([
            "stixis", "render", "cat.png", "-c", "6", "--smooth", "--mapping", "power", "-k", "3",
            "--color",
        ]);
        let Some(Commands::Render { image, params, .. }) = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(image, PathBuf::from("cat.png"));

        let overrides = params.to_params();
        assert_eq!(overrides.num_colors, Some(6));
        assert_eq!(overrides.smoothing, Some(true));
        assert_eq!(overrides.brightness_mapping.as_deref(), Some("power"));
        assert_eq!(overrides.palette_size, Some(3));
        assert_eq!(overrides.color, Some(true));
        assert_eq!(overrides.invert, None);
        assert_eq!(overrides.grid_size, None);
    }

    #[test]
    fn test_openapi_lists_process_endpoint() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/process"));
    }
}
