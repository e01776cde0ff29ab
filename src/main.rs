use better_resize::config;
use better_resize::host::{FsImageStore, InvocationContext};
use better_resize::node::{BetterResizeInvocation, TEMPLATE};
use better_resize::output;
use better_resize::resize::{ResampleFilter, ResizeStrategy};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "better-resize")]
#[command(about = "Resize an image with a fill, stretch, fit, center or crop policy")]
#[command(long_about = "\
Resize an image with a fill, stretch, fit, center or crop policy

Runs the better_image_resize node once, using plain directories in place of
a pipeline host: the input image is read from --store, the result is written
to --output as PNG together with a JSON sidecar describing it.

Strategies:
  fill     scale to cover the target, center, clip the overflow
  stretch  scale to exactly the target, ignoring aspect ratio
  fit      scale to fit inside the target (output may be smaller on one axis)
  center   scale to fit inside the target, center on a transparent canvas
  crop     no scaling, center the original on a transparent canvas

Filters: nearest, box, bilinear, hamming, bicubic, lanczos

Parameters come from stock defaults, then --config, then flags.
Run 'better-resize gen-config' to generate a documented config file.")]
#[command(version)]
struct Cli {
    /// Directory input images are resolved in
    #[arg(long, default_value = ".", global = true)]
    store: PathBuf,

    /// Directory results are written to
    #[arg(long, default_value = "resized", global = true)]
    output: PathBuf,

    /// Log debug detail (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct ResizeArgs {
    /// Input image name, relative to --store
    image: Option<String>,

    /// Node parameter file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Target width (px)
    #[arg(long)]
    width: Option<u32>,

    /// Target height (px)
    #[arg(long)]
    height: Option<u32>,

    /// Resampling filter
    #[arg(long)]
    filter: Option<ResampleFilter>,

    /// Resize strategy
    #[arg(long)]
    strategy: Option<ResizeStrategy>,

    /// Mark the output as intermediate
    #[arg(long)]
    intermediate: bool,

    /// Workflow descriptor (JSON file) to attach to the output
    #[arg(long)]
    workflow: Option<PathBuf>,

    /// Node id recorded with the output
    #[arg(long, default_value = "cli")]
    node_id: String,

    /// Session id recorded with the output
    #[arg(long, default_value = "local")]
    session: String,
}

impl ResizeArgs {
    /// Flags given on the command line, as a config overlay.
    fn overrides(&self) -> toml::Value {
        let mut table = toml::Table::new();
        if let Some(image) = &self.image {
            table.insert("image".into(), image.clone().into());
        }
        if let Some(width) = self.width {
            table.insert("width".into(), i64::from(width).into());
        }
        if let Some(height) = self.height {
            table.insert("height".into(), i64::from(height).into());
        }
        if let Some(filter) = self.filter {
            table.insert("resample_mode".into(), filter.name().into());
        }
        if let Some(strategy) = self.strategy {
            table.insert("resize_mode".into(), strategy.name().into());
        }
        if self.intermediate {
            table.insert("is_intermediate".into(), true.into());
        }
        toml::Value::Table(table)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Resize one image
    Resize(ResizeArgs),
    /// Print the node template as JSON
    Describe,
    /// Print a stock node config with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Resize(args) => {
            let config = config::load_config(args.config.as_deref(), Some(args.overrides()))?;
            config.require_image()?;

            let mut node = BetterResizeInvocation::from_config(args.node_id.as_str(), &config);
            if let Some(path) = &args.workflow {
                let workflow = std::fs::read_to_string(path)?;
                node.workflow = Some(serde_json::from_str(&workflow)?);
            }

            let store = FsImageStore::new(cli.store, cli.output);
            let context = InvocationContext::new(&store, &store, args.session.as_str());
            let result = node.invoke(&context)?;
            for line in output::format_invocation(&node, &result, store.output_dir()) {
                println!("{}", line);
            }
        }
        Command::Describe => {
            println!("{}", serde_json::to_string_pretty(&TEMPLATE)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` picks `debug` over `warn`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
