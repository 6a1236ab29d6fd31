use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use vibrancy::{
    config::Config,
    export::{self, WebhookClient, WebhookPayload},
    generation::GenerationEngine,
};

#[derive(Parser)]
#[command(
    name = "vibrancy",
    version,
    about = "Turn a single photo into vibrant, text-overlaid ad variations",
    long_about = "Vibrancy composites ad-style variations from one uploaded photo: a vibrant color wash, a multiply-blend duplicate for a deepened cast, and a bold shadowed caption. With a webhook configured, the image and creative context are forwarded as JSON to an external AI generation service instead."
)]
struct Cli {
    /// Source image path (PNG, JPEG, WebP, GIF)
    #[arg(short, long)]
    image: PathBuf,

    /// Output directory for generated variants
    #[arg(short, long, default_value = "out")]
    output: PathBuf,

    /// Number of variants to generate (cycles the preset rotation)
    #[arg(short, long)]
    count: Option<usize>,

    /// Context message used as a caption (repeatable)
    #[arg(short, long = "message")]
    messages: Vec<String>,

    /// Free-text style guidance forwarded to the webhook
    #[arg(long, default_value = "")]
    style_guide: String,

    /// Reference URL forwarded to the webhook
    #[arg(long, default_value = "")]
    reference_url: String,

    /// Webhook endpoint; when set, export the brief instead of compositing locally
    #[arg(short, long)]
    webhook_url: Option<String>,

    /// Configuration file (optional)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("Starting Vibrancy v{}", env!("CARGO_PKG_VERSION"));
    info!("Image: {:?}", cli.image);

    // Load configuration
    let mut config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    // CLI overrides
    if let Some(count) = cli.count {
        config.generation.variant_count = count;
    }
    if cli.webhook_url.is_some() {
        config.export.webhook_url = cli.webhook_url.clone();
    }
    config.validate()?;

    let source = GenerationEngine::load_source(&cli.image).await?;

    if config.export.webhook_url.is_some() {
        // Webhook path: forward the creative brief, print the suggestions
        let client = WebhookClient::from_config(&config.export)?;
        let payload = WebhookPayload {
            uploaded_image: Some(export::to_data_url(&source)),
            style_guide: cli.style_guide,
            reference_url: cli.reference_url,
            context_messages: cli.messages,
            style_strength: config.generation.style_strength,
            style_preset: config.generation.style_preset.clone(),
            variation_count: config.generation.variant_count,
        };

        let images = client.export(&payload).await?;
        info!("Export complete: {} suggestions", images.len());
        for image in images {
            println!("{}\t{}", image.url, image.revised_prompt);
        }
        return Ok(());
    }

    // Local path: composite variants and save them
    let mut engine = GenerationEngine::new(config.clone());
    let count = config.generation.variant_count;

    info!("Generating {} local variants...", count);
    engine.generate(source, &cli.messages, count)?;

    let written = engine.save_all(&cli.output).await?;
    info!("Generation complete! {} variants saved to {:?}", written.len(), cli.output);
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
