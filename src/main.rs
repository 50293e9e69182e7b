mod cli;

use imgvariants::{
    config::{self, Config},
    EnrichmentPipeline, HttpSizeProbe, VariantDescriptor,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "imgvariants=trace,reqwest=debug".to_string()
        } else {
            "imgvariants=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Probe {
            url,
            json,
            deadline,
        } => probe_variants(url, cli.config.as_deref(), json, deadline),
        Commands::Presets { json } => list_presets(cli.config.as_deref(), json),
        Commands::Validate { file } => {
            let path = file.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("imgvariants {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn probe_variants(
    url: Option<String>,
    config_path: Option<&Path>,
    json: bool,
    deadline_secs: Option<u64>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let base = url
        .or_else(|| config.base_url.clone())
        .context("No image URL given; pass one or set base_url / IMGVARIANTS_BASE_URL")?;
    let base = config::require_http_url(&base)?.to_string();

    let deadline = match deadline_secs {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => config.probe.deadline(),
    };

    let probe = HttpSizeProbe::try_new(&config.probe.settings())
        .context("Failed to build HTTP client")?;

    tracing::info!(url = %base, deadline = ?deadline, "Probing variants");

    let rt = tokio::runtime::Runtime::new()?;
    let (variants, cancelled) = rt.block_on(run_pipeline(probe, &config, &base, deadline));

    if cancelled {
        eprintln!("Probing was cancelled; sizes are not shown.");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&variants)?);
    } else {
        print_variants(&variants);
    }

    Ok(())
}

async fn run_pipeline(
    probe: HttpSizeProbe,
    config: &Config,
    base: &str,
    deadline: Option<Duration>,
) -> (Vec<VariantDescriptor>, bool) {
    let token = CancellationToken::new();
    let trigger = tokio::spawn(cancel_on_interrupt(token.clone(), deadline));

    let pipeline = EnrichmentPipeline::new(probe);
    let variants = pipeline
        .build_and_enrich(base, &config.active_presets(), &token)
        .await;

    trigger.abort();
    (variants, token.is_cancelled())
}

/// Cancel `token` on Ctrl-C or once `deadline` elapses.
async fn cancel_on_interrupt(token: CancellationToken, deadline: Option<Duration>) {
    let timer = async {
        match deadline {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending::<()>().await,
        }
    };

    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::debug!("Ctrl-C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = interrupt => tracing::warn!("Interrupted; cancelling probes"),
        _ = timer => tracing::warn!("Deadline reached; cancelling probes"),
    }
    token.cancel();
}

fn print_variants(variants: &[VariantDescriptor]) {
    let label_width = variants
        .iter()
        .map(|v| v.label().len())
        .max()
        .unwrap_or(0)
        .max("Variant".len());

    println!("{:<label_width$}  {:<6}  {:>12}  URL", "Variant", "Format", "Size");
    for variant in variants {
        let size = match variant.size_kib() {
            Some(kib) => format!("{kib:.1} KiB"),
            None => "-".to_string(),
        };
        println!(
            "{:<label_width$}  {:<6}  {:>12}  {}",
            variant.label(),
            variant.format(),
            size,
            variant.url()
        );
        if !variant.display_hints().is_empty() {
            println!("{:<label_width$}  hints: {}", "", variant.display_hints().join(", "));
        }
    }
}

fn list_presets(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let presets = config.active_presets();

    if json {
        println!("{}", serde_json::to_string_pretty(&presets)?);
        return Ok(());
    }

    for (i, preset) in presets.iter().enumerate() {
        let params = if preset.params.is_empty() {
            "(none)"
        } else {
            preset.params.as_str()
        };
        println!("{}. {} {}", i + 1, preset.label, params);
        if !preset.notes.is_empty() {
            println!("   {}", preset.notes);
        }
    }
    Ok(())
}

fn validate_config(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)
        .context("Failed to load configuration")?;

    println!("Configuration is valid");
    println!("  Base URL: {}", config.base_url.as_deref().unwrap_or("(not set)"));
    println!("  Presets: {}", config.active_presets().len());
    match config.probe.deadline() {
        Some(d) => println!("  Probe deadline: {}s", d.as_secs()),
        None => println!("  Probe deadline: none"),
    }

    let warnings = config::validate_config(&config);
    for warning in &warnings {
        println!("  Warning: {}", warning);
    }

    Ok(())
}
