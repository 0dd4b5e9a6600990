// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, written to stderr so stdout stays clean)
// 3. Dispatch to the appropriate subcommand handler
// 4. Print the payload and exit with a proper code (0 = success, 2 = error)
// =============================================================================

mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - where the contributors file lives
mod contributors;  // src/contributors/ - record type and extraction
mod errors;        // src/errors.rs - failure taxonomy
mod generate;      // src/generate.rs - regeneration cycle and watch loop
mod github;        // src/github/ - GitHub contents API
mod sampler;       // src/sampler.rs - unique random sampling

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, SourceArgs};
use config::ContentSource;
use generate::Generation;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            tracing::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr; RUST_LOG wins over --verbose when set
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = payload generated
//   Ok(2) = watch mode ended without a single good cycle
//   Err   = the cycle (or setup) failed
async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Sample { source } => handle_sample(source).await,
        Commands::Watch { source, interval } => handle_watch(source, interval).await,
    }
}

// Pieces every subcommand needs
fn prepare(args: &SourceArgs) -> Result<(ContentSource, reqwest::Client, StdRng)> {
    let source = ContentSource::new(&args.repository, &args.path, &args.api_base, args.token.clone())
        .context("invalid source options")?;
    let client = github::build_client().context("could not create HTTP client")?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    Ok((source, client, rng))
}

// Handles the 'sample' subcommand: one regeneration cycle
async fn handle_sample(args: SourceArgs) -> Result<i32> {
    let (source, client, mut rng) = prepare(&args)?;

    tracing::info!(
        repository = %format!("{}/{}", source.owner, source.repo),
        path = %source.path,
        "generating contributors payload"
    );

    let generation = generate::run_cycle(
        &client,
        &source,
        args.count,
        generate::REVALIDATE_SECS,
        &mut rng,
    )
    .await
    .with_context(|| format!("regeneration failed for {}/{}", source.owner, source.repo))?;

    print_generation(&generation, args.json)?;
    Ok(0)
}

// Handles the 'watch' subcommand: regenerate until Ctrl-C
async fn handle_watch(args: SourceArgs, interval: u64) -> Result<i32> {
    let (source, client, mut rng) = prepare(&args)?;

    tracing::info!(
        repository = %format!("{}/{}", source.owner, source.repo),
        interval,
        "watching contributors file"
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "could not listen for Ctrl-C");
            // Never resolve: keep running rather than exit immediately
            std::future::pending::<()>().await;
        }
    };

    let last = generate::watch(
        &client,
        &source,
        args.count,
        Duration::from_secs(interval.max(1)),
        &mut rng,
        |generation| print_generation(generation, args.json),
        shutdown,
    )
    .await?;

    Ok(if last.is_some() { 0 } else { 2 })
}

// Prints the payload either as JSON or as a table
fn print_generation(generation: &Generation, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(generation)?;
        println!("{}", json_output);
    } else {
        print_table(generation);
    }
    Ok(())
}

// Prints the picked contributors as a human-readable table
fn print_table(generation: &Generation) {
    let contributors = &generation.props.random_contributors;

    println!("{:<25} {:<30} {:<50}", "LOGIN", "NAME", "AVATAR");
    println!("{}", "=".repeat(105));

    for contributor in contributors {
        println!(
            "{:<25} {:<30} {:<50}",
            contributor.login,
            truncate(contributor.display_name(), 30),
            truncate(&contributor.avatar_url, 50),
        );
    }

    println!();
    println!("📊 Summary:");
    println!("   👥 Picked: {}", contributors.len());
    println!("   🔁 Revalidate: every {}s", generation.revalidate);
}

// Shortens text for display, counting characters rather than bytes
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
