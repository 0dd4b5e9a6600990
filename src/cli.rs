// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands share the same source options:
// - sample: run one regeneration cycle and print the payload
// - watch:  regenerate every --interval seconds until Ctrl-C
//
// Rust concepts:
// - #[command(flatten)]: reuse one Args struct in several subcommands
// - #[arg(env = ...)]: fall back to an environment variable
// =============================================================================

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_API_BASE, DEFAULT_PATH, DEFAULT_REPOSITORY};
use crate::generate::{MAX_CONTRIBUTORS, REVALIDATE_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "contrib-sampler",
    version,
    about = "Pick a random set of contributors from a project's all-contributors file",
    long_about = "contrib-sampler fetches an all-contributors file from GitHub and picks a \
                  random, duplicate-free set of contributors to feature on a homepage. \
                  It can run once or keep regenerating on a fixed interval."
)]
pub struct Cli {
    /// Show debug logs (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one regeneration cycle and print the result
    ///
    /// Example: contrib-sampler sample blitz-js/blitz --count 12
    Sample {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Regenerate on a fixed interval, printing each new result
    ///
    /// Example: contrib-sampler watch --interval 600 --json
    Watch {
        #[command(flatten)]
        source: SourceArgs,

        /// Seconds between regeneration cycles
        #[arg(long, default_value_t = REVALIDATE_SECS)]
        interval: u64,
    },
}

/// Where to fetch from and how much to pick
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Repository as owner/repo or a GitHub URL
    #[arg(default_value = DEFAULT_REPOSITORY)]
    pub repository: String,

    /// Path of the contributors file inside the repository
    #[arg(long, default_value = DEFAULT_PATH)]
    pub path: String,

    /// Number of contributors to pick
    #[arg(long, default_value_t = MAX_CONTRIBUTORS)]
    pub count: usize,

    /// Seed the random picks for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// GitHub API base URL (useful for GitHub Enterprise)
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// GitHub token; requests are anonymous without one
    #[arg(long, env = "GITHUB_AUTH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output the payload as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
