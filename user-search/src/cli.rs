use clap::Parser;
use std::num::NonZero;

/// Search wiki users the same way the comment editor's `@` completion does.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Cli {
    /// Whether to output results as JSON.
    #[clap(long, default_value = "false")]
    pub json: bool,

    /// Maximum number of users to return.
    #[clap(long, short = 'l', default_value = "10")]
    pub limit: NonZero<usize>,

    /// Base URL of the wiki server.
    #[clap(long, default_value = "http://localhost:5000")]
    pub base_url: String,

    /// Abort the request after this many milliseconds. No timeout by default.
    #[clap(long)]
    pub timeout_ms: Option<u64>,

    /// Query text (the part typed after `@`).
    pub query: Option<String>,
}
