use std::io::IsTerminal;
use std::time::Duration;

use clap::Parser;

use crate::github::{ClientConfig, DEFAULT_API_URL, MAX_PER_PAGE};
use crate::report::OutputFormat;

pub const USAGE_HINT: &str =
    r#"You need to provide repo. Example: "--repo owner/name --token YOUR_GITHUB_TOKEN""#;
pub const TOKEN_WARNING: &str = "WARNING: no GitHub API token provided (--token). \
     Unauthenticated requests are heavily rate limited.";

/// Rank a GitHub repository's users by comments, then by commits.
#[derive(Parser, Debug)]
#[command(name = "repostat", version, about, long_about = None)]
pub struct Cli {
    /// Repository to inspect, as owner/name
    #[arg(long, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// GitHub access token sent as `Authorization: token <TOKEN>`
    #[arg(long)]
    pub token: Option<String>,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Results requested per endpoint (only the first page is read)
    #[arg(long, default_value_t = MAX_PER_PAGE, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub per_page: u8,

    /// GitHub API base URL
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    pub timeout: u64,

    /// Suppress the spinner and the missing-token warning
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            token: self.token.clone(),
            per_page: self.per_page,
            timeout: Duration::from_secs(self.timeout),
            ..ClientConfig::default()
        }
    }

    /// The spinner is only drawn for a human watching stderr.
    pub fn show_spinner(&self) -> bool {
        !self.quiet && std::io::stderr().is_terminal()
    }
}
