mod cli;
mod error;
mod github;
mod logging;
mod records;
mod report;
mod spinner;
mod stats;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, TOKEN_WARNING, USAGE_HINT};
use github::{GithubClient, RepoRef};
use spinner::Spinner;
use tracing::info;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let Some(repo) = cli.repo.as_deref() else {
        println!("{USAGE_HINT}");
        return;
    };

    if cli.token.is_none() && !cli.quiet {
        println!("{TOKEN_WARNING}");
    }

    // Every outcome ends with exit status 0; failures are reported, not raised.
    match grab_statistics(&cli, repo).await {
        Ok(output) => println!("{output}"),
        Err(e) => println!("Error: {e:#}"),
    }
}

/// Fetch both datasets, merge them and render the result.
async fn grab_statistics(cli: &Cli, repo: &str) -> Result<String> {
    let repo: RepoRef = repo.parse()?;
    let client = GithubClient::new(cli.client_config())?;

    let spinner = Spinner::start(
        &format!("Fetching comments and contributors for {repo}..."),
        cli.show_spinner(),
    );
    let (comments, contributors) = tokio::try_join!(
        client.comments(&repo),
        client.contributor_stats(&repo)
    )
    .with_context(|| format!("failed to fetch statistics for {repo}"))?;
    spinner.stop();

    info!(
        comments = comments.len(),
        contributors = contributors.len(),
        "fetched repository activity"
    );

    let ranked = stats::aggregate(&comments, &contributors);
    report::render(&ranked, cli.output)
}
