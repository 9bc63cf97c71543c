//! Miler CLI - create and reopen periodic milestones on GitLab or GitHub.

use std::process::exit;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use miler::{calendar, new_provider, probe, sync};

#[derive(Parser)]
#[command(name = "miler")]
#[command(version)]
#[command(about = "Periodic milestone creation for GitLab and GitHub projects")]
#[command(
    long_about = "Miler generates a rolling calendar of milestones (daily, weekly or monthly) \
and reconciles a project's milestones against it: missing ones are created and \
prematurely closed ones are reopened. The API flavor (GitLab or GitHub) is \
detected automatically from the base URL."
)]
struct Cli {
    /// Personal access token for the API
    #[arg(long, env = "MILER_TOKEN", hide_env_values = true)]
    token: String,

    /// Base URL of the API, e.g. https://gitlab.com or https://api.github.com
    #[arg(long, visible_alias = "url")]
    base_url: String,

    /// Namespace (group or user) the project lives under
    #[arg(long)]
    namespace: String,

    /// Project name
    #[arg(long)]
    project: String,

    /// Cadence of the generated milestones: daily, weekly or monthly
    #[arg(long, visible_alias = "interval", default_value = "daily")]
    time_interval: String,

    /// How many periods ahead to generate
    #[arg(long, default_value_t = 30)]
    advance: u32,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("miler=info,miler_cli=info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        tracing::error!("{err}");
        exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let kind =
        probe::detect_provider(&cli.base_url, &cli.token, &cli.namespace, &cli.project).await?;
    tracing::info!("Detected {kind} API at {}", cli.base_url);

    let provider = new_provider(kind, &cli.base_url, &cli.token)?;
    let project_id = provider
        .resolve_project_id(&cli.project, &cli.namespace)
        .await?;

    let interval = cli.time_interval.to_lowercase();
    let desired = calendar::generate(cli.advance, &interval, provider.due_date_format())?;

    // Creation and reactivation failures are reported but do not fail the
    // run; a partially synced project is still usable.
    if let Err(err) = sync::create_missing_milestones(provider.as_ref(), &project_id, &desired).await
    {
        tracing::error!("milestone creation failed: {err}");
    }
    match sync::reactivate_closed_milestones(provider.as_ref(), &project_id, &desired).await {
        Ok(reactivated) if !reactivated.is_empty() => {
            tracing::info!("Reopened {} closed milestone(s)", reactivated.len());
        }
        Ok(_) => {}
        Err(err) => tracing::error!("milestone reactivation failed: {err}"),
    }
    Ok(())
}
