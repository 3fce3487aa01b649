use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use url::Url;

use poke_reviewer::github::api::{base_github_url, create_github_client};
use poke_reviewer::github::GithubRepoName;
use poke_reviewer::slack::client::base_slack_url;
use poke_reviewer::slack::SlackClient;
use poke_reviewer::{
    create_app, create_relay_process, BrandingConfig, RelayConfig, RelayProcess, ReviewRelay,
    ServerState,
};

#[derive(clap::Parser)]
struct Opts {
    /// Token used to look up pull requests on GitHub.
    #[arg(long, env = "GITHUB_TOKEN", value_parser = NonEmptyStringValueParser::new())]
    github_token: String,

    /// Bot token used to look up users and send messages on Slack.
    #[arg(long, env = "SLACK_TOKEN", value_parser = NonEmptyStringValueParser::new())]
    slack_token: String,

    /// Repository whose pull requests are built (`<owner>/<name>`).
    #[arg(long, env = "REPOSITORY")]
    repository: GithubRepoName,

    /// Domain of the reviewer email addresses mentioned in pull requests.
    #[arg(long, env = "REVIEWER_DOMAIN", value_parser = NonEmptyStringValueParser::new())]
    reviewer_domain: String,

    /// Port of the webhook server.
    #[arg(long, env = "PORT", default_value_t = 8888)]
    port: u16,

    #[arg(long, env = "GITHUB_API_URL", default_value_t = base_github_url())]
    github_api_url: Url,

    #[arg(long, env = "SLACK_API_URL", default_value_t = base_slack_url())]
    slack_api_url: Url,

    /// TOML file with the look of the review requests.
    #[arg(long = "branding", env = "BRANDING_FILE")]
    branding_file: Option<PathBuf>,
}

async fn server(state: ServerState, port: u16) -> anyhow::Result<()> {
    let app = create_app(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot bind to {addr}"))?;
    tracing::info!("PokeTheReviewer is listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

fn try_main(opts: Opts) -> anyhow::Result<()> {
    let branding = match &opts.branding_file {
        Some(path) => BrandingConfig::load(path)?,
        None => BrandingConfig::default(),
    };
    let config = RelayConfig {
        repository: opts.repository,
        reviewer_domain: opts.reviewer_domain,
        branding,
    };
    tracing::info!(
        "Relaying builds of {} to reviewers of @{}",
        config.repository,
        config.reviewer_domain
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Cannot build tokio runtime")?;

    let clients = RelayClients {
        github_token: SecretString::new(opts.github_token),
        github_api_url: opts.github_api_url,
        slack_token: SecretString::new(opts.slack_token),
        slack_api_url: opts.slack_api_url,
    };
    runtime.block_on(run(config, clients, opts.port))
}

struct RelayClients {
    github_token: SecretString,
    github_api_url: Url,
    slack_token: SecretString,
    slack_api_url: Url,
}

async fn run(config: RelayConfig, clients: RelayClients, port: u16) -> anyhow::Result<()> {
    let github = create_github_client(&clients.github_token, &clients.github_api_url)?;
    let slack = SlackClient::new(clients.slack_token, &clients.slack_api_url)?;
    let relay = ReviewRelay::new(config, github, slack)?;

    let RelayProcess {
        delivery_tx,
        relay_process,
    } = create_relay_process(relay);
    let state = ServerState::new(delivery_tx);

    tokio::select! {
        () = relay_process => {
            tracing::warn!("Relay process has ended");
            Ok(())
        },
        res = server(state, port) => {
            tracing::warn!("Server has ended: {res:?}");
            res
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let opts = Opts::parse();
    if let Err(error) = try_main(opts) {
        eprintln!("Error: {error:?}");
        std::process::exit(1);
    }
}
