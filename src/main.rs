use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use biosynth_client::{
    api::{SynthesisClient, SynthesisResponse},
    config::{Config, LogFormat},
    error::PollError,
    form::{FormState, FormUpdate},
    poll::Poller,
    presenter::{render_summary, resolve_result, ResultSummary, ResultView},
};

/// Command-line client for the BioSynth synthesis API
#[derive(Parser, Debug)]
#[command(name = "biosynth", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a synthesis request and show its result
    Submit {
        /// Host organism, e.g. homo_sapiens
        #[arg(long, default_value = "homo_sapiens")]
        host: String,

        /// Desired trait, e.g. "high bone density"
        #[arg(long = "trait")]
        desired_trait: String,

        /// Skip simulated codon optimization
        #[arg(long)]
        no_optimize: bool,

        /// Skip safety screening
        #[arg(long)]
        no_safety_check: bool,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the synthesis API status
    Status,

    /// Show the result for a request id
    Result {
        /// Request id returned by a submission
        request_id: String,

        /// Poll until the job completes or fails
        #[arg(long)]
        wait: bool,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        "BioSynth client starting"
    );

    let client = match SynthesisClient::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to initialize synthesis client");
            return Err(e.into());
        }
    };

    match cli.command {
        Command::Submit {
            host,
            desired_trait,
            no_optimize,
            no_safety_check,
            json,
        } => {
            let mut form = FormState::new();
            form.update_form_data(
                FormUpdate::new()
                    .host_organism(host)
                    .desired_trait(desired_trait)
                    .optimize(!no_optimize)
                    .safety_check(!no_safety_check),
            );

            let Some(response) = form.submit(&client).await else {
                for (field, message) in form.errors().iter() {
                    eprintln!("{}: {}", field, message);
                }
                std::process::exit(2);
            };

            let view = resolve_result(&client, &response.request_id).await;
            print_view(&view, json)?;
        }
        Command::Status => {
            let status = client.get_status().await?;
            println!("{}", status.status);
            if let Some(message) = status.message {
                println!("{}", message);
            }
        }
        Command::Result {
            request_id,
            wait,
            json,
        } => {
            let view = if wait {
                wait_for_result(&client, &config, &request_id).await?
            } else {
                resolve_result(&client, &request_id).await
            };
            print_view(&view, json)?;
        }
    }

    Ok(())
}

async fn wait_for_result(
    client: &SynthesisClient,
    config: &Config,
    request_id: &str,
) -> anyhow::Result<ResultView> {
    let poller = Poller::from_config(&config.poll);
    let token = poller.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    let outcome = poller
        .poll_until(
            move || client.get_result(request_id),
            |response: &SynthesisResponse| response.status.is_terminal(),
        )
        .await;

    match outcome {
        Ok(response) => Ok(ResultView::Ready(response)),
        Err(PollError::Check(e)) => Ok(ResultView::Unavailable {
            message: format!(
                "Results for {} were not found or have expired: {}",
                request_id, e
            ),
            substitute: client.emergency_record(request_id).await,
        }),
        Err(e) => Err(e.into()),
    }
}

fn print_view(view: &ResultView, json: bool) -> anyhow::Result<()> {
    if let ResultView::Unavailable { message, .. } = view {
        eprintln!("{}", message);
    }
    let response = view.response();
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        print!("{}", render_summary(&ResultSummary::from_response(response)));
        println!("Recommendation:   {}", response.recommendation);
    }
    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
