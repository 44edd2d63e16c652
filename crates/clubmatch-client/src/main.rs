mod config;
mod form;
mod render;
mod submit;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use clubmatch_common::payload::PayloadTemplate;

use config::SubmitConfig;
use form::SurveyForm;
use submit::{SubmitClient, Submitter};

/// Submit survey answers to the club recommendation backend and print the
/// rendered response block.
#[derive(Debug, Parser)]
#[command(name = "clubmatch-client")]
struct Cli {
    /// Selected option of question 1 (omit if unanswered)
    #[arg(long)]
    q1: Option<String>,
    /// Selected option of question 2 (omit if unanswered)
    #[arg(long)]
    q2: Option<String>,
    /// Selected option of question 3 (omit if unanswered)
    #[arg(long)]
    q3: Option<String>,
    /// Selected option of question 4 (omit if unanswered)
    #[arg(long)]
    q4: Option<String>,
    /// Free-text answer to question 5
    #[arg(long, default_value = "")]
    q5: String,
    /// How many times the Q5 entry appears in the payload. The deployed
    /// backend was built against 3; change only together with the backend.
    #[arg(long, default_value_t = 3)]
    q5_repeats: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries only the rendered response.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = SubmitConfig::from_env();
    info!(endpoint = %config.endpoint, "configuration loaded");

    let survey = SurveyForm {
        q1: cli.q1,
        q2: cli.q2,
        q3: cli.q3,
        q4: cli.q4,
        q5: cli.q5,
    };
    let answers = survey.answers();

    let template = PayloadTemplate {
        q5_repeats: cli.q5_repeats,
    };
    let payload = template.render(&answers);
    info!(payload = %payload, "payload built");

    let submitter = Submitter::new(SubmitClient::new(config)?);
    match submitter.submit(&payload).await {
        Ok(response) => {
            info!(clubs = response.clubs.len(), status = %response.status, "response received");
            println!("{}", render::render_response(&response));
            Ok(())
        }
        Err(e) => {
            // One user-facing failure channel regardless of root cause; the
            // log line is the only place that distinguishes network, status
            // and decode failures.
            eprintln!("Submission failed. Please try again.");
            error!(error = %e, "submission failed");
            std::process::exit(1);
        }
    }
}
