use anyhow::{Context, Result};
use callscribe_core::{AppConfig, PipelineError, RequestError};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "callscribe.toml";
const FAILURE_EXIT_CODE: u8 = 1;

#[derive(Parser)]
#[command(name = "callscribe", about = "Speaker-labelled transcripts of recorded calls")]
struct Cli {
    /// Path to the configuration file (optional unless given explicitly)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Audio file to transcribe
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the transcript
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Config file (if any) plus `API_URL` / `API_KEY` from the environment.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {path:?}"))?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG);
            if default_path.exists() {
                AppConfig::load_from_file(&default_path)
                    .with_context(|| format!("failed to load config from {default_path:?}"))?
            } else {
                AppConfig::default()
            }
        }
    };

    config.apply_env_overrides();
    Ok(apply_cli_overrides(cli, config))
}

fn apply_cli_overrides(cli: &Cli, mut config: AppConfig) -> AppConfig {
    if let Some(input) = &cli.input {
        config.input.path = input.clone();
    }
    if let Some(output) = &cli.output {
        config.output.path = output.clone();
    }
    config
}

fn init_tracing(log_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false),
    );

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")
}

/// How a failed run is reported: HTTP answers get their status and body,
/// everything else gets the full cause chain.
#[derive(Debug, PartialEq, Eq)]
enum FailureReport<'a> {
    Http { status: u16, body: &'a str },
    Other(String),
}

fn classify_failure(err: &PipelineError) -> FailureReport<'_> {
    match err.request_error() {
        Some(RequestError::Status { status, body }) => FailureReport::Http {
            status: *status,
            body,
        },
        _ => FailureReport::Other(error_chain(err)),
    }
}

fn report_failure(err: &PipelineError) -> ExitCode {
    match classify_failure(err) {
        FailureReport::Http { status, body } => {
            tracing::error!(status, body = %body, "HTTP request failed: {err}");
        }
        FailureReport::Other(message) => tracing::error!("An error occurred: {message}"),
    }
    ExitCode::from(FAILURE_EXIT_CODE)
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

async fn run(cli: Cli) -> Result<Result<String, PipelineError>> {
    // A missing .env is fine; the variables may come from the real environment.
    let _ = dotenvy::dotenv();

    let config = load_config(&cli)?;
    init_tracing(&config.general.log_level)?;

    tracing::info!("callscribe starting");
    if config.api.base_url.is_empty() || config.api.api_key.is_empty() {
        tracing::warn!(
            "API_URL or API_KEY is empty; requests will fail once the upload starts"
        );
    }

    let service = callscribe_service::HttpTranscriptionService::new(&config.api)
        .context("failed to build HTTP client")?;
    let pipeline = callscribe_pipeline::Pipeline::new(&config, Box::new(service));

    Ok(pipeline.run().await)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(Ok(transcript)) => {
            tracing::info!("Transcription saved successfully:\n{transcript}");
            ExitCode::SUCCESS
        }
        Ok(Err(err)) => report_failure(&err),
        Err(err) => {
            // Tracing may not be installed yet when setup fails.
            eprintln!("An error occurred: {err:#}");
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callscribe_core::TranscriptionError;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["callscribe"]);
        assert!(cli.config.is_none());
        assert!(cli.input.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_cli_overrides_paths() {
        let cli = Cli::parse_from(["callscribe", "-i", "call.ogg", "--output", "call.txt"]);
        let config = apply_cli_overrides(&cli, AppConfig::default());
        assert_eq!(config.input.path, PathBuf::from("call.ogg"));
        assert_eq!(config.output.path, PathBuf::from("call.txt"));
    }

    #[test]
    fn test_cli_without_paths_keeps_config() {
        let cli = Cli::parse_from(["callscribe"]);
        let config = apply_cli_overrides(&cli, AppConfig::default());
        assert_eq!(config.input.path, PathBuf::from("./recording.ogg"));
        assert_eq!(config.output.path, PathBuf::from("recording-transcript.txt"));
    }

    #[test]
    fn test_classify_failure_http_status() {
        let err = PipelineError::from(TranscriptionError::Upload(RequestError::Status {
            status: 401,
            body: "Invalid API key".to_string(),
        }));
        assert_eq!(
            classify_failure(&err),
            FailureReport::Http {
                status: 401,
                body: "Invalid API key"
            }
        );
    }

    #[test]
    fn test_classify_failure_transport_is_other() {
        let err = PipelineError::from(TranscriptionError::Upload(RequestError::Transport(
            "connection refused".to_string(),
        )));
        assert_eq!(
            classify_failure(&err),
            FailureReport::Other(
                "error uploading audio file: request failed: connection refused".to_string()
            )
        );
    }

    #[test]
    fn test_classify_failure_service_error_is_other() {
        let err = PipelineError::from(TranscriptionError::TranscriptionFailed(
            "bad audio".to_string(),
        ));
        assert_eq!(
            classify_failure(&err),
            FailureReport::Other("transcription failed: bad audio".to_string())
        );
    }

    #[test]
    fn test_report_failure_exits_with_one() {
        let err = PipelineError::from(TranscriptionError::NoWords);
        assert_eq!(report_failure(&err), ExitCode::from(1));
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        let cli = Cli::parse_from(["callscribe", "--config", "/nonexistent/callscribe.toml"]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn test_error_chain_includes_cause() {
        let err = PipelineError::from(TranscriptionError::Polling(RequestError::Transport(
            "connection reset".to_string(),
        )));
        assert_eq!(
            error_chain(&err),
            "error getting transcript: request failed: connection reset"
        );
    }
}
