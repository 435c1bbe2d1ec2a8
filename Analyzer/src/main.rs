mod args;
mod output;

use std::process::ExitCode;
use std::time::Duration;

use args::{get_log_level_filter, parse_args, Args};
use dash_manifest::{analyze, FetchError, Source};
use output::render_json;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, Layer};

#[derive(Debug, Error)]
enum AnalyzerError {
    #[error(transparent)]
    Source(FetchError),

    #[error(transparent)]
    Analysis(#[from] dash_manifest::Error),

    #[error("Failed to marshal JSON: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Timed out after {0:?}")]
    DeadlineExceeded(Duration),

    #[error("Interrupted")]
    Interrupted,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = parse_args();

    // Logs go to stderr so stdout only carries the JSON summary
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_filter(get_log_level_filter(&args));
    let subscriber = tracing_subscriber::registry().with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global default subscriber");

    debug!("{:?}", args);

    match run(&args).await {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<String, AnalyzerError> {
    let source = Source::parse(&args.playlist).map_err(AnalyzerError::Source)?;
    let options = args.fetch_options();
    let deadline = args.timeout();

    info!("Analyzing playlist {}", source);
    let extraction = tokio::select! {
        result = tokio::time::timeout(deadline, analyze(&source, &options)) => match result {
            Ok(Err(e)) if e.is_timeout() => return Err(AnalyzerError::DeadlineExceeded(deadline)),
            Ok(extraction) => extraction?,
            Err(_) => return Err(AnalyzerError::DeadlineExceeded(deadline)),
        },
        _ = shutdown_signal() => {
            warn!("Received signal, cancelling...");
            return Err(AnalyzerError::Interrupted);
        }
    };

    for diagnostic in &extraction.diagnostics {
        warn!("{}", diagnostic);
    }
    info!(
        "Found {} video and {} audio stream(s)",
        extraction.summary.videos.len(),
        extraction.summary.audios.len()
    );

    Ok(render_json(&extraction.summary)?)
}

/// Resolves on Ctrl-C, or on SIGTERM where the platform has it.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
