//! Entry point for the `wild-drafter` binary.
#![forbid(unsafe_code)]

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    drafter_server::run().await.inspect_err(|err| {
        tracing::error!(error = %err, "wild-drafter failed");
    })?;
    Ok(())
}
