use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber: stdout formatting filtered by `RUST_LOG`,
/// falling back to `default_directive` when it is unset
pub fn init(default_directive: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(default_directive.parse()?)
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(filter)
        .try_init()?;

    Ok(())
}
