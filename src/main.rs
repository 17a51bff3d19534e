use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> vaguely::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vaguely=info")),
        )
        .init();

    vaguely::run().await
}
