use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = multisite::load_config();
    let snapshot = config.snapshot();

    let host = snapshot
        .get_string("http.host")
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = snapshot.get_u16("http.port").unwrap_or(3036);
    let addr = format!("{host}:{port}");

    let ax = multisite::build(&snapshot);

    info!(%addr, "multisite demo starting");

    ax.listen(addr).await?;

    Ok(())
}
