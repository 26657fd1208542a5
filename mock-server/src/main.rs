use mock_server::ServiceOptions;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let options = ServiceOptions {
        engineer_item_get: std::env::var("ENGINEER_ITEM_GET").is_ok_and(|v| v == "1" || v == "true"),
    };
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, engineer_item_get = options.engineer_item_get, "listening");
    mock_server::run_with(listener, options).await
}
