use reelstack::api;
use reelstack::logger::*;
use reelstack::server::*;
use reelstack::settings::*;
use std::fs;
use std::sync::Arc;
use tokio::signal;
use warp::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let settings = parse_settings(cli.settings.as_deref())?;
    logger.reload_filter(&settings.log.filter)?;
    info!(
        address = %settings.http.address,
        storage = %settings.storage.backend,
        session = %settings.session.backend,
        "settings loaded"
    );

    let address: std::net::SocketAddr = settings.http.address.parse()?;
    if !fs::metadata(&settings.http.cert_path)?.is_file() {
        return Err(anyhow::anyhow!(
            "TLS cert is not a regular file: {:?}",
            settings.http.cert_path
        ));
    }
    if !fs::metadata(&settings.http.key_path)?.is_file() {
        return Err(anyhow::anyhow!(
            "TLS key is not a regular file: {:?}",
            settings.http.key_path
        ));
    }

    // Storage connect failure is fatal: without the pool nothing can be
    // served, so exit instead of answering every request with a 500.
    let server = Arc::new(Server::try_new(&settings).await?);

    let api_v1 = warp::path("api")
        .and(warp::path("v1"))
        .and(api::v1::routes(server.clone()))
        .recover(api::v1::recover_error);

    warp::serve(api_v1)
        .tls()
        .cert_path(settings.http.cert_path.clone())
        .key_path(settings.http.key_path.clone())
        .bind_with_graceful_shutdown(address, async {
            signal::ctrl_c().await.expect("Could not register SIGINT");
        })
        .1
        .await;

    server.shutdown().await;

    Ok(())
}
