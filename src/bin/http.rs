#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use task_planner::{Planner, PlannerConfig, http_api, logging};

    if let Err(e) = logging::init_tracing(false) {
        eprintln!("failed to initialize logging: {e}");
    }

    let config = PlannerConfig::load()?;
    let addr: SocketAddr = config.http.addr.parse()?;
    let planner = Planner::new(&config);
    if !planner.has_remote() {
        tracing::warn!("no producer endpoint configured, plans will come from templates");
    }

    println!("task-planner HTTP API listening on http://{addr}");
    http_api::serve(addr, planner).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
