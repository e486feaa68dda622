use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::build_router;
use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(ctx: AppContext) -> AppResult<()> {
    let addr = ctx.config.bind_addr;
    if ctx.config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY not set; every classification request will fail");
    }

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, model = %ctx.config.openai_model, "listening");
    info!("  POST http://{addr}/classify-ticket/");

    axum::serve(listener, build_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
}
