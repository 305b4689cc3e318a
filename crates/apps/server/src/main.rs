mod config;
mod dataset;
mod routes;

use std::sync::Arc;

use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::dataset::DatasetHandle;
use crate::routes::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            std::process::exit(2);
        }
    };
    let addr = config.addr;

    let dataset = Arc::new(DatasetHandle::new());
    let state = AppState::new(config, dataset.clone());

    {
        let state = state.clone();
        tokio::spawn(async move {
            state
                .dataset
                .load_once(&state.http, &state.config.data, &state.config.schema)
                .await;
        });
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            std::process::exit(1);
        }
    };
    info!("carbon dashboard server listening on http://{addr}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("server error: {err}");
    }
}
