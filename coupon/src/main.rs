use std::sync::Arc;

use tracing_subscriber::util::SubscriberInitExt;

use common::application::Application;
use common::error::{ApiError, ApiResult};

use crate::service::CouponService;

mod controller;
mod middleware;
mod models;
mod router;
mod service;
mod store;

#[derive(Clone)]
pub struct AppState {
    pub coupon_service: CouponService,
}

#[tokio::main]
async fn main() -> ApiResult<()> {
    common::init_read_config();
    let cfg = Application::init().await?;

    let level = cfg
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .finish()
        .init();

    let addr = cfg.socket_addr()?;
    let store = store::from_config(&cfg).await?;
    let app_state = Arc::new(AppState {
        coupon_service: CouponService::new(store),
    });

    let router = router::routers(app_state);

    tracing::info!("coupon-srv run at: {}", addr);
    axum::Server::bind(&addr)
        .serve(router.into_make_service())
        .await
        .map_err(|e| ApiError::Error(e.to_string()))
}
