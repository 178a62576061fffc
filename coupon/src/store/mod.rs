use std::sync::Arc;

use axum::async_trait;

use common::application::{Application, Storage};
use common::error::{ApiError, ApiResult};

use crate::models::coupons::Coupon;

pub use memory::MemoryCouponStore;
pub use pgsql::PgCouponStore;

mod memory;
mod pgsql;

/// 优惠券存储
#[async_trait]
pub trait CouponStore: Send + Sync {
    /// 按优惠码精确查询, 优惠码大小写由调用方处理
    async fn find_by_code(&self, code: &str) -> ApiResult<Option<Coupon>>;

    /// 保存优惠券, 第一次保存时分配 id
    async fn save(&self, coupon: Coupon) -> ApiResult<Coupon>;
}

/// 根据配置创建存储
pub async fn from_config(cfg: &Application) -> ApiResult<Arc<dyn CouponStore>> {
    match cfg.storage {
        Storage::Memory => {
            tracing::info!("coupon store: memory");
            Ok(Arc::new(MemoryCouponStore::new()))
        }
        Storage::Postgres => {
            let pg = cfg
                .postgres
                .as_ref()
                .ok_or_else(|| ApiError::Config("postgres 字段不存在".to_string()))?;
            let pool = common::pgsql::connect(pg).await?;
            tracing::info!("coupon store: postgres");
            Ok(Arc::new(PgCouponStore::new(pool)))
        }
    }
}
