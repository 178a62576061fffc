use axum::async_trait;
use tokio::sync::RwLock;

use common::error::ApiResult;

use super::CouponStore;
use crate::models::coupons::Coupon;

#[derive(Default)]
struct Inner {
    next_id: i64,
    coupons: Vec<Coupon>,
}

/// 内存存储, 用于本地运行和测试
#[derive(Default)]
pub struct MemoryCouponStore {
    inner: RwLock<Inner>,
}

impl MemoryCouponStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CouponStore for MemoryCouponStore {
    async fn find_by_code(&self, code: &str) -> ApiResult<Option<Coupon>> {
        let inner = self.inner.read().await;
        Ok(inner.coupons.iter().find(|c| c.code == code).cloned())
    }

    async fn save(&self, coupon: Coupon) -> ApiResult<Coupon> {
        let mut inner = self.inner.write().await;

        if let Some(id) = coupon.id {
            if let Some(stored) = inner.coupons.iter_mut().find(|c| c.id == Some(id)) {
                *stored = coupon.clone();
                return Ok(coupon);
            }
        }

        inner.next_id += 1;
        let saved = coupon.with_id(inner.next_id);
        inner.coupons.push(saved.clone());

        Ok(saved)
    }
}
