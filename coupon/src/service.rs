use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info};

use common::error::{ApiError, ApiResult};

use crate::models::basket::Basket;
use crate::models::coupons::Coupon;
use crate::store::CouponStore;

/// 优惠券业务逻辑, 存储通过构造函数注入
#[derive(Clone)]
pub struct CouponService {
    store: Arc<dyn CouponStore>,
}

impl CouponService {
    pub fn new(store: Arc<dyn CouponStore>) -> Self {
        Self { store }
    }

    /// 按优惠码查询, 忽略大小写
    pub async fn get_coupon(&self, code: &str) -> ApiResult<Option<Coupon>> {
        self.store.find_by_code(&code.to_lowercase()).await
    }

    /// 创建优惠券
    pub async fn create_coupon(
        &self,
        code: &str,
        discount: Decimal,
        min_basket_value: Option<Decimal>,
    ) -> ApiResult<Coupon> {
        let coupon = Coupon::new(code, discount, min_basket_value)?;
        self.store.save(coupon).await
    }

    /// 使用优惠券
    /// min_basket_value 目前不参与判断, 只区分购物车金额 正/零/负
    pub async fn apply(&self, basket: Basket, code: &str) -> ApiResult<Basket> {
        let coupon = self
            .get_coupon(code)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("coupon {}", code.to_lowercase())))?;

        if basket.value > Decimal::ZERO {
            Ok(basket.apply_discount(coupon.discount))
        } else if basket.value == Decimal::ZERO {
            Ok(basket)
        } else {
            error!(
                "Attempted to apply discount to a basket with negative value: {}",
                basket.value
            );
            Err(ApiError::InvalidBasket(format!(
                "basket value {} is negative",
                basket.value
            )))
        }
    }

    /// 批量查询, 保持输入顺序, 不存在的优惠码直接跳过
    pub async fn get_coupons(&self, codes: &[String]) -> ApiResult<Vec<Coupon>> {
        let mut coupons = Vec::with_capacity(codes.len());
        for code in codes {
            if let Some(coupon) = self.get_coupon(code).await? {
                coupons.push(coupon);
            }
        }

        info!("Found {} coupons for {} codes", coupons.len(), codes.len());
        Ok(coupons)
    }
}
