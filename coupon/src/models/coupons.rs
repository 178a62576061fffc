use rust_decimal::Decimal;

use common::error::{ApiError, ApiResult};
use common::response::coupon::ResCoupon;

/// 优惠券
/// id 由存储层在第一次保存时分配
#[derive(Debug, Clone, PartialEq)]
pub struct Coupon {
    pub id: Option<i64>,
    pub code: String,
    pub discount: Decimal,
    pub min_basket_value: Option<Decimal>,
}

impl Coupon {
    /// 校验参数并创建优惠券, 优惠码统一转为小写
    pub fn new(
        code: &str,
        discount: Decimal,
        min_basket_value: Option<Decimal>,
    ) -> ApiResult<Self> {
        if code.trim().is_empty() {
            return Err(ApiError::InvalidCoupon("coupon code cannot be empty".to_string()));
        }

        if discount < Decimal::ZERO {
            return Err(ApiError::InvalidCoupon(format!(
                "discount {} must not be negative",
                discount
            )));
        }

        // 最低消费小于优惠金额时, 使用后购物车金额可能为负
        if let Some(min_value) = min_basket_value {
            if min_value < discount {
                return Err(ApiError::InvalidCoupon(format!(
                    "min basket value {} is less than discount {}",
                    min_value, discount
                )));
            }
        }

        Ok(Self {
            id: None,
            code: code.to_lowercase(),
            discount,
            min_basket_value,
        })
    }

    pub fn with_id(self, id: i64) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}

impl From<&Coupon> for ResCoupon {
    fn from(coupon: &Coupon) -> Self {
        ResCoupon {
            code: coupon.code.clone(),
            discount: coupon.discount,
            min_basket_value: coupon.min_basket_value,
        }
    }
}
