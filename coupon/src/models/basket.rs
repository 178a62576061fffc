use rust_decimal::Decimal;
use serde::Serialize;

/// 购物车优惠计算结果, 不可变
/// 使用优惠券只记录优惠金额和是否成功, value 保持不变
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    pub value: Decimal,
    pub applied_discount: Option<Decimal>,
    pub application_successful: bool,
}

impl Basket {
    pub fn new(value: Decimal) -> Self {
        Self {
            value,
            applied_discount: None,
            application_successful: false,
        }
    }

    /// 返回新的购物车, 优惠金额 <= 0 时沿用之前的优惠并标记为失败
    pub fn apply_discount(&self, discount: Decimal) -> Basket {
        if discount > Decimal::ZERO {
            return Basket {
                value: self.value,
                applied_discount: Some(discount),
                application_successful: true,
            };
        }

        Basket {
            value: self.value,
            applied_discount: self.applied_discount,
            application_successful: false,
        }
    }
}
