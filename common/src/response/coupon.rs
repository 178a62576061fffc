use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 优惠券对外展示信息, 不包含主键
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResCoupon {
    pub code: String,
    pub discount: Decimal,
    pub min_basket_value: Option<Decimal>,
}
