use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ApiError, ApiResult};

/// 创建优惠券
#[derive(Debug, Validate, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReqCoupon {
    #[validate(required(message = "优惠码不能为空"))]
    pub code: Option<String>,
    #[validate(required(message = "优惠金额不能为空"))]
    pub discount: Option<Decimal>,
    pub min_basket_value: Option<Decimal>,
}

/// 使用优惠券
#[derive(Debug, Validate, Deserialize, Serialize, Clone)]
pub struct ReqApply {
    #[validate(
        required(message = "优惠码不能为空"),
        length(min = 1, message = "优惠码不能为空")
    )]
    pub code: Option<String>,
    #[validate(required(message = "购物车不能为空"))]
    pub basket: Option<ReqBasket>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReqBasket {
    pub value: Decimal,
}

/// 批量查询优惠券: ?codes=a,b,c 或 ?codes=a&codes=b
#[derive(Debug, Validate, Deserialize, Serialize, Clone)]
pub struct ReqCouponCodes {
    #[validate(required(message = "codes 不能为空"))]
    pub codes: Option<Vec<String>>,
}

impl ReqCouponCodes {
    /// 解析原始查询字符串, 收集所有 codes 参数
    /// 参数不存在时 codes 为 None
    pub fn from_query(query: Option<&str>) -> ApiResult<Self> {
        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(query.unwrap_or_default())
            .map_err(|e| ApiError::Validation(format!("query 参数解析错误: {}", e)))?;

        let values = pairs
            .into_iter()
            .filter(|(key, _)| key == "codes")
            .map(|(_, value)| value)
            .collect::<Vec<String>>();

        Ok(Self {
            codes: if values.is_empty() { None } else { Some(values) },
        })
    }

    /// 按逗号拆分, 保留原始顺序与重复项, 忽略空白项
    pub fn code_list(&self) -> Vec<String> {
        self.codes
            .iter()
            .flatten()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .collect()
    }
}
