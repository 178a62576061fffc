use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::io::Error;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use validator::ValidationErrors;

use crate::response::ApiResponse;

/// 返回资源类型
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// 系统定义错误
/// 业务错误: InvalidCoupon / InvalidBasket / NotFound
/// 基础设施错误: Database / Config / Error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ApiError {
    /// 优惠券创建参数不合法
    InvalidCoupon(String),
    /// 购物车金额为负数
    InvalidBasket(String),
    /// 优惠码不存在
    NotFound(String),
    /// 请求参数校验失败
    Validation(String),
    Database(String),
    Config(String),
    Error(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidCoupon(_) | ApiError::InvalidBasket(_) | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Config(_) | ApiError::Error(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::InvalidCoupon(err) => write!(f, "invalid coupon: {}", err),
            ApiError::InvalidBasket(err) => write!(f, "invalid basket: {}", err),
            ApiError::NotFound(err) => write!(f, "not found: {}", err),
            ApiError::Validation(err) => write!(f, "validation failed: {}", err),
            ApiError::Database(err) => write!(f, "database error: {}", err),
            ApiError::Config(err) => write!(f, "config error: {}", err),
            ApiError::Error(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<std::io::Error> for ApiError {
    fn from(_e: Error) -> Self {
        ApiError::Error(_e.to_string())
    }
}

/// 将 validator 的错误信息展开为 字段 => 错误描述
pub fn format_errors(errors: ValidationErrors) -> Vec<HashMap<String, String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, err)| {
            let message = err
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => e.code.to_string(),
                })
                .collect::<Vec<String>>()
                .join(",");

            let mut map_data = HashMap::new();
            map_data.insert(field.to_owned(), message);
            map_data
        })
        .collect::<Vec<HashMap<String, String>>>()
}

impl From<ValidationErrors> for ApiError {
    fn from(value: ValidationErrors) -> Self {
        let detail = format_errors(value)
            .into_iter()
            .flat_map(|item| item.into_iter().map(|(k, v)| format!("{}: {}", k, v)))
            .collect::<Vec<String>>()
            .join("; ");

        ApiError::Validation(detail)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(_e: sqlx::Error) -> Self {
        ApiError::Database(_e.to_string())
    }
}

impl From<&str> for ApiError {
    fn from(_e: &str) -> Self {
        ApiError::Error(_e.to_string())
    }
}

impl From<String> for ApiError {
    fn from(_e: String) -> Self {
        ApiError::Error(_e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::Error(value.to_string())
    }
}

impl From<serde_yaml::Error> for ApiError {
    fn from(value: serde_yaml::Error) -> Self {
        ApiError::Config(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // 错误详情只写日志, 不返回给调用方
        match &self {
            ApiError::Database(_) | ApiError::Config(_) | ApiError::Error(_) => {
                tracing::error!("{}", self)
            }
            _ => tracing::warn!("{}", self),
        }

        ApiResponse::<()>::status(self.status_code())
            .json()
            .into_response()
    }
}
