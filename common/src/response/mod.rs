use axum::{
    body::Body,
    http::{response::Builder, Response as HttpResponse, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub mod coupon;

/// 统一响应: HTTP 状态码 + 可选的 JSON 数据
/// data 为 None 时响应体为空
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 + 数据
    pub fn response(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data: Some(data),
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data: Some(data),
        }
    }

    /// 只有状态码, 没有响应体
    pub fn status(status: StatusCode) -> Self {
        Self { status, data: None }
    }

    /// 这里必须返回一个 [`IntoResponse`] 才能符合第三方接口的需求
    pub fn json(&self) -> impl IntoResponse {
        self.response_body()
    }

    pub fn response_body(&self) -> Response {
        let builder = HttpResponse::builder()
            .status(self.status)
            .header("Access-Control-Allow-Origin", "*")
            .header("Cache-Control", "no-cache");

        let body = match &self.data {
            Some(data) => match serde_json::to_vec(data) {
                Ok(bytes) => bytes,
                Err(err) => {
                    tracing::error!("系统解析错误!!!, err: {}", err);
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            },
            None => return Self::empty(builder),
        };

        builder
            .header("Content-Type", "application/json; charset=UTF-8")
            .body(Body::from(body))
            .map(IntoResponse::into_response)
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }

    fn empty(builder: Builder) -> Response {
        builder
            .body(Body::empty())
            .map(IntoResponse::into_response)
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}
