use axum::extract::FromRequest;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{async_trait, Form, Json, RequestExt};
use http::header::CONTENT_TYPE;
use validator::Validate;

use crate::error::ApiError;

pub mod coupon;

/// 存储HTTPBody数据, 提取后已经通过 [`Validate`] 校验
#[derive(Debug)]
pub struct AppExtractor<T> {
    pub inner: T,
}

#[async_trait]
impl<S, B, T> FromRequest<S, B> for AppExtractor<T>
where
    B: Send + 'static,
    S: Send + Sync,
    T: Validate + 'static,
    Json<T>: FromRequest<(), B>,
    Form<T>: FromRequest<(), B>,
{
    type Rejection = Response;

    async fn from_request(req: Request<B>, _state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError::Validation("缺少 content-type".to_string()).into_response()
            })?;

        let inner = if content_type.starts_with("application/json") {
            let Json(inner) = req.extract::<Json<T>, _>().await.map_err(|err| {
                ApiError::Validation(format!("json 参数解析错误: {}", err.into_response().status()))
                    .into_response()
            })?;
            inner
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(inner) = req.extract::<Form<T>, _>().await.map_err(|err| {
                ApiError::Validation(format!(
                    "x-www-form-urlencoded 参数解析错误: {}",
                    err.into_response().status()
                ))
                .into_response()
            })?;
            inner
        } else {
            return Err(StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response());
        };

        inner
            .validate()
            .map_err(|e| ApiError::from(e).into_response())?;

        Ok(Self { inner })
    }
}
