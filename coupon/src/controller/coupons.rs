use std::sync::Arc;

use axum::extract::RawQuery;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Extension;
use tracing::{info, warn};
use validator::Validate;

use common::error::ApiError;
use common::request::coupon::{ReqApply, ReqCoupon, ReqCouponCodes};
use common::response::coupon::ResCoupon;
use common::{ApiResponse, AppExtractor};

use crate::models::basket::Basket;
use crate::AppState;

pub struct CouponController;

impl CouponController {
    /// 使用优惠券
    /// 404: 优惠码不存在, 409: 优惠未生效, 400: 购物车金额为负
    pub async fn apply(
        Extension(state): Extension<Arc<AppState>>,
        params: AppExtractor<ReqApply>,
    ) -> Response {
        info!("Applying coupon");
        let (code, basket) = match (params.inner.code, params.inner.basket) {
            (Some(code), Some(basket)) => (code, Basket::new(basket.value)),
            _ => return ApiError::Validation("code/basket 不能为空".to_string()).into_response(),
        };

        match state.coupon_service.apply(basket, &code).await {
            Ok(basket) if basket.application_successful => {
                info!("Applied coupon {}", code.to_lowercase());
                ApiResponse::response(basket).response_body()
            }
            Ok(_) => {
                warn!("Coupon {} was not applied", code.to_lowercase());
                ApiResponse::<()>::status(StatusCode::CONFLICT).response_body()
            }
            Err(e) => e.into_response(),
        }
    }

    /// 创建优惠券
    pub async fn create(
        Extension(state): Extension<Arc<AppState>>,
        params: AppExtractor<ReqCoupon>,
    ) -> Response {
        let inner = params.inner;
        let (code, discount) = match (inner.code, inner.discount) {
            (Some(code), Some(discount)) => (code, discount),
            _ => return ApiError::Validation("code/discount 不能为空".to_string()).into_response(),
        };
        info!("Attempting to create a new coupon with code: {}", code);

        match state
            .coupon_service
            .create_coupon(&code, discount, inner.min_basket_value)
            .await
        {
            Ok(coupon) => {
                info!("Coupon created successfully with id: {:?}", coupon.id);
                ApiResponse::created(ResCoupon::from(&coupon)).response_body()
            }
            Err(e) => e.into_response(),
        }
    }

    /// 批量查询优惠券 ?codes=a,b,c 或 ?codes=a&codes=b
    pub async fn coupons(
        Extension(state): Extension<Arc<AppState>>,
        RawQuery(query): RawQuery,
    ) -> Response {
        let params = match ReqCouponCodes::from_query(query.as_deref()) {
            Ok(params) => params,
            Err(e) => return e.into_response(),
        };
        if let Err(e) = params.validate() {
            return ApiError::from(e).into_response();
        }

        let codes = params.code_list();
        info!("Fetching coupons for {} codes", codes.len());

        match state.coupon_service.get_coupons(&codes).await {
            Ok(coupons) if coupons.is_empty() => {
                ApiResponse::<()>::status(StatusCode::NOT_FOUND).response_body()
            }
            Ok(coupons) => ApiResponse::response(
                coupons.iter().map(ResCoupon::from).collect::<Vec<ResCoupon>>(),
            )
            .response_body(),
            Err(e) => e.into_response(),
        }
    }
}
