use std::sync::Arc;

use axum::middleware as AxumMiddleware;
use axum::routing::{get, post};
use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::controller::coupons::CouponController;
use crate::middleware;
use crate::AppState;

pub fn routers(state: Arc<AppState>) -> Router {
    Router::new().nest(
        "/api",
        Router::new()
            .route("/apply", post(CouponController::apply))
            .route("/create", post(CouponController::create))
            .route("/coupons", get(CouponController::coupons))
            .layer(
                ServiceBuilder::new()
                    .layer(AxumMiddleware::from_fn(middleware::access_log))
                    .layer(Extension(state)),
            ),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::service::CouponService;
    use crate::store::MemoryCouponStore;

    fn app() -> Router {
        routers(Arc::new(AppState {
            coupon_service: CouponService::new(Arc::new(MemoryCouponStore::new())),
        }))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = hyper::body::to_bytes(resp.into_body()).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        serde_json::from_str(&body_text(resp).await).unwrap()
    }

    async fn create(app: &Router, code: &str, discount: &str, min: Option<&str>) -> StatusCode {
        let body = format!(
            r#"{{"code":"{}","discount":{},"minBasketValue":{}}}"#,
            code,
            discount,
            min.unwrap_or("null")
        );
        app.clone()
            .oneshot(post_json("/api/create", &body))
            .await
            .unwrap()
            .status()
    }

    async fn apply(app: &Router, code: &str, value: &str) -> axum::response::Response {
        let body = format!(r#"{{"code":"{}","basket":{{"value":{}}}}}"#, code, value);
        app.clone()
            .oneshot(post_json("/api/apply", &body))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_returns_created_coupon() {
        let resp = app()
            .oneshot(post_json(
                "/api/create",
                r#"{"code":"SAVE10","discount":10.00,"minBasketValue":20.00}"#,
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(
            body_text(resp).await,
            r#"{"code":"save10","discount":10.00,"minBasketValue":20.00}"#
        );
    }

    #[tokio::test]
    async fn create_rejects_invalid_coupons() {
        let app = app();
        assert_eq!(
            create(&app, "neg", "-1", None).await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            create(&app, "low", "10", Some("5")).await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(create(&app, "", "1", None).await, StatusCode::BAD_REQUEST);

        let resp = app
            .oneshot(post_json("/api/create", r#"{"discount":1.0}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(resp).await.is_empty());
    }

    #[tokio::test]
    async fn apply_scenarios() {
        let app = app();
        assert_eq!(
            create(&app, "SAVE10", "10.00", Some("20.00")).await,
            StatusCode::CREATED
        );

        let resp = apply(&app, "save10", "50.00").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["value"].to_string(), "50.00");
        assert_eq!(body["appliedDiscount"].to_string(), "10.00");
        assert_eq!(body["applicationSuccessful"], Value::Bool(true));

        // 购物车金额为 0: 优惠未生效
        let resp = apply(&app, "save10", "0.00").await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert!(body_text(resp).await.is_empty());

        let resp = apply(&app, "save10", "-5.00").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(resp).await.is_empty());

        let resp = apply(&app, "nope", "50").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(body_text(resp).await.is_empty());
    }

    #[tokio::test]
    async fn apply_echoes_basket_value_exactly() {
        let app = app();
        create(&app, "big", "1", None).await;

        // 超出 f64 精度的金额原样返回
        let resp = apply(&app, "big", "9007199254740993").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_text(resp).await,
            r#"{"value":9007199254740993,"appliedDiscount":1,"applicationSuccessful":true}"#
        );

        let resp = apply(&app, "big", "10.10").await;
        assert_eq!(body_json(resp).await["value"].to_string(), "10.10");
    }

    #[tokio::test]
    async fn apply_requires_body_fields() {
        let resp = app()
            .oneshot(post_json("/api/apply", r#"{"code":"save10"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(resp).await.is_empty());
    }

    #[tokio::test]
    async fn coupons_lookup() {
        let app = app();
        create(&app, "a", "1", None).await;
        create(&app, "b", "2.50", Some("3.00")).await;

        let resp = app
            .clone()
            .oneshot(get("/api/coupons?codes=A,missing,b"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_text(resp).await,
            r#"[{"code":"a","discount":1,"minBasketValue":null},{"code":"b","discount":2.50,"minBasketValue":3.00}]"#
        );

        let resp = app
            .clone()
            .oneshot(get("/api/coupons?codes=x,y"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(body_text(resp).await.is_empty());

        let resp = app.oneshot(get("/api/coupons")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(resp).await.is_empty());
    }

    #[tokio::test]
    async fn coupons_lookup_accepts_repeated_keys() {
        let app = app();
        create(&app, "a", "1", None).await;
        create(&app, "b", "2", None).await;

        let resp = app
            .clone()
            .oneshot(get("/api/coupons?codes=b&codes=a,missing&codes=B"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let codes = body_json(resp)
            .await
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["code"].as_str().unwrap().to_string())
            .collect::<Vec<String>>();
        assert_eq!(codes, vec!["b", "a", "b"]);

        // 参数存在但没有匹配的优惠码
        let resp = app.oneshot(get("/api/coupons?codes=&codes=")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(body_text(resp).await.is_empty());
    }

    #[tokio::test]
    async fn apply_accepts_form_body() {
        let app = app();
        create(&app, "form", "4", None).await;

        let req = Request::builder()
            .method("POST")
            .uri("/api/apply")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("code=FORM"))
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        // basket 缺失, 校验失败
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = Request::builder()
            .method("POST")
            .uri("/api/apply")
            .header("content-type", "text/plain")
            .body(Body::from("code=FORM"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn apply_ignores_min_basket_value() {
        let app = app();
        create(&app, "SAVE10", "10.00", Some("20.00")).await;

        let resp = apply(&app, "SAVE10", "5").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["appliedDiscount"].to_string(), "10.00");
        assert_eq!(body["value"].to_string(), "5");
    }
}
