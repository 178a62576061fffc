use axum::async_trait;
use rust_decimal::Decimal;
use sqlx::Row;

use common::error::ApiResult;
use common::pgsql::ConnPool;

use super::CouponStore;
use crate::models::coupons::Coupon;

/// postgres 存储
/// 表结构: coupons(id BIGSERIAL, code TEXT, discount NUMERIC(10,2), min_basket_value NUMERIC(10,2))
pub struct PgCouponStore {
    pool: ConnPool,
}

impl PgCouponStore {
    pub fn new(pool: ConnPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CouponStore for PgCouponStore {
    async fn find_by_code(&self, code: &str) -> ApiResult<Option<Coupon>> {
        Ok(sqlx::query(
            "SELECT id,code,discount,min_basket_value FROM coupons WHERE code = $1 ORDER BY id ASC LIMIT 1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?
        .map(|row| Coupon {
            id: Some(row.get::<i64, &str>("id")),
            code: row.get("code"),
            discount: row.get::<Decimal, &str>("discount"),
            min_basket_value: row.get::<Option<Decimal>, &str>("min_basket_value"),
        }))
    }

    async fn save(&self, coupon: Coupon) -> ApiResult<Coupon> {
        if let Some(id) = coupon.id {
            let rows_num = sqlx::query(
                "UPDATE coupons SET code = $1, discount = $2, min_basket_value = $3 WHERE id = $4",
            )
            .bind(&coupon.code)
            .bind(coupon.discount)
            .bind(coupon.min_basket_value)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

            if rows_num > 0 {
                return Ok(coupon);
            }
        }

        let id: i64 = sqlx::query(
            "INSERT INTO coupons (code,discount,min_basket_value) VALUES ($1,$2,$3) RETURNING id",
        )
        .bind(&coupon.code)
        .bind(coupon.discount)
        .bind(coupon.min_basket_value)
        .fetch_one(&self.pool)
        .await?
        .get::<i64, &str>("id");

        Ok(coupon.with_id(id))
    }
}
