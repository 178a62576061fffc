use sqlx::postgres::PgPoolOptions;

use crate::application::PostgresConfig;
use crate::error::ApiResult;

pub type ConnPool = sqlx::PgPool;

/// 创建数据库连接池, 由调用方持有并注入到存储层
pub async fn connect(cfg: &PostgresConfig) -> ApiResult<ConnPool> {
    let conn_pool = PgPoolOptions::new()
        .max_connections(cfg.pool_size)
        .connect(&cfg.dsn())
        .await?;

    tracing::info!(
        "postgres connected: {}:{}/{}",
        cfg.host,
        cfg.port,
        cfg.db_name
    );

    Ok(conn_pool)
}
