use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::value::Value;

use crate::error::{ApiError, ApiResult};

/// 默认配置文件
pub const APPLICATION_FILE: &str = "application.yaml";
/// 配置文件模板, 配置文件不存在时复制一份
pub const EXAMPLE_FILE: &str = ".example.yaml";

/// 优惠券存储后端
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Storage {
    Memory,
    Postgres,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Application {
    // 服务地址
    pub host: String,
    // 服务端口
    pub port: u16,
    // 日志级别: trace/debug/info/warn/error
    pub log_level: String,
    pub storage: Storage,
    pub postgres: Option<PostgresConfig>,
}

impl Application {
    /// 读取配置文件, 路径可以通过环境变量 APP_CONFIG 指定
    pub async fn init() -> ApiResult<Self> {
        let filename = dotenv::var("APP_CONFIG").unwrap_or_else(|_| APPLICATION_FILE.to_string());
        Self::load(filename).await
    }

    pub async fn load<P: AsRef<Path>>(filename: P) -> ApiResult<Self> {
        let cfg = Self::file_get_content(filename.as_ref()).await?;
        Self::from_value(&cfg)
    }

    pub fn from_value(cfg: &Value) -> ApiResult<Self> {
        let storage = Self::analysis::<Storage>("storage", cfg)?;
        let postgres = match storage {
            Storage::Postgres => Some(Self::analysis::<PostgresConfig>("postgres", cfg)?),
            Storage::Memory => Self::analysis::<PostgresConfig>("postgres", cfg).ok(),
        };

        Ok(Application {
            host: Self::analysis::<String>("host", cfg)?,
            port: Self::analysis::<u16>("port", cfg)?,
            log_level: Self::analysis::<String>("log_level", cfg)
                .unwrap_or_else(|_| "info".to_string()),
            storage,
            postgres,
        })
    }

    /// 服务监听地址
    pub fn socket_addr(&self) -> ApiResult<SocketAddr> {
        let ip = self
            .host
            .parse::<IpAddr>()
            .map_err(|e| ApiError::Config(format!("host {} 格式错误: {}", self.host, e)))?;

        Ok(SocketAddr::new(ip, self.port))
    }

    fn analysis<T: DeserializeOwned>(key: &str, value: &Value) -> ApiResult<T> {
        let val = match value.get(key) {
            Some(value) => value,
            None => return Err(ApiError::Config(format!("{} 字段不存在", key))),
        };
        Ok(serde_yaml::from_value::<T>(val.clone())?)
    }

    /// 读取文件内容, 文件不存在时从模板创建
    async fn file_get_content(filename: &Path) -> ApiResult<Value> {
        match tokio::fs::read(filename).await {
            Ok(file_content) => serde_yaml::from_slice::<Value>(&file_content).map_err(|e| {
                tracing::error!("请检查 {} 配置信息! err: {}", filename.display(), e);
                ApiError::Config(e.to_string())
            }),
            Err(_e) => {
                tracing::warn!("{} 不存在, 正在创建配置文件 ...", filename.display());
                let copy_filename = filename
                    .parent()
                    .map(|dir| dir.join(EXAMPLE_FILE))
                    .unwrap_or_else(|| PathBuf::from(EXAMPLE_FILE));
                match tokio::fs::copy(&copy_filename, filename).await {
                    Ok(_) => {
                        tracing::warn!("配置文件 {} 创建成功, 请填写配置信息!", filename.display());
                        Err(ApiError::Config("请重新填写配置信息".to_string()))
                    }
                    Err(e) => {
                        tracing::error!("应用程序启动失败, 没有找到原始配置文件, err: {}", e);
                        Err(ApiError::Config(e.to_string()))
                    }
                }
            }
        }
    }
}

/// postgres 数据库配置参数
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PostgresConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub port: u16,
    pub db_name: String,
    pub pool_size: u32,
}

impl PostgresConfig {
    /// 连接串, 环境变量 DATABASE_URL 优先
    pub fn dsn(&self) -> String {
        dotenv::var("DATABASE_URL").unwrap_or_else(|_| {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                self.username, self.password, self.host, self.port, self.db_name
            )
        })
    }
}
