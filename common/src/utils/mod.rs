use std::path::PathBuf;

pub mod pgsql;

/// 读取环境变量配置文件, 文件不存在时忽略
pub fn init_read_config() {
    if let Err(e) = dotenv::from_path(PathBuf::from("./config/.env")) {
        tracing::debug!("./config/.env 未加载: {}", e);
    }
    dotenv::dotenv().ok();
}
