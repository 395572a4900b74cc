use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::menu::{FallbackMode, MenuOptions};

/// 存储引擎
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DbEngine {
    /// 持久化 SurrealDB (RocksDB)
    #[default]
    RocksDb,
    /// 进程内 SurrealDB，重启即丢失
    Memory,
}

impl FromStr for DbEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rocksdb" | "rocks" => Ok(DbEngine::RocksDb),
            "memory" | "mem" => Ok(DbEngine::Memory),
            other => Err(format!("unknown database engine: {other}")),
        }
    }
}

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库文件) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DB_ENGINE | rocksdb | rocksdb 或 memory |
/// | STORE_TIMEOUT_MS | 5000 | 单次存储调用超时(毫秒) |
/// | SNAPSHOT_CACHE_TTL_MS | 1000 | 菜单快照缓存时长(毫秒) |
/// | FALLBACK_MODE | open | 存储故障时: open 返回静态数据, closed 返回错误 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | - | 日志文件目录 (按天滚动) |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// DB_ENGINE=memory HTTP_PORT=8080 cargo run -p menu-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    pub db_engine: DbEngine,
    pub store_timeout_ms: u64,
    pub snapshot_cache_ttl_ms: u64,
    pub fallback_mode: FallbackMode,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置或无法解析的变量使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: env_parse("HTTP_PORT", 3000),
            db_engine: env_parse("DB_ENGINE", DbEngine::RocksDb),
            store_timeout_ms: env_parse("STORE_TIMEOUT_MS", 5000),
            snapshot_cache_ttl_ms: env_parse("SNAPSHOT_CACHE_TTL_MS", 1000),
            fallback_mode: env_parse("FALLBACK_MODE", FallbackMode::Open),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 数据库目录
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("menu.db")
    }

    pub fn menu_options(&self) -> MenuOptions {
        MenuOptions {
            store_timeout: Duration::from_millis(self.store_timeout_ms),
            cache_ttl: Duration::from_millis(self.snapshot_cache_ttl_ms),
            fallback: self.fallback_mode,
        }
    }

    /// 是否生产环境 (决定 Cookie 的 Secure 标记)
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: "./data".into(),
            http_port: 3000,
            db_engine: DbEngine::default(),
            store_timeout_ms: 5000,
            snapshot_cache_ttl_ms: 1000,
            fallback_mode: FallbackMode::default(),
            log_level: "info".into(),
            log_dir: None,
            environment: "development".into(),
        }
    }
}
