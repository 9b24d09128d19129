//! 连接配置模块
//!
//! 回放使用一组固定的、由外部配置的连接参数，参数不从日志内容推导。
//! 每次 `Connect` 记录都用同一组参数开一个全新的连接。

use std::env;

/// 数据库连接参数
///
/// 对应协作方接口 `connect(host, user, credential, database)` 的四元组。
/// 具体驱动按需取用：例如 SQLite 只关心 `database`（作为文件路径），
/// 网络型驱动则四个字段都会用到。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectParams {
    /// 数据库主机
    pub host: String,

    /// 登录用户名
    pub user: String,

    /// 登录凭证（可以为空）
    pub password: String,

    /// 目标数据库 / schema
    pub database: String,
}

impl Default for ConnectParams {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            user: "root".to_string(),
            password: String::new(),
            database: "replay".to_string(),
        }
    }
}

impl ConnectParams {
    /// 创建一组参数
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            database: database.into(),
        }
    }

    /// 从环境变量读取参数
    ///
    /// 读取 `GENLOG_HOST` / `GENLOG_USER` / `GENLOG_PASSWORD` / `GENLOG_DB`，
    /// 缺失的变量使用 [`ConnectParams::default`] 中的对应值。
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("GENLOG_HOST").unwrap_or(defaults.host),
            user: env::var("GENLOG_USER").unwrap_or(defaults.user),
            password: env::var("GENLOG_PASSWORD").unwrap_or(defaults.password),
            database: env::var("GENLOG_DB").unwrap_or(defaults.database),
        }
    }

    /// 替换目标数据库
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// 替换主机
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// 替换用户名
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// 替换凭证
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}
