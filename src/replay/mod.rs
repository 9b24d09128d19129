//! Replay 模块 - 会话回放
//!
//! 此模块提供回放端的全部功能,包括:
//! - 数据库协作方 trait（连接工厂 / 连接 / 游标）
//! - 基于 rusqlite 的自带实现（`sqlite` feature）
//! - 观察槽（失败语句与未知命令的上报通道）
//! - 会话回放器本体

pub mod connector;
pub mod replayer;
pub mod sink;

pub use connector::{Connection, Connector, Cursor};
pub use replayer::{Replayer, ReplayStats};
pub use sink::{MemorySink, ReportSink, StderrSink};

#[cfg(feature = "sqlite")]
pub use connector::{SqliteConnection, SqliteConnector, SqliteCursor};
