//! # MySQL General Log Replay
//!
//! 一个 MySQL general log（通用查询日志）会话回放工具：解析抓取下来的
//! 日志文件，按原始文件顺序把每个客户端会话的命令重放到一个真实数据库上。
//!
//! ## 功能特性
//!
//! - **严格的格式校验**: 固定三行头部和逐行版式的硬性前置检查，错误即值
//! - **会话级回放**: 按会话 ID 维护连接映射，`Connect`/`Query`/`Quit` 落在正确的连接上
//! - **故障隔离**: 单条语句失败被上报后继续回放，不中止整个运行
//! - **可替换的数据库后端**: 连接/游标以 trait 表达，自带 rusqlite 实现
//!
//! ## 快速开始
//!
//! ### 解析日志
//!
//! ```rust
//! use mysql_genlog_replay::{parse_trace_from_str, Command};
//!
//! let log = "/usr/sbin/mysqld, Version: 5.1.73 started with:\n\
//!            TCP Port: 3306, Named Pipe: (null)\n\
//!            Time                 Id Command    Argument\n\
//!            \t\t    1 Connect\troot@localhost on Director\n\
//!            \t\t    1 Query\tSELECT COUNT(*) FROM certs\n\
//!            \t\t    1 Quit\t\n";
//!
//! let records = parse_trace_from_str(log).unwrap();
//! assert_eq!(records.len(), 3);
//! assert_eq!(records[0].session_id, "1");
//! assert_eq!(records[1].command, Command::Query);
//! ```
//!
//! ### 回放到数据库
//!
//! ```rust
//! # #[cfg(feature = "sqlite")] {
//! use mysql_genlog_replay::{
//!     parse_trace_from_str, ConnectParams, Replayer, SqliteConnector, StderrSink,
//! };
//!
//! let log = "/usr/sbin/mysqld, Version: 5.1.73 started with:\n\
//!            TCP Port: 3306, Named Pipe: (null)\n\
//!            Time                 Id Command    Argument\n\
//!            \t\t    1 Connect\troot@localhost on test\n\
//!            \t\t    1 Query\tCREATE TABLE t (id INTEGER)\n\
//!            \t\t    1 Quit\t\n";
//!
//! let records = parse_trace_from_str(log).unwrap();
//! let params = ConnectParams::default().with_database(":memory:");
//! let mut replayer = Replayer::new(SqliteConnector, params, StderrSink);
//! let stats = replayer.replay(&records).unwrap();
//! assert_eq!(stats.queries, 1);
//! # }
//! ```
//!
//! ## 日志格式
//!
//! 文件以固定三行头部开始：
//!
//! ```text
//! /usr/sbin/mysqld, Version: 5.1.73-log started with:
//! TCP Port: 3306, Named Pipe: (null)
//! Time                 Id Command    Argument
//! ```
//!
//! 之后每行一个事件：可选的时间戳列以制表符结尾（或者整列省略、
//! 行以两个制表符开头），然后是 5 字符定宽的会话 ID、一个填充字符、
//! `命令<TAB>参数` 直到行尾。行必须以单个换行符结束，不允许残留回车。

pub mod config;
pub mod error;
pub mod parser;
pub mod replay;
pub mod trace;

pub use config::ConnectParams;
pub use error::{ConnectorError, ParseError, ReplayError};
pub use parser::{
    TraceParser,
    iter_trace_from_file,
    parse_line,
    parse_trace,
    parse_trace_from_file,
    parse_trace_from_str,
    payload_of,
};
pub use replay::{
    Connection, Connector, Cursor, MemorySink, ReplayStats, Replayer, ReportSink, StderrSink,
};
pub use trace::{Command, TraceRecord};

#[cfg(feature = "sqlite")]
pub use replay::{SqliteConnection, SqliteConnector, SqliteCursor};
