//! 错误类型定义
//!
//! 定义了日志解析和会话回放过程中可能出现的所有错误类型。

use thiserror::Error;

/// 解析错误类型
///
/// 覆盖 general log 文件解析过程中所有的格式错误。任何一个此类错误都会
/// 中止整个解析流程：日志完整性是回放的前置条件，不做逐行恢复。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// 文件未找到或无法访问
    #[error("file not found or inaccessible: {0}")]
    FileNotFound(String),

    /// 读取日志时发生 I/O 错误
    #[error("i/o error while reading trace: {0}")]
    Io(String),

    /// 文件头不符合 general log 固定的三行头格式
    #[error("malformed trace header at line {line}: expected {expected:?}, got {raw:?}")]
    InvalidHeader {
        /// 出错的行号（从 1 开始）
        line: usize,
        /// 期望的头部标记
        expected: &'static str,
        /// 实际读到的行内容
        raw: String,
    },

    /// 行缺少换行终止符
    #[error("missing line terminator at line {line}: {raw:?}")]
    MissingLineTerminator {
        /// 出错的行号
        line: usize,
        /// 实际读到的行内容
        raw: String,
    },

    /// 去掉换行后行尾残留回车符
    #[error("stray carriage return at line {line}: {raw:?}")]
    StrayCarriageReturn {
        /// 出错的行号
        line: usize,
        /// 实际读到的行内容
        raw: String,
    },

    /// 会话 ID 之后的尾部缺少命令分隔制表符
    #[error("no command separator tab at line {line}: {raw:?}")]
    MissingCommandSeparator {
        /// 出错的行号
        line: usize,
        /// 实际读到的行内容
        raw: String,
    },
}

/// 回放错误类型
///
/// 回放过程中的致命错误。注意：单条语句执行失败不在此列，它会被上报到
/// 观察槽（sink）后继续回放；这里只收集会中止整个回放的故障。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReplayError {
    /// 建立数据库连接失败
    #[error("failed to open connection for session {session_id}: {message}")]
    Connect {
        /// 触发连接的会话 ID
        session_id: String,
        /// 底层驱动错误信息
        message: String,
    },

    /// Query/Quit 引用了一个不存在或已关闭的会话
    ///
    /// 日志自身违反了会话生命周期约定（Connect 之后、Quit 之前才能引用），
    /// 这是日志的使用错误，直接中止回放。
    #[error("record #{record} references unknown or closed session {session_id} ({command})")]
    UnknownSession {
        /// 记录序号（从 1 开始）
        record: usize,
        /// 引用的会话 ID
        session_id: String,
        /// 触发查找的命令名
        command: String,
    },

    /// 获取或关闭游标失败
    #[error("cursor error on session {session_id}: {message}")]
    Cursor {
        /// 会话 ID
        session_id: String,
        /// 底层驱动错误信息
        message: String,
    },

    /// 关闭连接失败
    #[error("failed to close connection for session {session_id}: {message}")]
    Disconnect {
        /// 会话 ID
        session_id: String,
        /// 底层驱动错误信息
        message: String,
    },
}

/// 数据库协作方（connector）返回的错误
///
/// 驱动层的错误在 trait 边界统一成一个携带消息的类型，
/// 回放器据此决定是致命中止还是上报后继续。
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ConnectorError {
    /// 底层驱动错误信息
    pub message: String,
}

impl ConnectorError {
    /// 从任意可显示的错误构造
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
