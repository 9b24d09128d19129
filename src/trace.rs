//! Trace 数据模型
//!
//! 表示 general log 中一条客户端事件记录的强类型结构。

/// 会话命令类型
///
/// general log 中每条事件行携带一个命令字段。匹配是区分大小写的精确匹配，
/// 无法识别的命令保留原始文本，供观察槽上报。
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// 客户端建立新连接
    Connect,
    /// 在已有连接上执行一条语句
    Query,
    /// 客户端关闭连接
    Quit,
    /// 其他命令（如 Init DB、Statistics），携带原始命令文本
    Unknown(String),
}

impl Command {
    /// 将命令文本归类为命令类型
    ///
    /// # 示例
    ///
    /// ```
    /// use mysql_genlog_replay::Command;
    ///
    /// assert_eq!(Command::classify("Query"), Command::Query);
    /// assert_eq!(Command::classify("query"), Command::Unknown("query".to_string()));
    /// ```
    pub fn classify(raw: &str) -> Self {
        match raw {
            "Connect" => Command::Connect,
            "Query" => Command::Query,
            "Quit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }

    /// 命令的显示名称
    pub fn name(&self) -> &str {
        match self {
            Command::Connect => "Connect",
            Command::Query => "Query",
            Command::Quit => "Quit",
            Command::Unknown(raw) => raw,
        }
    }
}

/// 一条 trace 记录
///
/// 对应头部之后的一行日志。记录顺序就是文件顺序，回放必须按此顺序执行。
///
/// 注意 `session_id` 在整个文件范围内不是唯一的：同一个 ID 在 `Quit`
/// 关闭旧会话后可能被新会话复用。
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceRecord {
    /// 会话 ID（5 字符定宽字段去除首尾空白后的内容）
    pub session_id: String,

    /// 命令类型
    pub command: Command,

    /// 命令参数，原样保留（包括内嵌的制表符和空格，不做任何转义或解码）
    pub argument: String,
}
