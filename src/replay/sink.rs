//! 观察槽（report sink）
//!
//! 回放过程中两类非致命事件的文本上报通道：
//! - 无法执行的语句（携带语句原文和驱动错误）；
//! - 无法识别的命令（携带命令名和参数）。

use std::fmt::Display;

/// 回放事件的上报通道
pub trait ReportSink {
    /// 上报一条执行失败的语句
    fn report_query_failure(&mut self, statement: &str, error: &dyn Display);

    /// 上报一条无法识别的命令
    fn report_unknown_command(&mut self, command: &str, argument: &str);
}

/// 输出到标准错误的默认实现
///
/// 每个事件一行纯文本，与原始工具的输出形态一致。
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl ReportSink for StderrSink {
    fn report_query_failure(&mut self, statement: &str, error: &dyn Display) {
        eprintln!("query failed: {statement}");
        eprintln!("  error: {error}");
    }

    fn report_unknown_command(&mut self, command: &str, argument: &str) {
        eprintln!("unknown command: {command} {argument}");
    }
}

/// 收集到内存的实现
///
/// 供测试和嵌入场景使用，事件按发生顺序累积。
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    /// (语句, 错误信息) 对，按上报顺序
    pub query_failures: Vec<(String, String)>,
    /// (命令, 参数) 对，按上报顺序
    pub unknown_commands: Vec<(String, String)>,
}

impl MemorySink {
    /// 创建一个空的收集器
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否没有收到任何上报
    pub fn is_empty(&self) -> bool {
        self.query_failures.is_empty() && self.unknown_commands.is_empty()
    }
}

impl ReportSink for MemorySink {
    fn report_query_failure(&mut self, statement: &str, error: &dyn Display) {
        self.query_failures
            .push((statement.to_string(), error.to_string()));
    }

    fn report_unknown_command(&mut self, command: &str, argument: &str) {
        self.unknown_commands
            .push((command.to_string(), argument.to_string()));
    }
}
