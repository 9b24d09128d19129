//! 解析器使用的常量定义
//!
//! 定义了 general log 固定头部和事件行版式相关的所有常量。

use once_cell::sync::Lazy;

// 头部相关常量

/// 固定头部的行数
pub const HEADER_LINE_COUNT: usize = 3;

/// 第一行头部必须包含的子串
pub static HEADER_STARTED_WITH: &str = "started with";

/// 第二行头部必须以此开头
pub static HEADER_TCP_PORT: &str = "TCP Port";

/// 第三行头部必须以此开头（注意结尾空格）
pub static HEADER_TIME: &str = "Time ";

/// 三行头部标记，按行序排列
pub static HEADER_MARKERS: Lazy<[&'static str; HEADER_LINE_COUNT]> =
    Lazy::new(|| [HEADER_STARTED_WITH, HEADER_TCP_PORT, HEADER_TIME]);

// 事件行版式常量

/// 会话 ID 字段的定宽（字节）
pub const SESSION_ID_WIDTH: usize = 5;

/// 尾部（命令 + 参数）在 payload 中的起始偏移：
/// 定宽会话 ID 后跳过一个填充字符
pub const TAIL_START: usize = SESSION_ID_WIDTH + 1;

/// 元数据列被省略时的行前缀（两个制表符）
pub static DOUBLE_TAB: &str = "\t\t";

// 字节常量

/// 列分隔符
pub const TAB_BYTE: u8 = b'\t';

/// 行终止符
pub const NEWLINE_BYTE: u8 = b'\n';

/// 不允许残留的回车符
pub const CARRIAGE_RETURN_BYTE: u8 = b'\r';
