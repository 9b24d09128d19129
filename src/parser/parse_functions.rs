//! 核心解析函数
//!
//! 包含头部校验、行终止符检查和事件行解码的纯函数。
//! 所有失败都以 [`ParseError`] 值返回，不使用断言或 panic。

use crate::error::ParseError;
use crate::parser::constants::*;
use crate::trace::{Command, TraceRecord};
use memchr::memchr;

/// 校验一行固定头部
///
/// general log 的前三行是固定格式的头部：
/// 1. 包含 `"started with"` 的启动行；
/// 2. 以 `"TCP Port"` 开头的端口行；
/// 3. 以 `"Time "` 开头的表头行。
///
/// 任何偏差都立即判定为头部格式错误，这是硬性前置条件，不做尽力跳过。
///
/// # 参数
///
/// * `line_no` - 行号（1 到 3）
/// * `line` - 去掉终止符后的行内容
pub fn check_header_line(line_no: usize, line: &str) -> Result<(), ParseError> {
    debug_assert!((1..=HEADER_LINE_COUNT).contains(&line_no));

    let expected = HEADER_MARKERS[line_no - 1];
    let ok = match line_no {
        1 => line.contains(expected),
        _ => line.starts_with(expected),
    };

    if ok {
        Ok(())
    } else {
        Err(ParseError::InvalidHeader {
            line: line_no,
            expected,
            raw: line.to_string(),
        })
    }
}

/// 去除行终止符并校验
///
/// 每一行都必须以单个换行符结尾；去掉换行后不允许残留回车符。
/// 两者任一不满足都是致命的格式错误。
///
/// # 参数
///
/// * `line_no` - 行号（从 1 开始，用于错误报告）
/// * `raw` - 从 reader 读出的原始行（含终止符）
///
/// # 返回
///
/// 去掉终止符后的行内容切片。
pub fn strip_terminator(line_no: usize, raw: &str) -> Result<&str, ParseError> {
    let bytes = raw.as_bytes();
    if bytes.last() != Some(&NEWLINE_BYTE) {
        return Err(ParseError::MissingLineTerminator {
            line: line_no,
            raw: raw.to_string(),
        });
    }

    let stripped = &raw[..raw.len() - 1];
    if stripped.as_bytes().last() == Some(&CARRIAGE_RETURN_BYTE) {
        return Err(ParseError::StrayCarriageReturn {
            line: line_no,
            raw: raw.to_string(),
        });
    }

    Ok(stripped)
}

/// 提取行的 payload 部分
///
/// 以两个制表符开头的行，payload 是这两个制表符之后的内容（元数据列被省略）；
/// 否则 payload 是第一个制表符之后的内容，制表符之前的前缀
/// （时间戳 / 线程号列）被丢弃。整行都没有制表符时，payload 就是整行，
/// 与原始实现的切片语义一致。
pub fn payload_of(line: &str) -> &str {
    if line.starts_with(DOUBLE_TAB) {
        &line[DOUBLE_TAB.len()..]
    } else {
        match memchr(TAB_BYTE, line.as_bytes()) {
            Some(pos) => &line[pos + 1..],
            None => line,
        }
    }
}

/// 将一行（头部之后、已去终止符）解码为 [`TraceRecord`]
///
/// 解码步骤：
/// 1. 提取 payload（见 [`payload_of`]）；
/// 2. payload 前 5 个字符去除首尾空白后作为 `session_id`；
/// 3. 跳过一个填充字符，从第 6 个字符起为尾部；
/// 4. 尾部必须包含一个制表符作为命令分隔符，缺失即格式错误；
/// 5. 分隔符之前是命令，之后的全部内容原样作为参数；
/// 6. 命令按区分大小写的精确匹配归类。
///
/// # 示例
///
/// ```
/// use mysql_genlog_replay::{parse_line, Command};
///
/// let record = parse_line(4, "\t\t   12 Query\tSELECT 1").unwrap();
/// assert_eq!(record.session_id, "12");
/// assert_eq!(record.command, Command::Query);
/// assert_eq!(record.argument, "SELECT 1");
/// ```
pub fn parse_line(line_no: usize, line: &str) -> Result<TraceRecord, ParseError> {
    let payload = payload_of(line);

    // 定宽字段按字节切分；ID 字段在合法日志中只含 ASCII 数字和空格
    let session_id = payload
        .get(..SESSION_ID_WIDTH)
        .unwrap_or(payload)
        .trim()
        .to_string();
    let tail = payload.get(TAIL_START..).unwrap_or("");

    let tab_pos = memchr(TAB_BYTE, tail.as_bytes()).ok_or_else(|| {
        ParseError::MissingCommandSeparator {
            line: line_no,
            raw: line.to_string(),
        }
    })?;

    let command = Command::classify(&tail[..tab_pos]);
    let argument = tail[tab_pos + 1..].to_string();

    Ok(TraceRecord {
        session_id,
        command,
        argument,
    })
}
