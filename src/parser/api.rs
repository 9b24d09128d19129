//! 便捷 API 函数
//!
//! 提供了一组方便使用的高层 API，用于解析 general log。
//! 批量函数是"全有或全无"的：遇到第一个格式错误即中止，
//! 不返回部分记录列表。

use crate::error::ParseError;
use crate::parser::trace_parser::TraceParser;
use crate::trace::TraceRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 从 Reader 批量解析出完整的记录序列
///
/// 先校验三行头部，然后按文件顺序解码每一行。任何格式错误
/// （头部不合法、缺少终止符、残留回车、缺少命令分隔符）都会
/// 中止整个解析并返回该错误，已解析的记录被丢弃。
///
/// # 示例
///
/// ```
/// use mysql_genlog_replay::{parse_trace, Command};
///
/// let log = "/usr/sbin/mysqld, Version: 5.1 started with:\n\
///            TCP Port: 3306\n\
///            Time                 Id Command    Argument\n\
///            \t\t    1 Connect\troot@localhost on test\n\
///            \t\t    1 Query\tSELECT 1\n\
///            \t\t    1 Quit\t\n";
///
/// let records = parse_trace(log.as_bytes()).unwrap();
/// assert_eq!(records.len(), 3);
/// assert_eq!(records[1].command, Command::Query);
/// ```
pub fn parse_trace<R: Read>(reader: R) -> Result<Vec<TraceRecord>, ParseError> {
    TraceParser::new(reader)?.collect()
}

/// 从字符串批量解析
///
/// 行为与 [`parse_trace`] 一致，适合测试和内存中的日志片段。
pub fn parse_trace_from_str(content: &str) -> Result<Vec<TraceRecord>, ParseError> {
    parse_trace(content.as_bytes())
}

/// 从文件批量解析
///
/// # 参数
///
/// * `path` - 日志文件路径
///
/// # 返回
///
/// * `Ok(Vec<TraceRecord>)` - 按文件顺序排列的完整记录序列
/// * `Err(ParseError)` - 文件打开错误或任意格式错误
pub fn parse_trace_from_file<P>(path: P) -> Result<Vec<TraceRecord>, ParseError>
where
    P: AsRef<Path>,
{
    let file = open_trace_file(path)?;
    parse_trace(file)
}

/// 从文件构造流式解析器
///
/// 返回 [`TraceParser`] 迭代器，适合边读边处理大文件；头部在此处
/// 即被校验。注意流式模式下调用方需要自行在第一个 `Err` 处停止。
///
/// # 示例
///
/// ```no_run
/// use mysql_genlog_replay::iter_trace_from_file;
///
/// let parser = iter_trace_from_file("mysql-general.log")?;
/// for result in parser {
///     let record = result?;
///     println!("{} {}", record.session_id, record.command.name());
/// }
/// # Ok::<(), mysql_genlog_replay::ParseError>(())
/// ```
pub fn iter_trace_from_file<P>(path: P) -> Result<TraceParser<File>, ParseError>
where
    P: AsRef<Path>,
{
    let file = open_trace_file(path)?;
    TraceParser::new(file)
}

fn open_trace_file<P: AsRef<Path>>(path: P) -> Result<File, ParseError> {
    let path_ref = path.as_ref();
    File::open(path_ref).map_err(|e| ParseError::FileNotFound(format!(
        "{}: {}",
        path_ref.display(),
        e
    )))
}
