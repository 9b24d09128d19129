//! TraceParser - 从 Reader 流式读取并解析 TraceRecord
//!
//! 提供了一个迭代器，可以从任何实现了 `Read` trait 的源中逐条读取事件记录。
//! 构造时即消费并校验三行固定头部；头部不合法时构造直接失败。

use crate::error::ParseError;
use crate::parser::constants::HEADER_LINE_COUNT;
use crate::parser::parse_functions::{check_header_line, parse_line, strip_terminator};
use crate::trace::TraceRecord;
use std::{
    io::{BufRead, BufReader, Read},
    mem,
};

/// 从 Reader 中按行读取并解析成 TraceRecord 的迭代器
///
/// `TraceParser` 实现了 `Iterator` trait，逐条产出
/// `Result<TraceRecord, ParseError>`。流只被消费一次，不可重新开始。
/// 任何格式错误都是致命的：产出该错误之后迭代器即告结束。
///
/// # 类型参数
///
/// * `R` - 实现了 `Read` trait 的类型
///
/// # 示例
///
/// ```no_run
/// use mysql_genlog_replay::TraceParser;
/// use std::fs::File;
///
/// let file = File::open("mysql-general.log").unwrap();
/// let parser = TraceParser::new(file).unwrap();
///
/// for result in parser {
///     match result {
///         Ok(record) => println!("{} {}", record.session_id, record.command.name()),
///         Err(e) => eprintln!("解析错误: {}", e),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct TraceParser<R: Read> {
    reader: BufReader<R>,
    buffer: String,
    line_no: usize,
    finished: bool,
}

impl<R: Read> TraceParser<R> {
    /// 创建解析器并校验头部
    ///
    /// 立即读取前三行并逐行校验固定头部标记，任何偏差返回
    /// [`ParseError::InvalidHeader`]。头部行不产出记录。
    pub fn new(reader: R) -> Result<Self, ParseError> {
        let mut parser = Self {
            reader: BufReader::new(reader),
            buffer: String::new(),
            line_no: 0,
            finished: false,
        };

        for line_no in 1..=HEADER_LINE_COUNT {
            // 提前到达 EOF 按空行处理，同样判定为头部错误
            let line = parser.read_raw_line()?.unwrap_or_default();
            // 头部只校验标记内容，终止符规则从第四行起才生效
            check_header_line(line_no, line.trim_end_matches(['\n', '\r']))?;
        }

        Ok(parser)
    }

    /// 当前已读到的行号（从 1 开始，含头部）
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// 读取下一行原始内容（保留终止符）
    fn read_raw_line(&mut self) -> Result<Option<String>, ParseError> {
        self.buffer.clear();
        let bytes_read = self
            .reader
            .read_line(&mut self.buffer)
            .map_err(|e| ParseError::Io(e.to_string()))?;

        if bytes_read == 0 {
            Ok(None)
        } else {
            self.line_no += 1;
            // 使用 mem::take 避免额外的克隆，保持缓冲区容量
            Ok(Some(mem::take(&mut self.buffer)))
        }
    }
}

impl<R: Read> Iterator for TraceParser<R> {
    type Item = Result<TraceRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let raw = match self.read_raw_line() {
            Ok(Some(line)) => line,
            Ok(None) => {
                self.finished = true;
                return None;
            }
            Err(e) => {
                self.finished = true;
                return Some(Err(e));
            }
        };

        let result = strip_terminator(self.line_no, &raw)
            .and_then(|line| parse_line(self.line_no, line));

        if result.is_err() {
            // 格式错误中止整个解析
            self.finished = true;
        }

        Some(result)
    }
}
