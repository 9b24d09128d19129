//! Parser 模块 - 解析 MySQL general log
//!
//! 此模块提供了完整的日志解析功能,包括:
//! - 固定三行头部的校验
//! - 事件行到 TraceRecord 的解码
//! - 流式读取和批量便捷 API

mod api;
mod constants;
pub(crate) mod parse_functions;
pub mod trace_parser;

pub use api::{iter_trace_from_file, parse_trace, parse_trace_from_file, parse_trace_from_str};
pub use parse_functions::{parse_line, payload_of};
pub use trace_parser::TraceParser;
