use mysql_genlog_replay::{ParseError, iter_trace_from_file, parse_trace_from_file};
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "/usr/sbin/mysqld, Version: 5.1.73 started with:\n\
                      TCP Port: 3306, Named Pipe: (null)\n\
                      Time                 Id Command    Argument\n";

#[test]
fn missing_file_is_file_not_found() {
    let err = parse_trace_from_file("/no/such/trace.log").unwrap_err();
    assert!(matches!(err, ParseError::FileNotFound(_)));
}

#[test]
fn iterator_stops_at_first_malformed_line() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "{HEADER}\t\t    1 Query\tSELECT 1\n\t\t    1 Broken line\n\t\t    1 Query\tSELECT 2\n"
    )
    .unwrap();

    let mut it = iter_trace_from_file(file.path()).unwrap();
    assert!(it.next().unwrap().is_ok());
    let err = it.next().unwrap().unwrap_err();
    assert!(matches!(err, ParseError::MissingCommandSeparator { line: 5, .. }));
    // 格式错误之后迭代器结束，后面的合法行不再被读取
    assert!(it.next().is_none());
}

#[test]
fn header_error_surfaces_before_iteration() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "not a header\n").unwrap();

    let err = iter_trace_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ParseError::InvalidHeader { line: 1, .. }));
}

#[test]
fn empty_file_fails_header_check() {
    let file = NamedTempFile::new().unwrap();
    let err = parse_trace_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ParseError::InvalidHeader { line: 1, .. }));
}

#[test]
fn batch_parse_returns_no_partial_records() {
    let mut file = NamedTempFile::new().unwrap();
    // 两条合法记录之后文件被截断（最后一行缺少换行）
    write!(
        file,
        "{HEADER}\t\t    1 Connect\t\n\t\t    1 Query\tSELECT 1\n\t\t    1 Quit\t"
    )
    .unwrap();

    let err = parse_trace_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ParseError::MissingLineTerminator { line: 6, .. }));
}
