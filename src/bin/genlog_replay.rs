//! genlog-replay 命令行入口
//!
//! 用法：`genlog-replay <trace_file>`
//!
//! 解析给定的 general log 文件并把所有会话按原始顺序回放到数据库上。
//! 连接参数从环境变量读取（GENLOG_DB / GENLOG_HOST / GENLOG_USER /
//! GENLOG_PASSWORD）。格式错误或致命回放故障以非零状态退出；
//! 单条语句失败只上报不影响退出码。

use mysql_genlog_replay::{
    ConnectParams, Replayer, SqliteConnector, StderrSink, parse_trace_from_file,
};
use std::env;
use std::process;

fn main() {
    let mut args = env::args();
    let prog = args.next().unwrap_or_else(|| "genlog-replay".to_string());
    let trace_path = match (args.next(), args.next()) {
        (Some(path), None) => path,
        _ => {
            eprintln!("用法: {prog} <trace_file>");
            eprintln!("示例: {prog} mysql-general.log");
            process::exit(2);
        }
    };

    // 全有或全无：任何格式错误都在回放开始之前中止
    let records = match parse_trace_from_file(&trace_path) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("{prog}: 解析失败: {e}");
            process::exit(1);
        }
    };
    println!("解析完成: {} 条记录", records.len());

    let params = ConnectParams::from_env();
    let mut replayer = Replayer::new(SqliteConnector, params, StderrSink);

    match replayer.replay(&records) {
        Ok(stats) => {
            println!(
                "回放完成: 连接 {} 次, 语句 {} 条 (失败 {}), 断开 {} 次, 未知命令 {} 条",
                stats.connects,
                stats.queries,
                stats.failed_queries,
                stats.quits,
                stats.unknown_commands,
            );
            if replayer.open_sessions() > 0 {
                // 日志结束时未配对 Quit 的连接保持打开，不做隐式清理
                println!("注意: {} 个会话在日志结束时仍处于打开状态", replayer.open_sessions());
            }
        }
        Err(e) => {
            eprintln!("{prog}: 回放中止: {e}");
            process::exit(1);
        }
    }
}
