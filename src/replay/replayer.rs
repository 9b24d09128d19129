//! 会话回放器
//!
//! 消费解析出的记录序列，维护会话 ID 到活跃连接的映射，
//! 严格按文件顺序在正确的连接上执行每条命令。

use crate::config::ConnectParams;
use crate::error::ReplayError;
use crate::replay::connector::{Connection, Connector, Cursor};
use crate::replay::sink::ReportSink;
use crate::trace::{Command, TraceRecord};
use std::collections::HashMap;

/// 一次回放的统计结果
///
/// 失败的语句不影响退出状态，但会体现在 `failed_queries` 中。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// 处理的记录总数
    pub records: usize,
    /// 建立的连接数
    pub connects: usize,
    /// 执行的语句数（含失败的）
    pub queries: usize,
    /// 执行失败、已上报并跳过的语句数
    pub failed_queries: usize,
    /// 关闭的连接数
    pub quits: usize,
    /// 上报的未知命令数
    pub unknown_commands: usize,
}

/// 会话回放器
///
/// 会话映射由回放器实例私有持有：回放开始时创建，结束时随实例丢弃，
/// 没有全局状态。映射值为 `Option`，`Quit` 之后槽位保留 `None`，
/// 用来区分"从未连接"和"已显式关闭"——两者对 `Query`/`Quit` 都是
/// 致命错误，但 ID 随后可以被新的 `Connect` 复用。
///
/// 处理是严格单线程顺序的：一条记录完全处理完（连接建立、语句执行
/// 或连接关闭）之后才会读取下一条。映射只被这一条控制流修改，
/// 不需要任何锁。
pub struct Replayer<C: Connector, S: ReportSink> {
    connector: C,
    params: ConnectParams,
    sink: S,
    sessions: HashMap<String, Option<C::Conn>>,
}

impl<C: Connector, S: ReportSink> Replayer<C, S> {
    /// 创建回放器
    ///
    /// # 参数
    ///
    /// * `connector` - 数据库连接工厂
    /// * `params` - 固定的连接参数，每条 `Connect` 记录都使用同一组
    /// * `sink` - 非致命事件的上报通道
    pub fn new(connector: C, params: ConnectParams, sink: S) -> Self {
        Self {
            connector,
            params,
            sink,
            sessions: HashMap::new(),
        }
    }

    /// 按顺序回放整个记录序列
    ///
    /// 单条语句执行失败会被上报后继续；以下情况致命中止：
    /// - 建立连接失败；
    /// - `Query`/`Quit` 引用了不存在或已关闭的会话；
    /// - 游标获取 / 关闭失败、连接关闭失败。
    ///
    /// 日志在没有对应 `Quit` 的情况下结束时，剩余连接保持打开，
    /// 不做隐式清理。
    pub fn replay(&mut self, records: &[TraceRecord]) -> Result<ReplayStats, ReplayError> {
        let mut stats = ReplayStats::default();
        for (index, record) in records.iter().enumerate() {
            self.apply(index + 1, record, &mut stats)?;
            stats.records += 1;
        }
        Ok(stats)
    }

    /// 处理单条记录
    fn apply(
        &mut self,
        index: usize,
        record: &TraceRecord,
        stats: &mut ReplayStats,
    ) -> Result<(), ReplayError> {
        match &record.command {
            Command::Connect => {
                let conn =
                    self.connector
                        .connect(&self.params)
                        .map_err(|e| ReplayError::Connect {
                            session_id: record.session_id.clone(),
                            message: e.message,
                        })?;
                // 覆盖同 ID 的旧条目：ID 可以在 Quit 之后被复用
                self.sessions.insert(record.session_id.clone(), Some(conn));
                stats.connects += 1;
            }

            Command::Query => {
                let conn = self
                    .sessions
                    .get_mut(&record.session_id)
                    .and_then(Option::as_mut)
                    .ok_or_else(|| ReplayError::UnknownSession {
                        record: index,
                        session_id: record.session_id.clone(),
                        command: "Query".to_string(),
                    })?;

                let mut cursor = conn.cursor().map_err(|e| ReplayError::Cursor {
                    session_id: record.session_id.clone(),
                    message: e.message,
                })?;

                let result = cursor.execute(&record.argument);

                // 无论执行结果如何，游标都要被关闭
                cursor.close().map_err(|e| ReplayError::Cursor {
                    session_id: record.session_id.clone(),
                    message: e.message,
                })?;

                stats.queries += 1;
                if let Err(e) = result {
                    stats.failed_queries += 1;
                    self.sink.report_query_failure(&record.argument, &e);
                }
            }

            Command::Quit => {
                let slot = self.sessions.get_mut(&record.session_id).ok_or_else(|| {
                    ReplayError::UnknownSession {
                        record: index,
                        session_id: record.session_id.clone(),
                        command: "Quit".to_string(),
                    }
                })?;

                // 取走连接，槽位保留 None 作为"已关闭"标记
                let mut conn = slot.take().ok_or_else(|| ReplayError::UnknownSession {
                    record: index,
                    session_id: record.session_id.clone(),
                    command: "Quit".to_string(),
                })?;

                conn.close().map_err(|e| ReplayError::Disconnect {
                    session_id: record.session_id.clone(),
                    message: e.message,
                })?;
                stats.quits += 1;
            }

            Command::Unknown(raw) => {
                self.sink.report_unknown_command(raw, &record.argument);
                stats.unknown_commands += 1;
            }
        }
        Ok(())
    }

    /// 当前处于打开状态的会话数
    pub fn open_sessions(&self) -> usize {
        self.sessions.values().filter(|s| s.is_some()).count()
    }

    /// 观察槽的只读访问
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// 拆出观察槽，丢弃其余状态
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConnectorError;
    use crate::replay::sink::MemorySink;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 记录所有驱动调用的脚本化假连接
    ///
    /// 以 `fail:` 开头的语句执行失败，其余成功。
    type OpLog = Rc<RefCell<Vec<String>>>;

    struct MockConnector {
        ops: OpLog,
        next_id: usize,
    }

    struct MockConn {
        id: usize,
        ops: OpLog,
    }

    struct MockCursor<'a> {
        conn: &'a mut MockConn,
    }

    impl MockConnector {
        fn new(ops: OpLog) -> Self {
            Self { ops, next_id: 0 }
        }
    }

    impl Connector for MockConnector {
        type Conn = MockConn;

        fn connect(&mut self, _params: &ConnectParams) -> Result<MockConn, ConnectorError> {
            self.next_id += 1;
            self.ops.borrow_mut().push(format!("connect#{}", self.next_id));
            Ok(MockConn {
                id: self.next_id,
                ops: Rc::clone(&self.ops),
            })
        }
    }

    impl Connection for MockConn {
        type Cursor<'a> = MockCursor<'a>;

        fn cursor(&mut self) -> Result<MockCursor<'_>, ConnectorError> {
            Ok(MockCursor { conn: self })
        }

        fn close(&mut self) -> Result<(), ConnectorError> {
            self.ops.borrow_mut().push(format!("close#{}", self.id));
            Ok(())
        }
    }

    impl Cursor for MockCursor<'_> {
        fn execute(&mut self, statement: &str) -> Result<(), ConnectorError> {
            self.conn
                .ops
                .borrow_mut()
                .push(format!("execute#{}: {}", self.conn.id, statement));
            if let Some(reason) = statement.strip_prefix("fail:") {
                Err(ConnectorError::new(reason.trim().to_string()))
            } else {
                Ok(())
            }
        }

        fn close(self) -> Result<(), ConnectorError> {
            self.conn
                .ops
                .borrow_mut()
                .push(format!("cursor_close#{}", self.conn.id));
            Ok(())
        }
    }

    fn record(session_id: &str, command: Command, argument: &str) -> TraceRecord {
        TraceRecord {
            session_id: session_id.to_string(),
            command,
            argument: argument.to_string(),
        }
    }

    fn replayer(ops: &OpLog) -> Replayer<MockConnector, MemorySink> {
        Replayer::new(
            MockConnector::new(Rc::clone(ops)),
            ConnectParams::default(),
            MemorySink::new(),
        )
    }

    #[test]
    fn session_lifecycle_binds_query_to_its_connection() {
        let ops: OpLog = Rc::default();
        let mut replayer = replayer(&ops);

        let records = [
            record("10", Command::Connect, "root@localhost on test"),
            record("10", Command::Query, "SELECT 1"),
            record("10", Command::Quit, ""),
        ];
        let stats = replayer.replay(&records).unwrap();

        assert_eq!(stats.connects, 1);
        assert_eq!(stats.queries, 1);
        assert_eq!(stats.failed_queries, 0);
        assert_eq!(stats.quits, 1);
        assert_eq!(
            *ops.borrow(),
            vec![
                "connect#1",
                "execute#1: SELECT 1",
                "cursor_close#1",
                "close#1",
            ]
        );
        assert_eq!(replayer.open_sessions(), 0);
    }

    #[test]
    fn reused_session_id_gets_a_brand_new_connection() {
        let ops: OpLog = Rc::default();
        let mut replayer = replayer(&ops);

        let records = [
            record("10", Command::Connect, ""),
            record("10", Command::Quit, ""),
            record("10", Command::Connect, ""),
            record("10", Command::Query, "SELECT 2"),
        ];
        replayer.replay(&records).unwrap();

        // 第二次 Connect 得到的是全新连接，与第一条互相独立
        assert_eq!(
            *ops.borrow(),
            vec![
                "connect#1",
                "close#1",
                "connect#2",
                "execute#2: SELECT 2",
                "cursor_close#2",
            ]
        );
        assert_eq!(replayer.open_sessions(), 1);
    }

    #[test]
    fn failed_query_is_reported_and_replay_continues() {
        let ops: OpLog = Rc::default();
        let mut replayer = replayer(&ops);

        let records = [
            record("10", Command::Connect, ""),
            record("10", Command::Query, "fail: table missing"),
            record("10", Command::Quit, ""),
        ];
        let stats = replayer.replay(&records).unwrap();

        assert_eq!(stats.queries, 1);
        assert_eq!(stats.failed_queries, 1);
        assert_eq!(stats.quits, 1);

        // 游标在失败后依然被关闭，Quit 正常执行
        assert_eq!(
            *ops.borrow(),
            vec![
                "connect#1",
                "execute#1: fail: table missing",
                "cursor_close#1",
                "close#1",
            ]
        );

        let sink = replayer.into_sink();
        assert_eq!(sink.query_failures.len(), 1);
        assert_eq!(sink.query_failures[0].0, "fail: table missing");
        assert_eq!(sink.query_failures[0].1, "table missing");
    }

    #[test]
    fn unknown_command_is_reported_without_database_calls() {
        let ops: OpLog = Rc::default();
        let mut replayer = replayer(&ops);

        let records = [
            record("10", Command::Connect, ""),
            record("10", Command::Unknown("Init DB".to_string()), "Director"),
            record("10", Command::Query, "SELECT 1"),
        ];
        let stats = replayer.replay(&records).unwrap();

        assert_eq!(stats.unknown_commands, 1);
        // Init DB 没有触发任何驱动调用
        assert_eq!(
            *ops.borrow(),
            vec!["connect#1", "execute#1: SELECT 1", "cursor_close#1"]
        );
        assert_eq!(
            replayer.sink().unknown_commands,
            vec![("Init DB".to_string(), "Director".to_string())]
        );
    }

    #[test]
    fn query_on_unknown_session_is_fatal() {
        let ops: OpLog = Rc::default();
        let mut replayer = replayer(&ops);

        let records = [record("99", Command::Query, "SELECT 1")];
        let err = replayer.replay(&records).unwrap_err();
        assert_eq!(
            err,
            ReplayError::UnknownSession {
                record: 1,
                session_id: "99".to_string(),
                command: "Query".to_string(),
            }
        );
    }

    #[test]
    fn query_after_quit_is_fatal() {
        let ops: OpLog = Rc::default();
        let mut replayer = replayer(&ops);

        let records = [
            record("10", Command::Connect, ""),
            record("10", Command::Quit, ""),
            record("10", Command::Query, "SELECT 1"),
        ];
        let err = replayer.replay(&records).unwrap_err();
        assert!(matches!(err, ReplayError::UnknownSession { record: 3, .. }));
    }

    #[test]
    fn double_quit_is_fatal() {
        let ops: OpLog = Rc::default();
        let mut replayer = replayer(&ops);

        let records = [
            record("10", Command::Connect, ""),
            record("10", Command::Quit, ""),
            record("10", Command::Quit, ""),
        ];
        let err = replayer.replay(&records).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::UnknownSession { record: 3, ref command, .. } if command == "Quit"
        ));
    }

    #[test]
    fn repeated_connect_overwrites_previous_entry() {
        let ops: OpLog = Rc::default();
        let mut replayer = replayer(&ops);

        let records = [
            record("10", Command::Connect, ""),
            record("10", Command::Connect, ""),
            record("10", Command::Query, "SELECT 1"),
        ];
        replayer.replay(&records).unwrap();

        // 第二条 Connect 覆盖第一条；语句落在新连接上
        assert_eq!(
            *ops.borrow(),
            vec![
                "connect#1",
                "connect#2",
                "execute#2: SELECT 1",
                "cursor_close#2",
            ]
        );
    }

    #[test]
    fn trailing_open_sessions_are_left_open() {
        let ops: OpLog = Rc::default();
        let mut replayer = replayer(&ops);

        let records = [
            record("10", Command::Connect, ""),
            record("11", Command::Connect, ""),
            record("10", Command::Quit, ""),
        ];
        replayer.replay(&records).unwrap();

        assert_eq!(replayer.open_sessions(), 1);
        // 没有对 #2 的隐式 close
        assert!(!ops.borrow().iter().any(|op| op == "close#2"));
    }
}
