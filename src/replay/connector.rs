//! 数据库协作方接口
//!
//! 回放器通过三个 trait 与具体数据库驱动解耦：
//! `Connector` 负责开连接，`Connection` 负责发放游标和关闭，
//! `Cursor` 负责执行单条语句。连接参数是固定的外部配置
//! （见 [`ConnectParams`]），不从日志内容推导。
//!
//! 自带的实现是基于 rusqlite 的 [`SqliteConnector`]（`sqlite` feature）。

use crate::config::ConnectParams;
use crate::error::ConnectorError;

/// 单条语句的执行上下文
///
/// 每个游标严格只服务一条 `Query` 记录：获取、执行、关闭，
/// 然后才处理下一条记录。无论执行成功与否游标都必须被关闭。
pub trait Cursor {
    /// 执行一条语句
    ///
    /// 语句文本原样传给驱动，不做任何改写。数据或语句错误以
    /// `Err` 返回，由回放器决定上报后继续。
    fn execute(&mut self, statement: &str) -> Result<(), ConnectorError>;

    /// 关闭游标，释放执行上下文
    fn close(self) -> Result<(), ConnectorError>;
}

/// 一条活跃的数据库连接
///
/// 连接在 `Connect` 和 `Quit` 之间存活，期间可以服务多条 `Query`。
pub trait Connection {
    /// 此连接发放的游标类型
    type Cursor<'a>: Cursor
    where
        Self: 'a;

    /// 获取一个新的游标
    fn cursor(&mut self) -> Result<Self::Cursor<'_>, ConnectorError>;

    /// 关闭连接
    fn close(&mut self) -> Result<(), ConnectorError>;
}

/// 数据库连接工厂
///
/// 每条 `Connect` 记录都会用同一组 [`ConnectParams`] 要求一条全新连接。
pub trait Connector {
    /// 此工厂产出的连接类型
    type Conn: Connection;

    /// 按固定参数建立一条新连接
    fn connect(&mut self, params: &ConnectParams) -> Result<Self::Conn, ConnectorError>;
}

#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteConnection, SqliteConnector, SqliteCursor};

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::{Connection, Connector, Cursor};
    use crate::config::ConnectParams;
    use crate::error::ConnectorError;

    /// 基于 rusqlite 的连接工厂
    ///
    /// SQLite 是进程内数据库，[`ConnectParams::database`] 被当作数据库
    /// 文件路径使用（`:memory:` 也可以）；host / user / password 被接受
    /// 但不参与连接。
    #[derive(Debug, Default, Clone, Copy)]
    pub struct SqliteConnector;

    /// 一条打开的 SQLite 连接
    ///
    /// `Quit` 关闭后内部句柄被置空，后续对它的任何操作都会得到
    /// "connection already closed" 错误而不是 panic。
    pub struct SqliteConnection {
        conn: Option<rusqlite::Connection>,
    }

    /// SQLite 的语句执行上下文
    ///
    /// rusqlite 没有独立的游标对象，这里用对连接的独占借用来表达
    /// "一条记录一个执行上下文"的作用域；关闭即释放借用。
    pub struct SqliteCursor<'a> {
        conn: &'a rusqlite::Connection,
    }

    impl Connector for SqliteConnector {
        type Conn = SqliteConnection;

        fn connect(&mut self, params: &ConnectParams) -> Result<Self::Conn, ConnectorError> {
            let conn = if params.database == ":memory:" {
                rusqlite::Connection::open_in_memory()
            } else {
                rusqlite::Connection::open(&params.database)
            }
            .map_err(|e| ConnectorError::new(e.to_string()))?;

            Ok(SqliteConnection { conn: Some(conn) })
        }
    }

    impl Connection for SqliteConnection {
        type Cursor<'a> = SqliteCursor<'a>;

        fn cursor(&mut self) -> Result<Self::Cursor<'_>, ConnectorError> {
            match &self.conn {
                Some(conn) => Ok(SqliteCursor { conn }),
                None => Err(ConnectorError::new("connection already closed")),
            }
        }

        fn close(&mut self) -> Result<(), ConnectorError> {
            match self.conn.take() {
                Some(conn) => conn
                    .close()
                    .map_err(|(_, e)| ConnectorError::new(e.to_string())),
                None => Err(ConnectorError::new("connection already closed")),
            }
        }
    }

    impl SqliteCursor<'_> {
        /// 执行任意种类的语句；SELECT 的结果行被取完后丢弃
        fn run(&self, statement: &str) -> rusqlite::Result<()> {
            let mut stmt = self.conn.prepare(statement)?;
            if stmt.column_count() == 0 {
                stmt.execute([])?;
            } else {
                let mut rows = stmt.query([])?;
                while rows.next()?.is_some() {}
            }
            Ok(())
        }
    }

    impl Cursor for SqliteCursor<'_> {
        fn execute(&mut self, statement: &str) -> Result<(), ConnectorError> {
            self.run(statement)
                .map_err(|e| ConnectorError::new(e.to_string()))
        }

        fn close(self) -> Result<(), ConnectorError> {
            // 借用在此结束，没有需要显式释放的驱动资源
            Ok(())
        }
    }

}
