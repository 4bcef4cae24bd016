use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{Client, RedisError, Value};

use crate::{Command, Reply, StoreConnection, StoreError};

/// Redis-backed store connection.
///
/// Wraps a multiplexed connection; every command runs on a cheap clone of the
/// handle, so a dropped or cancelled call leaves the shared pipeline usable.
#[derive(Clone)]
pub struct RedisConnection {
    conn: MultiplexedConnection,
}

impl RedisConnection {
    /// Open a connection from a Redis URL (e.g. "redis://127.0.0.1:6379/0").
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = Client::open(url).map_err(map_redis_error)?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }

    /// Wrap an already established multiplexed connection.
    pub fn from_connection(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl StoreConnection for RedisConnection {
    async fn execute(&self, command: Command) -> Result<Reply, StoreError> {
        let mut conn = self.conn.clone();
        let value: Value = to_redis_cmd(&command)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        map_redis_value(value)
    }
}

fn to_redis_cmd(command: &Command) -> redis::Cmd {
    match command {
        Command::Set {
            key,
            value,
            expire_seconds,
        } => {
            let mut cmd = redis::cmd("SET");
            cmd.arg(key).arg(value);
            if let Some(seconds) = expire_seconds {
                cmd.arg("EX").arg(*seconds);
            }
            cmd
        }
        Command::Get { key } => {
            let mut cmd = redis::cmd("GET");
            cmd.arg(key);
            cmd
        }
        Command::Del { key } => {
            let mut cmd = redis::cmd("DEL");
            cmd.arg(key);
            cmd
        }
        Command::Exists { key } => {
            let mut cmd = redis::cmd("EXISTS");
            cmd.arg(key);
            cmd
        }
    }
}

fn map_redis_value(value: Value) -> Result<Reply, StoreError> {
    match value {
        Value::Nil => Ok(Reply::Nil),
        Value::Okay => Ok(Reply::Status("OK".to_string())),
        Value::SimpleString(s) => Ok(Reply::Status(s)),
        Value::Int(n) => Ok(Reply::Int(n)),
        Value::BulkString(bytes) => String::from_utf8(bytes)
            .map(Reply::Bulk)
            .map_err(|e| StoreError::UnexpectedReply(format!("non UTF-8 value: {}", e))),
        other => Err(StoreError::UnexpectedReply(format!("{:?}", other))),
    }
}

fn map_redis_error(err: RedisError) -> StoreError {
    StoreError::Connection(err.to_string())
}
