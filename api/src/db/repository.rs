use std::str::FromStr;

use async_trait::async_trait;
use log::{debug, info};
use serde_json::Value;
use sqlx::{
  sqlite::{SqliteConnectOptions, SqliteRow},
  ConnectOptions, Connection, Row, SqliteConnection,
};

use super::KeyValueStore;

pub async fn initialize_db(database_url: &str) -> anyhow::Result<SqliteConnection> {
  info!("acquiring sqlite connection to {}", database_url);
  let mut connection = SqliteConnectOptions::from_str(database_url)?
    .create_if_missing(true)
    .connect()
    .await?;
  sqlx::query(
    r#"
            CREATE TABLE IF NOT EXISTS kv_store (
              name TEXT PRIMARY KEY NOT NULL,
              value TEXT NOT NULL
            )
            "#,
  )
  .execute(&mut connection)
  .await?;
  debug!("sqlite connection established");

  Ok(connection)
}

pub struct SqliteStore {
  pub connection: SqliteConnection,
}

impl SqliteStore {
  pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
    Ok(SqliteStore {
      connection: initialize_db(database_url).await?,
    })
  }

  pub async fn close(self) -> anyhow::Result<()> {
    self.connection.close().await?;
    Ok(())
  }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
  async fn get(&mut self, name: &str, default: Value) -> anyhow::Result<Value> {
    let row: Option<SqliteRow> = sqlx::query("SELECT value FROM kv_store WHERE name = $1")
      .bind(name)
      .fetch_optional(&mut self.connection)
      .await?;
    match row {
      Some(row) => {
        let raw: String = row.try_get("value")?;
        Ok(serde_json::from_str(&raw)?)
      }
      None => Ok(default),
    }
  }

  async fn set(&mut self, name: &str, value: Value) -> anyhow::Result<()> {
    debug!("persisting {}", name);
    let raw = serde_json::to_string(&value)?;
    let mut transaction = self.connection.begin().await?;
    sqlx::query(
      r#"
            INSERT INTO kv_store (name, value)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET value = $2
            "#,
    )
    .bind(name)
    .bind(raw)
    .execute(&mut *transaction)
    .await?;
    transaction.commit().await?;
    Ok(())
  }
}
