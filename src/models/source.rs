use serde::{Deserialize, Serialize};

use super::common::ConnectionStatus;

/// Database engines a source can be backed by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    #[default]
    Postgres,
    Mysql,
    Mariadb,
    Cockroachdb,
    Redshift,
    Snowflake,
    Bigquery,
    Mssql,
}

impl SourceType {
    pub const ALL: [SourceType; 8] = [
        SourceType::Postgres,
        SourceType::Mysql,
        SourceType::Mariadb,
        SourceType::Cockroachdb,
        SourceType::Redshift,
        SourceType::Snowflake,
        SourceType::Bigquery,
        SourceType::Mssql,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Postgres => "POSTGRES",
            SourceType::Mysql => "MYSQL",
            SourceType::Mariadb => "MARIADB",
            SourceType::Cockroachdb => "COCKROACHDB",
            SourceType::Redshift => "REDSHIFT",
            SourceType::Snowflake => "SNOWFLAKE",
            SourceType::Bigquery => "BIGQUERY",
            SourceType::Mssql => "MSSQL",
        }
    }
}

/// A registered source database as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: i64,
    pub nickname: Option<String>,
    pub status: ConnectionStatus,
    pub source_type: SourceType,
    pub schema: Option<String>,
    pub database: String,
}

impl Source {
    /// Label shown in source pickers.
    pub fn display_label(&self) -> String {
        match self.nickname.as_deref() {
            Some(nickname) if !nickname.is_empty() => {
                format!("{} ({})", nickname, self.source_type.as_str())
            }
            _ => format!("Source {} ({})", self.id, self.source_type.as_str()),
        }
    }
}

/// Creation payload for `POST /sources`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub source_type: SourceType,
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub database: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
