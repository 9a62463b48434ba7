use serde::{Deserialize, Serialize};

/// Minimum number of columns a view must carry: by convention one primary
/// key, one last-modified column, and one tenant column.
pub const MIN_VIEW_COLUMNS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewColumn {
    pub id: i64,
    pub name: String,
    pub data_type: String,
    pub is_primary_key: bool,
    pub is_last_modified: bool,
    pub is_tenant_column: bool,
}

/// A curated table projection over a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub id: i64,
    pub source_id: i64,
    pub table_name: String,
    pub columns: Vec<ViewColumn>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewViewColumn {
    pub name: String,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_last_modified: bool,
    #[serde(default)]
    pub is_tenant_column: bool,
}

/// Creation payload for `POST /views`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewView {
    pub source_id: i64,
    pub table_name: String,
    pub columns: Vec<NewViewColumn>,
}
