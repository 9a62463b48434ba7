use crate::client::{ApiClient, DASHBOARD_ROUTE};
use crate::models::{NewView, NewViewColumn, MIN_VIEW_COLUMNS};

use super::{FieldError, SubmitError, SubmitGuard};

/// One column row in the view builder.
#[derive(Debug, Clone, Default)]
pub struct ColumnField {
    pub name: String,
    pub is_primary_key: bool,
    pub is_last_modified: bool,
    pub is_tenant_column: bool,
}

/// View creation form. `source_id` holds the raw select value.
#[derive(Debug, Default)]
pub struct ViewForm {
    pub source_id: String,
    pub table_name: String,
    pub columns: Vec<ColumnField>,
    guard: SubmitGuard,
}

impl ViewForm {
    /// Starts with the three conventional rows: a primary key named `id`, a
    /// last-modified column, and a tenant column.
    pub fn new() -> Self {
        Self {
            columns: vec![
                ColumnField {
                    name: "id".into(),
                    is_primary_key: true,
                    ..Default::default()
                },
                ColumnField {
                    is_last_modified: true,
                    ..Default::default()
                },
                ColumnField {
                    is_tenant_column: true,
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    pub fn push_column(&mut self, column: ColumnField) {
        self.columns.push(column);
    }

    pub fn remove_column(&mut self, index: usize) {
        if index < self.columns.len() {
            self.columns.remove(index);
        }
    }

    pub fn validate(&self) -> Result<NewView, Vec<FieldError>> {
        let mut errors = Vec::new();

        let source_id = match self.source_id.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push(FieldError::new("sourceId", "A source is required"));
                None
            }
        };

        if self.table_name.is_empty() {
            errors.push(FieldError::new("tableName", "A table name is required"));
        }

        // Count-only check; the individual role flags are not verified.
        if self.columns.len() < MIN_VIEW_COLUMNS {
            errors.push(FieldError::new(
                "columns",
                "Ensure that you include a primary key column, a last modified column, and a tenant column",
            ));
        }

        match source_id {
            Some(source_id) if errors.is_empty() => Ok(NewView {
                source_id,
                table_name: self.table_name.clone(),
                columns: self
                    .columns
                    .iter()
                    .map(|column| NewViewColumn {
                        name: column.name.clone(),
                        is_primary_key: column.is_primary_key,
                        is_last_modified: column.is_last_modified,
                        is_tenant_column: column.is_tenant_column,
                    })
                    .collect(),
            }),
            _ => Err(errors),
        }
    }

    /// Validates, issues exactly one `POST /views`, and navigates to the
    /// dashboard on success.
    pub async fn submit(&self, api: &ApiClient) -> Result<(), SubmitError> {
        let _permit = self.guard.begin().ok_or(SubmitError::InFlight)?;
        let payload = self.validate().map_err(SubmitError::Invalid)?;

        api.post("/views", &payload)
            .await
            .map_err(|err| SubmitError::Api(err.to_string()))?;
        api.navigator().push(DASHBOARD_ROUTE);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ViewForm {
        let mut form = ViewForm::new();
        form.source_id = "4".into();
        form.table_name = "invoices".into();
        form.columns[1].name = "updated_at".into();
        form.columns[2].name = "customer_id".into();
        form
    }

    #[test]
    fn default_rows_follow_the_convention() {
        let form = ViewForm::new();
        assert_eq!(form.columns.len(), 3);
        assert!(form.columns[0].is_primary_key);
        assert_eq!(form.columns[0].name, "id");
        assert!(form.columns[1].is_last_modified);
        assert!(form.columns[2].is_tenant_column);
    }

    #[test]
    fn valid_form_builds_payload() {
        let payload = filled_form().validate().unwrap();
        assert_eq!(payload.source_id, 4);
        assert_eq!(payload.table_name, "invoices");
        assert_eq!(payload.columns.len(), 3);
        assert!(payload.columns[0].is_primary_key);
    }

    #[test]
    fn fewer_than_three_columns_is_rejected() {
        let mut form = filled_form();
        form.remove_column(2);
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "columns");
        assert!(errors[0].message.contains("primary key column"));
    }

    #[test]
    fn three_columns_pass_even_without_role_flags() {
        // The check is count-only: rows with no role flags still satisfy it.
        let mut form = filled_form();
        for column in &mut form.columns {
            column.is_primary_key = false;
            column.is_last_modified = false;
            column.is_tenant_column = false;
        }
        assert!(form.validate().is_ok());
    }

    #[test]
    fn missing_table_name_and_source_are_reported() {
        let mut form = ViewForm::new();
        form.source_id = "".into();
        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["sourceId", "tableName"]);
    }
}
