use crate::client::{ApiClient, DASHBOARD_ROUTE};
use crate::models::{NewSource, SourceType};

use super::{none_if_empty, FieldError, SubmitError, SubmitGuard};

/// Source creation form. Text inputs are kept as raw strings; `validate`
/// coerces and collects every violation before anything is sent.
#[derive(Debug, Default)]
pub struct SourceForm {
    pub nickname: String,
    pub source_type: SourceType,
    pub host: String,
    pub port: String,
    pub schema: String,
    pub database: String,
    pub username: String,
    pub password: String,
    pub guard: SubmitGuard,
}

impl SourceForm {
    pub fn validate(&self) -> Result<NewSource, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.host.is_empty() {
            errors.push(FieldError::new("host", "Host is required"));
        }

        let port = if self.port.is_empty() {
            errors.push(FieldError::new("port", "Port is required"));
            None
        } else {
            match self.port.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    errors.push(FieldError::new("port", "Port must be a number"));
                    None
                }
            }
        };

        if self.database.is_empty() {
            errors.push(FieldError::new("database", "Database is required"));
        }
        if self.username.is_empty() {
            errors.push(FieldError::new("username", "Username is required"));
        }

        match port {
            Some(port) if errors.is_empty() => Ok(NewSource {
                nickname: none_if_empty(&self.nickname),
                source_type: self.source_type,
                host: self.host.clone(),
                port,
                schema: none_if_empty(&self.schema),
                database: self.database.clone(),
                username: self.username.clone(),
                password: none_if_empty(&self.password),
            }),
            _ => Err(errors),
        }
    }

    /// Validates, issues exactly one `POST /sources`, and navigates to the
    /// dashboard on success.
    pub async fn submit(&self, api: &ApiClient) -> Result<(), SubmitError> {
        let _permit = self.guard.begin().ok_or(SubmitError::InFlight)?;
        let payload = self.validate().map_err(SubmitError::Invalid)?;

        api.post("/sources", &payload)
            .await
            .map_err(|err| SubmitError::Api(err.to_string()))?;
        api.navigator().push(DASHBOARD_ROUTE);
        Ok(())
    }
}
