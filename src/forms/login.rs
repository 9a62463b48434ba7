use crate::client::{ApiClient, DASHBOARD_ROUTE};
use crate::config::Environ;

use super::{FieldError, SubmitError, SubmitGuard};

/// Shortest credential the backend issues; anything shorter is rejected
/// before it is stored.
pub const MIN_SECRET_KEY_LEN: usize = 67;

#[derive(Debug, Default)]
pub struct LoginForm {
    pub secret_key: String,
    pub guard: SubmitGuard,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        if self.secret_key.chars().count() < MIN_SECRET_KEY_LEN {
            return Err(vec![FieldError::new(
                "secretKey",
                "Please provide a valid secret key",
            )]);
        }
        Ok(())
    }

    /// Stores the credential (Secure per the configured TLS mode), then
    /// pings an authenticated endpoint so a rejected key flows through the
    /// normal 401 contract, then navigates to the dashboard.
    pub async fn submit(&self, api: &ApiClient, environ: &Environ) -> Result<(), SubmitError> {
        let _permit = self.guard.begin().ok_or(SubmitError::InFlight)?;
        self.validate().map_err(SubmitError::Invalid)?;

        api.session().set(&self.secret_key, environ.cookie_secure());

        api.get("/destinations")
            .await
            .map_err(|err| SubmitError::Api(err.to_string()))?;
        api.navigator().push(DASHBOARD_ROUTE);
        Ok(())
    }
}
