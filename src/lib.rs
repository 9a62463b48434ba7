// Pipebird admin client library
// Typed wire contracts, session handling, and the authenticated API client
// used by the admin dashboard.

pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod session;

// Re-export commonly used types for convenience
pub use client::{ApiClient, Navigator, NoopNavigator, DASHBOARD_ROUTE, LOGIN_ROUTE};
pub use config::{Environ, EnvironError, Environment, TlsMode};
pub use error::ApiError;
pub use forms::{
    ColumnField, DestinationForm, FieldError, LoginForm, SourceForm, SubmitError, ViewForm,
};
pub use models::*;
pub use session::{CookieFile, MemorySession, SessionStore, StaticSecret, AUTH_COOKIE};
