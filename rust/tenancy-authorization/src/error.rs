use tenancy_permission::TenancyPermissionError;

/// Errors that can occur while authorizing a request.
///
/// A request that is simply not permitted is reported as `Ok(false)` by the
/// providers. These errors are reserved for requests that could not be
/// evaluated at all.
#[derive(Debug, thiserror::Error)]
pub enum TenancyAuthorizationError {
    /// The requested attribute could not be encoded as a permission.
    #[error(transparent)]
    Permission(#[from] TenancyPermissionError),

    /// None of the granted authorities covers the request.
    #[error("Not authorized")]
    NotAuthorized,

    /// The capability is declared but has no implementation yet.
    #[error("Not implemented: {0}")]
    Unimplemented(&'static str),

    /// Settings could not be loaded.
    #[error("Invalid settings: {0}")]
    Settings(String),
}
