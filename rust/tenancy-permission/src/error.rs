/// Errors that can occur while encoding, decoding or parsing permissions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TenancyPermissionError {
    /// A security attribute could not be composed into a valid permission URI.
    #[error("Could not format permission: {0}")]
    Format(String),

    /// A string could not be parsed as a 20-byte account address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// A granted authority could not be parsed as a permission URI.
    #[error("Invalid permission URI: {0}")]
    InvalidUri(String),

    /// The visibility is neither `public` nor `private`.
    #[error("Unsupported visibility: {0}")]
    UnsupportedVisibility(String),

    /// The action is not one of `read`, `write` or `create`.
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),
}
