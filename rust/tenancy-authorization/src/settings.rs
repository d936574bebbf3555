use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    AuthorizationContext, ContractAuthorizationProvider, TenancyAuthorizationError, TokenAuthorizer,
};

/// Node-level authorization settings.
///
/// ```json
/// { "enabled": true }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AuthorizationSettings {
    /// Whether requests are checked against the caller's grants. When
    /// disabled the node runs single-tenant and every request is permitted.
    pub enabled: bool,
}

impl Default for AuthorizationSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AuthorizationSettings {
    /// Build the hooks for one request.
    pub fn context<P>(&self, authorizer: TokenAuthorizer<P>) -> AuthorizationContext
    where
        P: ContractAuthorizationProvider + Clone + 'static,
    {
        if !self.enabled {
            return AuthorizationContext::new();
        }

        AuthorizationContext::new()
            .with_create(authorizer.clone())
            .with_message_call(authorizer)
    }
}

impl FromStr for AuthorizationSettings {
    type Err = TenancyAuthorizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
            .map_err(|error| TenancyAuthorizationError::Settings(format!("{error}")))
    }
}
