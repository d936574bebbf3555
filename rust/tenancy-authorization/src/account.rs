use tenancy_permission::AccountStateSecurityAttribute;

use crate::{PreAuthenticatedAuthenticationToken, TenancyAuthorizationError};

/// Authorizes value transfers between accounts against the authorities
/// granted in a [`PreAuthenticatedAuthenticationToken`].
///
/// Follows the same contract as
/// [`ContractAuthorizationProvider`](crate::ContractAuthorizationProvider):
/// a denial is `Ok(false)` and errors mean the request could not be
/// evaluated.
pub trait AccountAuthorizationProvider: Send + Sync {
    /// Whether the transfer described by `attribute` is permitted.
    fn is_authorized(
        &self,
        token: &PreAuthenticatedAuthenticationToken,
        attribute: &AccountStateSecurityAttribute,
    ) -> Result<bool, TenancyAuthorizationError>;
}

/// Account provider for nodes that do not restrict value transfers yet.
///
/// Every call fails with [`TenancyAuthorizationError::Unimplemented`] so
/// that a caller wiring it in by mistake cannot silently grant or deny
/// transfers.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnimplementedAccountAuthorizationProvider;

impl AccountAuthorizationProvider for UnimplementedAccountAuthorizationProvider {
    fn is_authorized(
        &self,
        _token: &PreAuthenticatedAuthenticationToken,
        attribute: &AccountStateSecurityAttribute,
    ) -> Result<bool, TenancyAuthorizationError> {
        tracing::error!(
            from = %attribute.from,
            to = %attribute.to,
            "Account authorization is not implemented"
        );
        Err(TenancyAuthorizationError::Unimplemented(
            "account state authorization",
        ))
    }
}
