use tenancy_permission::{ContractSecurityAttribute, PermissionUri, is_public, matches};

use crate::{PreAuthenticatedAuthenticationToken, TenancyAuthorizationError};

/// Authorizes contract operations against the authorities granted in a
/// [`PreAuthenticatedAuthenticationToken`].
pub trait ContractAuthorizationProvider: Send + Sync {
    /// Whether every attribute is covered by at least one granted authority.
    ///
    /// Returns `Ok(false)` when access is denied, including when no attributes
    /// are given.
    ///
    /// # Errors
    ///
    /// Fails when an attribute cannot be encoded as a permission.
    fn is_authorized(
        &self,
        token: &PreAuthenticatedAuthenticationToken,
        attributes: &[ContractSecurityAttribute],
    ) -> Result<bool, TenancyAuthorizationError>;

    /// Like [`ContractAuthorizationProvider::is_authorized`], but reports a
    /// denial as [`TenancyAuthorizationError::NotAuthorized`].
    fn authorize(
        &self,
        token: &PreAuthenticatedAuthenticationToken,
        attributes: &[ContractSecurityAttribute],
    ) -> Result<(), TenancyAuthorizationError> {
        if self.is_authorized(token, attributes)? {
            Ok(())
        } else {
            Err(TenancyAuthorizationError::NotAuthorized)
        }
    }
}

/// Stateless provider implementing the standard permission matching rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultContractAuthorizationProvider;

impl DefaultContractAuthorizationProvider {
    /// Whether a single attribute is covered by one of the granted
    /// authorities. Grants are tried in order and the first match wins.
    fn is_attribute_authorized(
        &self,
        token: &PreAuthenticatedAuthenticationToken,
        attribute: &ContractSecurityAttribute,
    ) -> Result<bool, TenancyAuthorizationError> {
        let ask = PermissionUri::ask(attribute)?;

        if is_public(&ask) {
            tracing::debug!(%ask, "Public contract access");
            return Ok(true);
        }

        for granted in token.grants() {
            let passed = matches(attribute, &ask, &granted);
            tracing::debug!(passed, %granted, %ask, "Checking contract access");
            if passed {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

impl ContractAuthorizationProvider for DefaultContractAuthorizationProvider {
    fn is_authorized(
        &self,
        token: &PreAuthenticatedAuthenticationToken,
        attributes: &[ContractSecurityAttribute],
    ) -> Result<bool, TenancyAuthorizationError> {
        if attributes.is_empty() {
            return Ok(false);
        }

        for attribute in attributes {
            if !self.is_attribute_authorized(token, attribute)? {
                tracing::debug!(%attribute, "Contract access denied");
                return Ok(false);
            }
        }

        Ok(true)
    }
}
