use serde::{Deserialize, Serialize};
use tenancy_permission::{PermissionUri, TenancyPermissionError};

/// One permission held by the caller, in its raw permission URI form.
///
/// The string comes from an untrusted grant list and is only parsed when it
/// gets evaluated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantedAuthority {
    raw: String,
}

impl GrantedAuthority {
    /// Wrap a raw permission string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The raw permission string.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parse the raw string as a permission URI.
    pub fn permission(&self) -> Result<PermissionUri, TenancyPermissionError> {
        self.raw.parse()
    }
}

impl From<&str> for GrantedAuthority {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for GrantedAuthority {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Credential of an already authenticated caller.
///
/// Produced by an external authenticator and trusted as-is: it carries the
/// ordered list of authorities granted to the caller and nothing here checks
/// where they came from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreAuthenticatedAuthenticationToken {
    #[serde(default)]
    authorities: Vec<GrantedAuthority>,
}

impl PreAuthenticatedAuthenticationToken {
    /// Create a token holding the given authorities.
    pub fn new(authorities: Vec<GrantedAuthority>) -> Self {
        Self { authorities }
    }

    /// Granted authorities in the order they were issued.
    pub fn authorities(&self) -> &[GrantedAuthority] {
        &self.authorities
    }

    /// Parsed grants in order, skipping authorities that do not parse.
    pub fn grants(&self) -> impl Iterator<Item = PermissionUri> + '_ {
        self.authorities
            .iter()
            .filter_map(|authority| match authority.permission() {
                Ok(permission) => Some(permission),
                Err(error) => {
                    tracing::debug!(granted = authority.raw(), %error, "Skipping malformed grant");
                    None
                }
            })
    }
}

impl<A: Into<GrantedAuthority>> FromIterator<A> for PreAuthenticatedAuthenticationToken {
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
