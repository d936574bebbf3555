use std::{fmt::Display, ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    Action, ContractSecurityAttribute, QUERY_FROM_TM, QUERY_OWNED_EOA, Query,
    TenancyPermissionError, Visibility,
};

/// Resource segment that follows the action in every contract permission path.
pub const CONTRACTS: &str = "contracts";

/// A permission in its canonical URI form:
///
/// ```text
/// <visibility>://<address-or-wildcard>/<action>/contracts?<query>
/// ```
///
/// Both sides of an authorization check take this form. The "ask" is encoded
/// from a [`ContractSecurityAttribute`], while each "grant" is parsed from a
/// granted authority string held by the caller.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PermissionUri(Url);

impl PermissionUri {
    /// Compose a permission URI from its parts.
    pub fn compose(
        visibility: Visibility,
        host: &str,
        action: Action,
        query: &Query,
    ) -> Result<Self, TenancyPermissionError> {
        let raw = format!("{visibility}://{host}/{action}/{CONTRACTS}");
        let mut url = Url::parse(&raw)
            .map_err(|error| TenancyPermissionError::Format(format!("{raw}: {error}")))?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }

        Ok(Self(url))
    }

    /// Encode the permission asked for by a security attribute.
    ///
    /// The host is the executing account. The owned account goes into
    /// `owned.eoa` for everything except private contract creation, which is
    /// described by the originating party alone.
    pub fn ask(attribute: &ContractSecurityAttribute) -> Result<Self, TenancyPermissionError> {
        let owned = attribute.owned_account().normalize();
        let mut query = Query::new();

        match (attribute.visibility, attribute.action) {
            (Visibility::Public, _) => {
                query.set(QUERY_OWNED_EOA, owned);
            }
            (Visibility::Private, Action::Read | Action::Write) => {
                query.set(QUERY_OWNED_EOA, owned);
                for party in &attribute.parties {
                    query.add(QUERY_FROM_TM, party.as_str());
                }
            }
            (Visibility::Private, Action::Create) => {
                query.set(QUERY_FROM_TM, attribute.private_from.as_str());
            }
        }

        Self::compose(
            attribute.visibility,
            &attribute.from.normalize(),
            attribute.action,
            &query,
        )
    }

    /// The scheme, i.e. the visibility as a string.
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// The host, i.e. the executing address or the wildcard. Empty when the
    /// URI has no host.
    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }

    /// The path, e.g. `/write/contracts`.
    pub fn path(&self) -> &str {
        self.0.path()
    }

    /// The action named by the first path segment, when it is one we know.
    pub fn action(&self) -> Option<Action> {
        self.0
            .path_segments()
            .and_then(|mut segments| segments.next())
            .and_then(|segment| segment.parse().ok())
    }

    /// Decoded query parameters.
    pub fn query(&self) -> Query {
        self.0.query_pairs().collect()
    }
}

impl Display for PermissionUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", **self)
    }
}

impl Deref for PermissionUri {
    type Target = Url;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<PermissionUri> for String {
    fn from(value: PermissionUri) -> Self {
        value.0.into()
    }
}

impl FromStr for PermissionUri {
    type Err = TenancyPermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse().map_err(|error| {
            TenancyPermissionError::InvalidUri(format!("{s}: {error}"))
        })?))
    }
}

impl TryFrom<String> for PermissionUri {
    type Error = TenancyPermissionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&ContractSecurityAttribute> for PermissionUri {
    type Error = TenancyPermissionError;

    fn try_from(value: &ContractSecurityAttribute) -> Result<Self, Self::Error> {
        Self::ask(value)
    }
}
