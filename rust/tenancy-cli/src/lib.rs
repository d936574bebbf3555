#![warn(missing_docs)]

//! # Tenancy CLI
//!
//! Evaluates one contract operation against a list of granted permissions,
//! the same way a node would while executing a transaction. Useful for
//! checking what a token permits before handing it to a tenant.
//!
//! ```bash
//! tenancy --visibility private --action read \
//!   --from 0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa --party tm1 \
//!   --grant 'private://0x0/read/contracts?owned.eoa=0x0&from.tm=tm1'
//! ```
//!
//! Set `RUST_LOG=debug` to see every grant comparison.

#[allow(missing_docs)]
mod cli;
pub use cli::*;

use std::fs;

use anyhow::{Context, Result};
use tenancy_authorization::{
    Action, Address, AuthorizationSettings, ContractSecurityAttribute,
    DefaultContractAuthorizationProvider, GrantedAuthority, PermissionUri,
    PreAuthenticatedAuthenticationToken, TokenAuthorizer, TransactionScope,
};

/// Outcome of evaluating one operation.
#[derive(Debug)]
pub struct Evaluation {
    /// The permission asked for.
    pub ask: PermissionUri,
    /// Whether the grants cover it.
    pub authorized: bool,
}

impl TenancyCli {
    fn target(&self) -> Address {
        self.to.unwrap_or_default()
    }

    /// The operation described by the arguments.
    pub fn attribute(&self) -> ContractSecurityAttribute {
        ContractSecurityAttribute::builder()
            .visibility(self.visibility)
            .action(self.action)
            .from(self.from)
            .to(self.target())
            .parties(self.parties.iter().cloned())
            .private_from(self.private_from.clone().unwrap_or_default())
            .build()
    }

    /// The `--grant`s followed by the authorities of the `--token` file.
    pub fn token(&self) -> Result<PreAuthenticatedAuthenticationToken> {
        let mut authorities = self
            .grants
            .iter()
            .map(|grant| GrantedAuthority::new(grant.as_str()))
            .collect::<Vec<_>>();

        if let Some(path) = &self.token {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Could not read token {}", path.display()))?;
            let token: PreAuthenticatedAuthenticationToken = serde_json::from_str(&contents)
                .with_context(|| format!("Could not parse token {}", path.display()))?;
            authorities.extend_from_slice(token.authorities());
        }

        Ok(PreAuthenticatedAuthenticationToken::new(authorities))
    }

    /// Settings from `--settings`, or the defaults.
    pub fn settings(&self) -> Result<AuthorizationSettings> {
        match &self.settings {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("Could not read settings {}", path.display()))?;
                Ok(contents.parse()?)
            }
            None => Ok(AuthorizationSettings::default()),
        }
    }

    /// Evaluate the operation through the hooks a node would install for it.
    pub fn evaluate(&self) -> Result<Evaluation> {
        let ask = PermissionUri::ask(&self.attribute())?;

        let scope = TransactionScope {
            visibility: self.visibility,
            from: self.from,
            parties: self.parties.clone(),
            private_from: self.private_from.clone().unwrap_or_default(),
        };
        let authorizer =
            TokenAuthorizer::new(DefaultContractAuthorizationProvider, self.token()?, scope);
        let context = self.settings()?.context(authorizer);

        let authorized = match self.action {
            Action::Create => context.authorize_create(),
            Action::Read => context.authorize_message_call(self.target())?.read,
            Action::Write => context.authorize_message_call(self.target())?.write,
        };
        tracing::debug!(
            %ask,
            enforcing = context.is_enforcing(),
            authorized,
            "Evaluated request"
        );

        Ok(Evaluation { ask, authorized })
    }
}
