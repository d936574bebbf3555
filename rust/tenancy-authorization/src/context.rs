//! Request-scoped authorization hooks.
//!
//! Contract execution asks two questions while it runs: may this caller
//! deploy a contract, and may it read or write a given contract. An
//! [`AuthorizationContext`] carries the answers as typed hooks that the
//! execution environment receives alongside the request.

use std::sync::Arc;

use tenancy_permission::{Action, Address, ContractSecurityAttribute, Visibility};

use crate::{
    ContractAuthorizationProvider, PreAuthenticatedAuthenticationToken, TenancyAuthorizationError,
};

/// Decides whether contract creation is permitted for the current request.
pub trait AuthorizeCreate: Send + Sync {
    /// Whether the caller may create a contract.
    fn authorize_create(&self) -> bool;
}

impl<F> AuthorizeCreate for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn authorize_create(&self) -> bool {
        self()
    }
}

/// Access granted to one contract for a message call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MessageCallDecision {
    /// Contract state may be read.
    pub read: bool,
    /// Contract state may be written.
    pub write: bool,
}

impl MessageCallDecision {
    /// Both read and write access.
    pub const ALLOWED: Self = Self {
        read: true,
        write: true,
    };
}

/// Decides which access a message call has to a contract.
pub trait AuthorizeMessageCall: Send + Sync {
    /// Read and write access to the contract at `contract`.
    fn authorize_message_call(
        &self,
        contract: Address,
    ) -> Result<MessageCallDecision, TenancyAuthorizationError>;
}

impl<F> AuthorizeMessageCall for F
where
    F: Fn(Address) -> Result<MessageCallDecision, TenancyAuthorizationError> + Send + Sync,
{
    fn authorize_message_call(
        &self,
        contract: Address,
    ) -> Result<MessageCallDecision, TenancyAuthorizationError> {
        self(contract)
    }
}

/// Authorization hooks attached to one request.
///
/// A hook that is not installed permits everything, which is how a node
/// without multi-tenancy behaves.
#[derive(Clone, Default)]
pub struct AuthorizationContext {
    create: Option<Arc<dyn AuthorizeCreate>>,
    message_call: Option<Arc<dyn AuthorizeMessageCall>>,
}

impl AuthorizationContext {
    /// A context without hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the contract creation hook.
    pub fn with_create(mut self, hook: impl AuthorizeCreate + 'static) -> Self {
        self.create = Some(Arc::new(hook));
        self
    }

    /// Install the message call hook.
    pub fn with_message_call(mut self, hook: impl AuthorizeMessageCall + 'static) -> Self {
        self.message_call = Some(Arc::new(hook));
        self
    }

    /// Whether any hook is installed.
    pub fn is_enforcing(&self) -> bool {
        self.create.is_some() || self.message_call.is_some()
    }

    /// Whether contract creation is permitted.
    pub fn authorize_create(&self) -> bool {
        self.create
            .as_ref()
            .is_none_or(|hook| hook.authorize_create())
    }

    /// Access permitted for a message call to `contract`.
    pub fn authorize_message_call(
        &self,
        contract: Address,
    ) -> Result<MessageCallDecision, TenancyAuthorizationError> {
        match &self.message_call {
            Some(hook) => hook.authorize_message_call(contract),
            None => Ok(MessageCallDecision::ALLOWED),
        }
    }
}

impl std::fmt::Debug for AuthorizationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationContext")
            .field("create", &self.create.is_some())
            .field("message_call", &self.message_call.is_some())
            .finish()
    }
}

/// Transaction details needed to describe contract operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionScope {
    /// Visibility of the transaction.
    pub visibility: Visibility,
    /// Account sending the transaction.
    pub from: Address,
    /// Private-network parties the transaction is shared with.
    pub parties: Vec<String>,
    /// Private-network identity that originated the transaction.
    pub private_from: String,
}

impl TransactionScope {
    fn attribute(&self, action: Action, to: Address) -> ContractSecurityAttribute {
        ContractSecurityAttribute::builder()
            .visibility(self.visibility)
            .action(action)
            .from(self.from)
            .to(to)
            .parties(self.parties.iter().cloned())
            .private_from(self.private_from.as_str())
            .build()
    }
}

/// Answers the execution hooks for one caller by asking a
/// [`ContractAuthorizationProvider`] about the caller's token.
#[derive(Clone, Debug)]
pub struct TokenAuthorizer<P> {
    provider: P,
    token: Arc<PreAuthenticatedAuthenticationToken>,
    scope: TransactionScope,
}

impl<P: ContractAuthorizationProvider> TokenAuthorizer<P> {
    /// Bind a provider to a caller's token and transaction.
    pub fn new(
        provider: P,
        token: impl Into<Arc<PreAuthenticatedAuthenticationToken>>,
        scope: TransactionScope,
    ) -> Self {
        Self {
            provider,
            token: token.into(),
            scope,
        }
    }

    /// The transaction this authorizer answers for.
    pub fn scope(&self) -> &TransactionScope {
        &self.scope
    }
}

impl<P: ContractAuthorizationProvider> AuthorizeCreate for TokenAuthorizer<P> {
    fn authorize_create(&self) -> bool {
        let attribute = self.scope.attribute(Action::Create, Address::ZERO);
        match self.provider.is_authorized(&self.token, &[attribute]) {
            Ok(authorized) => authorized,
            Err(error) => {
                tracing::error!(%error, "Could not authorize contract creation");
                false
            }
        }
    }
}

impl<P: ContractAuthorizationProvider> AuthorizeMessageCall for TokenAuthorizer<P> {
    fn authorize_message_call(
        &self,
        contract: Address,
    ) -> Result<MessageCallDecision, TenancyAuthorizationError> {
        let read = self
            .provider
            .is_authorized(&self.token, &[self.scope.attribute(Action::Read, contract)])?;
        let write = self
            .provider
            .is_authorized(&self.token, &[self.scope.attribute(Action::Write, contract)])?;

        Ok(MessageCallDecision { read, write })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DefaultContractAuthorizationProvider;
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    const ALICE: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const CONTRACT: &str = "0xcccccccccccccccccccccccccccccccccccccccc";

    fn authorizer(
        visibility: Visibility,
        grants: &[String],
    ) -> Result<TokenAuthorizer<DefaultContractAuthorizationProvider>> {
        Ok(TokenAuthorizer::new(
            DefaultContractAuthorizationProvider,
            grants.iter().cloned().collect::<PreAuthenticatedAuthenticationToken>(),
            TransactionScope {
                visibility,
                from: ALICE.parse()?,
                parties: vec!["tm1".into()],
                private_from: "tm1".into(),
            },
        ))
    }

    #[test]
    fn it_permits_everything_without_hooks() -> Result<()> {
        let context = AuthorizationContext::new();

        assert!(!context.is_enforcing());
        assert!(context.authorize_create());
        assert_eq!(
            context.authorize_message_call(CONTRACT.parse()?)?,
            MessageCallDecision::ALLOWED
        );
        Ok(())
    }

    #[test]
    fn it_accepts_closures_as_hooks() -> Result<()> {
        let context = AuthorizationContext::new()
            .with_create(|| false)
            .with_message_call(|_contract: Address| -> Result<_, TenancyAuthorizationError> {
                Ok(MessageCallDecision {
                    read: true,
                    write: false,
                })
            });

        assert!(context.is_enforcing());
        assert!(!context.authorize_create());
        assert_eq!(
            context.authorize_message_call(CONTRACT.parse()?)?,
            MessageCallDecision {
                read: true,
                write: false
            }
        );
        Ok(())
    }

    #[test]
    fn it_authorizes_private_creation_from_token() -> Result<()> {
        let granted = authorizer(
            Visibility::Private,
            &[format!("private://{ALICE}/create/contracts?from.tm=tm1")],
        )?;
        assert!(granted.authorize_create());

        let denied = authorizer(
            Visibility::Private,
            &[format!("private://{ALICE}/create/contracts?from.tm=tm2")],
        )?;
        assert!(!denied.authorize_create());
        Ok(())
    }

    #[test]
    fn it_splits_read_and_write_for_message_calls() -> Result<()> {
        let authorizer = authorizer(
            Visibility::Private,
            &[format!(
                "private://{ALICE}/read/contracts?owned.eoa={CONTRACT}&from.tm=tm1"
            )],
        )?;
        let context = AuthorizationContext::new().with_message_call(authorizer);

        assert_eq!(
            context.authorize_message_call(CONTRACT.parse()?)?,
            MessageCallDecision {
                read: true,
                write: false
            }
        );
        Ok(())
    }

    #[test]
    fn it_allows_public_message_calls() -> Result<()> {
        let authorizer = authorizer(Visibility::Public, &[])?;

        assert!(authorizer.authorize_create());
        assert_eq!(
            authorizer.authorize_message_call(CONTRACT.parse()?)?,
            MessageCallDecision::ALLOWED
        );
        Ok(())
    }
}
