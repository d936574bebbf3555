#![warn(missing_docs)]

//! Authorization of contract operations for nodes shared by several tenants.
//!
//! A caller arrives with a [`PreAuthenticatedAuthenticationToken`] listing
//! the permissions granted to it. Each operation it attempts is described by
//! one or more [`ContractSecurityAttribute`]s, and a
//! [`ContractAuthorizationProvider`] decides whether every attribute is
//! covered by at least one grant.
//!
//! ```rust
//! use tenancy_authorization::{
//!     ContractAuthorizationProvider, ContractSecurityAttribute,
//!     DefaultContractAuthorizationProvider, PreAuthenticatedAuthenticationToken,
//! };
//!
//! # fn main() -> Result<(), tenancy_authorization::TenancyAuthorizationError> {
//! let token = PreAuthenticatedAuthenticationToken::from_iter([
//!     "private://0x0/create/contracts?from.tm=tm1&from.tm=tm2",
//! ]);
//!
//! let attribute = ContractSecurityAttribute::builder()
//!     .private()
//!     .create()
//!     .from("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".parse()?)
//!     .private_from("tm1")
//!     .build();
//!
//! assert!(DefaultContractAuthorizationProvider.is_authorized(&token, &[attribute])?);
//! # Ok(())
//! # }
//! ```
//!
//! Execution environments consume decisions through the typed hooks of an
//! [`AuthorizationContext`], typically built by
//! [`AuthorizationSettings::context`] from a [`TokenAuthorizer`].

pub use tenancy_permission::{
    AccountStateSecurityAttribute, Action, Address, ContractSecurityAttribute, PermissionUri,
    TenancyPermissionError, Visibility,
};

mod error;
pub use error::*;

mod token;
pub use token::*;

mod provider;
pub use provider::*;

mod account;
pub use account::*;

mod context;
pub use context::*;

mod settings;
pub use settings::*;
