#![warn(missing_docs)]

//! Permission URIs for multi-tenant contract access.
//!
//! A requested contract operation and a granted permission share one URI
//! grammar:
//!
//! ```text
//! <visibility>://<address-or-wildcard>/<action>/contracts?<query>
//! ```
//!
//! Authorization is a two-phase process. First both sides are canonicalized
//! into a [`PermissionUri`]: the ask is encoded from a
//! [`ContractSecurityAttribute`] and every grant is parsed from the raw
//! string the caller holds. Then the [`matches`] function compares them
//! structurally, by scheme, host, path and set-valued query.
//!
//! ```rust
//! use tenancy_permission::{ContractSecurityAttribute, PermissionUri, matches};
//!
//! # fn main() -> Result<(), tenancy_permission::TenancyPermissionError> {
//! let attribute = ContractSecurityAttribute::builder()
//!     .private()
//!     .read()
//!     .from("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".parse()?)
//!     .party("tm1")
//!     .build();
//!
//! let ask = PermissionUri::ask(&attribute)?;
//! let granted: PermissionUri = "private://0x0/read/contracts?owned.eoa=0x0&from.tm=tm1".parse()?;
//!
//! assert!(matches(&attribute, &ask, &granted));
//! # Ok(())
//! # }
//! ```

mod error;
pub use error::*;

mod address;
pub use address::*;

mod attribute;
pub use attribute::*;

mod query;
pub use query::*;

mod uri;
pub use uri::*;

mod matcher;
pub use matcher::*;
