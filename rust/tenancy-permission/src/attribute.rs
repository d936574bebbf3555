use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Address, TenancyPermissionError};

/// Whether a contract's state is world-readable or restricted to named parties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible to everyone.
    #[default]
    Public,
    /// Visible only to the parties of the private transaction.
    Private,
}

impl Visibility {
    /// The permission URI scheme for this visibility.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = TenancyPermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            _ => Err(TenancyPermissionError::UnsupportedVisibility(s.into())),
        }
    }
}

/// The operation category requested against a contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Read contract state.
    #[default]
    Read,
    /// Modify contract state.
    Write,
    /// Deploy a contract.
    Create,
}

impl Action {
    /// The first path segment of a permission URI for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Create => "create",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = TenancyPermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "read" => Ok(Action::Read),
            "write" => Ok(Action::Write),
            "create" => Ok(Action::Create),
            _ => Err(TenancyPermissionError::UnsupportedAction(s.into())),
        }
    }
}

/// Describes one contract operation that needs to be authorized.
///
/// `parties` is only meaningful for private reads and writes, and
/// `private_from` only for private contract creation. Both are ignored when
/// the visibility is [`Visibility::Public`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSecurityAttribute {
    /// Visibility of the contract being accessed.
    pub visibility: Visibility,
    /// Requested action.
    pub action: Action,
    /// Account executing the request.
    pub from: Address,
    /// Target contract or account. Zero means unset, in which case `from` is
    /// treated as the owned account.
    #[serde(default)]
    pub to: Address,
    /// Private-network participants the request is addressed to.
    #[serde(default)]
    pub parties: Vec<String>,
    /// Private-network identity originating a private contract creation.
    #[serde(default)]
    pub private_from: String,
}

impl ContractSecurityAttribute {
    /// Start building an attribute (defaults to a public read from the zero
    /// address).
    pub fn builder() -> ContractSecurityAttributeBuilder {
        ContractSecurityAttributeBuilder::default()
    }

    /// The account that owns the state being accessed: `to` when set, `from`
    /// otherwise.
    pub fn owned_account(&self) -> &Address {
        if self.to.is_zero() {
            &self.from
        } else {
            &self.to
        }
    }
}

impl Display for ContractSecurityAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} from={} to={}",
            self.visibility, self.action, self.from, self.to
        )?;
        if self.visibility == Visibility::Private {
            write!(
                f,
                " parties=[{}] private_from={}",
                self.parties.join(","),
                self.private_from
            )?;
        }
        Ok(())
    }
}

/// Fluent builder for [`ContractSecurityAttribute`].
#[derive(Clone, Debug, Default)]
pub struct ContractSecurityAttributeBuilder {
    attribute: ContractSecurityAttribute,
}

impl ContractSecurityAttributeBuilder {
    /// Mark the contract as public.
    pub fn public(mut self) -> Self {
        self.attribute.visibility = Visibility::Public;
        self
    }

    /// Mark the contract as private.
    pub fn private(mut self) -> Self {
        self.attribute.visibility = Visibility::Private;
        self
    }

    /// Set the visibility.
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.attribute.visibility = visibility;
        self
    }

    /// Request read access.
    pub fn read(self) -> Self {
        self.action(Action::Read)
    }

    /// Request write access.
    pub fn write(self) -> Self {
        self.action(Action::Write)
    }

    /// Request contract creation.
    pub fn create(self) -> Self {
        self.action(Action::Create)
    }

    /// Set the action.
    pub fn action(mut self, action: Action) -> Self {
        self.attribute.action = action;
        self
    }

    /// Set the executing account.
    pub fn from(mut self, from: Address) -> Self {
        self.attribute.from = from;
        self
    }

    /// Set the target account.
    pub fn to(mut self, to: Address) -> Self {
        self.attribute.to = to;
        self
    }

    /// Append one private-network party.
    pub fn party(mut self, party: impl Into<String>) -> Self {
        self.attribute.parties.push(party.into());
        self
    }

    /// Append several private-network parties, keeping their order.
    pub fn parties<I, S>(mut self, parties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attribute
            .parties
            .extend(parties.into_iter().map(Into::into));
        self
    }

    /// Set the originating private-network identity for contract creation.
    pub fn private_from(mut self, private_from: impl Into<String>) -> Self {
        self.attribute.private_from = private_from.into();
        self
    }

    /// Finish building.
    pub fn build(self) -> ContractSecurityAttribute {
        self.attribute
    }
}

/// Describes a value transfer between two accounts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStateSecurityAttribute {
    /// Sending account.
    pub from: Address,
    /// Receiving account.
    pub to: Address,
}
