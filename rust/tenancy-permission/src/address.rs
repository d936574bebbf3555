use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::TenancyPermissionError;

/// Byte length of an account address.
pub const ADDRESS_LENGTH: usize = 20;

/// Reserved permission token meaning "any account address".
///
/// Grants use it in the host or in `owned.eoa` / `to.eoa` values to avoid
/// enumerating every permitted address. The zero [`Address`] normalizes to it.
pub const ANY_ADDRESS: &str = "0x0";

/// A 20-byte account address.
///
/// The all-zero address stands for "unset" in security attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self([0; ADDRESS_LENGTH]);

    /// Wrap raw address bytes.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Whether this is the zero (unset) address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0; ADDRESS_LENGTH]
    }

    /// The raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Lower-case, `0x`-prefixed hex form of this address.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// The form this address takes inside a permission URI: lower-case hex,
    /// or [`ANY_ADDRESS`] when the address is zero.
    pub fn normalize(&self) -> String {
        if self.is_zero() {
            ANY_ADDRESS.into()
        } else {
            self.to_hex()
        }
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(value: [u8; ADDRESS_LENGTH]) -> Self {
        Self(value)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = TenancyPermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        let bytes = hex::decode(digits)
            .map_err(|error| TenancyPermissionError::InvalidAddress(format!("{s}: {error}")))?;

        let bytes: [u8; ADDRESS_LENGTH] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            TenancyPermissionError::InvalidAddress(format!(
                "{s}: expected {ADDRESS_LENGTH} bytes, found {}",
                bytes.len()
            ))
        })?;

        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = TenancyPermissionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_hex()
    }
}
