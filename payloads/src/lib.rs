//! Types shared with the storefront backend, and a client for its API.

pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id type wrappers help ensure we don't mix up ids for different tables.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(transparent)]
pub struct BrandId(pub i64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(transparent)]
pub struct ProductId(pub i64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct SizeId(pub i64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct ColorId(pub i64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct ReviewId(pub i64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct OrderId(pub Uuid);

/// Client-generated key so a retried checkout cannot place the order twice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct IdempotencyKey(pub Uuid);

impl IdempotencyKey {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for IdempotencyKey {
    fn default() -> Self {
        Self::new()
    }
}

/// Storefront roles, ordered by privilege.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Moderator,
    Admin,
}

impl Role {
    pub fn is_ge_moderator(&self) -> bool {
        *self >= Role::Moderator
    }

    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ordering() {
        assert!(!Role::Customer.is_ge_moderator());
        assert!(Role::Moderator.is_ge_moderator());
        assert!(Role::Admin.is_ge_moderator());
        assert!(Role::Admin.is_admin());
        assert!(!Role::Moderator.is_admin());
    }

    #[test]
    fn ids_serialize_transparently() {
        assert_eq!(serde_json::to_string(&BrandId(42)).unwrap(), "42");
        assert_eq!("42".parse::<BrandId>().unwrap(), BrandId(42));
        assert_eq!(ProductId(7).to_string(), "7");
        assert_eq!(
            serde_json::from_str::<Role>(r#""moderator""#).unwrap(),
            Role::Moderator
        );
    }
}
