use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A Hedera-style entity id in `shard.realm.num` form
///
/// Accounts and tokens share this addressing scheme; the two newtypes below
/// keep them from being mixed up at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct EntityId {
    shard: u64,
    realm: u64,
    num: u64,
}

impl EntityId {
    fn parse(s: &str) -> Result<Self, Error> {
        let mut parts = s.trim().splitn(3, '.');
        let (shard, realm, num) = match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), Some(c)) => (a, b, c),
            _ => return Err(Error::InvalidEntityId(s.to_string())),
        };

        let parse_part = |p: &str| {
            p.parse::<u64>()
                .map_err(|_| Error::InvalidEntityId(s.to_string()))
        };

        Ok(Self {
            shard: parse_part(shard)?,
            realm: parse_part(realm)?,
            num: parse_part(num)?,
        })
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

macro_rules! entity_id_newtype {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(EntityId);

        impl $name {
            /// Build from raw shard/realm/num parts
            pub fn new(shard: u64, realm: u64, num: u64) -> Self {
                Self(EntityId { shard, realm, num })
            }

            pub fn num(&self) -> u64 {
                self.0.num
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Error> {
                EntityId::parse(s).map(Self)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(s: String) -> Result<Self, Error> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id_newtype!(AccountId, "A ledger account id (`0.0.1234`)");
entity_id_newtype!(TokenId, "An NFT collection id (`0.0.1234`)");

/// A single certificate token: collection id plus ledger-assigned serial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NftId {
    pub token_id: TokenId,
    pub serial: u64,
}

impl NftId {
    pub fn new(token_id: TokenId, serial: u64) -> Self {
        Self { token_id, serial }
    }
}

impl fmt::Display for NftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token_id, self.serial)
    }
}

/// An opaque ledger transaction id, assigned at submission time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque content identifier assigned by the file-storage service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(pub String);

impl ContentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_roundtrip() {
        let id: AccountId = "0.0.1234".parse().unwrap();
        assert_eq!(id, AccountId::new(0, 0, 1234));
        assert_eq!(id.to_string(), "0.0.1234");
    }

    #[test]
    fn test_entity_id_rejects_garbage() {
        assert!("".parse::<AccountId>().is_err());
        assert!("0.0".parse::<AccountId>().is_err());
        assert!("0.0.x".parse::<TokenId>().is_err());
        assert!("-1.0.5".parse::<TokenId>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let id = TokenId::new(0, 0, 4200);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0.0.4200\"");
        let back: TokenId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_nft_id_display() {
        let nft = NftId::new(TokenId::new(0, 0, 77), 3);
        assert_eq!(nft.to_string(), "0.0.77/3");
    }
}
