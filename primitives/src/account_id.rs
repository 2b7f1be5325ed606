use {
  ed25519_dalek::PublicKey,
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
  },
  thiserror::Error,
};

#[derive(Debug, Error)]
pub enum Error {
  #[error("Invalid base58 account id: {0}")]
  Encoding(#[from] bs58::decode::Error),

  #[error("Account id must be 32 bytes long, got {0}")]
  Length(usize),
}

/// Identifies an account in the ledger.
///
/// An account id is the ed25519 public key of the keypair that controls
/// the account. Ids are compared, hashed and ordered by their raw bytes,
/// so ordered collections keyed by account ids iterate in the same order
/// on every replica.
///
/// In human readable form (logs, JSON, CLI arguments) the id is rendered
/// as a base58 string.
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct AccountId([u8; 32]);

impl AccountId {
  pub const fn from_bytes(bytes: [u8; 32]) -> Self {
    Self(bytes)
  }
}

impl AsRef<[u8]> for AccountId {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl Deref for AccountId {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Display for AccountId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", bs58::encode(self.0).into_string())
  }
}

impl Debug for AccountId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "account({})", bs58::encode(self.0).into_string())
  }
}

impl From<AccountId> for String {
  fn from(id: AccountId) -> Self {
    bs58::encode(id.0).into_string()
  }
}

impl FromStr for AccountId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let decoded = bs58::decode(s).into_vec()?;
    let bytes: [u8; 32] = decoded
      .try_into()
      .map_err(|v: Vec<u8>| Error::Length(v.len()))?;
    Ok(Self(bytes))
  }
}

impl TryFrom<String> for AccountId {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    FromStr::from_str(&value)
  }
}

impl From<PublicKey> for AccountId {
  fn from(p: PublicKey) -> Self {
    Self(*p.as_bytes())
  }
}

#[cfg(test)]
mod tests {
  use {
    super::AccountId,
    ed25519_dalek::Keypair,
  };

  #[test]
  fn base58_roundtrip_of_public_key() -> anyhow::Result<()> {
    let keypair = Keypair::generate(&mut rand::thread_rng());
    let id = AccountId::from(keypair.public);

    let text = id.to_string();
    assert_eq!(text.parse::<AccountId>()?, id);
    assert_eq!(id.as_ref(), keypair.public.as_bytes());
    Ok(())
  }

  #[test]
  fn short_input_is_rejected() {
    // "2g" is a single byte in base58
    assert!("2g".parse::<AccountId>().is_err());
  }

  #[test]
  fn serializes_as_base58_string() -> anyhow::Result<()> {
    let id = AccountId::from_bytes([7u8; 32]);
    let encoded = rmp_serde::to_vec(&id)?;
    let decoded: AccountId = rmp_serde::from_slice(&encoded)?;
    assert_eq!(decoded, id);

    let value: String = rmp_serde::from_slice(&encoded)?;
    assert_eq!(value, id.to_string());
    Ok(())
  }
}
