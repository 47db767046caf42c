use thiserror::Error;

pub trait ToBase58String {
  fn to_b58(&self) -> String;
}

impl<const S: usize> ToBase58String for multihash::MultihashGeneric<S> {
  fn to_b58(&self) -> String {
    bs58::encode(self.to_bytes()).into_string()
  }
}

impl ToBase58String for &[u8] {
  fn to_b58(&self) -> String {
    bs58::encode(self).into_string()
  }
}

impl ToBase58String for Vec<u8> {
  fn to_b58(&self) -> String {
    bs58::encode(self).into_string()
  }
}

pub mod serde {
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(
    v: &impl AsRef<[u8]>,
    s: S,
  ) -> Result<S::Ok, S::Error> {
    s.serialize_str(&bs58::encode(v).into_string())
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    d: D,
  ) -> Result<Vec<u8>, D::Error> {
    let b58 = String::deserialize(d)?;
    bs58::decode(b58.as_bytes())
      .into_vec()
      .map_err(serde::de::Error::custom)
  }

  pub mod multihash {
    use {super::*, ::multihash::Multihash};

    pub fn serialize<S: Serializer>(
      v: &Multihash,
      s: S,
    ) -> Result<S::Ok, S::Error> {
      s.serialize_str(&bs58::encode(v.to_bytes()).into_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
      d: D,
    ) -> Result<Multihash, D::Error> {
      let b58 = String::deserialize(d)?;
      Multihash::from_bytes(
        &bs58::decode(b58.as_bytes())
          .into_vec()
          .map_err(serde::de::Error::custom)?,
      )
      .map_err(serde::de::Error::custom)
    }
  }
}

#[derive(Debug, Error)]
pub enum MultihashParseError {
  #[error("Invalid base58 encoding: {0}")]
  Encoding(#[from] bs58::decode::Error),

  #[error("Invalid multihash: {0}")]
  Multihash(#[from] multihash::Error),
}

/// Parses a base58 encoded multihash, such as a code hash or a
/// genesis hash printed by a node.
pub fn parse_multihash(
  value: &str,
) -> Result<multihash::Multihash, MultihashParseError> {
  let bytes = bs58::decode(value).into_vec()?;
  Ok(multihash::Multihash::from_bytes(&bytes)?)
}
