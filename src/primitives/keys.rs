use {
  curve25519_dalek::edwards::CompressedEdwardsY,
  ed25519_dalek::PublicKey,
  serde::{
    de::{self, Visitor},
    Deserialize,
    Deserializer,
    Serialize,
  },
  std::{
    fmt::{Debug, Display, Formatter},
    marker::PhantomData,
    ops::Deref,
    str::FromStr,
  },
};

/// Represents an address on the chain.
///
/// The same address type is used for the account that signs and pays
/// for a deployment and for the address a contract gets instantiated
/// at. Only the former has a corresponding private key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pubkey([u8; 32]);

impl Pubkey {
  pub fn new(bytes: [u8; 32]) -> Self {
    Self(bytes)
  }

  /// Checks if the given pubkey lies on the Ed25519 elliptic curve.
  ///
  /// When true, then there exists a private key that together with this
  /// pubkey makes up a valid Ed25519 keypair, so the address can sign
  /// transactions. Contract addresses are derived and never on the curve.
  pub fn has_private_key(&self) -> bool {
    CompressedEdwardsY::from_slice(&self.0)
      .decompress()
      .is_some()
  }
}

impl Deref for Pubkey {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Display for Pubkey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", bs58::encode(self.0).into_string())
  }
}

impl Debug for Pubkey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Pubkey({})", bs58::encode(self.0).into_string())
  }
}

impl FromStr for Pubkey {
  type Err = bs58::decode::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut bytes = [0u8; 32];
    let len = bs58::decode(s).into(&mut bytes)?;
    if len != bytes.len() {
      return Err(bs58::decode::Error::BufferTooSmall);
    }
    Ok(Self(bytes))
  }
}

impl From<PublicKey> for Pubkey {
  fn from(p: PublicKey) -> Self {
    Self(*p.as_bytes())
  }
}

/// Deserialize a pubkey for either a user-friendsly base58
/// representation or a machine-friendly byte array.
impl<'de> Deserialize<'de> for Pubkey {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    struct StringOrArray<T>(PhantomData<fn() -> T>);

    impl<'de, T> Visitor<'de> for StringOrArray<T>
    where
      T: From<[u8; 32]> + FromStr<Err = bs58::decode::Error>,
    {
      type Value = T;

      fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("base58 string or byte array")
      }

      fn visit_str<E>(self, value: &str) -> Result<T, E>
      where
        E: de::Error,
      {
        FromStr::from_str(value)
          .map_err(|e| de::Error::custom(format!("{e:?}")))
      }

      fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
      where
        A: de::SeqAccess<'de>,
      {
        let bytes: [u8; 32] =
          Deserialize::deserialize(de::value::SeqAccessDeserializer::new(seq))?;
        Ok(bytes.into())
      }
    }

    deserializer.deserialize_any(StringOrArray(PhantomData))
  }
}

impl From<[u8; 32]> for Pubkey {
  fn from(bytes: [u8; 32]) -> Self {
    Self(bytes)
  }
}

impl Serialize for Pubkey {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&bs58::encode(self.0).into_string())
  }
}
