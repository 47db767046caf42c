//! Ledger client interface
//!
//! The deployment builder does not talk to the chain itself. It hands
//! the validated inputs to a ledger client which turns them into an
//! unsigned transaction, signing and submission happen elsewhere.

use {
  crate::{
    abi::{ContractInterface, EncodingError},
    code,
    primitives::{b58_serde, Balance, ToBase58String, Weight},
  },
  multihash::Multihash,
  serde::{Deserialize, Serialize},
  serde_json::Value,
};

/// Execution options of a deployment call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOptions {
  /// Maximum weight the instantiation may consume.
  pub gas_limit: Weight,

  /// The endowment transferred to the new contract.
  pub value: Balance,

  /// Additional entropy for the contract address, deploying
  /// the same code with the same arguments twice requires a
  /// different salt.
  pub salt: Vec<u8>,
}

/// An unsigned call that uploads the contract code and instantiates
/// a contract from it in a single transaction.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentTransaction {
  /// Label of the constructor that is invoked.
  pub constructor: String,

  /// Balance transferred to the instantiated contract.
  #[serde(with = "balance_string")]
  pub value: Balance,

  pub gas_limit: Weight,

  #[serde(with = "b58_serde")]
  pub code: Vec<u8>,

  /// Constructor selector followed by the SCALE encoded arguments.
  #[serde(with = "b58_serde")]
  pub data: Vec<u8>,

  #[serde(with = "b58_serde")]
  pub salt: Vec<u8>,
}

impl DeploymentTransaction {
  /// Hash of the uploaded code, the blueprint of this
  /// deployment is stored on chain under this hash.
  pub fn code_hash(&self) -> Multihash {
    code::code_hash(&self.code)
  }
}

impl std::fmt::Debug for DeploymentTransaction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DeploymentTransaction")
      .field("constructor", &self.constructor)
      .field("value", &self.value)
      .field("gas_limit", &self.gas_limit)
      .field("code_hash", &self.code_hash().to_b58())
      .field("data", &self.data.to_b58())
      .field("salt", &self.salt.to_b58())
      .finish()
  }
}

/// Balances do not fit into JSON numbers without precision loss.
mod balance_string {
  use {
    crate::primitives::Balance,
    serde::{Deserialize, Deserializer, Serializer},
  };

  pub fn serialize<S: Serializer>(
    v: &Balance,
    s: S,
  ) -> Result<S::Ok, S::Error> {
    s.serialize_str(&v.to_string())
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    d: D,
  ) -> Result<Balance, D::Error> {
    String::deserialize(d)?
      .parse()
      .map_err(serde::de::Error::custom)
  }
}

/// The chain-facing side of a deployment.
pub trait LedgerClient {
  /// Identity of the connected chain. Deployed contracts are
  /// recorded together with it so that records of one chain
  /// are never mistaken for contracts on another chain.
  fn genesis_hash(&self) -> Multihash;

  /// Builds an unsigned instantiate-with-code transaction.
  ///
  /// Fails when the arguments do not match the schema of the selected
  /// constructor, which is an expected state while they are being
  /// entered.
  fn instantiate_with_code(
    &self,
    interface: &ContractInterface,
    code: &[u8],
    constructor: usize,
    options: ExecOptions,
    args: &[Value],
  ) -> Result<DeploymentTransaction, EncodingError>;
}

/// Builds deployment transactions locally without a connection
/// to a node, for a chain identified by its genesis hash.
#[derive(Debug, Clone)]
pub struct Ledger {
  genesis_hash: Multihash,
}

impl Ledger {
  pub fn new(genesis_hash: Multihash) -> Self {
    Self { genesis_hash }
  }
}

impl LedgerClient for Ledger {
  fn genesis_hash(&self) -> Multihash {
    self.genesis_hash
  }

  fn instantiate_with_code(
    &self,
    interface: &ContractInterface,
    code: &[u8],
    constructor: usize,
    options: ExecOptions,
    args: &[Value],
  ) -> Result<DeploymentTransaction, EncodingError> {
    let data = interface.encode_constructor(constructor, args)?;
    let label = interface
      .constructor(constructor)
      .map(|c| c.label.clone())
      .ok_or(EncodingError::UnknownConstructor(constructor))?;

    Ok(DeploymentTransaction {
      constructor: label,
      value: options.value,
      gas_limit: options.gas_limit,
      code: code.to_vec(),
      data,
      salt: options.salt,
    })
  }
}
