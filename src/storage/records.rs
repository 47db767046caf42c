use serde::{Deserialize, Serialize};

/// Uploaded code that contracts can be instantiated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRecord {
  /// The ABI document, serialized as JSON.
  pub abi: String,
  pub name: String,
  pub tags: Vec<String>,
}

/// The chain specific part of a contract record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractMeta {
  /// The ABI document, serialized as JSON.
  pub abi: String,

  /// Base58 genesis hash of the chain the contract lives on.
  pub genesis_hash: String,
}

/// A contract instance deployed on chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRecord {
  pub contract: ContractMeta,
  pub name: String,
  pub tags: Vec<String>,
}
