mod persistent;
mod records;

use {
  crate::primitives::Pubkey,
  multihash::Multihash,
  thiserror::Error,
};

#[derive(Debug, Error)]
pub enum Error {
  #[error("Serialization Error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Storage Engine Error: {0}")]
  StorageEngine(#[from] sled::Error),

  #[error("System IO Error: {0}")]
  SystemIO(#[from] std::io::Error),
}

/// Local bookkeeping of code blueprints uploaded to the chain,
/// keyed by the code hash.
pub trait CodeStore {
  fn save_code(&self, hash: &Multihash, record: &CodeRecord)
    -> Result<(), Error>;
}

/// Local bookkeeping of instantiated contracts, keyed by the
/// contract address.
pub trait ContractStore {
  fn save_contract(
    &self,
    address: &Pubkey,
    record: &ContractRecord,
  ) -> Result<(), Error>;
}

pub use {
  persistent::PersistentStore,
  records::{CodeRecord, ContractMeta, ContractRecord},
};
