use {
  super::{CodeRecord, CodeStore, ContractRecord, ContractStore, Error},
  crate::primitives::{Pubkey, ToBase58String},
  multihash::Multihash,
  serde::de::DeserializeOwned,
  std::path::PathBuf,
  tracing::debug,
};

const CODE_TREE: &str = "code";
const CONTRACTS_TREE: &str = "contracts";

/// Code blueprints and contract instances persisted on disk.
///
/// Both live in the same database in two separate trees. Keys are the
/// base58 representation of the code hash or the contract address and
/// values are the JSON serialized records.
#[derive(Debug, Clone)]
pub struct PersistentStore {
  codes: sled::Tree,
  contracts: sled::Tree,
}

impl PersistentStore {
  pub fn new(directory: PathBuf) -> Result<Self, Error> {
    let mut directory = directory;
    directory.push("deployments");
    std::fs::create_dir_all(directory.clone())?;

    debug!("opening deployments store at {}", directory.display());
    Self::from_db(sled::open(directory)?)
  }

  /// A store that lives only as long as the returned instance.
  pub fn temporary() -> Result<Self, Error> {
    Self::from_db(sled::Config::new().temporary(true).open()?)
  }

  fn from_db(db: sled::Db) -> Result<Self, Error> {
    Ok(Self {
      codes: db.open_tree(CODE_TREE)?,
      contracts: db.open_tree(CONTRACTS_TREE)?,
    })
  }

  pub fn code(&self, hash: &Multihash) -> Result<Option<CodeRecord>, Error> {
    read(&self.codes, hash.to_b58().as_bytes())
  }

  pub fn contract(
    &self,
    address: &Pubkey,
  ) -> Result<Option<ContractRecord>, Error> {
    read(&self.contracts, address.to_string().as_bytes())
  }

  /// All stored code records along with their base58 code hash.
  pub fn codes(&self) -> Result<Vec<(String, CodeRecord)>, Error> {
    list(&self.codes)
  }

  /// All stored contract records along with their base58 address.
  pub fn contracts(&self) -> Result<Vec<(String, ContractRecord)>, Error> {
    list(&self.contracts)
  }
}

impl CodeStore for PersistentStore {
  fn save_code(
    &self,
    hash: &Multihash,
    record: &CodeRecord,
  ) -> Result<(), Error> {
    self
      .codes
      .insert(hash.to_b58().as_bytes(), serde_json::to_vec(record)?)?;
    self.codes.flush()?;
    Ok(())
  }
}

impl ContractStore for PersistentStore {
  fn save_contract(
    &self,
    address: &Pubkey,
    record: &ContractRecord,
  ) -> Result<(), Error> {
    self
      .contracts
      .insert(address.to_string().as_bytes(), serde_json::to_vec(record)?)?;
    self.contracts.flush()?;
    Ok(())
  }
}

fn read<T: DeserializeOwned>(
  tree: &sled::Tree,
  key: &[u8],
) -> Result<Option<T>, Error> {
  match tree.get(key)? {
    Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
    None => Ok(None),
  }
}

fn list<T: DeserializeOwned>(
  tree: &sled::Tree,
) -> Result<Vec<(String, T)>, Error> {
  tree
    .iter()
    .map(|entry| {
      let (key, value) = entry?;
      Ok((
        String::from_utf8_lossy(&key).into_owned(),
        serde_json::from_slice(&value)?,
      ))
    })
    .collect()
}
