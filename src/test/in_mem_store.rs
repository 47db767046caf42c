use {
  crate::{
    primitives::Pubkey,
    storage::{CodeRecord, CodeStore, ContractRecord, ContractStore, Error},
  },
  multihash::Multihash,
  std::{
    io,
    sync::{
      atomic::{AtomicUsize, Ordering},
      RwLock,
    },
  },
};

/// Keeps saved records in memory and counts write attempts.
///
/// A failing store counts the attempts but rejects every write.
#[derive(Debug, Default)]
pub struct RecordingStore {
  fail: bool,
  code_writes: AtomicUsize,
  contract_writes: AtomicUsize,
  codes: RwLock<Vec<(Multihash, CodeRecord)>>,
  contracts: RwLock<Vec<(Pubkey, ContractRecord)>>,
}

impl RecordingStore {
  pub fn failing() -> Self {
    Self {
      fail: true,
      ..Self::default()
    }
  }

  pub fn code_writes(&self) -> usize {
    self.code_writes.load(Ordering::SeqCst)
  }

  pub fn contract_writes(&self) -> usize {
    self.contract_writes.load(Ordering::SeqCst)
  }

  pub fn codes(&self) -> Vec<(Multihash, CodeRecord)> {
    self.codes.read().unwrap().clone()
  }

  pub fn contracts(&self) -> Vec<(Pubkey, ContractRecord)> {
    self.contracts.read().unwrap().clone()
  }

  fn check(&self) -> Result<(), Error> {
    match self.fail {
      true => Err(Error::SystemIO(io::Error::new(
        io::ErrorKind::Other,
        "store unavailable",
      ))),
      false => Ok(()),
    }
  }
}

impl CodeStore for RecordingStore {
  fn save_code(
    &self,
    hash: &Multihash,
    record: &CodeRecord,
  ) -> Result<(), Error> {
    self.code_writes.fetch_add(1, Ordering::SeqCst);
    self.check()?;
    self.codes.write().unwrap().push((*hash, record.clone()));
    Ok(())
  }
}

impl ContractStore for RecordingStore {
  fn save_contract(
    &self,
    address: &Pubkey,
    record: &ContractRecord,
  ) -> Result<(), Error> {
    self.contract_writes.fetch_add(1, Ordering::SeqCst);
    self.check()?;
    self.contracts.write().unwrap().push((*address, record.clone()));
    Ok(())
  }
}
