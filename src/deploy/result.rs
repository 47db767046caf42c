use {
  crate::{
    primitives::{b58_serde, Pubkey, ToBase58String},
    storage::{
      CodeRecord,
      CodeStore,
      ContractMeta,
      ContractRecord,
      ContractStore,
    },
  },
  multihash::Multihash,
  serde::{Deserialize, Serialize},
  tracing::{error, info},
};

/// Name recorded for deployments that were not given one.
pub const NAME_PLACEHOLDER: &str = "<>";

/// Code that got uploaded to the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
  #[serde(with = "b58_serde::multihash")]
  pub code_hash: Multihash,
}

/// A contract that got instantiated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInstance {
  pub address: Pubkey,
}

/// The outcome of a successfully submitted deployment. Either part may
/// be absent, e.g. when the code was already on chain no blueprint is
/// reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
  #[serde(default)]
  pub blueprint: Option<Blueprint>,

  #[serde(default)]
  pub contract: Option<ContractInstance>,
}

/// Which records were written by [`ResultHandler::on_success`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Persisted {
  pub code: bool,
  pub contract: bool,
}

/// Records the artifacts of a successful deployment in the local
/// code and contract stores.
///
/// The deployment has already happened on chain by the time this runs,
/// so a failing store is logged and otherwise ignored. There is no retry
/// and nothing to roll back.
pub struct ResultHandler<'s> {
  codes: &'s dyn CodeStore,
  contracts: &'s dyn ContractStore,
  genesis_hash: Multihash,
}

impl<'s> ResultHandler<'s> {
  pub fn new(
    codes: &'s dyn CodeStore,
    contracts: &'s dyn ContractStore,
    genesis_hash: Multihash,
  ) -> Self {
    Self {
      codes,
      contracts,
      genesis_hash,
    }
  }

  pub fn on_success(
    &self,
    result: &SubmissionResult,
    name: &str,
    abi: &str,
  ) -> Persisted {
    let name = match name.trim() {
      "" => NAME_PLACEHOLDER.to_owned(),
      name => name.to_owned(),
    };

    let mut persisted = Persisted::default();

    if let Some(blueprint) = &result.blueprint {
      let record = CodeRecord {
        abi: abi.to_owned(),
        name: name.clone(),
        tags: vec![],
      };
      match self.codes.save_code(&blueprint.code_hash, &record) {
        Ok(()) => {
          info!("stored code {} as {name}", blueprint.code_hash.to_b58());
          persisted.code = true;
        }
        Err(e) => error!(
          "failed to store code {}: {e}",
          blueprint.code_hash.to_b58()
        ),
      }
    }

    if let Some(contract) = &result.contract {
      let record = ContractRecord {
        contract: ContractMeta {
          abi: abi.to_owned(),
          genesis_hash: self.genesis_hash.to_b58(),
        },
        name,
        tags: vec![],
      };
      match self.contracts.save_contract(&contract.address, &record) {
        Ok(()) => {
          info!("stored contract {} as {}", contract.address, record.name);
          persisted.contract = true;
        }
        Err(e) => {
          error!("failed to store contract {}: {e}", contract.address)
        }
      }
    }

    persisted
  }
}

#[cfg(test)]
mod test {
  use {
    super::{
      Blueprint,
      ContractInstance,
      Persisted,
      ResultHandler,
      SubmissionResult,
      NAME_PLACEHOLDER,
    },
    crate::{
      code::code_hash,
      primitives::{Pubkey, ToBase58String},
      test::{
        in_mem_store::RecordingStore,
        utils::{genesis_hash, wasm_module},
      },
    },
    serde_json::json,
  };

  fn both() -> SubmissionResult {
    SubmissionResult {
      blueprint: Some(Blueprint {
        code_hash: code_hash(&wasm_module()),
      }),
      contract: Some(ContractInstance {
        address: Pubkey::new([7; 32]),
      }),
    }
  }

  #[test]
  fn contract_only_writes_contract_record() {
    let store = RecordingStore::default();
    let handler = ResultHandler::new(&store, &store, genesis_hash());
    let result = SubmissionResult {
      blueprint: None,
      contract: Some(ContractInstance {
        address: Pubkey::new([7; 32]),
      }),
    };

    let persisted = handler.on_success(&result, "flipper", "{}");
    assert_eq!(persisted, Persisted {
      code: false,
      contract: true
    });
    assert_eq!(store.code_writes(), 0);
    assert_eq!(store.contract_writes(), 1);

    let (address, record) = store.contracts().pop().unwrap();
    assert_eq!(address, Pubkey::new([7; 32]));
    assert_eq!(record.name, "flipper");
    assert_eq!(record.contract.abi, "{}");
    assert_eq!(record.contract.genesis_hash, genesis_hash().to_b58());
    assert!(record.tags.is_empty());
  }

  #[test]
  fn blueprint_and_contract_write_both() {
    let store = RecordingStore::default();
    let handler = ResultHandler::new(&store, &store, genesis_hash());

    let persisted = handler.on_success(&both(), "flipper", "{}");
    assert_eq!(persisted, Persisted {
      code: true,
      contract: true
    });

    let (hash, record) = store.codes().pop().unwrap();
    assert_eq!(hash, code_hash(&wasm_module()));
    assert_eq!(record.name, "flipper");
    assert_eq!(record.abi, "{}");
  }

  #[test]
  fn empty_result_writes_nothing() {
    let store = RecordingStore::default();
    let handler = ResultHandler::new(&store, &store, genesis_hash());
    let persisted =
      handler.on_success(&SubmissionResult::default(), "flipper", "{}");
    assert_eq!(persisted, Persisted::default());
    assert_eq!(store.code_writes() + store.contract_writes(), 0);
  }

  #[test]
  fn empty_name_gets_placeholder() {
    let store = RecordingStore::default();
    let handler = ResultHandler::new(&store, &store, genesis_hash());
    handler.on_success(&both(), "  ", "{}");

    assert_eq!(store.codes()[0].1.name, NAME_PLACEHOLDER);
    assert_eq!(store.contracts()[0].1.name, NAME_PLACEHOLDER);
  }

  #[test]
  fn store_failures_are_swallowed() {
    let store = RecordingStore::failing();
    let handler = ResultHandler::new(&store, &store, genesis_hash());

    let persisted = handler.on_success(&both(), "flipper", "{}");
    assert_eq!(persisted, Persisted::default());
    // each write is attempted exactly once
    assert_eq!(store.code_writes(), 1);
    assert_eq!(store.contract_writes(), 1);
  }

  #[test]
  fn submission_result_from_json() {
    let address = Pubkey::new([7; 32]);
    let result: SubmissionResult =
      serde_json::from_value(json!({ "contract": { "address": address } }))
        .unwrap();
    assert_eq!(result.blueprint, None);
    assert_eq!(result.contract, Some(ContractInstance { address }));

    let roundtrip: SubmissionResult =
      serde_json::from_value(serde_json::to_value(both()).unwrap()).unwrap();
    assert_eq!(roundtrip, both());
  }
}
