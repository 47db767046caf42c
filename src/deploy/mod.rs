//! Deployment builder
//!
//! Collects the inputs of a contract deployment as they arrive, keeps
//! the derived transaction in sync with them and decides when the
//! deployment may be submitted. Once the chain confirms a submission,
//! its outcome is recorded in the local stores.

mod derive;
mod gate;
mod inputs;
mod result;

use {
  crate::{
    abi::{AbiError, AbiOptions, ContractInterface},
    ledger::{DeploymentTransaction, LedgerClient},
    primitives::{Balance, Pubkey, Weight},
    storage::{CodeStore, ContractStore},
  },
  serde::Serialize,
  serde_json::Value,
  tracing::{debug, trace},
};

pub use {
  derive::{derive, NotReady},
  gate::{Blocker, Submittability},
  inputs::Inputs,
  result::{
    Blueprint,
    ContractInstance,
    Persisted,
    ResultHandler,
    SubmissionResult,
    NAME_PLACEHOLDER,
  },
};

/// What gets handed over to whatever signs and submits the
/// deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitAction {
  pub account: Pubkey,
  pub transaction: DeploymentTransaction,
}

/// A single deployment flow.
///
/// Every setter that changes an input recomputes the transaction before
/// returning, so the transaction observed through [`Deployer::transaction`]
/// always reflects the latest inputs. The previous transaction is dropped
/// on each recompute.
pub struct Deployer<L: LedgerClient> {
  ledger: L,
  inputs: Inputs,
  transaction: Option<DeploymentTransaction>,
  not_ready: Option<NotReady>,
}

impl<L: LedgerClient> Deployer<L> {
  pub fn new(ledger: L) -> Self {
    let mut deployer = Self {
      ledger,
      inputs: Inputs::default(),
      transaction: None,
      not_ready: None,
    };
    deployer.refresh();
    deployer
  }

  pub fn inputs(&self) -> &Inputs {
    &self.inputs
  }

  pub fn transaction(&self) -> Option<&DeploymentTransaction> {
    self.transaction.as_ref()
  }

  /// Why there is no transaction, if there is none.
  pub fn not_ready(&self) -> Option<&NotReady> {
    self.not_ready.as_ref()
  }

  pub fn submittability(&self) -> Submittability {
    Submittability::evaluate(&self.inputs, self.transaction.as_ref())
  }

  pub fn can_submit(&self) -> bool {
    self.submittability().can_submit()
  }

  /// The submit action, available only while the gate is open.
  pub fn submit(&self) -> Option<SubmitAction> {
    if !self.can_submit() {
      return None;
    }
    Some(SubmitAction {
      account: *self.inputs.account()?,
      transaction: self.transaction.clone()?,
    })
  }

  /// Records the outcome of a confirmed submission under the current
  /// name and ABI.
  pub fn on_success(
    &self,
    result: &SubmissionResult,
    codes: &dyn CodeStore,
    contracts: &dyn ContractStore,
  ) -> Persisted {
    let abi = self
      .inputs
      .interface()
      .map(|i| i.json())
      .unwrap_or_default();
    ResultHandler::new(codes, contracts, self.ledger.genesis_hash())
      .on_success(result, self.inputs.name(), &abi)
  }

  pub fn set_account(&mut self, account: Option<Pubkey>) {
    if self.inputs.set_account(account) {
      self.refresh();
    }
  }

  pub fn set_name(&mut self, name: String, is_valid: bool) {
    if self.inputs.set_name(name, is_valid) {
      self.refresh();
    }
  }

  /// Parses a raw ABI document or contract bundle, extracting the code
  /// embedded in it. A document that fails to parse leaves the ABI in
  /// the invalid state.
  pub fn load_abi(&mut self, document: &[u8]) {
    self.set_abi(ContractInterface::parse(document, AbiOptions {
      with_code: true,
    }));
  }

  pub fn set_abi(&mut self, abi: Result<ContractInterface, AbiError>) {
    if self.inputs.set_abi(abi) {
      self.refresh();
    }
  }

  pub fn clear_abi(&mut self) {
    if self.inputs.clear_abi() {
      self.refresh();
    }
  }

  pub fn set_code(&mut self, bytes: Vec<u8>) {
    if self.inputs.set_code(bytes) {
      self.refresh();
    }
  }

  pub fn set_constructor(&mut self, index: usize) {
    if self.inputs.set_constructor(index) {
      self.refresh();
    }
  }

  pub fn set_args(&mut self, args: Vec<Value>) {
    if self.inputs.set_args(args) {
      self.refresh();
    }
  }

  pub fn set_endowment(&mut self, endowment: Option<Balance>, is_valid: bool) {
    if self.inputs.set_endowment(endowment, is_valid) {
      self.refresh();
    }
  }

  pub fn set_estimated_weight(&mut self, weight: Weight) {
    if self.inputs.set_estimated_weight(weight) {
      self.refresh();
    }
  }

  pub fn override_weight(&mut self, weight: Option<Weight>) {
    if self.inputs.override_weight(weight) {
      self.refresh();
    }
  }

  pub fn set_salt(&mut self, salt: Vec<u8>) {
    if self.inputs.set_salt(salt) {
      self.refresh();
    }
  }

  fn refresh(&mut self) {
    match derive(&self.ledger, &self.inputs) {
      Ok(transaction) => {
        debug!("deployment transaction: {transaction:?}");
        self.transaction = Some(transaction);
        self.not_ready = None;
      }
      Err(reason) => {
        trace!("no deployment transaction: {reason}");
        self.transaction = None;
        self.not_ready = Some(reason);
      }
    }
  }
}
