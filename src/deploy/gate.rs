use {
  super::Inputs,
  crate::ledger::DeploymentTransaction,
  thiserror::Error,
};

/// Why a deployment cannot be submitted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Blocker {
  #[error("No signing account selected, it must be an ed25519 wallet key")]
  NoAccount,

  #[error("The deployment name is invalid")]
  InvalidName,

  #[error("No valid WASM code supplied")]
  InvalidCode,

  #[error("No ABI supplied")]
  NoAbi,

  #[error("The supplied ABI is invalid")]
  InvalidAbi,

  #[error("The deployment transaction could not be built")]
  NoTransaction,
}

/// Whether a deployment may be submitted, broken down into the
/// individual conditions so that callers can report what is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submittability {
  pub has_account: bool,
  pub has_valid_name: bool,
  pub has_valid_code: bool,
  pub has_supplied_abi: bool,
  pub has_valid_abi: bool,
  pub has_transaction: bool,
}

impl Submittability {
  /// Accounts must be able to sign, so derived addresses without
  /// a private key are not accepted.
  pub fn evaluate(
    inputs: &Inputs,
    transaction: Option<&DeploymentTransaction>,
  ) -> Self {
    Self {
      has_account: inputs
        .account()
        .map(|a| a.has_private_key())
        .unwrap_or(false),
      has_valid_name: inputs.is_name_valid(),
      has_valid_code: inputs.has_valid_code(),
      has_supplied_abi: inputs.is_abi_supplied(),
      has_valid_abi: inputs.is_abi_valid(),
      has_transaction: transaction.is_some(),
    }
  }

  pub fn can_submit(&self) -> bool {
    self.has_account
      && self.has_valid_name
      && self.has_valid_code
      && self.has_supplied_abi
      && self.has_valid_abi
      && self.has_transaction
  }

  pub fn blockers(&self) -> Vec<Blocker> {
    [
      (self.has_account, Blocker::NoAccount),
      (self.has_valid_name, Blocker::InvalidName),
      (self.has_valid_code, Blocker::InvalidCode),
      (self.has_supplied_abi, Blocker::NoAbi),
      (self.has_valid_abi, Blocker::InvalidAbi),
      (self.has_transaction, Blocker::NoTransaction),
    ]
    .into_iter()
    .filter(|(ok, _)| !ok)
    .map(|(_, blocker)| blocker)
    .collect()
  }
}
