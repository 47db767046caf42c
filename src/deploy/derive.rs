use {
  super::Inputs,
  crate::{
    abi::EncodingError,
    ledger::{DeploymentTransaction, ExecOptions, LedgerClient},
  },
  thiserror::Error,
};

/// Reasons for not having a deployment transaction yet.
///
/// None of those are failures, they are the normal state of an
/// incomplete form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotReady {
  #[error("No valid ABI loaded")]
  MissingAbi,

  #[error("No valid WASM code")]
  InvalidCode,

  #[error("No valid endowment")]
  MissingEndowment,

  #[error("Constructor arguments are incomplete: {0}")]
  Encoding(#[from] EncodingError),
}

/// Builds the deployment transaction out of the current inputs.
///
/// This is a pure function of its inputs, it is cheap to call and has
/// no side effects, so it is invoked after every input change.
pub fn derive<L: LedgerClient + ?Sized>(
  ledger: &L,
  inputs: &Inputs,
) -> Result<DeploymentTransaction, NotReady> {
  let interface = inputs.interface().ok_or(NotReady::MissingAbi)?;

  let code = inputs
    .code()
    .filter(|code| code.is_valid_format())
    .ok_or(NotReady::InvalidCode)?;

  let value = inputs.endowment().ok_or(NotReady::MissingEndowment)?;

  let options = ExecOptions {
    gas_limit: inputs.weight(),
    value,
    salt: inputs.salt().to_vec(),
  };

  Ok(ledger.instantiate_with_code(
    interface,
    code.bytes(),
    inputs.constructor(),
    options,
    inputs.args(),
  )?)
}

#[cfg(test)]
mod test {
  use {
    super::{derive, NotReady},
    crate::{
      abi::{AbiOptions, ContractInterface, EncodingError},
      deploy::Inputs,
      ledger::Ledger,
      primitives::Weight,
      test::utils::{erc20_abi, flipper_bundle, genesis_hash, wasm_module},
    },
    serde_json::json,
  };

  fn ready_inputs() -> Inputs {
    let mut inputs = Inputs::default();
    inputs.set_abi(ContractInterface::parse(
      flipper_bundle().as_bytes(),
      AbiOptions { with_code: true },
    ));
    inputs.set_constructor(1);
    inputs.set_endowment(Some(1000), true);
    inputs.set_estimated_weight(Weight::new(500, 500));
    inputs
  }

  #[test]
  fn derive_from_complete_inputs() {
    let tx = derive(&Ledger::new(genesis_hash()), &ready_inputs()).unwrap();
    assert_eq!(tx.constructor, "default");
    assert_eq!(tx.value, 1000);
    assert_eq!(tx.gas_limit, Weight::new(500, 500));
    assert_eq!(tx.code, wasm_module());
    assert_eq!(tx.data, vec![0xed, 0x4b, 0x9d, 0x1b]);
    assert!(tx.salt.is_empty());
  }

  #[test]
  fn derive_is_deterministic() {
    let ledger = Ledger::new(genesis_hash());
    let inputs = ready_inputs();
    assert_eq!(derive(&ledger, &inputs), derive(&ledger, &inputs));
  }

  #[test]
  fn missing_inputs_yield_reasons() {
    let ledger = Ledger::new(genesis_hash());

    let inputs = Inputs::default();
    assert_eq!(derive(&ledger, &inputs), Err(NotReady::MissingAbi));

    let mut inputs = ready_inputs();
    inputs.set_endowment(Some(0), true);
    assert_eq!(derive(&ledger, &inputs), Err(NotReady::MissingEndowment));

    let mut inputs = Inputs::default();
    inputs.set_abi(ContractInterface::parse(
      erc20_abi().as_bytes(),
      AbiOptions { with_code: true },
    ));
    inputs.set_endowment(Some(1), true);
    assert_eq!(derive(&ledger, &inputs), Err(NotReady::InvalidCode));

    inputs.set_code(b"not wasm".to_vec());
    assert_eq!(derive(&ledger, &inputs), Err(NotReady::InvalidCode));
  }

  #[test]
  fn argument_mismatch_is_not_ready() {
    let ledger = Ledger::new(genesis_hash());
    let mut inputs = ready_inputs();
    inputs.set_constructor(0);
    assert_eq!(
      derive(&ledger, &inputs),
      Err(NotReady::Encoding(EncodingError::ArgumentCount {
        expected: 1,
        got: 0
      }))
    );

    inputs.set_args(vec![json!(true)]);
    assert!(derive(&ledger, &inputs).is_ok());
  }

  #[test]
  fn salt_and_weight_override_flow_into_transaction() {
    let ledger = Ledger::new(genesis_hash());
    let mut inputs = ready_inputs();
    inputs.set_salt(vec![1, 2, 3]);
    inputs.override_weight(Some(Weight::new(7, 8)));

    let tx = derive(&ledger, &inputs).unwrap();
    assert_eq!(tx.salt, vec![1, 2, 3]);
    assert_eq!(tx.gas_limit, Weight::new(7, 8));
  }
}
