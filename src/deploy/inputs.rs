use {
  crate::{
    abi::{AbiError, ContractInterface},
    code::CodeBuffer,
    primitives::{Balance, Pubkey, Weight},
  },
  serde_json::Value,
  tracing::debug,
};

#[derive(Debug)]
enum AbiInput {
  Missing,
  Invalid(AbiError),
  Valid(ContractInterface),
}

/// Where the current code buffer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeSource {
  Abi,
  User,
}

/// All inputs of a deployment along with their validity.
///
/// Every setter updates exactly one input and reports whether anything
/// actually changed. Setting a value equal to the current one is a noop,
/// which matters for inputs that invalidate other inputs on change.
#[derive(Debug)]
pub struct Inputs {
  account: Option<Pubkey>,

  name: String,
  is_name_valid: bool,

  /// Set once the name was explicitly entered. From then on the name
  /// is never seeded from the ABI anymore.
  user_edited_name: bool,

  abi: AbiInput,
  code: Option<(CodeBuffer, CodeSource)>,

  constructor: usize,
  args: Vec<Value>,

  endowment: Option<Balance>,
  is_endowment_valid: bool,

  estimated_weight: Weight,
  weight_override: Option<Weight>,

  salt: Vec<u8>,
}

impl Default for Inputs {
  fn default() -> Self {
    Self {
      account: None,
      name: String::new(),
      is_name_valid: false,
      user_edited_name: false,
      abi: AbiInput::Missing,
      code: None,
      constructor: 0,
      args: vec![],
      endowment: None,
      is_endowment_valid: false,
      estimated_weight: Weight::default(),
      weight_override: None,
      salt: vec![],
    }
  }
}

impl Inputs {
  pub fn set_account(&mut self, account: Option<Pubkey>) -> bool {
    if self.account == account {
      return false;
    }
    self.account = account;
    true
  }

  /// An explicit name entered by the user, with the validity
  /// reported by the input that collected it.
  pub fn set_name(&mut self, name: String, is_valid: bool) -> bool {
    let changed = self.name != name || self.is_name_valid != is_valid;
    self.user_edited_name = true;
    self.name = name;
    self.is_name_valid = is_valid;
    changed
  }

  /// Replaces the contract interface with the outcome of parsing a new
  /// ABI document.
  ///
  /// The constructor selection and its arguments belong to the previous
  /// interface, so they are reset. A valid WASM module embedded in the ABI
  /// supersedes any code supplied before. Without one, previously supplied
  /// code is kept. A document that failed to parse carries no code, so
  /// code embedded in the previous ABI goes away with it.
  pub fn set_abi(&mut self, abi: Result<ContractInterface, AbiError>) -> bool {
    self.constructor = 0;
    self.args.clear();

    match abi {
      Ok(interface) => {
        let embedded = CodeBuffer::classify(interface.code().to_vec());
        if embedded.is_valid_format() {
          debug!("using {:?} embedded in the ABI", embedded);
          self.code = Some((embedded, CodeSource::Abi));
        } else if self.code_source() == Some(CodeSource::Abi) {
          self.code = None;
        }

        if !self.user_edited_name {
          if let Some(name) = interface.name() {
            debug!("seeding deployment name from the ABI: {name}");
            self.name = name.to_owned();
            self.is_name_valid = !self.name.trim().is_empty();
          }
        }

        self.abi = AbiInput::Valid(interface);
      }
      Err(error) => {
        debug!("invalid ABI supplied: {error}");
        if self.code_source() == Some(CodeSource::Abi) {
          self.code = None;
        }
        self.abi = AbiInput::Invalid(error);
      }
    }
    true
  }

  /// Forgets the ABI. Code that came embedded in it goes with it,
  /// code supplied separately is kept.
  pub fn clear_abi(&mut self) -> bool {
    if matches!(self.abi, AbiInput::Missing) {
      return false;
    }
    if self.code_source() == Some(CodeSource::Abi) {
      self.code = None;
    }
    self.abi = AbiInput::Missing;
    self.constructor = 0;
    self.args.clear();
    true
  }

  /// Code supplied separately from the ABI. It is ignored while the
  /// current ABI carries a valid module of its own.
  pub fn set_code(&mut self, bytes: Vec<u8>) -> bool {
    if self.code_source() == Some(CodeSource::Abi) {
      debug!("ignoring supplied code, the ABI carries its own module");
      return false;
    }
    let code = CodeBuffer::classify(bytes);
    if self.code.as_ref().map(|(c, _)| c) == Some(&code) {
      return false;
    }
    self.code = Some((code, CodeSource::User));
    true
  }

  /// Selects a different constructor, this always discards the
  /// arguments entered for the previous one.
  pub fn set_constructor(&mut self, index: usize) -> bool {
    if self.constructor == index {
      return false;
    }
    self.constructor = index;
    self.args.clear();
    true
  }

  pub fn set_args(&mut self, args: Vec<Value>) -> bool {
    if self.args == args {
      return false;
    }
    self.args = args;
    true
  }

  pub fn set_endowment(
    &mut self,
    endowment: Option<Balance>,
    is_valid: bool,
  ) -> bool {
    if self.endowment == endowment && self.is_endowment_valid == is_valid {
      return false;
    }
    self.endowment = endowment;
    self.is_endowment_valid = is_valid;
    true
  }

  pub fn set_estimated_weight(&mut self, weight: Weight) -> bool {
    if self.estimated_weight == weight {
      return false;
    }
    self.estimated_weight = weight;
    true
  }

  /// A weight entered by the user that takes precedence over the
  /// estimate. `None` goes back to using the estimate.
  pub fn override_weight(&mut self, weight: Option<Weight>) -> bool {
    if self.weight_override == weight {
      return false;
    }
    self.weight_override = weight;
    true
  }

  pub fn set_salt(&mut self, salt: Vec<u8>) -> bool {
    if self.salt == salt {
      return false;
    }
    self.salt = salt;
    true
  }

  pub fn account(&self) -> Option<&Pubkey> {
    self.account.as_ref()
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn is_name_valid(&self) -> bool {
    self.is_name_valid
  }

  pub fn interface(&self) -> Option<&ContractInterface> {
    match &self.abi {
      AbiInput::Valid(interface) => Some(interface),
      _ => None,
    }
  }

  pub fn abi_error(&self) -> Option<&AbiError> {
    match &self.abi {
      AbiInput::Invalid(error) => Some(error),
      _ => None,
    }
  }

  pub fn is_abi_supplied(&self) -> bool {
    !matches!(self.abi, AbiInput::Missing)
  }

  pub fn is_abi_valid(&self) -> bool {
    matches!(self.abi, AbiInput::Valid(_))
  }

  pub fn code(&self) -> Option<&CodeBuffer> {
    self.code.as_ref().map(|(code, _)| code)
  }

  pub fn has_valid_code(&self) -> bool {
    self.code().map(|c| c.is_valid_format()).unwrap_or(false)
  }

  /// Whether code has to be supplied separately, which is the
  /// case unless the ABI carried a valid module.
  pub fn needs_code(&self) -> bool {
    self.code_source() != Some(CodeSource::Abi)
  }

  pub fn constructor(&self) -> usize {
    self.constructor
  }

  pub fn args(&self) -> &[Value] {
    &self.args
  }

  /// The endowment, only when it is valid and non-zero.
  pub fn endowment(&self) -> Option<Balance> {
    self
      .endowment
      .filter(|value| self.is_endowment_valid && *value > 0)
  }

  /// The weight in effect, the user override if there is one.
  pub fn weight(&self) -> Weight {
    self.weight_override.unwrap_or(self.estimated_weight)
  }

  pub fn salt(&self) -> &[u8] {
    &self.salt
  }

  fn code_source(&self) -> Option<CodeSource> {
    self.code.as_ref().map(|(_, source)| *source)
  }
}
