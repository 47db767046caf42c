//! Contract ABI
//!
//! Parses contract metadata documents, either the plain `metadata.json`
//! or the `.contract` bundle that also carries the compiled WASM code
//! in its `source.wasm` field, and exposes the constructors, messages
//! and the argument codec of the contract.

mod codec;
mod registry;

use {
  registry::RegistryEntry,
  serde::Deserialize,
  serde_json::Value,
  thiserror::Error,
};

pub use {
  codec::{EncodingError, Encoder, ValueError},
  registry::{Primitive, Registry, Type, TypeDef, TypeId},
};

#[derive(Debug, Error)]
pub enum AbiError {
  #[error("Malformed ABI document: {0}")]
  Json(#[from] serde_json::Error),

  #[error("The ABI document has no contract spec")]
  MissingSpec,

  #[error("Invalid selector {0}, expected 4 hex encoded bytes")]
  InvalidSelector(String),

  #[error("Invalid hex encoded code blob: {0}")]
  InvalidCode(#[from] hex::FromHexError),

  #[error("Argument `{arg}` of `{method}` references undefined type {ty}")]
  UnknownType {
    method: String,
    arg: String,
    ty: TypeId,
  },
}

/// Options recognized when loading an ABI.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbiOptions {
  /// Also extract the compiled module embedded in a `.contract` bundle.
  pub with_code: bool,
}

/// Older metadata versions use a path of names instead of a label.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Label {
  Plain(String),
  Path(Vec<String>),
}

impl From<Label> for String {
  fn from(label: Label) -> Self {
    match label {
      Label::Plain(label) => label,
      Label::Path(path) => path.join("::"),
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypeSpec {
  #[serde(rename = "type")]
  ty: TypeId,

  #[serde(default)]
  display_name: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ArgSpec {
  #[serde(alias = "name")]
  label: Label,

  #[serde(rename = "type")]
  ty: TypeSpec,
}

#[derive(Debug, Deserialize)]
struct MethodSpec {
  #[serde(alias = "name")]
  label: Label,

  selector: String,

  #[serde(default)]
  args: Vec<ArgSpec>,

  #[serde(default)]
  docs: Vec<String>,

  #[serde(default)]
  payable: bool,

  #[serde(default)]
  mutates: bool,
}

#[derive(Debug, Deserialize)]
struct ContractSpec {
  constructors: Vec<MethodSpec>,

  #[serde(default)]
  messages: Vec<MethodSpec>,
}

#[derive(Debug, Deserialize)]
struct SourceSpec {
  #[serde(default)]
  wasm: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContractInfo {
  name: String,
}

/// A single argument of a constructor or message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
  pub label: String,
  pub ty: TypeId,

  /// Human readable name of the type, e.g. `Option<Balance>`.
  pub display_name: String,
}

/// A constructor or a message of the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
  pub label: String,
  pub selector: [u8; 4],
  pub args: Vec<Argument>,
  pub docs: Vec<String>,
  pub payable: bool,

  /// Only meaningful for messages, whether the message
  /// may change the contract storage.
  pub mutates: bool,
}

impl Method {
  /// The human readable signature of the method, e.g.
  /// `new(init_value: bool)`.
  pub fn signature(&self) -> String {
    let args = self
      .args
      .iter()
      .map(|a| format!("{}: {}", a.label, a.display_name))
      .collect::<Vec<_>>()
      .join(", ");
    format!("{}({})", self.label, args)
  }

  fn parse(spec: MethodSpec, registry: &Registry) -> Result<Self, AbiError> {
    let label: String = spec.label.into();
    let selector = parse_selector(&spec.selector)?;

    let mut args = Vec::with_capacity(spec.args.len());
    for arg in spec.args {
      let arg_label: String = arg.label.into();
      if registry.resolve(arg.ty.ty).is_none() {
        return Err(AbiError::UnknownType {
          method: label,
          arg: arg_label,
          ty: arg.ty.ty,
        });
      }
      let display_name = match arg.ty.display_name.is_empty() {
        true => format!("#{}", arg.ty.ty),
        false => arg.ty.display_name.join("::"),
      };
      args.push(Argument {
        label: arg_label,
        ty: arg.ty.ty,
        display_name,
      });
    }

    Ok(Self {
      label,
      selector,
      args,
      docs: spec.docs,
      payable: spec.payable,
      mutates: spec.mutates,
    })
  }
}

pub type Constructor = Method;
pub type Message = Method;

/// The parsed interface of a contract.
///
/// Once loaded it is never modified, a new ABI document
/// produces a whole new instance.
#[derive(Debug, Clone)]
pub struct ContractInterface {
  json: Value,
  name: Option<String>,
  code: Vec<u8>,
  constructors: Vec<Constructor>,
  messages: Vec<Message>,
  registry: Registry,
}

impl ContractInterface {
  pub fn parse(
    document: &[u8],
    options: AbiOptions,
  ) -> Result<Self, AbiError> {
    let json: Value = serde_json::from_slice(document)?;
    let metadata = find_spec(&json).ok_or(AbiError::MissingSpec)?;

    let spec: ContractSpec = ContractSpec::deserialize(&metadata["spec"])?;
    let registry = Registry::new(match metadata.get("types") {
      Some(types) => Vec::<RegistryEntry>::deserialize(types)?,
      None => vec![],
    });

    let constructors = spec
      .constructors
      .into_iter()
      .map(|c| Method::parse(c, &registry))
      .collect::<Result<Vec<_>, _>>()?;

    let messages = spec
      .messages
      .into_iter()
      .map(|m| Method::parse(m, &registry))
      .collect::<Result<Vec<_>, _>>()?;

    let name = match json.get("contract") {
      Some(info) => Some(ContractInfo::deserialize(info)?.name),
      None => None,
    };

    let code = match (options.with_code, json.get("source")) {
      (true, Some(source)) => match SourceSpec::deserialize(source)?.wasm {
        Some(wasm) => hex::decode(wasm.trim_start_matches("0x"))?,
        None => vec![],
      },
      _ => vec![],
    };

    Ok(Self {
      json,
      name,
      code,
      constructors,
      messages,
      registry,
    })
  }

  pub fn constructors(&self) -> &[Constructor] {
    &self.constructors
  }

  pub fn constructor(&self, index: usize) -> Option<&Constructor> {
    self.constructors.get(index)
  }

  pub fn messages(&self) -> &[Message] {
    &self.messages
  }

  /// Compiled code embedded in the ABI bundle, empty if the bundle
  /// carried none or the ABI was loaded without [`AbiOptions::with_code`].
  pub fn code(&self) -> &[u8] {
    &self.code
  }

  /// The contract name declared in the metadata, if any.
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  /// The ABI document serialized back to JSON, this is
  /// what gets persisted alongside deployed code and contracts.
  pub fn json(&self) -> String {
    self.json.to_string()
  }

  /// Encodes the input data of a constructor call, that is the
  /// constructor selector followed by SCALE encoded arguments.
  pub fn encode_constructor(
    &self,
    index: usize,
    args: &[Value],
  ) -> Result<Vec<u8>, EncodingError> {
    let constructor = self
      .constructor(index)
      .ok_or(EncodingError::UnknownConstructor(index))?;

    if args.len() != constructor.args.len() {
      return Err(EncodingError::ArgumentCount {
        expected: constructor.args.len(),
        got: args.len(),
      });
    }

    let encoder = Encoder::new(&self.registry);
    let mut data = constructor.selector.to_vec();
    for (arg, value) in constructor.args.iter().zip(args) {
      let encoded =
        encoder
          .encode(arg.ty, value)
          .map_err(|source| EncodingError::Argument {
            name: arg.label.clone(),
            source,
          })?;
      data.extend(encoded);
    }
    Ok(data)
  }
}

/// Locates the object holding `spec` and `types`. Newer metadata has
/// them at the top level, older versions nest them under a version key
/// such as `V3`, while `source` and `contract` stay at the top.
fn find_spec(json: &Value) -> Option<&Value> {
  if json.get("spec").is_some() {
    return Some(json);
  }
  json
    .as_object()?
    .iter()
    .find(|(key, value)| key.starts_with('V') && value.get("spec").is_some())
    .map(|(_, value)| value)
}

fn parse_selector(selector: &str) -> Result<[u8; 4], AbiError> {
  hex::decode(selector.trim_start_matches("0x"))
    .ok()
    .and_then(|bytes| bytes.try_into().ok())
    .ok_or_else(|| AbiError::InvalidSelector(selector.to_owned()))
}
