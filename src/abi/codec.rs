//! SCALE encoding of user supplied argument values
//!
//! Argument values arrive as JSON values, the way they are entered in a
//! form or passed on the command line. They are encoded against the type
//! the argument has in the metadata registry.

use {
  super::registry::{Field, Primitive, Registry, TypeDef, TypeId, Variant},
  crate::primitives::Pubkey,
  parity_scale_codec::{Compact, Encode},
  serde_json::Value,
  thiserror::Error,
};

/// Nesting limit for recursive types.
const MAX_DEPTH: usize = 64;

/// Payload of variants given by their name only.
static NO_PAYLOAD: Value = Value::Null;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
  #[error("There is no constructor at index {0}")]
  UnknownConstructor(usize),

  #[error("Expected {expected} arguments, got {got}")]
  ArgumentCount { expected: usize, got: usize },

  #[error("Invalid value for argument `{name}`: {source}")]
  Argument {
    name: String,
    #[source]
    source: ValueError,
  },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
  #[error("Type {0} is not defined in the registry")]
  UnknownType(TypeId),

  #[error("Expected {expected}, found {found}")]
  TypeMismatch {
    expected: &'static str,
    found: &'static str,
  },

  #[error("Value {0} does not fit in the target integer type")]
  OutOfRange(String),

  #[error("Expected {expected} elements, got {got}")]
  LengthMismatch { expected: usize, got: usize },

  #[error("Missing field `{0}`")]
  MissingField(String),

  #[error("Unknown variant `{0}`")]
  UnknownVariant(String),

  #[error("Invalid hex string: {0}")]
  InvalidHex(String),

  #[error("Invalid address: {0}")]
  InvalidAddress(String),

  #[error("Encoding {0} is not supported")]
  Unsupported(&'static str),

  #[error("Type nesting is too deep")]
  TooDeep,
}

type Result<T> = std::result::Result<T, ValueError>;

/// Encodes JSON values into their SCALE representation according
/// to type definitions in a registry.
pub struct Encoder<'r> {
  registry: &'r Registry,
}

impl<'r> Encoder<'r> {
  pub fn new(registry: &'r Registry) -> Self {
    Self { registry }
  }

  pub fn encode(&self, ty: TypeId, value: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    self.encode_to(ty, value, &mut out, 0)?;
    Ok(out)
  }

  fn encode_to(
    &self,
    ty: TypeId,
    value: &Value,
    out: &mut Vec<u8>,
    depth: usize,
  ) -> Result<()> {
    if depth > MAX_DEPTH {
      return Err(ValueError::TooDeep);
    }

    let resolved = self
      .registry
      .resolve(ty)
      .ok_or(ValueError::UnknownType(ty))?;

    match &resolved.def {
      TypeDef::Primitive(primitive) => encode_primitive(primitive, value, out),
      TypeDef::Compact { ty } => {
        let primitive = self.unsigned_of(*ty, depth + 1)?;
        let n = parse_unsigned(value)?;
        check_unsigned_range(&primitive, n)?;
        Compact(n).encode_to(out);
        Ok(())
      }
      TypeDef::Sequence { ty } => {
        if let Some(bytes) = self.byte_string(*ty, value)? {
          bytes.encode_to(out);
          return Ok(());
        }
        let items = as_array(value)?;
        Compact(items.len() as u32).encode_to(out);
        for item in items {
          self.encode_to(*ty, item, out, depth + 1)?;
        }
        Ok(())
      }
      TypeDef::Array { len, ty } => {
        let len = *len as usize;
        if let Some(bytes) = self.byte_string(*ty, value)? {
          if bytes.len() != len {
            return Err(ValueError::LengthMismatch {
              expected: len,
              got: bytes.len(),
            });
          }
          out.extend_from_slice(&bytes);
          return Ok(());
        }
        let items = as_array(value)?;
        if items.len() != len {
          return Err(ValueError::LengthMismatch {
            expected: len,
            got: items.len(),
          });
        }
        for item in items {
          self.encode_to(*ty, item, out, depth + 1)?;
        }
        Ok(())
      }
      TypeDef::Tuple(types) => {
        if types.is_empty() {
          return match value {
            Value::Null => Ok(()),
            Value::Array(items) if items.is_empty() => Ok(()),
            other => Err(mismatch("unit", other)),
          };
        }
        let items = as_array(value)?;
        if items.len() != types.len() {
          return Err(ValueError::LengthMismatch {
            expected: types.len(),
            got: items.len(),
          });
        }
        for (ty, item) in types.iter().zip(items) {
          self.encode_to(*ty, item, out, depth + 1)?;
        }
        Ok(())
      }
      TypeDef::Composite { fields } => {
        // accounts are commonly entered as their base58 address
        if resolved.name() == Some("AccountId") {
          if let Value::String(s) = value {
            if !s.starts_with("0x") {
              let address: Pubkey = s
                .parse()
                .map_err(|_| ValueError::InvalidAddress(s.clone()))?;
              out.extend_from_slice(&address);
              return Ok(());
            }
          }
        }
        self.encode_fields(fields, value, out, depth)
      }
      TypeDef::Variant { variants } => {
        self.encode_variant(variants, value, out, depth)
      }
      TypeDef::BitSequence(_) => Err(ValueError::Unsupported("bit sequences")),
    }
  }

  fn encode_fields(
    &self,
    fields: &[Field],
    value: &Value,
    out: &mut Vec<u8>,
    depth: usize,
  ) -> Result<()> {
    match fields {
      [] => Ok(()),
      [single] => {
        // single field wrappers may be given either as the
        // wrapped value or as an object with the field name.
        let inner = match (&single.name, value) {
          (Some(name), Value::Object(map)) if map.len() == 1 => {
            map.get(name).unwrap_or(value)
          }
          _ => value,
        };
        self.encode_to(single.ty, inner, out, depth + 1)
      }
      fields if fields.iter().all(|f| f.name.is_some()) => {
        let map = match value {
          Value::Object(map) => map,
          other => return Err(mismatch("object", other)),
        };
        for field in fields {
          let name = field.name.as_deref().unwrap_or_default();
          let item = map
            .get(name)
            .ok_or_else(|| ValueError::MissingField(name.to_owned()))?;
          self.encode_to(field.ty, item, out, depth + 1)?;
        }
        Ok(())
      }
      fields => {
        let items = as_array(value)?;
        if items.len() != fields.len() {
          return Err(ValueError::LengthMismatch {
            expected: fields.len(),
            got: items.len(),
          });
        }
        for (field, item) in fields.iter().zip(items) {
          self.encode_to(field.ty, item, out, depth + 1)?;
        }
        Ok(())
      }
    }
  }

  fn encode_variant(
    &self,
    variants: &[Variant],
    value: &Value,
    out: &mut Vec<u8>,
    depth: usize,
  ) -> Result<()> {
    let find = |name: &str| {
      variants
        .iter()
        .find(|v| v.name == name)
        .ok_or_else(|| ValueError::UnknownVariant(name.to_owned()))
    };

    let has = |name: &str| variants.iter().any(|v| v.name == name);
    let is_option = variants.len() == 2 && has("None") && has("Some");

    let entry = match value {
      Value::Object(map) if map.len() == 1 => map.iter().next(),
      _ => None,
    };

    let (variant, payload) = match (value, entry) {
      (Value::Null, _) => (find("None")?, &NO_PAYLOAD),
      (Value::String(name), _) if has(name) => (find(name)?, &NO_PAYLOAD),
      (_, Some((name, payload))) if has(name) => (find(name)?, payload),
      // `Some` may be left out for optional values
      (other, _) if is_option => (find("Some")?, other),
      (Value::String(name), _) => {
        return Err(ValueError::UnknownVariant(name.clone()))
      }
      (_, Some((name, _))) => {
        return Err(ValueError::UnknownVariant(name.clone()))
      }
      (other, _) => return Err(mismatch("variant", other)),
    };

    out.push(variant.index);
    if variant.fields.is_empty() {
      return Ok(());
    }
    self.encode_fields(&variant.fields, payload, out, depth)
  }

  /// When the element type is `u8` the value may also be given as a
  /// `0x` prefixed hex string, the usual notation for hashes and blobs.
  fn byte_string(&self, elem: TypeId, value: &Value) -> Result<Option<Vec<u8>>> {
    let hex_str = match value {
      Value::String(s) if s.starts_with("0x") => &s[2..],
      _ => return Ok(None),
    };
    match self.registry.resolve(elem).map(|t| &t.def) {
      Some(TypeDef::Primitive(Primitive::U8)) => hex::decode(hex_str)
        .map(Some)
        .map_err(|e| ValueError::InvalidHex(e.to_string())),
      _ => Ok(None),
    }
  }

  /// Compact encoding is only defined for unsigned integers and
  /// single field wrappers around them.
  fn unsigned_of(&self, ty: TypeId, depth: usize) -> Result<Primitive> {
    if depth > MAX_DEPTH {
      return Err(ValueError::TooDeep);
    }
    let resolved = self
      .registry
      .resolve(ty)
      .ok_or(ValueError::UnknownType(ty))?;
    match &resolved.def {
      TypeDef::Primitive(
        p @ (Primitive::U8
        | Primitive::U16
        | Primitive::U32
        | Primitive::U64
        | Primitive::U128),
      ) => Ok(p.clone()),
      TypeDef::Composite { fields } if fields.len() == 1 => {
        self.unsigned_of(fields[0].ty, depth + 1)
      }
      _ => Err(ValueError::Unsupported("compact of a non-integer type")),
    }
  }
}

fn encode_primitive(
  primitive: &Primitive,
  value: &Value,
  out: &mut Vec<u8>,
) -> Result<()> {
  match primitive {
    Primitive::Bool => match value {
      Value::Bool(b) => b.encode_to(out),
      other => return Err(mismatch("bool", other)),
    },
    Primitive::Char => {
      let s = as_str(value)?;
      let mut chars = s.chars();
      match (chars.next(), chars.next()) {
        (Some(c), None) => (c as u32).encode_to(out),
        _ => {
          return Err(ValueError::LengthMismatch {
            expected: 1,
            got: s.chars().count(),
          })
        }
      }
    }
    Primitive::Str => as_str(value)?.encode_to(out),
    Primitive::U8 | Primitive::U16 | Primitive::U32 => {
      let n = parse_unsigned(value)?;
      check_unsigned_range(primitive, n)?;
      match primitive {
        Primitive::U8 => (n as u8).encode_to(out),
        Primitive::U16 => (n as u16).encode_to(out),
        _ => (n as u32).encode_to(out),
      }
    }
    Primitive::U64 | Primitive::U128 => {
      let n = parse_unsigned(value)?;
      check_unsigned_range(primitive, n)?;
      match primitive {
        Primitive::U64 => (n as u64).encode_to(out),
        _ => n.encode_to(out),
      }
    }
    Primitive::I8 => narrow_signed::<i8>(value)?.encode_to(out),
    Primitive::I16 => narrow_signed::<i16>(value)?.encode_to(out),
    Primitive::I32 => narrow_signed::<i32>(value)?.encode_to(out),
    Primitive::I64 => narrow_signed::<i64>(value)?.encode_to(out),
    Primitive::I128 => parse_signed(value)?.encode_to(out),
    Primitive::U256 | Primitive::I256 => {
      return Err(ValueError::Unsupported("256-bit integers"))
    }
  }
  Ok(())
}

fn check_unsigned_range(primitive: &Primitive, n: u128) -> Result<()> {
  let max = match primitive {
    Primitive::U8 => u8::MAX as u128,
    Primitive::U16 => u16::MAX as u128,
    Primitive::U32 => u32::MAX as u128,
    Primitive::U64 => u64::MAX as u128,
    _ => u128::MAX,
  };
  if n > max {
    return Err(ValueError::OutOfRange(n.to_string()));
  }
  Ok(())
}

fn narrow_signed<T: TryFrom<i128>>(value: &Value) -> Result<T> {
  let n = parse_signed(value)?;
  T::try_from(n).map_err(|_| ValueError::OutOfRange(n.to_string()))
}

/// Integers are accepted as JSON numbers or as decimal strings,
/// the latter being the only way to enter values above 2^53
/// without losing precision. Underscore separators are allowed.
fn parse_unsigned(value: &Value) -> Result<u128> {
  match value {
    Value::Number(n) => n
      .as_u64()
      .map(u128::from)
      .ok_or_else(|| ValueError::OutOfRange(n.to_string())),
    Value::String(s) => s
      .replace('_', "")
      .parse::<u128>()
      .map_err(|_| ValueError::OutOfRange(s.clone())),
    other => Err(mismatch("unsigned integer", other)),
  }
}

fn parse_signed(value: &Value) -> Result<i128> {
  match value {
    Value::Number(n) => n
      .as_i64()
      .map(i128::from)
      .ok_or_else(|| ValueError::OutOfRange(n.to_string())),
    Value::String(s) => s
      .replace('_', "")
      .parse::<i128>()
      .map_err(|_| ValueError::OutOfRange(s.clone())),
    other => Err(mismatch("integer", other)),
  }
}

fn as_str(value: &Value) -> Result<&str> {
  match value {
    Value::String(s) => Ok(s),
    other => Err(mismatch("string", other)),
  }
}

fn as_array(value: &Value) -> Result<&Vec<Value>> {
  match value {
    Value::Array(items) => Ok(items),
    other => Err(mismatch("array", other)),
  }
}

fn mismatch(expected: &'static str, found: &Value) -> ValueError {
  ValueError::TypeMismatch {
    expected,
    found: match found {
      Value::Null => "null",
      Value::Bool(_) => "bool",
      Value::Number(_) => "number",
      Value::String(_) => "string",
      Value::Array(_) => "array",
      Value::Object(_) => "object",
    },
  }
}
