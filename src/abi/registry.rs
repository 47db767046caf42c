//! Portable type registry
//!
//! Contract metadata describes all types used by constructor and message
//! arguments in a flat table of type definitions that reference each
//! other by their numeric id.

use {
  serde::Deserialize,
  std::collections::HashMap,
};

pub type TypeId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
  Bool,
  Char,
  Str,
  U8,
  U16,
  U32,
  U64,
  U128,
  U256,
  I8,
  I16,
  I32,
  I64,
  I128,
  I256,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
  #[serde(default)]
  pub name: Option<String>,

  #[serde(rename = "type")]
  pub ty: TypeId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Variant {
  pub name: String,

  #[serde(default)]
  pub fields: Vec<Field>,

  /// SCALE variant discriminant, this is the byte that prefixes the
  /// encoded variant fields.
  pub index: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeDef {
  Primitive(Primitive),

  Composite {
    #[serde(default)]
    fields: Vec<Field>,
  },

  Variant {
    #[serde(default)]
    variants: Vec<Variant>,
  },

  Sequence {
    #[serde(rename = "type")]
    ty: TypeId,
  },

  Array {
    len: u32,
    #[serde(rename = "type")]
    ty: TypeId,
  },

  Tuple(Vec<TypeId>),

  Compact {
    #[serde(rename = "type")]
    ty: TypeId,
  },

  /// Recognized so that metadata using them still loads, but arguments
  /// of this type cannot be encoded.
  BitSequence(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Type {
  #[serde(default)]
  pub path: Vec<String>,
  pub def: TypeDef,
}

impl Type {
  /// The last segment of the type path, e.g. `AccountId` for
  /// `ink_env::types::AccountId`.
  pub fn name(&self) -> Option<&str> {
    self.path.last().map(String::as_str)
  }
}

/// One row of the `types` table in contract metadata.
#[derive(Debug, Deserialize)]
pub(super) struct RegistryEntry {
  #[serde(default)]
  id: Option<TypeId>,

  #[serde(rename = "type")]
  ty: Type,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
  types: HashMap<TypeId, Type>,
}

impl Registry {
  /// Entries without an explicit id are numbered by their position
  /// in the table.
  pub(super) fn new(entries: Vec<RegistryEntry>) -> Self {
    Self {
      types: entries
        .into_iter()
        .enumerate()
        .map(|(pos, entry)| (entry.id.unwrap_or(pos as TypeId), entry.ty))
        .collect(),
    }
  }

  pub fn resolve(&self, id: TypeId) -> Option<&Type> {
    self.types.get(&id)
  }
}

#[cfg(test)]
mod test {
  use {
    super::{Primitive, Registry, RegistryEntry, TypeDef},
    serde_json::json,
  };

  #[test]
  fn parse_registry_entries() {
    let entries: Vec<RegistryEntry> = serde_json::from_value(json!([
      { "id": 0, "type": { "def": { "primitive": "u32" } } },
      { "id": 3, "type": {
          "path": ["ink_env", "types", "AccountId"],
          "def": { "composite": { "fields": [{ "type": 4, "typeName": "[u8; 32]" }] } }
      } },
      { "id": 4, "type": { "def": { "array": { "len": 32, "type": 5 } } } },
      { "id": 5, "type": { "def": { "primitive": "u8" } } },
      { "id": 6, "type": { "def": { "tuple": [] } } },
      { "id": 7, "type": { "def": { "bitSequence": { "bit_store_type": 5, "bit_order_type": 6 } } } },
    ]))
    .unwrap();

    let registry = Registry::new(entries);
    assert!(matches!(
      registry.resolve(0).unwrap().def,
      TypeDef::Primitive(Primitive::U32)
    ));
    assert_eq!(registry.resolve(3).unwrap().name(), Some("AccountId"));
    assert!(matches!(
      registry.resolve(4).unwrap().def,
      TypeDef::Array { len: 32, ty: 5 }
    ));
    assert!(matches!(registry.resolve(6).unwrap().def, TypeDef::Tuple(ref t) if t.is_empty()));
    assert!(registry.resolve(7).is_some());
    assert!(registry.resolve(1).is_none());
  }

  #[test]
  fn implicit_ids_follow_position() {
    let entries: Vec<RegistryEntry> = serde_json::from_value(json!([
      { "type": { "def": { "primitive": "bool" } } },
      { "type": { "def": { "sequence": { "type": 0 } } } },
    ]))
    .unwrap();

    let registry = Registry::new(entries);
    assert!(matches!(
      registry.resolve(1).unwrap().def,
      TypeDef::Sequence { ty: 0 }
    ));
  }
}
