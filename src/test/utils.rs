use {
  crate::{code::code_hash, primitives::Pubkey},
  ed25519_dalek::{PublicKey, SecretKey},
  multihash::Multihash,
  serde_json::{json, Value},
};

pub fn wallet_default() -> Pubkey {
  let secret = SecretKey::from_bytes(&[
    157, 97, 177, 157, 239, 253, 90, 96, 186, 132, 74, 244, 146, 236, 44, 196,
    68, 73, 197, 105, 123, 50, 105, 25, 112, 59, 172, 3, 28, 174, 127, 96,
  ])
  .unwrap();
  let public: PublicKey = (&secret).into();
  public.into()
}

pub fn genesis_hash() -> Multihash {
  code_hash(b"rensa-deploy test chain")
}

/// The smallest valid WASM module with a custom section appended,
/// so that it is not just the header.
pub fn wasm_module() -> Vec<u8> {
  vec![
    0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00, 0x00, 0x05, 0x04, 0x6e,
    0x61, 0x6d, 0x65,
  ]
}

fn flipper_spec() -> Value {
  json!({
    "spec": {
      "constructors": [
        {
          "label": "new",
          "selector": "0x9bae9d5e",
          "payable": false,
          "args": [{
            "label": "init_value",
            "type": { "type": 0, "displayName": ["bool"] }
          }],
          "docs": ["Creates a new flipper smart contract initialized with the given value."]
        },
        {
          "label": "default",
          "selector": "0xed4b9d1b",
          "payable": false,
          "args": [],
          "docs": ["Creates a new flipper smart contract initialized to `false`."]
        }
      ],
      "messages": [
        {
          "label": "flip",
          "selector": "0x633aa551",
          "mutates": true,
          "payable": false,
          "args": [],
          "docs": [" Flips the current value of the Flipper's boolean."]
        },
        {
          "label": "get",
          "selector": "0x2f865bd9",
          "mutates": false,
          "payable": false,
          "args": [],
          "returnType": { "type": 0, "displayName": ["bool"] },
          "docs": [" Returns the current value of the Flipper's boolean."]
        }
      ],
      "events": [],
      "docs": []
    },
    "types": [
      { "id": 0, "type": { "def": { "primitive": "bool" } } }
    ],
    "storage": {
      "root": { "layout": { "leaf": { "key": "0x00000000", "ty": 0 } } }
    }
  })
}

/// Flipper metadata without the contract bundle parts.
pub fn flipper_metadata() -> String {
  flipper_spec().to_string()
}

/// The `.contract` bundle of flipper, embedding [`wasm_module`].
pub fn flipper_bundle() -> String {
  let mut bundle = flipper_spec();
  bundle["source"] = json!({
    "hash": "0x0000000000000000000000000000000000000000000000000000000000000000",
    "language": "ink! 4.0.0",
    "compiler": "rustc 1.68.0",
    "wasm": format!("0x{}", hex::encode(wasm_module()))
  });
  bundle["contract"] = json!({
    "name": "flipper",
    "version": "0.1.0",
    "authors": ["Parity Technologies <admin@parity.io>"]
  });
  bundle.to_string()
}

/// ERC20 metadata in the older layout that nests the spec
/// under a version key.
pub fn erc20_abi() -> String {
  json!({
    "metadataVersion": "0.1.0",
    "source": {
      "hash": "0x0000000000000000000000000000000000000000000000000000000000000000",
      "language": "ink! 3.0.0",
      "compiler": "rustc 1.56.0"
    },
    "contract": {
      "name": "erc20",
      "version": "3.0.0",
      "authors": ["Parity Technologies <admin@parity.io>"]
    },
    "V3": {
      "spec": {
        "constructors": [
          {
            "label": "new",
            "selector": "0x9bae9d5e",
            "payable": false,
            "args": [{
              "label": "total_supply",
              "type": { "type": 0, "displayName": ["Balance"] }
            }],
            "docs": ["Creates a new ERC-20 contract with the specified initial supply."]
          },
          {
            "label": "with_owner",
            "selector": "0x1b5e2d4b",
            "payable": false,
            "args": [
              {
                "label": "owner",
                "type": { "type": 1, "displayName": ["AccountId"] }
              },
              {
                "label": "total_supply",
                "type": { "type": 0, "displayName": ["Balance"] }
              }
            ],
            "docs": []
          }
        ],
        "messages": [
          {
            "label": "total_supply",
            "selector": "0xdb6375a8",
            "mutates": false,
            "payable": false,
            "args": [],
            "returnType": { "type": 0, "displayName": ["Balance"] },
            "docs": []
          }
        ],
        "events": [],
        "docs": []
      },
      "types": [
        { "id": 0, "type": { "def": { "primitive": "u128" } } },
        { "id": 1, "type": {
          "path": ["ink_env", "types", "AccountId"],
          "def": { "composite": { "fields": [{ "type": 2, "typeName": "[u8; 32]" }] } }
        } },
        { "id": 2, "type": { "def": { "array": { "len": 32, "type": 3 } } } },
        { "id": 3, "type": { "def": { "primitive": "u8" } } }
      ]
    }
  })
  .to_string()
}
