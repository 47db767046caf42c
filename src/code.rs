//! Compiled contract code
//!
//! Contracts are deployed as WASM modules. This module only checks the
//! module preamble, the full validation of the bytecode happens on chain
//! when the deployment transaction is executed.

use {
  multihash::{Code, Multihash, MultihashDigest},
  std::fmt::Debug,
};

/// `\0asm` magic bytes that every WASM binary module starts with.
pub const WASM_MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6d];

/// A buffer of bytes that was supplied as contract code along with
/// the result of checking whether it looks like a WASM module.
///
/// The validity flag is computed once on construction and it is never
/// set independently of the bytes it describes.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeBuffer {
  bytes: Vec<u8>,
  is_valid_format: bool,
}

impl CodeBuffer {
  /// Classifies an arbitrary byte buffer. This never fails, anything
  /// that is not a WASM module is simply flagged as invalid.
  pub fn classify(bytes: Vec<u8>) -> Self {
    let is_valid_format = is_wasm(&bytes);
    Self {
      bytes,
      is_valid_format,
    }
  }

  pub fn bytes(&self) -> &[u8] {
    &self.bytes
  }

  pub fn is_valid_format(&self) -> bool {
    self.is_valid_format
  }

}

impl Debug for CodeBuffer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CodeBuffer")
      .field("len", &self.bytes.len())
      .field("is_valid_format", &self.is_valid_format)
      .finish()
  }
}

pub fn is_wasm(bytes: &[u8]) -> bool {
  bytes.starts_with(&WASM_MAGIC)
}

pub fn code_hash(bytes: &[u8]) -> Multihash {
  Code::Sha3_256.digest(bytes)
}
