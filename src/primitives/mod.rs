mod b58;
mod keys;
mod weight;

pub use {
  b58::{
    parse_multihash,
    serde as b58_serde,
    MultihashParseError,
    ToBase58String,
  },
  keys::Pubkey,
  weight::Weight,
};

/// Amount of native tokens, in the smallest denomination.
pub type Balance = u128;
