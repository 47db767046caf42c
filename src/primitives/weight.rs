use serde::{Deserialize, Serialize};

/// The execution budget of a transaction.
///
/// `ref_time` bounds the computation time in picoseconds of reference
/// hardware and `proof_size` bounds the size of the storage proof the
/// call is allowed to produce.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Weight {
  pub ref_time: u64,
  pub proof_size: u64,
}

impl Weight {
  pub const fn new(ref_time: u64, proof_size: u64) -> Self {
    Self {
      ref_time,
      proof_size,
    }
  }

  pub fn is_zero(&self) -> bool {
    self.ref_time == 0 && self.proof_size == 0
  }
}

impl std::fmt::Display for Weight {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{{ref_time: {}, proof_size: {}}}", self.ref_time, self.proof_size)
  }
}

#[cfg(test)]
mod test {
  use super::Weight;

  #[test]
  fn display_both_dimensions() {
    assert_eq!(
      Weight::new(500, 64).to_string(),
      "{ref_time: 500, proof_size: 64}"
    );
    assert!(Weight::default().is_zero());
    assert!(!Weight::new(0, 1).is_zero());
  }
}
