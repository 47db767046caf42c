pub mod abi;
pub mod code;
pub mod deploy;
pub mod ledger;
pub mod primitives;
pub mod storage;

#[cfg(test)]
pub mod test;
