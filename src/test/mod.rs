pub mod in_mem_store;
pub mod utils;
