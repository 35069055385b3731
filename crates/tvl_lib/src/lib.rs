pub mod aggregator;
pub mod client;
pub mod constants;
pub mod errors;
pub mod storage;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;
