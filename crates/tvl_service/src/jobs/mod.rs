pub mod scheduler;
#[cfg(test)]
pub(crate) mod testing;
pub mod update_tvl;
