pub mod governance;
pub mod price;
pub mod rpc;

pub use governance::BalanceSource;
pub use price::{JupiterPriceClient, PriceSource};
pub use rpc::Rpc;
