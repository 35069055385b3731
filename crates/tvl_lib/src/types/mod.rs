pub mod balances;
pub mod enums;
pub mod record;

pub use balances::*;
pub use enums::*;
pub use record::*;
