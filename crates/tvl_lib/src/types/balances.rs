use solana_sdk::pubkey::Pubkey;

use crate::constants::NATIVE_DECIMALS;

/// One SPL token account balance. `raw_amount / 10^decimals` is the UI amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenBalance {
    pub mint: Pubkey,
    pub raw_amount: u128,
    pub decimals: u8,
}

/// Lamports held directly by an account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NativeBalance {
    pub lamports: u64,
}

impl NativeBalance {
    pub const DECIMALS: u8 = NATIVE_DECIMALS;

    pub fn new(lamports: u64) -> Self {
        Self { lamports }
    }
}

/// Everything one governance account holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountHoldings {
    pub account: Pubkey,
    pub tokens: Vec<TokenBalance>,
    pub native: NativeBalance,
}

/// Holdings of every governance account under one program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramHoldings {
    pub program_id: Pubkey,
    pub accounts: Vec<AccountHoldings>,
    /// Accounts whose balance queries failed and were left out.
    pub skipped_accounts: Vec<Pubkey>,
    /// Set when enumeration failed and the program was dropped from the pass.
    pub skipped: bool,
}

impl ProgramHoldings {
    pub fn skipped(program_id: Pubkey) -> Self {
        Self {
            program_id,
            accounts: Vec::new(),
            skipped_accounts: Vec::new(),
            skipped: true,
        }
    }
}
