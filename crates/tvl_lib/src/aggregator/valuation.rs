use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, warn};

use crate::{
    aggregator::prices::PriceBook,
    errors::ValuationError,
    types::{NativeBalance, ProgramHoldings},
};

const MAX_DECIMAL_SCALE: u32 = 28;

/// TVL contributed by one governance program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramValue {
    pub program_id: Pubkey,
    pub accounts: usize,
    pub value: Decimal,
}

/// Result of one aggregation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TvlBreakdown {
    pub total: Decimal,
    pub programs: Vec<ProgramValue>,
    /// Held assets the price index had no price for.
    pub unpriced_assets: Vec<Pubkey>,
    /// Programs dropped because enumeration failed.
    pub skipped_programs: Vec<Pubkey>,
    /// Governance accounts dropped because their balance queries failed.
    pub skipped_accounts: Vec<Pubkey>,
}

/// `raw_amount * price / 10^decimals`, computed exactly.
pub fn token_value(
    raw_amount: u128,
    decimals: u8,
    price: Decimal,
) -> Result<Decimal, ValuationError> {
    if raw_amount == 0 || price.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if u32::from(decimals) > MAX_DECIMAL_SCALE {
        return Err(ValuationError::DecimalsOutOfRange(decimals));
    }

    let raw =
        i128::try_from(raw_amount).map_err(|_| ValuationError::AmountOutOfRange(raw_amount))?;
    let quantity = Decimal::try_from_i128_with_scale(raw, u32::from(decimals))
        .map_err(|_| ValuationError::AmountOutOfRange(raw_amount))?;

    quantity.checked_mul(price).ok_or(ValuationError::Overflow)
}

pub fn native_value(native: NativeBalance, price: Decimal) -> Result<Decimal, ValuationError> {
    token_value(u128::from(native.lamports), NativeBalance::DECIMALS, price)
}

/// Value every holding against `prices` and sum the result.
///
/// Pure: no I/O. Unknown prices and unrepresentable balances contribute zero.
pub fn sum_holdings(
    holdings: &[ProgramHoldings],
    prices: &PriceBook,
    native_mint: &Pubkey,
) -> TvlBreakdown {
    let mut breakdown = TvlBreakdown {
        unpriced_assets: prices.unpriced(),
        ..Default::default()
    };

    for program in holdings {
        if program.skipped {
            breakdown.skipped_programs.push(program.program_id);
            continue;
        }

        breakdown
            .skipped_accounts
            .extend_from_slice(&program.skipped_accounts);
        let mut program_total = Decimal::ZERO;

        for account in &program.accounts {
            for balance in &account.tokens {
                let price = prices.get(&balance.mint).or_zero();
                match token_value(balance.raw_amount, balance.decimals, price) {
                    Ok(value) => {
                        debug!(
                            account = %account.account,
                            mint = %balance.mint,
                            amount = %balance.raw_amount,
                            decimals = balance.decimals,
                            price = %price,
                            value = %value,
                            "token balance"
                        );
                        program_total = accumulate(program_total, value);
                    }
                    Err(err) => {
                        warn!(
                            account = %account.account,
                            mint = %balance.mint,
                            amount = %balance.raw_amount,
                            error = %err,
                            "token balance not valued"
                        );
                    }
                }
            }

            let price = prices.get(native_mint).or_zero();
            match native_value(account.native, price) {
                Ok(value) => {
                    debug!(
                        account = %account.account,
                        lamports = account.native.lamports,
                        price = %price,
                        value = %value,
                        "native balance"
                    );
                    program_total = accumulate(program_total, value);
                }
                Err(err) => {
                    warn!(
                        account = %account.account,
                        error = %err,
                        "native balance not valued"
                    );
                }
            }
        }

        breakdown.total = accumulate(breakdown.total, program_total);
        breakdown.programs.push(ProgramValue {
            program_id: program.program_id,
            accounts: program.accounts.len(),
            value: program_total,
        });
    }

    breakdown
}

fn accumulate(total: Decimal, value: Decimal) -> Decimal {
    total.checked_add(value).unwrap_or_else(|| {
        warn!(total = %total, value = %value, "sum overflow, dropping contribution");
        total
    })
}
