//! Fixed-point money helpers.

pub use rust_decimal::Decimal;

/// Number of fractional digits stored for every amount (`DECIMAL(10,2)`).
pub const MONEY_SCALE: u32 = 2;

/// Largest amount a `DECIMAL(10,2)` column holds.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// True when `amount` is in `0..=MAX_AMOUNT` and needs no more than [`MONEY_SCALE`]
/// fractional digits.
pub fn is_valid_amount(amount: Decimal) -> bool {
    !amount.is_sign_negative()
        && amount <= MAX_AMOUNT
        && amount.normalize().scale() <= MONEY_SCALE
}

/// Normalize an amount read back from the store to [`MONEY_SCALE`] places.
pub fn to_money(amount: Decimal) -> Decimal {
    amount.round_dp(MONEY_SCALE)
}

/// `unit_price × quantity`, or `None` past [`MAX_AMOUNT`].
pub fn line_total(unit_price: Decimal, quantity: i32) -> Option<Decimal> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .filter(|total| *total <= MAX_AMOUNT)
}

/// Sum of `unit_price × quantity` over all lines, or `None` once any line or the running
/// sum passes [`MAX_AMOUNT`].
pub fn order_total<I>(lines: I) -> Option<Decimal>
where
    I: IntoIterator<Item = (Decimal, i32)>,
{
    lines.into_iter().try_fold(Decimal::ZERO, |sum, (price, qty)| {
        sum.checked_add(line_total(price, qty)?)
            .filter(|total| *total <= MAX_AMOUNT)
    })
}
