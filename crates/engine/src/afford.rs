//! Loan affordability math
//!
//! Standard amortized monthly payment. `powi` keeps the computation stable
//! for terms up to 600 months and monthly rates as small as 0.0025/12;
//! iterative compounding would accumulate error over that range.

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fixed monthly payment fully repaying `principal` over `term_months`
///
/// Zero or negative rates fall back to flat division. Non-positive
/// principal or a zero term yields 0.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_months: u32) -> f64 {
    if term_months == 0 || principal <= 0.0 {
        return 0.0;
    }

    let n = term_months as i32;
    let r = annual_rate_percent / 100.0 / 12.0;

    if r <= 0.0 {
        return round_cents(principal / n as f64);
    }

    let compounded = (1.0 + r).powi(n);
    let multiplier = (r * compounded) / (compounded - 1.0);
    round_cents(principal * multiplier)
}

/// Total paid over the loan: monthly payments plus the down payment
pub fn total_payment(monthly: f64, term_months: u32, down_payment: f64) -> f64 {
    round_cents(monthly * term_months as f64 + down_payment)
}
