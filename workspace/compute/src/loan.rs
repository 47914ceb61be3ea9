//! Loan affordability.
//!
//! Level monthly payments follow the annuity formula
//! `P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r` the monthly rate and `n`
//! the number of monthly payments. A zero rate degenerates to `P / n`.
//! The payment is then compared with the borrower's monthly income: a
//! mortgage ratio of at most 30 % (and a debt ratio of at most 40 %) is
//! considered affordable.

use rust_decimal::{Decimal, MathematicalOps};
use tracing::{debug, info, instrument, warn};

use crate::error::{ComputeError, Result};

/// Highest affordable share of income spent on the mortgage, in percent.
pub const MORTGAGE_RATIO_LIMIT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);
/// Highest affordable share of income spent on all debt, in percent.
pub const DEBT_RATIO_LIMIT: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq)]
pub struct LoanInput {
    pub loan_amount: Decimal,
    pub down_payment: Decimal,
    pub loan_term_years: i32,
    /// Annual interest rate in percent, e.g. `2.1` for 2.1 %.
    pub annual_interest_rate: Decimal,
}

impl Default for LoanInput {
    /// The dashboard demo scenario: an 8,000,000 home with 2,000,000 down,
    /// 30 years at 2.1 %.
    fn default() -> Self {
        Self {
            loan_amount: Decimal::from(8_000_000),
            down_payment: Decimal::from(2_000_000),
            loan_term_years: 30,
            annual_interest_rate: Decimal::new(21, 1),
        }
    }
}

/// Outcome of an affordability check. Values keep full precision; rounding
/// is a display concern.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanResult {
    pub principal: Decimal,
    pub number_of_payments: u32,
    pub monthly_payment: Decimal,
    /// Principal share of the first payment.
    pub principal_payment: Decimal,
    /// Interest share of the first payment.
    pub interest_payment: Decimal,
    pub total_payment: Decimal,
    pub total_interest: Decimal,
    /// Percent of monthly income. Other debts are not tracked, so this is
    /// the mortgage ratio.
    pub debt_ratio: Decimal,
    pub mortgage_ratio: Decimal,
    pub is_affordable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub period: u32,
    pub payment: Decimal,
    pub principal: Decimal,
    pub interest: Decimal,
    pub remaining_balance: Decimal,
}

/// Validated loan parameters.
#[derive(Debug)]
struct Terms {
    principal: Decimal,
    monthly_rate: Decimal,
    payments: u32,
}

impl Terms {
    fn from_input(input: &LoanInput) -> Result<Self> {
        if input.loan_amount.is_sign_negative() {
            return Err(ComputeError::invalid_input("loan_amount", "must not be negative"));
        }
        if input.down_payment.is_sign_negative() {
            return Err(ComputeError::invalid_input("down_payment", "must not be negative"));
        }
        if input.annual_interest_rate.is_sign_negative() {
            return Err(ComputeError::invalid_input(
                "annual_interest_rate",
                "must not be negative",
            ));
        }
        if input.loan_term_years < 0 {
            return Err(ComputeError::invalid_input("loan_term_years", "must not be negative"));
        }

        let principal = input.loan_amount - input.down_payment;
        if principal.is_sign_negative() {
            return Err(ComputeError::invalid_input(
                "down_payment",
                "exceeds the loan amount",
            ));
        }

        if input.loan_term_years == 0 {
            return Err(ComputeError::DivisionByZero(
                "a loan term of zero years has no payments".to_string(),
            ));
        }
        let payments = u32::try_from(input.loan_term_years)
            .ok()
            .and_then(|years| years.checked_mul(12))
            .ok_or_else(|| ComputeError::invalid_input("loan_term_years", "is too long"))?;

        let monthly_rate = input.annual_interest_rate / HUNDRED / MONTHS_PER_YEAR;

        Ok(Self {
            principal,
            monthly_rate,
            payments,
        })
    }

    fn monthly_payment(&self) -> Result<Decimal> {
        let n = Decimal::from(self.payments);
        if self.monthly_rate.is_zero() {
            return Ok(self.principal / n);
        }

        let overflow =
            || ComputeError::invalid_input("annual_interest_rate", "annuity factor overflows");
        let factor = (Decimal::ONE + self.monthly_rate)
            .checked_powu(u64::from(self.payments))
            .ok_or_else(overflow)?;
        let numerator = self
            .principal
            .checked_mul(self.monthly_rate)
            .and_then(|v| v.checked_mul(factor))
            .ok_or_else(overflow)?;
        numerator
            .checked_div(factor - Decimal::ONE)
            .ok_or_else(|| ComputeError::DivisionByZero("annuity factor is one".to_string()))
    }
}

/// Computes the monthly payment and affordability of a loan for a borrower
/// earning `monthly_income`.
#[instrument(skip(input), fields(loan_amount = %input.loan_amount, term = input.loan_term_years, rate = %input.annual_interest_rate))]
pub fn compute_loan(input: &LoanInput, monthly_income: Decimal) -> Result<LoanResult> {
    let terms = Terms::from_input(input)?;
    if monthly_income <= Decimal::ZERO {
        warn!(%monthly_income, "Monthly income must be positive");
        return Err(ComputeError::invalid_input("monthly_income", "must be positive"));
    }
    debug!(?terms, "Loan terms validated");

    let monthly_payment = terms.monthly_payment()?;
    let interest_payment = terms.principal * terms.monthly_rate;
    let principal_payment = monthly_payment - interest_payment;

    let mortgage_ratio = monthly_payment
        .checked_div(monthly_income)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .ok_or_else(|| {
            warn!(%monthly_income, "Mortgage ratio overflows");
            ComputeError::invalid_input("monthly_income", "is too small for the payment")
        })?;
    let debt_ratio = mortgage_ratio;
    let is_affordable = mortgage_ratio <= MORTGAGE_RATIO_LIMIT && debt_ratio <= DEBT_RATIO_LIMIT;

    let total_payment = monthly_payment
        .checked_mul(Decimal::from(terms.payments))
        .ok_or_else(|| ComputeError::invalid_input("loan_amount", "total repayment overflows"))?;
    let total_interest = total_payment - terms.principal;

    info!(
        monthly_payment = %monthly_payment.round_dp(2),
        mortgage_ratio = %mortgage_ratio.round_dp(2),
        is_affordable,
        "Loan assessed"
    );

    Ok(LoanResult {
        principal: terms.principal,
        number_of_payments: terms.payments,
        monthly_payment,
        principal_payment,
        interest_payment,
        total_payment,
        total_interest,
        debt_ratio,
        mortgage_ratio,
        is_affordable,
    })
}

/// Builds the month-by-month repayment schedule.
///
/// The final period repays whatever balance is left, so the schedule always
/// closes at exactly zero.
#[instrument(skip(input), fields(loan_amount = %input.loan_amount, term = input.loan_term_years))]
pub fn amortization_schedule(input: &LoanInput) -> Result<Vec<ScheduleEntry>> {
    let terms = Terms::from_input(input)?;
    let payment = terms.monthly_payment()?;

    let mut balance = terms.principal;
    let mut schedule = Vec::with_capacity(terms.payments as usize);
    for period in 1..=terms.payments {
        let interest = balance * terms.monthly_rate;
        let (payment, principal) = if period == terms.payments {
            (balance + interest, balance)
        } else {
            (payment, payment - interest)
        };
        balance -= principal;
        schedule.push(ScheduleEntry {
            period,
            payment,
            principal,
            interest,
            remaining_balance: balance,
        });
    }

    debug!(periods = schedule.len(), "Amortization schedule built");
    Ok(schedule)
}
