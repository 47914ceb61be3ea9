use anyhow::Result;
use clap::Args;
use common::format::{format_percent, format_twd};
use compute::loan::{amortization_schedule, compute_loan, LoanInput};
use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::cli::{parse_decimal, parse_rate};
use crate::config::Settings;

#[derive(Args, Debug, Clone)]
pub struct LoanArgs {
    /// Purchase price
    #[arg(long, value_parser = parse_decimal)]
    pub loan_amount: Decimal,

    #[arg(long, value_parser = parse_decimal)]
    pub down_payment: Decimal,

    /// Term in years
    #[arg(long, default_value_t = 30)]
    pub years: i32,

    /// Annual interest rate in percent
    #[arg(long, value_parser = parse_rate)]
    pub rate: Decimal,

    /// Gross monthly income; defaults to the configured value
    #[arg(long, value_parser = parse_decimal)]
    pub monthly_income: Option<Decimal>,

    /// Also print the month-by-month amortization table
    #[arg(long)]
    pub schedule: bool,
}

pub fn loan(args: LoanArgs) -> Result<()> {
    trace!("Entering loan function");
    let monthly_income = match args.monthly_income {
        Some(income) => income,
        None => Settings::load()?.default_monthly_income,
    };
    let input = LoanInput {
        loan_amount: args.loan_amount,
        down_payment: args.down_payment,
        loan_term_years: args.years,
        annual_interest_rate: args.rate,
    };
    debug!("Assessing {:?} against monthly income {}", input, monthly_income);

    let result = compute_loan(&input, monthly_income)?;
    println!("Principal:          {}", format_twd(result.principal));
    println!("Payments:           {}", result.number_of_payments);
    println!("Monthly payment:    {}", format_twd(result.monthly_payment));
    println!("  first principal:  {}", format_twd(result.principal_payment));
    println!("  first interest:   {}", format_twd(result.interest_payment));
    println!("Total paid:         {}", format_twd(result.total_payment));
    println!("Total interest:     {}", format_twd(result.total_interest));
    println!("Mortgage ratio:     {}", format_percent(result.mortgage_ratio));
    println!(
        "Affordable:         {}",
        if result.is_affordable { "yes" } else { "no" }
    );

    if args.schedule {
        println!();
        println!("{:>6} {:>14} {:>14} {:>14} {:>16}", "Period", "Payment", "Principal", "Interest", "Balance");
        for entry in amortization_schedule(&input)? {
            println!(
                "{:>6} {:>14} {:>14} {:>14} {:>16}",
                entry.period,
                format_twd(entry.payment),
                format_twd(entry.principal),
                format_twd(entry.interest),
                format_twd(entry.remaining_balance)
            );
        }
    }
    Ok(())
}
