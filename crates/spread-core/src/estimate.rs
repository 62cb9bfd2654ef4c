use spread_domain::{BudgetPeriod, MONTHS_PER_YEAR};

/// Whether an estimate is expressed per month or per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateBasis {
    Monthly,
    Yearly,
}

/// Projects an amount declared at `period` onto a month or a year. No rounding.
pub fn estimate(basis: EstimateBasis, period: BudgetPeriod, amount: f64) -> f64 {
    let yearly = amount * f64::from(period.occurrences_per_year());
    match basis {
        EstimateBasis::Yearly => yearly,
        EstimateBasis::Monthly => yearly / MONTHS_PER_YEAR as f64,
    }
}

pub fn monthly_estimate(period: BudgetPeriod, amount: f64) -> f64 {
    estimate(EstimateBasis::Monthly, period, amount)
}

pub fn yearly_estimate(period: BudgetPeriod, amount: f64) -> f64 {
    estimate(EstimateBasis::Yearly, period, amount)
}
