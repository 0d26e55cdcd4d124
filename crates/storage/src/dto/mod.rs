pub mod assignment;
pub mod completion;
pub mod criteria;
pub mod evaluation;
pub mod leaderboard;
pub mod submission;

pub(crate) fn decimal_to_f64(decimal: rust_decimal::Decimal) -> f64 {
    decimal.to_string().parse().unwrap_or(0.0)
}
