use crate::error::{GradingError, Result};
use crate::test_case::TestCase;
use log::debug;

/// Tolerance for comparing a sum of resolved weights with the budget it was split from.
pub const POINTS_EPSILON: f64 = 1e-9;

fn validate_points(test_case: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(GradingError::InvalidPointType {
            test_case: test_case.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Divides `numerator` by `count`, refusing a zero divisor.
pub(crate) fn guarded_share(numerator: f64, count: usize, what: &'static str) -> Result<f64> {
    if count == 0 {
        return Err(GradingError::DivisionGuard(what));
    }
    Ok(numerator / count as f64)
}

/// Resolves the weight of every test case.
///
/// Cases with explicit points keep them. The remaining cases share what is left of
/// `total_points` equally. Without a budget, cases with no points get `1 / len` when no
/// case specifies points at all, and `0` otherwise.
///
/// The returned cases keep the input order and every other field.
///
/// # Errors
/// - [`GradingError::InvalidPointType`] if some explicit value is negative or not finite.
/// - [`GradingError::InvalidTotalPoints`] if the budget is negative or not finite.
/// - [`GradingError::BudgetExceeded`] if the explicit points add up to more than the
///   budget.
pub fn resolve_points<B>(
    total_points: Option<f64>,
    test_cases: Vec<TestCase<B>>,
) -> Result<Vec<TestCase<B>>> {
    let mut pre_specified = 0.0;
    let mut implicit = 0;
    for tc in &test_cases {
        match tc.points() {
            Some(p) => pre_specified += validate_points(tc.name(), p)?,
            None => implicit += 1,
        }
    }
    debug!(
        "Resolving points: {} explicit ({pre_specified}), {implicit} implicit, total {total_points:?}",
        test_cases.len() - implicit
    );

    let per_remaining = match total_points {
        Some(total) => {
            if !total.is_finite() || total < 0.0 {
                return Err(GradingError::InvalidTotalPoints(total));
            }
            if pre_specified > total {
                return Err(GradingError::BudgetExceeded {
                    pre_specified,
                    total_points: total,
                });
            }
            if implicit == 0 {
                0.0
            } else {
                guarded_share(total - pre_specified, implicit, "remaining points")?
            }
        }
        None if pre_specified == 0.0 && implicit > 0 => {
            guarded_share(1.0, test_cases.len(), "uniform weights")?
        }
        None => 0.0,
    };

    Ok(test_cases
        .into_iter()
        .map(|tc| match tc.points() {
            Some(_) => tc,
            None => tc.with_points(per_remaining),
        })
        .collect())
}
