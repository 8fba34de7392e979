use serde::Serialize;

use super::engine::simulate_personal_months;
use super::types::PersonalCapitalInputs;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalMetric {
    RequiredContribution,
    RequiredReturn,
}

#[derive(Debug, Clone, Copy)]
pub struct GoalSeekConfig {
    pub metric: GoalMetric,
    pub target_capital: f64,
    pub search_min: f64,
    pub search_max: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSeekIteration {
    pub iteration: u32,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub candidate_value: f64,
    pub final_capital: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSeekResult {
    pub metric: GoalMetric,
    pub target_capital: f64,
    pub search_min: f64,
    pub search_max: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
    pub solved_value: Option<f64>,
    pub achieved_final_capital: Option<f64>,
    pub iterations: Vec<GoalSeekIteration>,
    pub converged: bool,
    pub feasible: bool,
    pub message: String,
}

/// Bisect for the smallest metric value whose 12-month projection reaches the
/// target capital. The search runs with risk adjustment forced off so the
/// objective is deterministic and monotone in the searched knob.
pub fn solve_goal(
    inputs: &PersonalCapitalInputs,
    config: GoalSeekConfig,
) -> Result<GoalSeekResult, String> {
    validate_config(config)?;

    let mut iterations = Vec::with_capacity(config.max_iterations as usize);
    let low_capital = evaluate_candidate(inputs, config.metric, config.search_min);
    let high_capital = evaluate_candidate(inputs, config.metric, config.search_max);

    let mut solved_value = None;
    let mut converged = false;
    let feasible;
    let message;

    if low_capital + 1e-9 >= config.target_capital {
        solved_value = Some(config.search_min);
        converged = true;
        feasible = true;
        message = "Already meets the target at the lower search bound.".to_string();
    } else if high_capital + 1e-9 < config.target_capital {
        feasible = false;
        message = "No feasible value found within the search bounds.".to_string();
    } else {
        let mut lo = config.search_min;
        let mut hi = config.search_max;
        let mut it = 0;
        while it < config.max_iterations {
            it += 1;
            let mid = (lo + hi) * 0.5;
            let final_capital = evaluate_candidate(inputs, config.metric, mid);
            iterations.push(GoalSeekIteration {
                iteration: it,
                lower_bound: lo,
                upper_bound: hi,
                candidate_value: mid,
                final_capital,
            });

            if final_capital + 1e-9 >= config.target_capital {
                hi = mid;
            } else {
                lo = mid;
            }

            if (hi - lo).abs() <= config.tolerance {
                converged = true;
                solved_value = Some(hi);
                break;
            }
        }
        if solved_value.is_none() {
            solved_value = Some(hi);
        }
        feasible = true;
        message = if converged {
            "Solved the goal target.".to_string()
        } else {
            "Reached max iterations before tolerance was met; returning best estimate.".to_string()
        };
    }

    let achieved_final_capital =
        solved_value.map(|value| evaluate_candidate(inputs, config.metric, value));

    Ok(GoalSeekResult {
        metric: config.metric,
        target_capital: config.target_capital,
        search_min: config.search_min,
        search_max: config.search_max,
        tolerance: config.tolerance,
        max_iterations: config.max_iterations,
        solved_value,
        achieved_final_capital,
        iterations,
        converged,
        feasible,
        message,
    })
}

fn evaluate_candidate(base_inputs: &PersonalCapitalInputs, metric: GoalMetric, value: f64) -> f64 {
    let mut inputs = base_inputs.clone();
    inputs.risk_adjustment = false;

    match metric {
        GoalMetric::RequiredContribution => inputs.monthly_contribution = value.max(0.0),
        GoalMetric::RequiredReturn => inputs.avg_monthly_return = value,
    }

    let rows = simulate_personal_months(&inputs);
    rows.last().map(|r| r.ending_capital).unwrap_or(0.0)
}

fn validate_config(config: GoalSeekConfig) -> Result<(), String> {
    if !config.target_capital.is_finite() || config.target_capital <= 0.0 {
        return Err("target_capital must be > 0".to_string());
    }
    if !config.search_min.is_finite() || !config.search_max.is_finite() {
        return Err("search bounds must be finite".to_string());
    }
    if config.search_max <= config.search_min {
        return Err("search_max must be greater than search_min".to_string());
    }
    if !config.tolerance.is_finite() || config.tolerance <= 0.0 {
        return Err("tolerance must be > 0".to_string());
    }
    if config.max_iterations == 0 {
        return Err("max_iterations must be > 0".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn flat_inputs() -> PersonalCapitalInputs {
        PersonalCapitalInputs {
            initial_capital: 10_000.0,
            monthly_contribution: 0.0,
            avg_monthly_return: 0.0,
            max_drawdown: 0.0,
            consistency: 100.0,
            risk_adjustment: false,
            leverage_multiplier: 1.0,
            withdrawal_rate: 0.0,
            monthly_expenses: 0.0,
            reinvest_profits: false,
            reinvestment_rate: 0.0,
            compound_interest: true,
            seed: 7,
        }
    }

    #[test]
    fn required_contribution_recovers_analytic_solution() {
        // Zero return: final = initial + 12 * contribution, so a 22k target
        // needs exactly 1000/month.
        let inputs = flat_inputs();
        let config = GoalSeekConfig {
            metric: GoalMetric::RequiredContribution,
            target_capital: 22_000.0,
            search_min: 0.0,
            search_max: 5_000.0,
            tolerance: 0.01,
            max_iterations: 40,
        };

        let result = solve_goal(&inputs, config).expect("must solve");
        assert!(result.feasible);
        assert!(result.converged);
        assert_close(result.solved_value.expect("value expected"), 1_000.0, 0.05);
        assert!(result.achieved_final_capital.expect("capital expected") >= 22_000.0 - 1e-6);
    }

    #[test]
    fn required_return_finds_compounding_rate() {
        let inputs = flat_inputs();
        let config = GoalSeekConfig {
            metric: GoalMetric::RequiredReturn,
            target_capital: 20_000.0,
            search_min: 0.0,
            search_max: 20.0,
            tolerance: 1e-4,
            max_iterations: 60,
        };

        let result = solve_goal(&inputs, config).expect("must solve");
        assert!(result.feasible);
        // doubling over 12 months needs about 5.946% per month
        assert_close(result.solved_value.expect("value expected"), 5.946, 0.01);
    }

    #[test]
    fn reports_infeasible_when_bounds_cannot_reach_target() {
        let inputs = flat_inputs();
        let config = GoalSeekConfig {
            metric: GoalMetric::RequiredContribution,
            target_capital: 1_000_000.0,
            search_min: 0.0,
            search_max: 100.0,
            tolerance: 0.01,
            max_iterations: 20,
        };

        let result = solve_goal(&inputs, config).expect("must return result");
        assert!(!result.feasible);
        assert!(result.solved_value.is_none());
        assert!(result.message.contains("No feasible"));
    }

    #[test]
    fn lower_bound_short_circuits_when_target_already_met() {
        let mut inputs = flat_inputs();
        inputs.avg_monthly_return = 10.0;

        let config = GoalSeekConfig {
            metric: GoalMetric::RequiredContribution,
            target_capital: 12_000.0,
            search_min: 0.0,
            search_max: 5_000.0,
            tolerance: 0.01,
            max_iterations: 20,
        };

        let result = solve_goal(&inputs, config).expect("must solve");
        assert!(result.converged);
        assert_close(result.solved_value.expect("value expected"), 0.0, 1e-12);
        assert!(result.iterations.is_empty());
    }

    #[test]
    fn rejects_invalid_search_bounds() {
        let inputs = flat_inputs();
        let config = GoalSeekConfig {
            metric: GoalMetric::RequiredReturn,
            target_capital: 20_000.0,
            search_min: 5.0,
            search_max: 5.0,
            tolerance: 0.01,
            max_iterations: 20,
        };

        let err = solve_goal(&inputs, config).expect_err("must reject equal bounds");
        assert!(err.contains("search_max"));
    }

    #[test]
    fn solver_ignores_risk_adjustment_on_the_inputs() {
        let mut inputs = flat_inputs();
        inputs.risk_adjustment = true;
        inputs.max_drawdown = 50.0;
        inputs.consistency = 1.0;

        let config = GoalSeekConfig {
            metric: GoalMetric::RequiredContribution,
            target_capital: 22_000.0,
            search_min: 0.0,
            search_max: 5_000.0,
            tolerance: 0.01,
            max_iterations: 40,
        };

        let first = solve_goal(&inputs, config).expect("must solve");
        let second = solve_goal(&inputs, config).expect("must solve");
        assert_eq!(first.solved_value, second.solved_value);
        assert_close(first.solved_value.expect("value expected"), 1_000.0, 0.05);
    }
}
