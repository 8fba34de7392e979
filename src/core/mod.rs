mod engine;
mod solver;
mod types;

pub use engine::{
    PROJECTION_MONTHS, SUMMARY_WINDOWS, run_funded_projection, run_personal_projection,
    simulate_funded_months, simulate_personal_months, summarize_funded, summarize_personal,
};
pub use solver::{
    GoalMetric, GoalSeekConfig, GoalSeekIteration, GoalSeekResult, solve_goal,
};
pub use types::{
    FundedAccountInputs, FundedMonthRow, FundedProjection, FundedSummary, PersonalCapitalInputs,
    PersonalMonthRow, PersonalProjection, PersonalSummary,
};
