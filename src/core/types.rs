use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalCapitalInputs {
    pub initial_capital: f64,
    pub monthly_contribution: f64,
    pub avg_monthly_return: f64,
    pub max_drawdown: f64,
    pub consistency: f64,
    pub risk_adjustment: bool,
    pub leverage_multiplier: f64,
    pub withdrawal_rate: f64,
    pub monthly_expenses: f64,
    pub reinvest_profits: bool,
    pub reinvestment_rate: f64,
    pub compound_interest: bool,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundedAccountInputs {
    pub account_sizes: Vec<f64>,
    pub profit_split: f64,
    pub avg_monthly_return: f64,
    pub max_drawdown: f64,
    pub consistency: f64,
    pub risk_adjustment: bool,
    pub monthly_expenses: f64,
    pub reinvest_profits: bool,
    pub reinvestment_rate: f64,
    pub seed: u64,
}

/// One simulated month. Capital figures are start-of-month; `ending_capital`
/// is what the following month opens with.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalMonthRow {
    pub month: u32,
    pub starting_capital: f64,
    pub adjusted_return: f64,
    pub monthly_profit: f64,
    pub contribution: f64,
    pub withdrawal: f64,
    pub expenses: f64,
    pub reinvestment: f64,
    pub net_cashflow: f64,
    pub ending_capital: f64,
    pub cumulative_profit: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundedMonthRow {
    pub month: u32,
    pub account_sizes: Vec<f64>,
    pub total_account_size: f64,
    pub adjusted_return: f64,
    pub gross_profit: f64,
    pub net_profit: f64,
    pub reinvestment: f64,
    pub expenses: f64,
    pub cashflow: f64,
    pub cumulative_profit: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalSummary {
    pub window_months: u32,
    pub total_profit: f64,
    pub average_monthly_profit: f64,
    pub total_contributions: f64,
    pub total_withdrawals: f64,
    pub total_expenses: f64,
    pub total_reinvested: f64,
    pub net_cashflow: f64,
    pub final_capital: f64,
    pub roi: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundedSummary {
    pub window_months: u32,
    pub total_gross_profit: f64,
    pub total_net_profit: f64,
    pub average_monthly_profit: f64,
    pub total_reinvested: f64,
    pub total_expenses: f64,
    pub net_cashflow: f64,
    pub final_account_sizes: Vec<f64>,
    pub final_total_account_size: f64,
    pub roi: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalProjection {
    pub inputs: PersonalCapitalInputs,
    pub monthly: Vec<PersonalMonthRow>,
    pub summaries: Vec<PersonalSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundedProjection {
    pub inputs: FundedAccountInputs,
    pub monthly: Vec<FundedMonthRow>,
    pub summaries: Vec<FundedSummary>,
}
