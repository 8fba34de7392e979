use super::types::{
    FundedAccountInputs, FundedMonthRow, FundedProjection, FundedSummary, PersonalCapitalInputs,
    PersonalMonthRow, PersonalProjection, PersonalSummary,
};

pub const PROJECTION_MONTHS: u32 = 12;
pub const SUMMARY_WINDOWS: [u32; 3] = [3, 6, 12];

pub fn run_personal_projection(inputs: &PersonalCapitalInputs) -> PersonalProjection {
    let monthly = simulate_personal_months(inputs);
    let summaries = SUMMARY_WINDOWS
        .iter()
        .map(|&window| summarize_personal(&monthly, inputs, window))
        .collect();

    PersonalProjection {
        inputs: inputs.clone(),
        monthly,
        summaries,
    }
}

pub fn run_funded_projection(inputs: &FundedAccountInputs) -> FundedProjection {
    let monthly = simulate_funded_months(inputs);
    let summaries = SUMMARY_WINDOWS
        .iter()
        .map(|&window| summarize_funded(&monthly, inputs, window))
        .collect();

    FundedProjection {
        inputs: inputs.clone(),
        monthly,
        summaries,
    }
}

pub fn simulate_personal_months(inputs: &PersonalCapitalInputs) -> Vec<PersonalMonthRow> {
    let mut rng = Rng::new(inputs.seed);
    let model = ReturnModel::from_personal(inputs);

    let mut capital = inputs.initial_capital;
    let mut cumulative_profit = 0.0;
    let mut rows = Vec::with_capacity(PROJECTION_MONTHS as usize);

    for month in 1..=PROJECTION_MONTHS {
        let starting_capital = capital;
        let adjusted_return = model.sample(&mut rng);

        let leveraged_capital = capital * inputs.leverage_multiplier;
        let monthly_profit = leveraged_capital * (adjusted_return / 100.0);

        let contribution = inputs.monthly_contribution;
        let withdrawal = capital * (inputs.withdrawal_rate / 100.0);
        let expenses = inputs.monthly_expenses;
        let reinvestment = reinvestment_amount(
            inputs.reinvest_profits,
            inputs.reinvestment_rate,
            monthly_profit,
            month,
        );

        let net_cashflow = monthly_profit + contribution - withdrawal - expenses - reinvestment;

        if inputs.compound_interest {
            // Profit compounds into principal, so the reinvested slice is
            // already part of next month's base.
            capital += monthly_profit + contribution - withdrawal - expenses;
        } else {
            capital += contribution - withdrawal - expenses + reinvestment;
        }

        cumulative_profit += net_cashflow;
        rows.push(PersonalMonthRow {
            month,
            starting_capital,
            adjusted_return,
            monthly_profit,
            contribution,
            withdrawal,
            expenses,
            reinvestment,
            net_cashflow,
            ending_capital: capital,
            cumulative_profit,
        });
    }

    rows
}

pub fn simulate_funded_months(inputs: &FundedAccountInputs) -> Vec<FundedMonthRow> {
    let mut rng = Rng::new(inputs.seed);
    let model = ReturnModel::from_funded(inputs);

    let mut accounts = inputs.account_sizes.clone();
    let mut cumulative_profit = 0.0;
    let mut rows = Vec::with_capacity(PROJECTION_MONTHS as usize);

    for month in 1..=PROJECTION_MONTHS {
        let account_sizes = accounts.clone();
        let total_account_size: f64 = accounts.iter().sum();
        let adjusted_return = model.sample(&mut rng);

        let gross_profit = total_account_size * (adjusted_return / 100.0);
        let net_profit = gross_profit * (inputs.profit_split / 100.0);

        let expenses = inputs.monthly_expenses;
        let reinvestment = reinvestment_amount(
            inputs.reinvest_profits,
            inputs.reinvestment_rate,
            net_profit,
            month,
        );

        let cashflow = net_profit - reinvestment - expenses;

        // Account balances only move through reinvested profit, split
        // pro-rata by current size.
        if reinvestment != 0.0 && total_account_size > 0.0 {
            for size in accounts.iter_mut() {
                *size += reinvestment * (*size / total_account_size);
            }
        }

        cumulative_profit += cashflow;
        rows.push(FundedMonthRow {
            month,
            account_sizes,
            total_account_size,
            adjusted_return,
            gross_profit,
            net_profit,
            reinvestment,
            expenses,
            cashflow,
            cumulative_profit,
        });
    }

    rows
}

pub fn summarize_personal(
    rows: &[PersonalMonthRow],
    inputs: &PersonalCapitalInputs,
    window_months: u32,
) -> PersonalSummary {
    let window = &rows[..rows.len().min(window_months as usize)];

    let total_profit: f64 = window.iter().map(|r| r.monthly_profit).sum();
    let total_contributions: f64 = window.iter().map(|r| r.contribution).sum();
    let total_withdrawals: f64 = window.iter().map(|r| r.withdrawal).sum();
    let total_expenses: f64 = window.iter().map(|r| r.expenses).sum();
    let total_reinvested: f64 = window.iter().map(|r| r.reinvestment).sum();
    let net_cashflow: f64 = window.iter().map(|r| r.net_cashflow).sum();

    let final_capital = window
        .last()
        .map(|r| r.ending_capital)
        .unwrap_or(inputs.initial_capital);
    let cumulative_profit = window.last().map(|r| r.cumulative_profit).unwrap_or(0.0);

    // Zero denominator flows through as NaN rather than an error.
    let roi = cumulative_profit / (inputs.initial_capital + total_contributions) * 100.0;

    PersonalSummary {
        window_months,
        total_profit,
        average_monthly_profit: total_profit / window.len() as f64,
        total_contributions,
        total_withdrawals,
        total_expenses,
        total_reinvested,
        net_cashflow,
        final_capital,
        roi,
    }
}

pub fn summarize_funded(
    rows: &[FundedMonthRow],
    inputs: &FundedAccountInputs,
    window_months: u32,
) -> FundedSummary {
    let window = &rows[..rows.len().min(window_months as usize)];

    let total_gross_profit: f64 = window.iter().map(|r| r.gross_profit).sum();
    let total_net_profit: f64 = window.iter().map(|r| r.net_profit).sum();
    let total_reinvested: f64 = window.iter().map(|r| r.reinvestment).sum();
    let total_expenses: f64 = window.iter().map(|r| r.expenses).sum();
    let net_cashflow: f64 = window.iter().map(|r| r.cashflow).sum();

    let final_account_sizes = match window.last() {
        Some(last) => {
            let mut sizes = last.account_sizes.clone();
            // Rows record start-of-month balances; roll the last row's
            // reinvestment forward to get end-of-window sizes.
            let total = last.total_account_size;
            if last.reinvestment != 0.0 && total > 0.0 {
                for size in sizes.iter_mut() {
                    *size += last.reinvestment * (*size / total);
                }
            }
            sizes
        }
        None => inputs.account_sizes.clone(),
    };
    let final_total_account_size: f64 = final_account_sizes.iter().sum();
    let cumulative_profit = window.last().map(|r| r.cumulative_profit).unwrap_or(0.0);

    let initial_total: f64 = inputs.account_sizes.iter().sum();
    let roi = cumulative_profit / initial_total * 100.0;

    FundedSummary {
        window_months,
        total_gross_profit,
        total_net_profit,
        average_monthly_profit: total_net_profit / window.len() as f64,
        total_reinvested,
        total_expenses,
        net_cashflow,
        final_account_sizes,
        final_total_account_size,
        roi,
    }
}

fn reinvestment_amount(enabled: bool, rate: f64, profit: f64, month: u32) -> f64 {
    if !enabled || month >= PROJECTION_MONTHS {
        return 0.0;
    }
    profit * (rate / 100.0)
}

#[derive(Debug, Clone, Copy)]
struct ReturnModel {
    avg_monthly_return: f64,
    max_drawdown: f64,
    consistency: f64,
    risk_adjustment: bool,
}

impl ReturnModel {
    fn from_personal(inputs: &PersonalCapitalInputs) -> Self {
        Self {
            avg_monthly_return: inputs.avg_monthly_return,
            max_drawdown: inputs.max_drawdown,
            consistency: inputs.consistency,
            risk_adjustment: inputs.risk_adjustment,
        }
    }

    fn from_funded(inputs: &FundedAccountInputs) -> Self {
        Self {
            avg_monthly_return: inputs.avg_monthly_return,
            max_drawdown: inputs.max_drawdown,
            consistency: inputs.consistency,
            risk_adjustment: inputs.risk_adjustment,
        }
    }

    /// Effective return for one month, in percent. Draw order is fixed
    /// (noise, drawdown trigger, severity) so a seed pins the whole ledger.
    fn sample(&self, rng: &mut Rng) -> f64 {
        if !self.risk_adjustment {
            return self.avg_monthly_return;
        }

        let variance_scale = 1.0 - self.consistency / 100.0;
        let noise = variance_scale * rng.next_signed_unit() * self.avg_monthly_return * 0.5;
        let adjusted = self.avg_monthly_return + noise;

        let drawdown_risk = self.max_drawdown / 100.0;
        if rng.next_f64() < drawdown_risk * 0.1 {
            return -self.max_drawdown * rng.next_in_range(0.5, 1.0);
        }

        adjusted
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        let mixed = splitmix64(seed);
        let state = if mixed == 0 { 0xA5A5_A5A5_A5A5_A5A5 } else { mixed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    fn next_f64(&mut self) -> f64 {
        const DENOM: f64 = (1_u64 << 53) as f64;
        let v = self.next_u64() >> 11;
        ((v as f64) + 0.5) / DENOM
    }

    fn next_signed_unit(&mut self) -> f64 {
        2.0 * self.next_f64() - 1.0
    }

    fn next_in_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}
