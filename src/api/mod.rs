use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::net::TcpListener;

use crate::core::{
    FundedAccountInputs, GoalMetric, GoalSeekConfig, PersonalCapitalInputs, run_funded_projection,
    run_personal_projection, solve_goal,
};
use crate::journal::{JournalEntry, analyze};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliVariant {
    Personal,
    Funded,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiGoalMetric {
    #[serde(alias = "requiredContribution", alias = "required_contribution", alias = "contribution")]
    RequiredContribution,
    #[serde(alias = "requiredReturn", alias = "required_return", alias = "return")]
    RequiredReturn,
}

impl From<ApiGoalMetric> for GoalMetric {
    fn from(value: ApiGoalMetric) -> Self {
        match value {
            ApiGoalMetric::RequiredContribution => GoalMetric::RequiredContribution,
            ApiGoalMetric::RequiredReturn => GoalMetric::RequiredReturn,
        }
    }
}

/// Canonical parameter set shared by the CLI and the API defaults. Percent
/// fields stay in percent units all the way into the engine.
#[derive(Parser, Debug)]
#[command(
    name = "tradeplan",
    about = "Trading journal projection engine: 12-month personal-capital and funded-account forecasts"
)]
struct ProjectArgs {
    #[arg(long, value_enum, default_value_t = CliVariant::Personal)]
    variant: CliVariant,
    #[arg(long, default_value_t = 10_000.0)]
    initial_capital: f64,
    #[arg(long, default_value_t = 500.0)]
    monthly_contribution: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        allow_negative_numbers = true,
        help = "Expected monthly return in percent, e.g. 5; negative models a losing month"
    )]
    avg_monthly_return: f64,
    #[arg(
        long,
        default_value_t = 10.0,
        help = "Worst-case monthly drawdown in percent; feeds the risk model, never enforced as a floor"
    )]
    max_drawdown: f64,
    #[arg(
        long,
        default_value_t = 80.0,
        help = "Consistency score 1-100; higher means less return variance"
    )]
    consistency: f64,
    #[arg(
        long,
        default_value_t = false,
        action = clap::ArgAction::Set,
        help = "Apply random variance and simulated drawdowns to the nominal return"
    )]
    risk_adjustment: bool,
    #[arg(long, default_value_t = 1.0, help = "Capital base multiplier, 1 means unleveraged")]
    leverage_multiplier: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Percent of start-of-month capital withdrawn each month"
    )]
    withdrawal_rate: f64,
    #[arg(long, default_value_t = 0.0)]
    monthly_expenses: f64,
    #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
    reinvest_profits: bool,
    #[arg(
        long,
        default_value_t = 50.0,
        help = "Percent of profit reinvested when --reinvest-profits is set"
    )]
    reinvestment_rate: f64,
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    compound_interest: bool,
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [100_000.0],
        help = "Funded account sizes, comma separated"
    )]
    account_sizes: Vec<f64>,
    #[arg(long, default_value_t = 80.0, help = "Trader share of gross profit in percent")]
    profit_split: f64,
    #[arg(long, help = "PRNG seed; omitted means an entropy-derived seed")]
    seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PersonalPayload {
    initial_capital: Option<f64>,
    monthly_contribution: Option<f64>,
    avg_monthly_return: Option<f64>,
    max_drawdown: Option<f64>,
    consistency: Option<f64>,
    risk_adjustment: Option<bool>,
    leverage_multiplier: Option<f64>,
    withdrawal_rate: Option<f64>,
    monthly_expenses: Option<f64>,
    reinvest_profits: Option<bool>,
    reinvestment_rate: Option<f64>,
    compound_interest: Option<bool>,
    seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FundedPayload {
    account_sizes: Option<Vec<f64>>,
    profit_split: Option<f64>,
    avg_monthly_return: Option<f64>,
    max_drawdown: Option<f64>,
    consistency: Option<f64>,
    risk_adjustment: Option<bool>,
    monthly_expenses: Option<f64>,
    reinvest_profits: Option<bool>,
    reinvestment_rate: Option<f64>,
    seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GoalSeekPayload {
    metric: Option<ApiGoalMetric>,
    target_capital: Option<f64>,
    search_min: Option<f64>,
    search_max: Option<f64>,
    tolerance: Option<f64>,
    max_iterations: Option<u32>,

    initial_capital: Option<f64>,
    monthly_contribution: Option<f64>,
    avg_monthly_return: Option<f64>,
    leverage_multiplier: Option<f64>,
    withdrawal_rate: Option<f64>,
    monthly_expenses: Option<f64>,
    reinvest_profits: Option<bool>,
    reinvestment_rate: Option<f64>,
    compound_interest: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct JournalPayload {
    entries: Vec<JournalEntry>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_personal_inputs(args: &ProjectArgs) -> Result<PersonalCapitalInputs, String> {
    if !args.initial_capital.is_finite() || args.initial_capital <= 0.0 {
        return Err("--initial-capital must be > 0".to_string());
    }

    if !args.monthly_contribution.is_finite() || args.monthly_contribution < 0.0 {
        return Err("--monthly-contribution must be >= 0".to_string());
    }

    if !(-100.0..=100.0).contains(&args.avg_monthly_return) {
        return Err("--avg-monthly-return must be between -100 and 100".to_string());
    }

    if !(1.0..=100.0).contains(&args.leverage_multiplier) {
        return Err("--leverage-multiplier must be between 1 and 100".to_string());
    }

    if !(0.0..=100.0).contains(&args.withdrawal_rate) {
        return Err("--withdrawal-rate must be between 0 and 100".to_string());
    }

    if !args.monthly_expenses.is_finite() || args.monthly_expenses < 0.0 {
        return Err("--monthly-expenses must be >= 0".to_string());
    }

    validate_risk_fields(args)?;

    Ok(PersonalCapitalInputs {
        initial_capital: args.initial_capital,
        monthly_contribution: args.monthly_contribution,
        avg_monthly_return: args.avg_monthly_return,
        max_drawdown: args.max_drawdown,
        consistency: args.consistency,
        risk_adjustment: args.risk_adjustment,
        leverage_multiplier: args.leverage_multiplier,
        withdrawal_rate: args.withdrawal_rate,
        monthly_expenses: args.monthly_expenses,
        reinvest_profits: args.reinvest_profits,
        reinvestment_rate: args.reinvestment_rate,
        compound_interest: args.compound_interest,
        seed: args.seed.unwrap_or_else(entropy_seed),
    })
}

fn build_funded_inputs(args: &ProjectArgs) -> Result<FundedAccountInputs, String> {
    if args.account_sizes.is_empty() {
        return Err("--account-sizes must name at least one account".to_string());
    }

    for size in &args.account_sizes {
        if !size.is_finite() || *size <= 0.0 {
            return Err("--account-sizes entries must each be > 0".to_string());
        }
    }

    if !(args.profit_split > 0.0 && args.profit_split <= 100.0) {
        return Err("--profit-split must be > 0 and <= 100".to_string());
    }

    if !(-100.0..=100.0).contains(&args.avg_monthly_return) {
        return Err("--avg-monthly-return must be between -100 and 100".to_string());
    }

    if !args.monthly_expenses.is_finite() || args.monthly_expenses < 0.0 {
        return Err("--monthly-expenses must be >= 0".to_string());
    }

    validate_risk_fields(args)?;

    Ok(FundedAccountInputs {
        account_sizes: args.account_sizes.clone(),
        profit_split: args.profit_split,
        avg_monthly_return: args.avg_monthly_return,
        max_drawdown: args.max_drawdown,
        consistency: args.consistency,
        risk_adjustment: args.risk_adjustment,
        monthly_expenses: args.monthly_expenses,
        reinvest_profits: args.reinvest_profits,
        reinvestment_rate: args.reinvestment_rate,
        seed: args.seed.unwrap_or_else(entropy_seed),
    })
}

fn validate_risk_fields(args: &ProjectArgs) -> Result<(), String> {
    if !(0.0..=100.0).contains(&args.max_drawdown) {
        return Err("--max-drawdown must be between 0 and 100".to_string());
    }

    if !(1.0..=100.0).contains(&args.consistency) {
        return Err("--consistency must be between 1 and 100".to_string());
    }

    if !(0.0..=100.0).contains(&args.reinvestment_rate) {
        return Err("--reinvestment-rate must be between 0 and 100".to_string());
    }

    Ok(())
}

fn entropy_seed() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_nanos() as u64,
        Err(_) => 0x9E3779B97F4A7C15,
    }
}

pub fn run_cli_projection(raw_args: &[String]) -> Result<String, String> {
    let mut argv = vec!["tradeplan".to_string()];
    argv.extend_from_slice(raw_args);
    let args = ProjectArgs::try_parse_from(&argv).map_err(|e| e.to_string())?;

    let json = match args.variant {
        CliVariant::Personal => {
            let inputs = build_personal_inputs(&args)?;
            serde_json::to_string_pretty(&run_personal_projection(&inputs))
        }
        CliVariant::Funded => {
            let inputs = build_funded_inputs(&args)?;
            serde_json::to_string_pretty(&run_funded_projection(&inputs))
        }
    };

    json.map_err(|e| format!("Failed to serialize projection: {e}"))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/projections/personal",
            get(personal_get_handler).post(personal_post_handler),
        )
        .route("/api/projections/funded", post(funded_post_handler))
        .route("/api/goal-seek", post(goal_seek_handler))
        .route("/api/journal/statistics", post(journal_statistics_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("tradeplan HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/api/projections/personal");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn personal_get_handler(Query(payload): Query<PersonalPayload>) -> Response {
    personal_handler_impl(payload)
}

async fn personal_post_handler(Json(payload): Json<PersonalPayload>) -> Response {
    personal_handler_impl(payload)
}

fn personal_handler_impl(payload: PersonalPayload) -> Response {
    match personal_inputs_from_payload(payload) {
        Ok(inputs) => json_response(StatusCode::OK, run_personal_projection(&inputs)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn funded_post_handler(Json(payload): Json<FundedPayload>) -> Response {
    match funded_inputs_from_payload(payload) {
        Ok(inputs) => json_response(StatusCode::OK, run_funded_projection(&inputs)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn goal_seek_handler(Json(payload): Json<GoalSeekPayload>) -> Response {
    let (inputs, config) = match goal_seek_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    match solve_goal(&inputs, config) {
        Ok(result) => json_response(StatusCode::OK, result),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn journal_statistics_handler(Json(payload): Json<JournalPayload>) -> Response {
    json_response(StatusCode::OK, analyze(&payload.entries))
}

fn personal_inputs_from_payload(payload: PersonalPayload) -> Result<PersonalCapitalInputs, String> {
    let mut args = default_args_for_api();

    if let Some(v) = payload.initial_capital {
        args.initial_capital = v;
    }
    if let Some(v) = payload.monthly_contribution {
        args.monthly_contribution = v;
    }
    if let Some(v) = payload.avg_monthly_return {
        args.avg_monthly_return = v;
    }
    if let Some(v) = payload.max_drawdown {
        args.max_drawdown = v;
    }
    if let Some(v) = payload.consistency {
        args.consistency = v;
    }
    if let Some(v) = payload.risk_adjustment {
        args.risk_adjustment = v;
    }
    if let Some(v) = payload.leverage_multiplier {
        args.leverage_multiplier = v;
    }
    if let Some(v) = payload.withdrawal_rate {
        args.withdrawal_rate = v;
    }
    if let Some(v) = payload.monthly_expenses {
        args.monthly_expenses = v;
    }
    if let Some(v) = payload.reinvest_profits {
        args.reinvest_profits = v;
    }
    if let Some(v) = payload.reinvestment_rate {
        args.reinvestment_rate = v;
    }
    if let Some(v) = payload.compound_interest {
        args.compound_interest = v;
    }
    if let Some(v) = payload.seed {
        args.seed = Some(v);
    }

    build_personal_inputs(&args)
}

fn funded_inputs_from_payload(payload: FundedPayload) -> Result<FundedAccountInputs, String> {
    let mut args = default_args_for_api();
    args.variant = CliVariant::Funded;

    if let Some(v) = payload.account_sizes {
        args.account_sizes = v;
    }
    if let Some(v) = payload.profit_split {
        args.profit_split = v;
    }
    if let Some(v) = payload.avg_monthly_return {
        args.avg_monthly_return = v;
    }
    if let Some(v) = payload.max_drawdown {
        args.max_drawdown = v;
    }
    if let Some(v) = payload.consistency {
        args.consistency = v;
    }
    if let Some(v) = payload.risk_adjustment {
        args.risk_adjustment = v;
    }
    if let Some(v) = payload.monthly_expenses {
        args.monthly_expenses = v;
    }
    if let Some(v) = payload.reinvest_profits {
        args.reinvest_profits = v;
    }
    if let Some(v) = payload.reinvestment_rate {
        args.reinvestment_rate = v;
    }
    if let Some(v) = payload.seed {
        args.seed = Some(v);
    }

    build_funded_inputs(&args)
}

fn goal_seek_request_from_payload(
    payload: GoalSeekPayload,
) -> Result<(PersonalCapitalInputs, GoalSeekConfig), String> {
    let mut args = default_args_for_api();

    if let Some(v) = payload.initial_capital {
        args.initial_capital = v;
    }
    if let Some(v) = payload.monthly_contribution {
        args.monthly_contribution = v;
    }
    if let Some(v) = payload.avg_monthly_return {
        args.avg_monthly_return = v;
    }
    if let Some(v) = payload.leverage_multiplier {
        args.leverage_multiplier = v;
    }
    if let Some(v) = payload.withdrawal_rate {
        args.withdrawal_rate = v;
    }
    if let Some(v) = payload.monthly_expenses {
        args.monthly_expenses = v;
    }
    if let Some(v) = payload.reinvest_profits {
        args.reinvest_profits = v;
    }
    if let Some(v) = payload.reinvestment_rate {
        args.reinvestment_rate = v;
    }
    if let Some(v) = payload.compound_interest {
        args.compound_interest = v;
    }
    // The bisection itself is deterministic; a fixed seed keeps the echoed
    // inputs stable too.
    args.seed = Some(0);

    let inputs = build_personal_inputs(&args)?;

    let Some(target_capital) = payload.target_capital else {
        return Err("targetCapital is required".to_string());
    };

    let metric: GoalMetric = payload
        .metric
        .unwrap_or(ApiGoalMetric::RequiredContribution)
        .into();
    let default_max = match metric {
        GoalMetric::RequiredContribution => 50_000.0,
        GoalMetric::RequiredReturn => 100.0,
    };

    let config = GoalSeekConfig {
        metric,
        target_capital,
        search_min: payload.search_min.unwrap_or(0.0),
        search_max: payload.search_max.unwrap_or(default_max),
        tolerance: payload.tolerance.unwrap_or(0.01),
        max_iterations: payload.max_iterations.unwrap_or(64),
    };

    Ok((inputs, config))
}

fn default_args_for_api() -> ProjectArgs {
    ProjectArgs {
        variant: CliVariant::Personal,
        initial_capital: 10_000.0,
        monthly_contribution: 500.0,
        avg_monthly_return: 5.0,
        max_drawdown: 10.0,
        consistency: 80.0,
        risk_adjustment: false,
        leverage_multiplier: 1.0,
        withdrawal_rate: 0.0,
        monthly_expenses: 0.0,
        reinvest_profits: false,
        reinvestment_rate: 50.0,
        compound_interest: true,
        account_sizes: vec![100_000.0],
        profit_split: 80.0,
        seed: None,
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn personal_inputs_from_json(json: &str) -> Result<PersonalCapitalInputs, String> {
    let payload = serde_json::from_str::<PersonalPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    personal_inputs_from_payload(payload)
}

#[cfg(test)]
fn funded_inputs_from_json(json: &str) -> Result<FundedAccountInputs, String> {
    let payload = serde_json::from_str::<FundedPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    funded_inputs_from_payload(payload)
}

#[cfg(test)]
fn goal_seek_request_from_json(
    json: &str,
) -> Result<(PersonalCapitalInputs, GoalSeekConfig), String> {
    let payload = serde_json::from_str::<GoalSeekPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    goal_seek_request_from_payload(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_args() -> ProjectArgs {
        default_args_for_api()
    }

    #[test]
    fn build_personal_inputs_rejects_non_positive_capital() {
        let mut args = sample_args();
        args.initial_capital = 0.0;

        let err = build_personal_inputs(&args).expect_err("must reject zero capital");
        assert!(err.contains("--initial-capital"));
    }

    #[test]
    fn build_personal_inputs_rejects_out_of_range_consistency() {
        let mut args = sample_args();
        args.consistency = 0.0;

        let err = build_personal_inputs(&args).expect_err("must reject consistency below 1");
        assert!(err.contains("--consistency"));
    }

    #[test]
    fn build_personal_inputs_rejects_sub_unit_leverage() {
        let mut args = sample_args();
        args.leverage_multiplier = 0.5;

        let err = build_personal_inputs(&args).expect_err("must reject leverage below 1");
        assert!(err.contains("--leverage-multiplier"));
    }

    #[test]
    fn build_personal_inputs_rejects_excessive_return() {
        let mut args = sample_args();
        args.avg_monthly_return = 250.0;

        let err = build_personal_inputs(&args).expect_err("must reject return above 100");
        assert!(err.contains("--avg-monthly-return"));
    }

    #[test]
    fn build_funded_inputs_rejects_empty_account_list() {
        let mut args = sample_args();
        args.account_sizes = Vec::new();

        let err = build_funded_inputs(&args).expect_err("must require an account");
        assert!(err.contains("--account-sizes"));
    }

    #[test]
    fn build_funded_inputs_rejects_non_positive_account() {
        let mut args = sample_args();
        args.account_sizes = vec![100_000.0, -5_000.0];

        let err = build_funded_inputs(&args).expect_err("must reject negative size");
        assert!(err.contains("--account-sizes"));
    }

    #[test]
    fn build_funded_inputs_rejects_zero_profit_split() {
        let mut args = sample_args();
        args.profit_split = 0.0;

        let err = build_funded_inputs(&args).expect_err("must reject zero split");
        assert!(err.contains("--profit-split"));
    }

    #[test]
    fn personal_payload_parses_web_keys() {
        let json = r#"{
          "initialCapital": 25000,
          "monthlyContribution": 750,
          "avgMonthlyReturn": 4.5,
          "maxDrawdown": 15,
          "consistency": 65,
          "riskAdjustment": true,
          "leverageMultiplier": 2,
          "withdrawalRate": 1.5,
          "monthlyExpenses": 120,
          "reinvestProfits": true,
          "reinvestmentRate": 30,
          "compoundInterest": false,
          "seed": 99
        }"#;

        let inputs = personal_inputs_from_json(json).expect("json should parse");
        assert_approx(inputs.initial_capital, 25_000.0);
        assert_approx(inputs.monthly_contribution, 750.0);
        assert_approx(inputs.avg_monthly_return, 4.5);
        assert_approx(inputs.max_drawdown, 15.0);
        assert_approx(inputs.consistency, 65.0);
        assert!(inputs.risk_adjustment);
        assert_approx(inputs.leverage_multiplier, 2.0);
        assert_approx(inputs.withdrawal_rate, 1.5);
        assert_approx(inputs.monthly_expenses, 120.0);
        assert!(inputs.reinvest_profits);
        assert_approx(inputs.reinvestment_rate, 30.0);
        assert!(!inputs.compound_interest);
        assert_eq!(inputs.seed, 99);
    }

    #[test]
    fn personal_payload_applies_defaults_for_missing_fields() {
        let inputs = personal_inputs_from_json("{}").expect("empty payload should parse");
        assert_approx(inputs.initial_capital, 10_000.0);
        assert_approx(inputs.avg_monthly_return, 5.0);
        assert!(!inputs.risk_adjustment);
        assert!(inputs.compound_interest);
    }

    #[test]
    fn personal_payload_rejection_names_the_flag() {
        let err = personal_inputs_from_json(r#"{"withdrawalRate": 150}"#)
            .expect_err("must reject rate above 100");
        assert!(err.contains("--withdrawal-rate"));
    }

    #[test]
    fn funded_payload_parses_account_array() {
        let json = r#"{
          "accountSizes": [50000, 100000],
          "profitSplit": 90,
          "avgMonthlyReturn": 8,
          "seed": 7
        }"#;

        let inputs = funded_inputs_from_json(json).expect("json should parse");
        assert_eq!(inputs.account_sizes.len(), 2);
        assert_approx(inputs.account_sizes[0], 50_000.0);
        assert_approx(inputs.profit_split, 90.0);
        assert_eq!(inputs.seed, 7);
    }

    #[test]
    fn goal_seek_payload_parses_metric_aliases() {
        let json = r#"{
          "metric": "requiredReturn",
          "targetCapital": 20000,
          "searchMax": 25
        }"#;

        let (inputs, config) = goal_seek_request_from_json(json).expect("json should parse");
        assert_eq!(config.metric, GoalMetric::RequiredReturn);
        assert_approx(config.target_capital, 20_000.0);
        assert_approx(config.search_max, 25.0);
        assert_approx(inputs.initial_capital, 10_000.0);
    }

    #[test]
    fn goal_seek_payload_requires_a_target() {
        let err = goal_seek_request_from_json(r#"{"metric": "required-contribution"}"#)
            .expect_err("must require targetCapital");
        assert!(err.contains("targetCapital"));
    }

    #[test]
    fn journal_payload_parses_entries_with_aliases() {
        let json = r#"{
          "entries": [
            {
              "date": "2024-03-14",
              "entryType": "tradeReview",
              "mood": "confident",
              "tags": ["EURUSD"],
              "content": "target hit, risk:reward = 1:2"
            },
            {
              "date": "2024-03-15",
              "entryType": "lesson",
              "mood": "neutral"
            }
          ]
        }"#;

        let payload: JournalPayload = serde_json::from_str(json).expect("json should parse");
        assert_eq!(payload.entries.len(), 2);

        let stats = analyze(&payload.entries);
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.entries_by_type.get("trade-review"), Some(&1));
        assert_eq!(stats.trade_text.wins, 1);
    }

    #[test]
    fn projection_response_serializes_expected_fields() {
        let inputs = personal_inputs_from_json(r#"{"seed": 3}"#).expect("valid inputs");
        let projection = run_personal_projection(&inputs);
        let json = serde_json::to_string(&projection).expect("projection should serialize");

        assert!(json.contains("\"inputs\""));
        assert!(json.contains("\"monthly\""));
        assert!(json.contains("\"summaries\""));
        assert!(json.contains("\"windowMonths\""));
        assert!(json.contains("\"cumulativeProfit\""));
        assert!(json.contains("\"netCashflow\""));
        assert!(json.contains("\"roi\""));
    }

    #[test]
    fn goal_seek_result_serializes_expected_fields() {
        let (inputs, config) =
            goal_seek_request_from_json(r#"{"targetCapital": 30000}"#).expect("valid request");
        let result = solve_goal(&inputs, config).expect("must solve");
        let json = serde_json::to_string(&result).expect("result should serialize");

        assert!(json.contains("\"metric\""));
        assert!(json.contains("\"solvedValue\""));
        assert!(json.contains("\"iterations\""));
        assert!(json.contains("\"converged\""));
        assert!(json.contains("\"feasible\""));
    }

    #[test]
    fn cli_projection_runs_end_to_end() {
        let args: Vec<String> = [
            "project",
            "--variant",
            "funded",
            "--account-sizes",
            "100000",
            "--profit-split",
            "80",
            "--avg-monthly-return",
            "10",
            "--seed",
            "42",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let json = run_cli_projection(&args[1..]).expect("projection should run");
        assert!(json.contains("\"grossProfit\""));
        assert!(json.contains("\"netProfit\""));
    }

    #[test]
    fn cli_projection_surfaces_validation_errors() {
        let args = vec!["--initial-capital=-5".to_string()];

        let err = run_cli_projection(&args).expect_err("must reject negative capital");
        assert!(err.contains("--initial-capital"));
    }
}
