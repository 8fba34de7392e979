use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryType {
    #[serde(alias = "tradePlan", alias = "trade_plan", alias = "plan")]
    TradePlan,
    #[serde(alias = "tradeReview", alias = "trade_review", alias = "review")]
    TradeReview,
    Lesson,
    #[serde(alias = "marketNotes", alias = "market_notes", alias = "notes")]
    MarketNotes,
    General,
}

impl EntryType {
    pub fn label(self) -> &'static str {
        match self {
            EntryType::TradePlan => "trade-plan",
            EntryType::TradeReview => "trade-review",
            EntryType::Lesson => "lesson",
            EntryType::MarketNotes => "market-notes",
            EntryType::General => "general",
        }
    }

    pub fn is_trade(self) -> bool {
        matches!(self, EntryType::TradePlan | EntryType::TradeReview)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mood {
    Confident,
    Calm,
    Neutral,
    Anxious,
    Frustrated,
}

impl Mood {
    pub fn label(self) -> &'static str {
        match self {
            Mood::Confident => "confident",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Anxious => "anxious",
            Mood::Frustrated => "frustrated",
        }
    }

    /// Coarse sentiment bucket for the trend series.
    pub fn sentiment(self) -> i32 {
        match self {
            Mood::Confident | Mood::Calm => 1,
            Mood::Neutral => 0,
            Mood::Anxious | Mood::Frustrated => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub entry_type: EntryType,
    pub mood: Mood,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairCount {
    pub pair: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentPoint {
    pub date: NaiveDate,
    pub score: i32,
}

/// Best-effort numbers mined from free text; entries whose wording doesn't
/// match the expected phrasing are skipped, not reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeTextStats {
    pub trade_entries: usize,
    pub outcomes_detected: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: Option<f64>,
    pub risk_reward_samples: usize,
    pub avg_risk_reward: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStatistics {
    pub total_entries: usize,
    pub entries_by_type: BTreeMap<String, usize>,
    pub entries_by_mood: BTreeMap<String, usize>,
    pub entries_by_month: BTreeMap<String, usize>,
    pub entries_by_tag: BTreeMap<String, usize>,
    pub top_pairs: Vec<PairCount>,
    pub sentiment_trend: Vec<SentimentPoint>,
    pub trade_text: TradeTextStats,
}
