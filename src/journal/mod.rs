mod stats;
mod types;

pub use stats::analyze;
pub use types::{
    EntryType, JournalEntry, JournalStatistics, Mood, PairCount, SentimentPoint, TradeTextStats,
};
