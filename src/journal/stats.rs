use std::collections::BTreeMap;

use super::types::{JournalEntry, JournalStatistics, PairCount, SentimentPoint, TradeTextStats};

const TOP_PAIR_LIMIT: usize = 5;

const CURRENCY_CODES: &[&str] = &[
    "AUD", "BTC", "CAD", "CHF", "ETH", "EUR", "GBP", "JPY", "NZD", "USD", "XAG", "XAU",
];

const WIN_PHRASES: &[&str] = &["win", "won", "target hit", "hit tp", "took profit"];
const LOSS_PHRASES: &[&str] = &["loss", "lost", "stopped out", "hit sl"];

pub fn analyze(entries: &[JournalEntry]) -> JournalStatistics {
    let mut entries_by_type = BTreeMap::new();
    let mut entries_by_mood = BTreeMap::new();
    let mut entries_by_month = BTreeMap::new();
    let mut entries_by_tag = BTreeMap::new();
    let mut pair_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut sentiment_trend = Vec::with_capacity(entries.len());

    let mut trade_entries = 0;
    let mut wins = 0;
    let mut losses = 0;
    let mut risk_reward_samples = 0;
    let mut risk_reward_total = 0.0;

    for entry in entries {
        *entries_by_type
            .entry(entry.entry_type.label().to_string())
            .or_insert(0) += 1;
        *entries_by_mood
            .entry(entry.mood.label().to_string())
            .or_insert(0) += 1;
        *entries_by_month
            .entry(entry.date.format("%Y-%m").to_string())
            .or_insert(0) += 1;

        for tag in &entry.tags {
            *entries_by_tag.entry(tag.clone()).or_insert(0) += 1;
            if let Some(pair) = detect_pair(tag) {
                *pair_counts.entry(pair).or_insert(0) += 1;
            }
        }

        sentiment_trend.push(SentimentPoint {
            date: entry.date,
            score: entry.mood.sentiment(),
        });

        if entry.entry_type.is_trade() {
            trade_entries += 1;
            match detect_outcome(&entry.content) {
                Some(true) => wins += 1,
                Some(false) => losses += 1,
                None => {}
            }
            if let Some(ratio) = extract_risk_reward(&entry.content) {
                risk_reward_samples += 1;
                risk_reward_total += ratio;
            }
        }
    }

    sentiment_trend.sort_by_key(|point| point.date);

    let mut ranked: Vec<PairCount> = pair_counts
        .into_iter()
        .map(|(pair, count)| PairCount { pair, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.pair.cmp(&b.pair)));
    ranked.truncate(TOP_PAIR_LIMIT);

    let outcomes_detected = wins + losses;
    let win_rate = if outcomes_detected > 0 {
        Some(wins as f64 / outcomes_detected as f64 * 100.0)
    } else {
        None
    };
    let avg_risk_reward = if risk_reward_samples > 0 {
        Some(risk_reward_total / risk_reward_samples as f64)
    } else {
        None
    };

    JournalStatistics {
        total_entries: entries.len(),
        entries_by_type,
        entries_by_mood,
        entries_by_month,
        entries_by_tag,
        top_pairs: ranked,
        sentiment_trend,
        trade_text: TradeTextStats {
            trade_entries,
            outcomes_detected,
            wins,
            losses,
            win_rate,
            risk_reward_samples,
            avg_risk_reward,
        },
    }
}

/// Substring heuristic, not a parser: uppercases the tag, drops separators and
/// looks for two adjacent known currency codes ("EURUSD", "eur/usd").
fn detect_pair(tag: &str) -> Option<String> {
    let cleaned: Vec<u8> = tag
        .bytes()
        .filter(u8::is_ascii_alphanumeric)
        .map(|b| b.to_ascii_uppercase())
        .collect();

    if cleaned.len() < 6 {
        return None;
    }

    for start in 0..=cleaned.len() - 6 {
        let base = &cleaned[start..start + 3];
        let quote = &cleaned[start + 3..start + 6];
        if is_currency_code(base) && is_currency_code(quote) && base != quote {
            return Some(format!(
                "{}/{}",
                String::from_utf8_lossy(base),
                String::from_utf8_lossy(quote)
            ));
        }
    }

    None
}

fn is_currency_code(candidate: &[u8]) -> bool {
    CURRENCY_CODES.iter().any(|code| code.as_bytes() == candidate)
}

/// Some(true) for a win, Some(false) for a loss, None when the text matches
/// neither phrasing or matches both.
fn detect_outcome(content: &str) -> Option<bool> {
    let lower = content.to_ascii_lowercase();
    let has_win = WIN_PHRASES.iter().any(|phrase| lower.contains(phrase));
    let has_loss = LOSS_PHRASES.iter().any(|phrase| lower.contains(phrase));

    match (has_win, has_loss) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    }
}

/// Mines "risk:reward = 1:N" out of free text; accepts `:` or `-` between the
/// words and an optional `=`. Returns the first ratio that parses.
fn extract_risk_reward(content: &str) -> Option<f64> {
    let lower = content.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut from = 0;

    while let Some(found) = find_from(bytes, b"risk", from) {
        from = found + 4;
        let mut i = from;

        if i >= bytes.len() || (bytes[i] != b':' && bytes[i] != b'-') {
            continue;
        }
        i += 1;

        if !bytes[i..].starts_with(b"reward") {
            continue;
        }
        i += 6;

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
        }
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        if !bytes[i..].starts_with(b"1:") {
            continue;
        }
        i += 2;

        let digits_start = i;
        let mut end = i;
        while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
            end += 1;
        }
        if end == digits_start {
            continue;
        }

        if let Ok(ratio) = lower[digits_start..end].parse::<f64>() {
            return Some(ratio);
        }
    }

    None
}

fn find_from(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| from + pos)
}
