//! Derived betting tables.
//!
//! Works on per-bookmaker probabilities and odds:
//! - the "most profitable matches" table, one row per (match, bookmaker,
//!   outcome) with the expected value of a unit stake, sorted best first;
//! - arbitrage opportunities, bookmaker combinations whose implied
//!   probabilities sum below 100%;
//! - the averaged odds and probabilities the grouped bar chart plots.

use crate::data::Record;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Column holding the expected value in derived records.
pub const EXPECTED_VALUE: &str = "Expected Value";

/// Column holding the summed implied probability of an arbitrage row.
pub const ARBITRAGE_PERCENTAGE: &str = "Arbitrage Percentage";

/// Odds notation used by a bookmaker column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OddsFormat {
    /// Decimal odds (total payout per unit stake).
    #[default]
    Decimal,
    /// American moneyline odds (`+150`, `-200`).
    American,
}

/// One bookmaker outcome: where to find its probability and odds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    /// Bookmaker name.
    pub bookmaker: String,
    /// Column with the outcome probability in percent.
    pub probability: String,
    /// Column with the offered odds.
    pub odds: String,
    /// Notation of the odds column.
    #[serde(default)]
    pub format: OddsFormat,
}

impl Market {
    /// Create a market.
    #[must_use]
    pub fn new(
        bookmaker: impl Into<String>,
        probability: impl Into<String>,
        odds: impl Into<String>,
        format: OddsFormat,
    ) -> Self {
        Self { bookmaker: bookmaker.into(), probability: probability.into(), odds: odds.into(), format }
    }

    /// Outcome name: the first word of the probability column.
    #[must_use]
    pub fn outcome(&self) -> &str {
        self.probability.split(' ').next().unwrap_or_default()
    }

    /// Event name: the probability column up to `" Probability"`
    /// (`"Home Win"` for `"Home Win Probability_pinnacle"`).
    #[must_use]
    pub fn event(&self) -> &str {
        self.probability.split_once(" Probability").map_or(self.probability.as_str(), |(event, _)| event)
    }

    /// Decimal odds of this market in `record`, if present, finite and
    /// positive.
    fn decimal_odds(&self, record: &Record) -> Option<f32> {
        let odds = record.number(&self.odds).filter(|v| v.is_finite())?;
        let odds = match self.format {
            OddsFormat::American if odds == 0.0 => return None,
            OddsFormat::American => american_to_decimal(odds),
            OddsFormat::Decimal => odds,
        };
        (odds > 0.0).then_some(odds)
    }

    /// Home/draw/away markets for DraftKings (American odds), Pinnacle and
    /// BetMGM (decimal odds), using `"<Outcome> Probability_<book>"` columns.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        let books = [("draftkings", OddsFormat::American), ("pinnacle", OddsFormat::Decimal), ("betmgm", OddsFormat::Decimal)];
        books
            .iter()
            .flat_map(|(book, format)| {
                ["Home Win", "Draw", "Away Win"].iter().map(move |outcome| {
                    Self::new(*book, format!("{outcome} Probability_{book}"), format!("{outcome} Odds_{book}"), *format)
                })
            })
            .collect()
    }
}

/// Convert American odds to decimal odds.
#[must_use]
pub fn american_to_decimal(odds: f32) -> f32 {
    if odds > 0.0 {
        odds / 100.0 + 1.0
    } else {
        100.0 / odds.abs() + 1.0
    }
}

/// Expected value of a unit stake: `p * odds - (1 - p)`, with `p` given in
/// percent.
#[must_use]
pub fn expected_value(probability_pct: f32, decimal_odds: f32) -> f32 {
    let p = probability_pct / 100.0;
    p * decimal_odds - (1.0 - p)
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// One expected-value row per record and market with both values present.
///
/// Markets with a missing or non-numeric probability or odds are skipped.
#[must_use]
pub fn expected_values(records: &[Record], markets: &[Market]) -> Vec<Record> {
    let mut rows = Vec::new();
    for record in records {
        let matchup = format!("{} vs {}", record.text("Home Team"), record.text("Away Team"));

        for market in markets {
            let (Some(probability), Some(odds)) = (record.number(&market.probability), record.number(&market.odds)) else {
                if record.get(&market.probability).is_some() || record.get(&market.odds).is_some() {
                    log::warn!("{matchup} at {}: skipping non-numeric {} market", market.bookmaker, market.outcome());
                }
                continue;
            };
            if !probability.is_finite() || !odds.is_finite() || (market.format == OddsFormat::American && odds == 0.0) {
                log::warn!("{matchup} at {}: unusable probability {probability} / odds {odds}", market.bookmaker);
                continue;
            }

            let odds = match market.format {
                OddsFormat::American => american_to_decimal(odds),
                OddsFormat::Decimal => odds,
            };
            rows.push(
                Record::new()
                    .with("Match", matchup.as_str())
                    .with("Bookmaker", market.bookmaker.as_str())
                    .with("Outcome", market.outcome())
                    .with("Probability (%)", round2(probability))
                    .with("Odds (Decimal)", round2(odds))
                    .with(EXPECTED_VALUE, round2(expected_value(probability, odds))),
            );
        }
    }

    log::debug!("derived {} expected-value rows from {} matches", rows.len(), records.len());
    rows
}

/// Bookmaker combinations, one per outcome, whose implied probabilities
/// `100 / odds` sum below 100.
///
/// Markets are grouped by [`Market::outcome`] in configuration order. A row
/// holds `Match`, then `<Outcome> Bookmaker` and `<Outcome> Odds` (decimal)
/// for each outcome, then [`ARBITRAGE_PERCENTAGE`]. Markets without usable
/// odds are left out of the combinations; a match missing every market of
/// some outcome yields nothing.
#[must_use]
pub fn arbitrage_opportunities(records: &[Record], markets: &[Market]) -> Vec<Record> {
    let mut outcomes: IndexMap<&str, Vec<&Market>> = IndexMap::new();
    for market in markets {
        outcomes.entry(market.outcome()).or_default().push(market);
    }
    if outcomes.len() < 2 {
        log::debug!("arbitrage needs at least two outcomes, got {}", outcomes.len());
        return Vec::new();
    }

    let mut rows = Vec::new();
    for record in records {
        let matchup = format!("{} vs {}", record.text("Home Team"), record.text("Away Team"));
        let quotes: Vec<Vec<(&str, f32)>> = outcomes
            .values()
            .map(|group| {
                group
                    .iter()
                    .filter_map(|market| {
                        let odds = market.decimal_odds(record);
                        if odds.is_none() && !record.text(&market.odds).trim().is_empty() {
                            log::warn!("{matchup} at {}: unusable {} odds", market.bookmaker, market.outcome());
                        }
                        odds.map(|odds| (market.bookmaker.as_str(), odds))
                    })
                    .collect()
            })
            .collect();
        if quotes.iter().any(Vec::is_empty) {
            continue;
        }

        // Odometer over one quote per outcome.
        let mut pick = vec![0usize; quotes.len()];
        loop {
            let total: f32 = pick.iter().zip(&quotes).map(|(&i, q)| 100.0 / q[i].1).sum();
            if total < 100.0 {
                let mut row = Record::new().with("Match", matchup.as_str());
                for ((outcome, &i), q) in outcomes.keys().zip(&pick).zip(&quotes) {
                    row.insert(format!("{outcome} Bookmaker"), q[i].0);
                    row.insert(format!("{outcome} Odds"), round2(q[i].1));
                }
                row.insert(ARBITRAGE_PERCENTAGE, round2(total));
                rows.push(row);
            }

            let Some(slot) = (0..pick.len()).rev().find(|&k| pick[k] + 1 < quotes[k].len()) else {
                break;
            };
            pick[slot] += 1;
            pick[slot + 1..].fill(0);
        }
    }

    log::debug!("found {} arbitrage combinations in {} matches", rows.len(), records.len());
    rows
}

/// Per-match mean of every event's odds and probability across bookmakers.
///
/// Events come from [`Market::event`] in configuration order. A row holds
/// `Home Team`, `Away Team`, then `Average <Event> Odds` for each event, then
/// `Average <Event> Probability`. Odds are converted to decimal first.
/// Missing or non-finite values are skipped; an event with no usable value
/// gets an empty cell.
#[must_use]
pub fn average_markets(records: &[Record], markets: &[Market]) -> Vec<Record> {
    let mut events: IndexMap<&str, Vec<&Market>> = IndexMap::new();
    for market in markets {
        events.entry(market.event()).or_default().push(market);
    }

    let rows: Vec<Record> = records
        .iter()
        .map(|record| {
            let mut row = Record::new()
                .with("Home Team", record.text("Home Team"))
                .with("Away Team", record.text("Away Team"));
            for (event, group) in &events {
                let odds = mean(group.iter().filter_map(|m| m.decimal_odds(record)));
                row.insert(format!("Average {event} Odds"), odds);
            }
            for (event, group) in &events {
                let probability =
                    mean(group.iter().filter_map(|m| record.number(&m.probability).filter(|v| v.is_finite())));
                row.insert(format!("Average {event} Probability"), probability);
            }
            row
        })
        .collect();

    log::debug!("averaged {} events over {} matches", events.len(), rows.len());
    rows
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f32>) -> Option<f32> {
    let (sum, count) = values.fold((0.0_f32, 0_u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f32)
}

/// Sort by expected value, best first. Stable; rows without a numeric
/// expected value go last.
pub fn most_profitable(records: &mut [Record]) {
    records.sort_by(|a, b| match (a.number(EXPECTED_VALUE), b.number(EXPECTED_VALUE)) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataValue;
    use approx::assert_relative_eq;

    #[test]
    fn test_american_to_decimal() {
        assert_relative_eq!(american_to_decimal(150.0), 2.5);
        assert_relative_eq!(american_to_decimal(-200.0), 1.5);
        assert_relative_eq!(american_to_decimal(100.0), 2.0);
    }

    #[test]
    fn test_expected_value() {
        // 50% at evens breaks even
        assert_relative_eq!(expected_value(50.0, 2.0), 0.0);
        assert_relative_eq!(expected_value(60.0, 2.0), 0.2, epsilon = 1e-6);
        assert_relative_eq!(expected_value(25.0, 3.0), -0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_market_outcome() {
        let m = Market::new("pinnacle", "Home Win Probability_pinnacle", "Home Win Odds_pinnacle", OddsFormat::Decimal);
        assert_eq!(m.outcome(), "Home");
    }

    #[test]
    fn test_default_markets() {
        let markets = Market::defaults();
        assert_eq!(markets.len(), 9);
        assert_eq!(markets[0].probability, "Home Win Probability_draftkings");
        assert_eq!(markets[0].format, OddsFormat::American);
        assert_eq!(markets[4].odds, "Draw Odds_pinnacle");
        assert_eq!(markets[8].bookmaker, "betmgm");
    }

    #[test]
    fn test_expected_values_rows() {
        let record = Record::new()
            .with("Home Team", "A")
            .with("Away Team", "B")
            .with("Home Win Probability_draftkings", "60")
            .with("Home Win Odds_draftkings", "+150")
            .with("Draw Probability_pinnacle", "25")
            .with("Draw Odds_pinnacle", "3.4")
            .with("Away Win Probability_betmgm", "")
            .with("Away Win Odds_betmgm", "4.0");
        let rows = expected_values(&[record], &Market::defaults());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text("Match"), "A vs B");
        assert_eq!(rows[0].text("Bookmaker"), "draftkings");
        assert_eq!(rows[0].text("Outcome"), "Home");
        assert_relative_eq!(rows[0].number("Odds (Decimal)").unwrap(), 2.5);
        assert_relative_eq!(rows[0].number(EXPECTED_VALUE).unwrap(), 0.5, epsilon = 1e-6);
        assert_eq!(rows[1].text("Outcome"), "Draw");
        assert_relative_eq!(rows[1].number(EXPECTED_VALUE).unwrap(), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_american_odds_skipped() {
        let record = Record::new()
            .with("Home Win Probability_draftkings", "50")
            .with("Home Win Odds_draftkings", "0");
        assert!(expected_values(&[record], &Market::defaults()).is_empty());
    }

    #[test]
    fn test_market_event() {
        let m = Market::new("betmgm", "Away Win Probability_betmgm", "Away Win Odds_betmgm", OddsFormat::Decimal);
        assert_eq!(m.event(), "Away Win");
        let m = Market::new("x", "Edge", "Price", OddsFormat::Decimal);
        assert_eq!(m.event(), "Edge");
    }

    fn arbitrage_record() -> Record {
        Record::new()
            .with("Home Team", "A")
            .with("Away Team", "B")
            .with("Home Win Odds_pinnacle", "2.5")
            .with("Home Win Odds_betmgm", "2.2")
            .with("Draw Odds_draftkings", "0")
            .with("Draw Odds_pinnacle", "3.0")
            .with("Draw Odds_betmgm", "n/a")
            .with("Away Win Odds_draftkings", "+300")
            .with("Away Win Odds_betmgm", "4.5")
    }

    #[test]
    fn test_arbitrage_combinations() {
        let rows = arbitrage_opportunities(&[arbitrage_record()], &Market::defaults());

        // betmgm home (45.45) + draw (33.33) already leaves no room.
        assert_eq!(rows.len(), 2);
        let header: Vec<&str> = rows[0].keys().collect();
        assert_eq!(
            header,
            vec![
                "Match",
                "Home Bookmaker",
                "Home Odds",
                "Draw Bookmaker",
                "Draw Odds",
                "Away Bookmaker",
                "Away Odds",
                ARBITRAGE_PERCENTAGE
            ]
        );
        assert_eq!(rows[0].text("Match"), "A vs B");
        assert_eq!(rows[0].text("Home Bookmaker"), "pinnacle");
        assert_eq!(rows[0].text("Draw Bookmaker"), "pinnacle");
        assert_eq!(rows[0].text("Away Bookmaker"), "draftkings");
        assert_relative_eq!(rows[0].number("Away Odds").unwrap(), 4.0);
        assert_relative_eq!(rows[0].number(ARBITRAGE_PERCENTAGE).unwrap(), 98.33, epsilon = 1e-4);
        assert_eq!(rows[1].text("Away Bookmaker"), "betmgm");
        assert_relative_eq!(rows[1].number(ARBITRAGE_PERCENTAGE).unwrap(), 95.56, epsilon = 1e-4);
    }

    #[test]
    fn test_arbitrage_requires_every_outcome() {
        let record = arbitrage_record().with("Draw Odds_pinnacle", "NaN");
        assert!(arbitrage_opportunities(&[record], &Market::defaults()).is_empty());
    }

    #[test]
    fn test_arbitrage_all_nan() {
        let mut record = Record::new().with("Home Team", "A").with("Away Team", "B");
        for market in Market::defaults() {
            record.insert(market.odds.clone(), "NaN");
            record.insert(market.probability.clone(), "NaN");
        }
        assert!(arbitrage_opportunities(&[record], &Market::defaults()).is_empty());
    }

    #[test]
    fn test_arbitrage_single_outcome() {
        let markets = vec![Market::new("pinnacle", "Home Win Probability_pinnacle", "Home Win Odds_pinnacle", OddsFormat::Decimal)];
        let record = Record::new().with("Home Win Odds_pinnacle", "5.0");
        assert!(arbitrage_opportunities(&[record], &markets).is_empty());
    }

    #[test]
    fn test_average_markets() {
        let record = Record::new()
            .with("Home Team", "A")
            .with("Away Team", "B")
            .with("Home Win Odds_draftkings", "+100")
            .with("Home Win Odds_pinnacle", "2.0")
            .with("Home Win Odds_betmgm", "3.0")
            .with("Home Win Probability_draftkings", "NaN")
            .with("Home Win Probability_pinnacle", "50")
            .with("Home Win Probability_betmgm", "40")
            .with("Away Win Probability_betmgm", "20");
        let rows = average_markets(&[record], &Market::defaults());

        assert_eq!(rows.len(), 1);
        let header: Vec<&str> = rows[0].keys().collect();
        assert_eq!(
            header,
            vec![
                "Home Team",
                "Away Team",
                "Average Home Win Odds",
                "Average Draw Odds",
                "Average Away Win Odds",
                "Average Home Win Probability",
                "Average Draw Probability",
                "Average Away Win Probability"
            ]
        );
        assert_relative_eq!(rows[0].number("Average Home Win Odds").unwrap(), 7.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(rows[0].number("Average Home Win Probability").unwrap(), 45.0);
        assert_relative_eq!(rows[0].number("Average Away Win Probability").unwrap(), 20.0);
        assert_eq!(rows[0].get("Average Draw Odds"), Some(&DataValue::Null));
        assert_eq!(rows[0].text("Average Draw Probability"), "");
    }

    #[test]
    fn test_average_markets_all_nan() {
        let mut record = Record::new().with("Home Team", "A").with("Away Team", "B");
        for market in Market::defaults() {
            record.insert(market.odds.clone(), "NaN");
            record.insert(market.probability.clone(), "nan");
        }
        let rows = average_markets(&[record], &Market::defaults());

        assert_eq!(rows[0].len(), 8);
        assert!(rows[0].iter().skip(2).all(|(_, value)| *value == DataValue::Null));
    }

    #[test]
    fn test_most_profitable_order() {
        let mut rows = vec![
            Record::new().with("Match", "a").with(EXPECTED_VALUE, "0.1"),
            Record::new().with("Match", "b").with(EXPECTED_VALUE, "n/a"),
            Record::new().with("Match", "c").with(EXPECTED_VALUE, "1.5"),
            Record::new().with("Match", "d").with(EXPECTED_VALUE, "0.1"),
        ];
        most_profitable(&mut rows);
        let order: Vec<String> = rows.iter().map(|r| r.text("Match")).collect();
        assert_eq!(order, vec!["c", "a", "d", "b"]);
    }
}
