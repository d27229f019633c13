//! Layered ticker-symbol extraction: an ordered pattern cascade with a
//! blacklist, backed by fuzzy company-name matching when no pattern fires.

use crate::domain::codes;
use crate::normalize::companies::CompanyTable;
use regex::Regex;

/// Where a ticker came from, in descending confidence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerSource {
    Parentheses,
    Label,
    Brackets,
    LeadingToken,
    StockKeyword,
    FuzzyCompany,
}

impl TickerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickerSource::Parentheses => "parentheses",
            TickerSource::Label => "label",
            TickerSource::Brackets => "brackets",
            TickerSource::LeadingToken => "leading_token",
            TickerSource::StockKeyword => "stock_keyword",
            TickerSource::FuzzyCompany => "fuzzy_company",
        }
    }
}

/// Uppercase tokens that pass the ticker format rule but are common words or
/// filing metadata, never symbols.
const TICKER_BLACKLIST: &[&str] = &[
    "STOCK", "TRUST", "FUND", "FUNDS", "BOND", "BONDS", "CASH", "INC", "CORP", "LLC", "LP",
    "PLC", "LTD", "CO", "ETF", "IRA", "REIT", "SP", "JT", "DC", "SO", "THE", "AND", "OF", "NEW",
    "USA", "US", "PTR", "FD", "NONE", "TOTAL", "VALUE", "TYPE", "DATE", "OWNER", "ASSET", "BANK",
    "GROUP", "REAL", "NOTES",
];

/// Ticker format rule: one to five uppercase letters, not blacklisted.
pub fn is_valid_ticker(candidate: &str) -> bool {
    candidate.len() >= 1
        && candidate.len() <= 5
        && candidate.chars().all(|c| c.is_ascii_uppercase())
        && !TICKER_BLACKLIST.contains(&candidate)
}

/// Run the pattern cascade over an asset name. Patterns are tried in
/// confidence order; the first candidate passing the format rule wins.
pub fn extract_ticker(name: &str) -> Option<(String, TickerSource)> {
    let cascade: [(TickerSource, &str); 5] = [
        (TickerSource::Parentheses, r"\(([A-Z]{1,5})\)"),
        (
            TickerSource::Label,
            r"(?i)(?:ticker|symbol)\s*[:\-]\s*([A-Za-z]{1,5})\b",
        ),
        (TickerSource::Brackets, r"\[([A-Z]{1,5})\]"),
        (TickerSource::LeadingToken, r"^([A-Z]{1,5})\s*[-:]\s+\S"),
        (
            TickerSource::StockKeyword,
            r"\b([A-Z]{1,5})\s+(?i:common\s+stock|class\s+[a-z]\s+shares|stock|shares|equity)\b",
        ),
    ];

    for (source, pattern) in cascade {
        let re = Regex::new(pattern).unwrap();
        for caps in re.captures_iter(name) {
            let candidate = caps[1].to_uppercase();
            // Bracketed two-letter tokens that match the asset-type code
            // table are annotations ("[MF]", "[ST]"), not symbols.
            if source == TickerSource::Brackets
                && codes::asset_type_description(&candidate).is_some()
            {
                continue;
            }
            if is_valid_ticker(&candidate) {
                return Some((candidate, source));
            }
        }
    }
    None
}

/// Full layered lookup: pattern cascade first, then the fuzzy company-name
/// fallback. The fuzzy path reports its match confidence; pattern hits do not
/// carry one.
pub fn extract_ticker_layered(
    name: &str,
    companies: &CompanyTable,
    fuzzy_threshold: f64,
) -> Option<(String, TickerSource, Option<f64>)> {
    if let Some((ticker, source)) = extract_ticker(name) {
        return Some((ticker, source, None));
    }
    companies
        .best_match(name, fuzzy_threshold)
        .map(|(ticker, score)| (ticker, TickerSource::FuzzyCompany, Some(score)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parenthesized_ticker_wins() {
        assert_eq!(
            extract_ticker("Apple Inc. (AAPL)"),
            Some(("AAPL".to_string(), TickerSource::Parentheses))
        );
    }

    #[test]
    fn bracketed_ticker() {
        assert_eq!(
            extract_ticker("[NVDA] NVIDIA Corporation"),
            Some(("NVDA".to_string(), TickerSource::Brackets))
        );
    }

    #[test]
    fn labeled_ticker() {
        assert_eq!(
            extract_ticker("Acme Widgets, ticker: acme"),
            Some(("ACME".to_string(), TickerSource::Label))
        );
    }

    #[test]
    fn leading_token_before_dash() {
        assert_eq!(
            extract_ticker("MSFT - Microsoft Corporation"),
            Some(("MSFT".to_string(), TickerSource::LeadingToken))
        );
    }

    #[test]
    fn keyword_adjacent_token() {
        assert_eq!(
            extract_ticker("Holding of TSLA common stock"),
            Some(("TSLA".to_string(), TickerSource::StockKeyword))
        );
    }

    #[test]
    fn blacklist_rejects_common_words() {
        assert_eq!(extract_ticker("Company Common Stock"), None);
        assert_eq!(extract_ticker("Family Trust (TRUST)"), None);
        assert_eq!(extract_ticker("Index Fund [FUND]"), None);
    }

    #[test]
    fn bracketed_type_codes_are_not_tickers() {
        assert_eq!(extract_ticker("Camelot Growth Fund [MF]"), None);
        assert_eq!(extract_ticker("Legacy holding [ST]"), None);
    }

    #[test]
    fn format_rule() {
        assert!(is_valid_ticker("A"));
        assert!(is_valid_ticker("BRKB"));
        assert!(!is_valid_ticker("TOOLONG"));
        assert!(!is_valid_ticker("abc"));
        assert!(!is_valid_ticker("STOCK"));
    }

    #[test]
    fn fuzzy_fallback_reports_confidence() {
        let table = CompanyTable::load().unwrap();
        let (ticker, source, confidence) =
            extract_ticker_layered("Microsoft Corporation", &table, 0.8).unwrap();
        assert_eq!(ticker, "MSFT");
        assert_eq!(source, TickerSource::FuzzyCompany);
        assert!(confidence.unwrap() > 0.9);
    }

    #[test]
    fn fuzzy_fallback_respects_threshold() {
        let table = CompanyTable::load().unwrap();
        assert!(extract_ticker_layered("Family farm, Riverrun", &table, 0.8).is_none());
    }
}
