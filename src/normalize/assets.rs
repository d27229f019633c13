//! Asset-name cleanup and classification.
//!
//! Ownership-prefix stripping is an explicit ordered rule list applied until
//! stable, so the behavior is auditable instead of emergent from repeated
//! ad hoc substitution.

use crate::domain::codes;
use crate::domain::model::{AssetType, FilingRecord, OwnerCode};
use crate::normalize::companies::CompanyTable;
use crate::normalize::ticker::extract_ticker_layered;
use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedAsset {
    pub name: String,
    /// Ownership indicator detected while stripping, kept separate from the
    /// cleaned name.
    pub owner: Option<OwnerCode>,
}

/// Keep only the text after the final arrow. Arrow notation records an
/// account-to-final-asset transition ("Brokerage ⇒ Acme Corp"); the final
/// segment names the asset that was actually held.
pub fn resolve_arrows(name: &str) -> &str {
    let mut rest = name;
    for arrow in ["\u{21d2}", "\u{2192}", "->"] {
        if let Some(idx) = rest.rfind(arrow) {
            rest = &rest[idx + arrow.len()..];
        }
    }
    rest.trim()
}

/// The ordered prefix-stripping rules. Each is applied at the start of the
/// name only; the pass repeats until no rule changes the text.
fn prefix_rules() -> Vec<(Regex, Option<&'static str>)> {
    vec![
        // Bare owner marker, optionally punctuated: "SP ", "JT: ", "DC - "
        (
            Regex::new(r"(?i)^\s*(SP|JT|DC|SO)\b\s*[:\-]?\s+").unwrap(),
            Some("code"),
        ),
        // Spelled-out owner boilerplate: "Spouse:", "Joint -"
        (
            Regex::new(r"(?i)^\s*(self|spouse|dependent\s+child|joint)\s*[:\-]\s*").unwrap(),
            Some("word"),
        ),
        // Filing boilerplate occasionally glued to the name column
        (
            Regex::new(r"(?i)^\s*owner(?:ship)?\s*[:\-]\s*").unwrap(),
            None,
        ),
        (Regex::new(r"(?i)^\s*asset\s+name\s*[:\-]\s*").unwrap(), None),
    ]
}

fn owner_from_marker(marker: &str) -> Option<OwnerCode> {
    match marker.to_uppercase().as_str() {
        "SP" | "SPOUSE" => Some(OwnerCode::Spouse),
        "DC" | "DEPENDENT CHILD" => Some(OwnerCode::DependentChild),
        "JT" | "JOINT" => Some(OwnerCode::Joint),
        "SELF" => Some(OwnerCode::Self_),
        // SO marks "spouse-owned" in some older layouts
        "SO" => Some(OwnerCode::Spouse),
        _ => None,
    }
}

/// Strip ownership metadata from the front of an asset name, recording the
/// detected indicator separately from the cleaned text.
pub fn strip_ownership_prefix(name: &str) -> CleanedAsset {
    let rules = prefix_rules();
    let mut current = name.trim().to_string();
    let mut owner: Option<OwnerCode> = None;

    loop {
        let mut changed = false;
        for (rule, captures_owner) in &rules {
            if let Some(caps) = rule.captures(&current) {
                if captures_owner.is_some() && owner.is_none() {
                    let marker = caps
                        .get(1)
                        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
                        .unwrap_or_default();
                    owner = owner_from_marker(&marker);
                }
                let stripped = rule.replace(&current, "").trim().to_string();
                if stripped != current {
                    current = stripped;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    CleanedAsset {
        name: current,
        owner,
    }
}

/// Full name normalization: arrows first, then prefix stripping.
pub fn clean_asset_name(raw: &str) -> CleanedAsset {
    strip_ownership_prefix(resolve_arrows(raw))
}

/// A bracketed two-letter code matching the embedded asset-type table,
/// e.g. "Acme Growth Fund [MF]".
pub fn bracketed_type_code(name: &str) -> Option<String> {
    let re = Regex::new(r"\[([A-Z5]{2})\]").unwrap();
    for caps in re.captures_iter(name) {
        let code = caps[1].to_string();
        if codes::asset_type_description(&code).is_some() {
            return Some(code);
        }
    }
    None
}

/// Keyword classification in fixed priority order. The first signal wins;
/// a found ticker implies Stock only when nothing more specific matched.
pub fn classify_asset_type(name: &str, ticker_found: bool) -> AssetType {
    let lower = name.to_lowercase();
    let has = |kws: &[&str]| kws.iter().any(|kw| lower.contains(kw));

    if let Some(code) = bracketed_type_code(name) {
        match code.as_str() {
            "EF" | "ET" => return AssetType::Etf,
            "MF" => return AssetType::MutualFund,
            "CS" | "GS" => return AssetType::Bond,
            "CT" => return AssetType::Cryptocurrency,
            "OP" | "SA" => return AssetType::StockOption,
            "RP" | "RE" | "FA" => return AssetType::RealEstate,
            "HE" | "HN" | "PE" => return AssetType::AlternativeInvestment,
            "ST" | "PS" | "RS" => return AssetType::Stock,
            _ => {}
        }
    }

    if has(&["etf", "exchange traded fund", "exchange-traded", "spdr", "ishares"]) {
        AssetType::Etf
    } else if has(&["mutual fund", "index fund", "money market fund", "bond fund", "growth fund"]) {
        AssetType::MutualFund
    } else if has(&["bond", "treasury", "municipal", "debenture", " note"]) {
        AssetType::Bond
    } else if has(&["bitcoin", "ethereum", "crypto", "digital asset", "stablecoin"]) {
        AssetType::Cryptocurrency
    } else if has(&["call option", "put option", "stock option", "warrant"]) {
        AssetType::StockOption
    } else if has(&["real estate", "real property", "rental property", "reit", "farmland", "residence", "property"]) {
        AssetType::RealEstate
    } else if has(&["hedge fund", "private equity", "venture", "partnership interest", "limited partnership"]) {
        AssetType::AlternativeInvestment
    } else if ticker_found || has(&["common stock", "shares", "stock"]) {
        AssetType::Stock
    } else {
        AssetType::Other
    }
}

/// Post-extraction normalization pass over a record: fills tickers, fuzzy
/// confidences, and asset types on Schedule A entries and PTR transactions
/// in place.
pub fn enrich_record(record: &mut FilingRecord, companies: &CompanyTable, fuzzy_threshold: f64) {
    for asset in record.schedules.assets.entries_mut() {
        let cleaned = clean_asset_name(&asset.name);
        if asset.owner_code.is_none() {
            asset.owner_code = cleaned.owner;
        }
        asset.name = cleaned.name;

        if asset.ticker.is_none() {
            if let Some((ticker, source, confidence)) =
                extract_ticker_layered(&asset.name, companies, fuzzy_threshold)
            {
                tracing::debug!(
                    ticker = %ticker,
                    source = source.as_str(),
                    "resolved ticker for asset"
                );
                asset.ticker = Some(ticker);
                asset.ticker_confidence = confidence;
            }
        }
        asset.asset_type = classify_asset_type(&asset.name, asset.ticker.is_some());
    }

    for tx in record.schedules.transactions.entries_mut() {
        if tx.ticker.is_none() {
            if let Some((ticker, _, _)) =
                extract_ticker_layered(&tx.asset_name, companies, fuzzy_threshold)
            {
                tx.ticker = Some(ticker);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keeps_final_segment() {
        assert_eq!(
            resolve_arrows("Brokerage Account \u{21d2} Apple Inc. (AAPL)"),
            "Apple Inc. (AAPL)"
        );
        assert_eq!(resolve_arrows("IRA -> Fund A -> Fund B"), "Fund B");
        assert_eq!(resolve_arrows("No arrows here"), "No arrows here");
    }

    #[test]
    fn prefix_stripping_records_owner() {
        let cleaned = strip_ownership_prefix("SP Acme Growth Fund");
        assert_eq!(cleaned.name, "Acme Growth Fund");
        assert_eq!(cleaned.owner, Some(OwnerCode::Spouse));
    }

    #[test]
    fn prefix_stripping_is_iterative() {
        let cleaned = strip_ownership_prefix("JT: Asset Name: Casterly Rock Mining");
        assert_eq!(cleaned.name, "Casterly Rock Mining");
        assert_eq!(cleaned.owner, Some(OwnerCode::Joint));
    }

    #[test]
    fn prefix_stripping_stable_without_markers() {
        let cleaned = strip_ownership_prefix("Winterfell Lumber LLC");
        assert_eq!(cleaned.name, "Winterfell Lumber LLC");
        assert_eq!(cleaned.owner, None);
    }

    #[test]
    fn spdr_is_not_an_owner_marker() {
        let cleaned = strip_ownership_prefix("SPDR S&P 500 ETF");
        assert_eq!(cleaned.name, "SPDR S&P 500 ETF");
        assert_eq!(cleaned.owner, None);
    }

    #[test]
    fn bracketed_code_lookup() {
        assert_eq!(
            bracketed_type_code("Acme Growth Fund [MF]"),
            Some("MF".to_string())
        );
        assert_eq!(bracketed_type_code("Acme [ZZ]"), None);
    }

    #[test]
    fn classification_priority() {
        assert_eq!(classify_asset_type("Vanguard Total Market ETF", false), AssetType::Etf);
        assert_eq!(
            classify_asset_type("Fidelity Growth Fund", false),
            AssetType::MutualFund
        );
        assert_eq!(classify_asset_type("US Treasury Bond", false), AssetType::Bond);
        assert_eq!(classify_asset_type("Bitcoin holdings", false), AssetType::Cryptocurrency);
        assert_eq!(
            classify_asset_type("AAPL call option", true),
            AssetType::StockOption
        );
        assert_eq!(
            classify_asset_type("Rental property, Lannisport CA", false),
            AssetType::RealEstate
        );
        assert_eq!(
            classify_asset_type("Blackwater Private Equity LP", false),
            AssetType::AlternativeInvestment
        );
        assert_eq!(classify_asset_type("Apple Inc.", true), AssetType::Stock);
        assert_eq!(classify_asset_type("Rare coin collection", false), AssetType::Other);
    }

    #[test]
    fn bracketed_code_outranks_keywords() {
        // "[ST]" pins Stock even though the name says "fund".
        assert_eq!(
            classify_asset_type("Legacy fund holding [ST]", false),
            AssetType::Stock
        );
    }
}
