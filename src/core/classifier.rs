//! Infers which schedule an unclassified table belongs to, and the filing
//! type of a document, from header/keyword signals.

use crate::domain::codes::FilingType;
use crate::schedules::ScheduleId;
use regex::Regex;

/// One keyword rule: all of `require_all`, at least one of `require_any`
/// (when non-empty), none of `forbid`.
struct Rule {
    schedule: ScheduleId,
    require_all: &'static [&'static str],
    require_any: &'static [&'static str],
    forbid: &'static [&'static str],
}

/// Ordered rule list; the first match wins. Travel is deliberately tested
/// before gifts so a reimbursed-travel table mentioning "gift" cannot
/// misclassify, and the gift rule still forbids "travel" outright.
const RULES: &[Rule] = &[
    Rule {
        schedule: ScheduleId::Transactions,
        require_all: &["transaction"],
        require_any: &["date", "type", "amount", "notification"],
        forbid: &[],
    },
    Rule {
        schedule: ScheduleId::Liabilities,
        require_all: &["creditor"],
        require_any: &["liability", "debt", "loan", "amount"],
        forbid: &[],
    },
    Rule {
        schedule: ScheduleId::Travel,
        require_all: &[],
        require_any: &["travel", "itinerary", "destination"],
        forbid: &[],
    },
    Rule {
        schedule: ScheduleId::Gifts,
        require_all: &["gift"],
        require_any: &["donor", "source", "value", "description"],
        forbid: &["travel"],
    },
    Rule {
        schedule: ScheduleId::Gifts,
        require_all: &["source", "value", "date received"],
        require_any: &[],
        forbid: &["travel"],
    },
    Rule {
        schedule: ScheduleId::Charity,
        require_all: &[],
        require_any: &["charity", "honoraria", "honorarium"],
        forbid: &[],
    },
    Rule {
        schedule: ScheduleId::Agreements,
        require_all: &[],
        require_any: &["agreement", "parties to", "arrangement"],
        forbid: &[],
    },
    Rule {
        schedule: ScheduleId::Positions,
        require_all: &["position"],
        require_any: &["organization", "title", "entity"],
        forbid: &[],
    },
    Rule {
        schedule: ScheduleId::Assets,
        require_all: &["asset"],
        require_any: &["value", "income", "owner", "unearned"],
        forbid: &["transaction"],
    },
    Rule {
        schedule: ScheduleId::EarnedIncome,
        require_all: &["source", "amount"],
        require_any: &["type", "income", "salary"],
        forbid: &["transaction", "asset"],
    },
];

/// Classify a table from its already-split header cells.
pub fn classify_header(cells: &[String]) -> Option<ScheduleId> {
    classify_text(&cells.join(" "))
}

/// Classify a header line or paragraph of text.
pub fn classify_text(text: &str) -> Option<ScheduleId> {
    let haystack = text.to_lowercase();

    for rule in RULES {
        if !rule.require_all.iter().all(|kw| haystack.contains(kw)) {
            continue;
        }
        if !rule.require_any.is_empty() && !rule.require_any.iter().any(|kw| haystack.contains(kw))
        {
            continue;
        }
        if rule.forbid.iter().any(|kw| haystack.contains(kw)) {
            continue;
        }
        return Some(rule.schedule);
    }
    None
}

/// Infer the single-letter filing-type code from document text: an explicit
/// "Filing Type: X" wins, then title keywords.
pub fn infer_filing_type(text: &str) -> Option<FilingType> {
    let explicit = Regex::new(r"(?i)filing\s+type\s*[:\-]?\s*([A-Z])\b").unwrap();
    if let Some(caps) = explicit.captures(text) {
        if let Some(ft) = FilingType::from_code(&caps[1]) {
            return Some(ft);
        }
    }

    let lower = text.to_lowercase();
    if lower.contains("periodic transaction report") {
        Some(FilingType::Periodic)
    } else if lower.contains("extension request") {
        Some(FilingType::Extension)
    } else if lower.contains("termination report") {
        Some(FilingType::Termination)
    } else if lower.contains("candidate report") {
        Some(FilingType::Candidate)
    } else if lower.contains("new filer report") {
        Some(FilingType::NewFiler)
    } else if lower.contains("withdrawal") {
        Some(FilingType::WithdrawalNotice)
    } else if lower.contains("campaign notice") {
        Some(FilingType::CampaignNotice)
    } else if lower.contains("annual report") || lower.contains("financial disclosure report") {
        Some(FilingType::Annual)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn liabilities_header() {
        assert_eq!(
            classify_header(&cells(&["Creditor", "Amount of Liability"])),
            Some(ScheduleId::Liabilities)
        );
    }

    #[test]
    fn gifts_header_without_travel() {
        assert_eq!(
            classify_header(&cells(&["Source", "Value", "Date Received"])),
            Some(ScheduleId::Gifts)
        );
    }

    #[test]
    fn travel_header_mentioning_gift_is_travel() {
        // Confusion case: a reimbursed-travel table that mentions gifts.
        assert_eq!(
            classify_header(&cells(&[
                "Source",
                "Itinerary",
                "Travel or gift reimbursement",
                "Dates"
            ])),
            Some(ScheduleId::Travel)
        );
    }

    #[test]
    fn transactions_header() {
        assert_eq!(
            classify_header(&cells(&["Owner", "Asset", "Transaction Type", "Date", "Amount"])),
            Some(ScheduleId::Transactions)
        );
    }

    #[test]
    fn assets_header() {
        assert_eq!(
            classify_header(&cells(&["Asset", "Owner", "Value of Asset", "Income Type(s)"])),
            Some(ScheduleId::Assets)
        );
    }

    #[test]
    fn positions_and_agreements() {
        assert_eq!(
            classify_header(&cells(&["Position", "Name of Organization"])),
            Some(ScheduleId::Positions)
        );
        assert_eq!(
            classify_header(&cells(&["Date", "Parties To", "Terms of Agreement"])),
            Some(ScheduleId::Agreements)
        );
    }

    #[test]
    fn charity_and_earned_income() {
        assert_eq!(
            classify_header(&cells(&["Source", "Activity", "Date", "Amount", "Charity"])),
            Some(ScheduleId::Charity)
        );
        assert_eq!(
            classify_header(&cells(&["Source", "Type", "Amount of Income"])),
            Some(ScheduleId::EarnedIncome)
        );
    }

    #[test]
    fn unmatched_header_is_unclassified() {
        assert_eq!(classify_header(&cells(&["Page", "of", "Report"])), None);
    }

    #[test]
    fn filing_type_from_title() {
        assert_eq!(
            infer_filing_type("PERIODIC TRANSACTION REPORT\nHon. Arthur King"),
            Some(FilingType::Periodic)
        );
        assert_eq!(
            infer_filing_type("Filing Type: A\nCalendar Year 2024"),
            Some(FilingType::Annual)
        );
        assert_eq!(infer_filing_type("random text"), None);
    }
}
