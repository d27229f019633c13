//! Reference code tables embedded for schema compatibility with the
//! government form definitions. Kept verbatim; do not normalize wording.

/// Filing types keyed by the single-letter code on the form header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilingType {
    /// Periodic transaction report
    Periodic,
    /// Annual report
    Annual,
    /// New filer report
    NewFiler,
    /// Candidate report
    Candidate,
    /// Termination report
    Termination,
    /// Extension request
    Extension,
    /// Campaign notice
    CampaignNotice,
    /// Withdrawal notice
    WithdrawalNotice,
}

impl FilingType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "P" => Some(FilingType::Periodic),
            "A" => Some(FilingType::Annual),
            "B" => Some(FilingType::NewFiler),
            "C" => Some(FilingType::Candidate),
            "T" => Some(FilingType::Termination),
            "X" => Some(FilingType::Extension),
            "D" => Some(FilingType::CampaignNotice),
            "W" => Some(FilingType::WithdrawalNotice),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            FilingType::Periodic => "P",
            FilingType::Annual => "A",
            FilingType::NewFiler => "B",
            FilingType::Candidate => "C",
            FilingType::Termination => "T",
            FilingType::Extension => "X",
            FilingType::CampaignNotice => "D",
            FilingType::WithdrawalNotice => "W",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FilingType::Periodic => "Periodic Transaction Report",
            FilingType::Annual => "Annual Report",
            FilingType::NewFiler => "New Filer Report",
            FilingType::Candidate => "Candidate Report",
            FilingType::Termination => "Termination Report",
            FilingType::Extension => "Extension Request",
            FilingType::CampaignNotice => "Campaign Notice",
            FilingType::WithdrawalNotice => "Withdrawal Notice",
        }
    }
}

/// Two-letter asset-type codes used in bracketed annotations, e.g.
/// "Acme Fund [MF]".
pub const ASSET_TYPE_CODES: &[(&str, &str)] = &[
    ("5C", "529 College Savings Plan"),
    ("5F", "529 Portfolio"),
    ("5P", "529 Prepaid Tuition Plan"),
    ("AB", "Asset-Backed Securities"),
    ("BA", "Bank Accounts, Money Market Accounts and CDs"),
    ("BK", "Brokerage Accounts"),
    ("CO", "Collectibles"),
    ("CS", "Corporate Securities (Bonds and Notes)"),
    ("CT", "Cryptocurrency"),
    ("DB", "Defined Benefit Pension"),
    ("DO", "Debts Owed to the Filer"),
    ("DS", "Delaware Statutory Trust"),
    ("EF", "Exchange Traded Funds (ETF)"),
    ("EQ", "Excepted/Qualified Blind Trust"),
    ("ET", "Exchange Traded Notes"),
    ("FA", "Farms"),
    ("FE", "Foreign Exchange Position (Currency)"),
    ("FN", "Fixed Annuity"),
    ("FU", "Futures"),
    ("GS", "Government Securities and Agency Debt"),
    ("HE", "Hedge Funds and Private Equity Funds"),
    ("HN", "Hedge Funds and Private Equity Funds (EIF)"),
    ("IC", "Investment Club"),
    ("IH", "IRA (Held in Cash)"),
    ("IP", "Intellectual Property"),
    ("IR", "IRA"),
    ("MA", "Managed Accounts (e.g., SMA and UMA)"),
    ("MF", "Mutual Funds"),
    ("OI", "Ownership Interest (Engaged in a Trade or Business)"),
    ("OL", "Ownership Interest (Holding Investments)"),
    ("OP", "Options"),
    ("OT", "Other"),
    ("PE", "Pensions"),
    ("PM", "Precious Metals"),
    ("PS", "Stock (Not Publicly Traded)"),
    ("RE", "Real Estate Invest. Trust (REIT)"),
    ("RP", "Real Property"),
    ("RS", "Restricted Stock Units (RSUs)"),
    ("SA", "Stock Appreciation Right"),
    ("ST", "Stock"),
    ("TR", "Trust"),
    ("VA", "Variable Annuity"),
    ("VI", "Variable Insurance"),
    ("WU", "Whole/Universal Insurance"),
];

pub fn asset_type_description(code: &str) -> Option<&'static str> {
    let code = code.trim().to_uppercase();
    ASSET_TYPE_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, d)| *d)
}
