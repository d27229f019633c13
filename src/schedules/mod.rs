//! One extractor per disclosure schedule, plus header and certification.

pub mod agreements;
pub mod assets;
pub mod certification;
pub mod charity;
pub mod earned_income;
pub mod gifts;
pub mod header;
pub mod liabilities;
pub mod positions;
pub mod transactions;
pub mod travel;

use regex::Regex;

/// The nine disclosure categories, in form order A through I.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleId {
    Assets,
    Transactions,
    EarnedIncome,
    Liabilities,
    Positions,
    Agreements,
    Gifts,
    Travel,
    Charity,
}

impl ScheduleId {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(ScheduleId::Assets),
            'B' => Some(ScheduleId::Transactions),
            'C' => Some(ScheduleId::EarnedIncome),
            'D' => Some(ScheduleId::Liabilities),
            'E' => Some(ScheduleId::Positions),
            'F' => Some(ScheduleId::Agreements),
            'G' => Some(ScheduleId::Gifts),
            'H' => Some(ScheduleId::Travel),
            'I' => Some(ScheduleId::Charity),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            ScheduleId::Assets => 'A',
            ScheduleId::Transactions => 'B',
            ScheduleId::EarnedIncome => 'C',
            ScheduleId::Liabilities => 'D',
            ScheduleId::Positions => 'E',
            ScheduleId::Agreements => 'F',
            ScheduleId::Gifts => 'G',
            ScheduleId::Travel => 'H',
            ScheduleId::Charity => 'I',
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ScheduleId::Assets => "Assets and Unearned Income",
            ScheduleId::Transactions => "Transactions",
            ScheduleId::EarnedIncome => "Earned Income",
            ScheduleId::Liabilities => "Liabilities",
            ScheduleId::Positions => "Positions",
            ScheduleId::Agreements => "Agreements",
            ScheduleId::Gifts => "Gifts",
            ScheduleId::Travel => "Travel Payments and Reimbursements",
            ScheduleId::Charity => "Payments Made to Charity in Lieu of Honoraria",
        }
    }
}

/// A contiguous run of lines under one heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub heading: String,
    pub lines: Vec<String>,
}

/// Split document text into heading-delimited sections. A heading is a
/// "Schedule X" line, a certification banner, or a short all-caps line; text
/// before the first heading lands in a section with an empty heading (the
/// filer header block).
pub fn split_sections(text: &str) -> Vec<Section> {
    let schedule_re = Regex::new(r"(?i)^\s*schedule\s+[a-i]\b").unwrap();

    let mut sections: Vec<Section> = vec![Section {
        heading: String::new(),
        lines: Vec::new(),
    }];

    for raw_line in text.lines() {
        let line = raw_line.trim_end_matches('\u{c}').trim_end();
        let trimmed = line.trim();
        if schedule_re.is_match(trimmed) || is_banner_heading(trimmed) {
            sections.push(Section {
                heading: trimmed.to_string(),
                lines: Vec::new(),
            });
        } else if let Some(section) = sections.last_mut() {
            section.lines.push(line.to_string());
        }
    }

    sections.retain(|s| !s.heading.is_empty() || s.lines.iter().any(|l| !l.trim().is_empty()));
    sections
}

/// Short, all-letters, all-uppercase line: a section banner such as
/// "CERTIFICATION" or "EXCLUSIONS OF SPOUSE, DEPENDENT, OR TRUST INFORMATION".
fn is_banner_heading(line: &str) -> bool {
    if line.len() < 4 || line.len() > 80 {
        return false;
    }
    let has_letters = line.chars().any(|c| c.is_ascii_alphabetic());
    has_letters
        && line
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_whitespace() || ",.:;()-/'".contains(c))
}

/// Income descriptors recognized in Schedule A income-type cells.
pub const INCOME_TYPE_KEYWORDS: &[&str] = &[
    "dividends",
    "interest",
    "rent",
    "capital gains",
    "royalties",
    "partnership income",
    "trust income",
];
