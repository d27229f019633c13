use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Layout primitive kinds produced by a document-analysis backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Line,
    Word,
    KeyValue,
    Table,
    Cell,
    Selectable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyValueRole {
    Key,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionStatus {
    Selected,
    NotSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// One layout block from a document-analysis pass. Vendor-neutral: any
/// forms/OCR engine's output can be mapped onto this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
    pub page: u32,
    #[serde(default)]
    pub geometry: BoundingBox,
    #[serde(default)]
    pub text: String,
    /// Ids of child blocks (table -> cells, line -> words, key -> value).
    #[serde(default)]
    pub relationships: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_role: Option<KeyValueRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionStatus>,
}

impl Block {
    pub fn line(id: impl Into<String>, page: u32, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: BlockKind::Line,
            page,
            geometry: BoundingBox::default(),
            text: text.into(),
            relationships: Vec::new(),
            entity_role: None,
            row_index: None,
            column_index: None,
            selection: None,
        }
    }

    pub fn cell(
        id: impl Into<String>,
        page: u32,
        row: u32,
        column: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: BlockKind::Cell,
            page,
            geometry: BoundingBox::default(),
            text: text.into(),
            relationships: Vec::new(),
            entity_role: None,
            row_index: Some(row),
            column_index: Some(column),
            selection: None,
        }
    }
}

/// Immutable extraction input: either pre-extracted text or an
/// analysis-block sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RawDocument {
    Text(String),
    Blocks(Vec<Block>),
}

impl RawDocument {
    pub fn from_text(text: impl Into<String>) -> Self {
        RawDocument::Text(text.into())
    }

    pub fn page_count(&self) -> u32 {
        match self {
            // Form feeds separate rendered pages in plain-text extraction.
            RawDocument::Text(t) => (t.matches('\u{c}').count() as u32) + 1,
            RawDocument::Blocks(blocks) => {
                blocks.iter().map(|b| b.page).max().unwrap_or(0).max(1)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawDocument::Text(t) => t.trim().is_empty(),
            RawDocument::Blocks(blocks) => blocks.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    PlainText,
    OcrText,
    CloudForms,
}

/// Per-strategy attempt output, consumed by the pipeline's quality gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub text: String,
    pub confidence: f64,
    pub method: ExtractionMethod,
    pub strategy_name: String,
    pub page_count: u32,
    pub character_count: usize,
    pub word_count: usize,
    pub duration_ms: u64,
    #[serde(default)]
    pub quality_metrics: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl ExtractionResult {
    /// Character and word counts are derived from `text` unless overridden
    /// with [`ExtractionResult::with_counts`].
    pub fn new(
        text: impl Into<String>,
        confidence: f64,
        method: ExtractionMethod,
        strategy_name: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let character_count = text.chars().count();
        let word_count = text.split_whitespace().count();
        Self {
            text,
            confidence: confidence.clamp(0.0, 1.0),
            method,
            strategy_name: strategy_name.into(),
            page_count: 1,
            character_count,
            word_count,
            duration_ms: 0,
            quality_metrics: HashMap::new(),
            warnings: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    pub fn with_counts(mut self, character_count: usize, word_count: usize) -> Self {
        self.character_count = character_count;
        self.word_count = word_count;
        self
    }

    pub fn with_pages(mut self, page_count: u32) -> Self {
        self.page_count = page_count;
        self
    }

    /// Zero-confidence result recording a failed strategy attempt.
    pub fn failed(
        method: ExtractionMethod,
        strategy_name: impl Into<String>,
        error: impl std::fmt::Display,
    ) -> Self {
        let mut result = Self::new("", 0.0, method, strategy_name);
        result.quality_metrics.insert(
            "error".to_string(),
            serde_json::Value::String(error.to_string()),
        );
        result
    }
}

/// Whose asset/liability an entry reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OwnerCode {
    #[default]
    #[serde(rename = "Self")]
    Self_,
    #[serde(rename = "SP")]
    Spouse,
    #[serde(rename = "DC")]
    DependentChild,
    #[serde(rename = "JT")]
    Joint,
}

impl OwnerCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerCode::Self_ => "Self",
            OwnerCode::Spouse => "SP",
            OwnerCode::DependentChild => "DC",
            OwnerCode::Joint => "JT",
        }
    }
}

impl std::fmt::Display for OwnerCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A disclosure dollar bracket. `high == None` means an open-ended
/// "Over $N" bracket; `(None, None)` means the source text was unparsable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ValueRange {
    pub low: Option<u64>,
    pub high: Option<u64>,
}

impl ValueRange {
    pub fn bracket(low: u64, high: u64) -> Self {
        debug_assert!(low <= high);
        Self {
            low: Some(low),
            high: Some(high),
        }
    }

    /// "Over $N" brackets store low = N + 1 so adjacent brackets stay disjoint.
    pub fn over(amount: u64) -> Self {
        Self {
            low: Some(amount + 1),
            high: None,
        }
    }

    /// "None" / below-threshold disclosures map to the statutory (0, 1000).
    pub fn none_disclosed() -> Self {
        Self {
            low: Some(0),
            high: Some(1000),
        }
    }

    pub fn unparsed() -> Self {
        Self {
            low: None,
            high: None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.low.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Etf,
    MutualFund,
    Bond,
    Cryptocurrency,
    StockOption,
    RealEstate,
    AlternativeInvestment,
    Stock,
    Other,
}

/// Schedule A entry: an asset with optional unearned-income attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_code: Option<OwnerCode>,
    pub asset_type: AssetType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    /// Confidence of a fuzzy company-name ticker match; None for pattern hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker_confidence: Option<f64>,
    pub value_range: ValueRange,
    #[serde(default)]
    pub income_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_range: Option<ValueRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Purchase,
    Sale,
    PartialSale,
    Exchange,
}

/// PTR entry: one securities transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub owner_code: OwnerCode,
    pub asset_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_type_code: Option<String>,
    pub kind: TransactionKind,
    pub transaction_date: NaiveDate,
    pub notification_date: NaiveDate,
    pub amount_range: ValueRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital_gain_over_200: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Liability {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_code: Option<OwnerCode>,
    pub creditor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_incurred: Option<String>,
    pub liability_type: String,
    pub amount_range: ValueRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub title: String,
    pub organization: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub parties: String,
    pub agreement_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gift {
    pub source: String,
    pub description: String,
    pub value_range: ValueRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_received: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Travel {
    pub source: String,
    pub date_from: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    pub itinerary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnedIncome {
    pub source: String,
    pub income_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharityContribution {
    pub source: String,
    pub activity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    pub charity_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub is_certified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_date: Option<NaiveDate>,
}

/// Three-state schedule container: absence of a schedule section is not the
/// same thing as a schedule the filer explicitly disclosed as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "entries", rename_all = "snake_case")]
pub enum ScheduleList<T> {
    NotFound,
    DisclosedNone,
    Entries(Vec<T>),
}

// Manual impl: the derive would put a `T: Default` bound on entry types.
impl<T> Default for ScheduleList<T> {
    fn default() -> Self {
        ScheduleList::NotFound
    }
}

impl<T> ScheduleList<T> {
    pub fn entries(&self) -> &[T] {
        match self {
            ScheduleList::Entries(e) => e,
            _ => &[],
        }
    }

    pub fn entries_mut(&mut self) -> &mut [T] {
        match self {
            ScheduleList::Entries(e) => e,
            _ => &mut [],
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn was_found(&self) -> bool {
        !matches!(self, ScheduleList::NotFound)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilingHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filing_year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_start: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_end: Option<NaiveDate>,
    /// Single-letter filing-type code, see `domain::codes`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filing_type: Option<String>,
}

/// All nine schedules of a disclosure form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Schedules {
    pub assets: ScheduleList<Asset>,
    pub transactions: ScheduleList<Transaction>,
    pub earned_income: ScheduleList<EarnedIncome>,
    pub liabilities: ScheduleList<Liability>,
    pub positions: ScheduleList<Position>,
    pub agreements: ScheduleList<Agreement>,
    pub gifts: ScheduleList<Gift>,
    pub travel: ScheduleList<Travel>,
    pub charity: ScheduleList<CharityContribution>,
}

/// The typed record a document extracts to. Built once by the accepted
/// strategy, then filled in place by the normalizer and scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilingRecord {
    pub header: FilingHeader,
    pub schedules: Schedules,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification: Option<Certification>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfidenceReport {
    pub field_scores: HashMap<String, f64>,
    pub overall: f64,
    pub completeness_pct: f64,
    pub missing_required: Vec<String>,
    pub suspicious_patterns: Vec<String>,
    pub needs_better_ocr: bool,
    pub needs_manual_review: bool,
}
