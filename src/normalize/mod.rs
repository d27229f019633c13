pub mod assets;
pub mod companies;
pub mod ticker;

pub use assets::{classify_asset_type, clean_asset_name, enrich_record};
pub use companies::CompanyTable;
pub use ticker::{extract_ticker, extract_ticker_layered, TickerSource};
