// Data model shared by the API client and the analytics crate.
pub mod models;

pub use models::{closes, HistoryPeriod, PricePoint, TimeFrame};
