//! Market data: providers, the ticker allow-list, the daily cache and the loader.

pub mod cache;
pub mod csv_import;
pub mod loader;
pub mod provider;
pub mod static_provider;
pub mod synthetic;
pub mod universe;
pub mod yahoo;

pub use cache::{CacheEntry, CacheLookup, DailyCache};
pub use csv_import::CsvProvider;
pub use loader::{build_provider, DataLoader};
pub use provider::{DataError, DataSource, FetchResult, MarketDataProvider};
pub use static_provider::StaticProvider;
pub use synthetic::SyntheticProvider;
pub use universe::TickerList;
pub use yahoo::YahooProvider;
