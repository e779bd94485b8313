pub mod collector;
pub mod config;
pub mod errors;
pub mod results;
pub mod scanner;
pub mod search;
pub mod targets;

pub use config::SearchConfig;
pub use errors::{SearchError, SearchResult};
pub use results::{MatchLine, ScanReport, SearchSummary, WriteReport};
pub use search::search;
