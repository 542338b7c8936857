mod climate_stations;
mod directory;
mod error;
mod history;
mod stations;
mod types;
mod utils;

pub use climate_stations::*;
pub use error::ClimateStationError;
pub use utils::{previous_day, yesterday};

pub use stations::error::FetchError;
pub use stations::lookup::{
    lookup_station, DirectoryFetcher, StationLookup, DEFAULT_CANDIDATE_LIMIT, DEFAULT_RADIUS_KM,
};
pub use stations::normalize::{normalize, normalize_all};
pub use stations::range_parser::parse_range;
pub use stations::resolver::{rank_candidates, select};

pub use types::station::*;

pub use directory::error::DirectoryError;
pub use directory::province::Province;
pub use directory::site_list::{DirectorySite, StationDirectory};

pub use history::conditions::{
    current_conditions, Condition, ConditionRow, ConditionsFetcher, ConditionsTable,
};
pub use history::dataset::{HistoricalDataset, HistoryFetcher, StationHistory, StationMetadata};
pub use history::error::HistoryError;
