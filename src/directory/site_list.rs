//! The provider's site list: every forecast site with its province and position.
//!
//! The directory is loaded once from the site list CSV and is read-only afterwards.
//! Station resolution only consumes its rows (a site's position is the query point).

use crate::climate_stations::LatLon;
use crate::directory::error::DirectoryError;
use crate::directory::province::Province;
use log::{info, warn};
use polars::prelude::*;
use std::collections::HashMap;
use std::io::Cursor;

const CODE_COLUMN: &str = "codes";
const NAME_COLUMN: &str = "english names";
const PROVINCE_COLUMN: &str = "province codes";
const LATITUDE_COLUMN: &str = "latitude";
const LONGITUDE_COLUMN: &str = "longitude";

/// One forecast site from the site list.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectorySite {
    /// Local site code within the province (e.g. "s0000583").
    pub code: String,
    pub english_name: String,
    pub province: Province,
    /// Decimal degrees, south negative.
    pub latitude: f64,
    /// Decimal degrees, west negative.
    pub longitude: f64,
}

impl DirectorySite {
    pub fn location(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }

    /// The composite identifier used for current conditions, e.g. `"PE/s0000583"`.
    pub fn conditions_id(&self) -> String {
        format!("{}/{}", self.province, self.code)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    sites: Vec<DirectorySite>,
    index: HashMap<(Province, String), usize>,
}

impl StationDirectory {
    /// Parses the site list CSV.
    ///
    /// The file starts with a title line, followed by a header naming at least
    /// `Codes`, `English Names`, `Province Codes`, `Latitude` and `Longitude` (any case).
    /// Coordinates carry a hemisphere suffix such as `46.24N` / `63.13W`.
    /// Rows with an unknown province or an unreadable coordinate are skipped.
    pub fn from_csv(bytes: Vec<u8>) -> Result<Self, DirectoryError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_skip_rows(1)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .map_err(DirectoryError::CsvParse)?;

        let codes = string_column(&df, CODE_COLUMN)?;
        let names = string_column(&df, NAME_COLUMN)?;
        let provinces = string_column(&df, PROVINCE_COLUMN)?;
        let latitudes = string_column(&df, LATITUDE_COLUMN)?;
        let longitudes = string_column(&df, LONGITUDE_COLUMN)?;

        let mut sites = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let (Some(code), Some(name), Some(province), Some(lat), Some(lon)) = (
                codes.get(row),
                names.get(row),
                provinces.get(row),
                latitudes.get(row),
                longitudes.get(row),
            ) else {
                warn!("Site list row {} has empty fields, skipping", row);
                continue;
            };

            let province = match province.parse::<Province>() {
                Ok(p) => p,
                Err(e) => {
                    warn!("Site list row {} ({}): {}", row, code, e);
                    continue;
                }
            };
            let (Some(latitude), Some(longitude)) = (parse_coordinate(lat), parse_coordinate(lon))
            else {
                warn!(
                    "Site list row {} ({}): unreadable position '{}', '{}'",
                    row, code, lat, lon
                );
                continue;
            };

            sites.push(DirectorySite {
                code: code.trim().to_string(),
                english_name: name.trim().to_string(),
                province,
                latitude,
                longitude,
            });
        }

        info!("Loaded {} sites from site list", sites.len());
        Ok(Self::from_sites(sites))
    }

    pub fn from_sites(sites: Vec<DirectorySite>) -> Self {
        let index = sites
            .iter()
            .enumerate()
            .map(|(i, site)| ((site.province, site.code.clone()), i))
            .collect();
        Self { sites, index }
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DirectorySite> {
        self.sites.iter()
    }

    /// Looks up a site by province and local site code.
    pub fn get(&self, province: Province, code: &str) -> Option<&DirectorySite> {
        self.index
            .get(&(province, code.to_string()))
            .map(|&i| &self.sites[i])
    }

    /// Sites of one province, in file order.
    pub fn in_province(&self, province: Province) -> impl Iterator<Item = &DirectorySite> {
        self.sites.iter().filter(move |s| s.province == province)
    }

    /// Finds a site in a province by its English name.
    pub fn find_by_name(&self, province: Province, english_name: &str) -> Option<&DirectorySite> {
        self.in_province(province)
            .find(|s| s.english_name == english_name)
    }
}

fn string_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, DirectoryError> {
    let column = df
        .get_columns()
        .iter()
        .find(|c| c.name().as_str().trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| DirectoryError::MissingColumn(name.to_string()))?;
    column
        .as_materialized_series()
        .str()
        .map_err(DirectoryError::CsvParse)
}

/// Parses a coordinate such as `46.24N` or `63.13W` into signed decimal degrees.
/// A bare number is taken as is.
pub(crate) fn parse_coordinate(value: &str) -> Option<f64> {
    let value = value.trim();
    let (number, sign) = match value.chars().last()? {
        'N' | 'n' | 'E' | 'e' => (&value[..value.len() - 1], 1.0),
        'S' | 's' | 'W' | 'w' => (&value[..value.len() - 1], -1.0),
        _ => (value, 1.0),
    };
    number
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v * sign)
}
