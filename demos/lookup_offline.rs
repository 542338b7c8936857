use chrono::NaiveDate;
use climate_station::{
    ClimateStationError, FetchError, LatLon, Province, StationDirectory, StationLookup,
    StationSearchResults,
};

const SITE_LIST: &str = "\
Site Names,,,,,
Codes,English Names,French Names,Province Codes,Latitude,Longitude
s0000583,Charlottetown,Charlottetown,PE,46.24N,63.13W
s0000584,Summerside,Summerside,PE,46.39N,63.79W
";

// A station search response as the provider shapes it: keyed by station name.
const SEARCH_RESPONSE: &str = r#"{
    "CHARLOTTETOWN A": {"id": 6526, "prov": "PE", "proximity": 4.11,
        "hlyRange": "1953-01-01|2012-09-30", "dlyRange": "1872-07-01|2012-09-30", "mlyRange": "1872-01-01|2012-09-01"},
    "CHARLOTTETOWN A (2012)": {"id": 50621, "prov": "PE", "proximity": 5.96,
        "hlyRange": "2012-09-10|2024-02-08", "dlyRange": "2012-09-10|2024-02-08", "mlyRange": "|"},
    "CHARLOTTETOWN CDA CS": {"id": 30308, "prov": "PE", "proximity": 1.87,
        "hlyRange": "2000-10-01|2024-02-08", "dlyRange": "2000-10-01|2024-02-07", "mlyRange": "2000-10-01|2007-02-01"}
}"#;

#[tokio::main]
async fn main() -> Result<(), ClimateStationError> {
    let directory = StationDirectory::from_csv(SITE_LIST.as_bytes().to_vec())?;
    let site = directory
        .find_by_name(Province::PE, "Charlottetown")
        .ok_or_else(|| FetchError::MalformedResponse("site not in list".to_string()))?;

    let lookup = StationLookup::new(|at: LatLon, radius_km: f64, limit: usize| async move {
        println!("Searching {} stations within {} km of {:?}", limit, radius_km, at);
        let results: StationSearchResults = serde_json::from_str(SEARCH_RESPONSE)?;
        Ok::<_, FetchError>(results.into_records())
    });

    let yesterday = NaiveDate::from_ymd_opt(2024, 2, 8).unwrap();
    let station = lookup
        .lookup()
        .location(site.location())
        .reference_date(yesterday)
        .call()
        .await?;

    match station {
        Some(id) => println!("Nearest station with daily data through {}: {}", yesterday, id),
        None => println!("No station near {} is up to date", site.english_name),
    }
    Ok(())
}
