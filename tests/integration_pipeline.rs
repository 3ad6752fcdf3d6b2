//! End-to-end tests for the ingest pipeline through the public API
//!
//! A realistic snapshot is gzip-compressed to a temporary file and pulled
//! through the file source, so the full fetch cycle runs without a network.

use flate2::Compression;
use flate2::write::GzEncoder;
use metar_ingest::app::services::fetcher::{FileSource, ObservationStore};
use metar_ingest::config::{CoordinatePolicy, FetchConfig, HeaderPolicy, ParserOptions};
use metar_ingest::{FetchOutcome, FlightCategory, MetarFetcher, RecordParser, decompress, parse};
use std::io::Write;
use std::sync::Arc;
use tempfile::TempDir;

const HEADER: &str = "raw_text,station_id,observation_time,latitude,longitude,temp_c,dewpoint_c,\
wind_dir_degrees,wind_speed_kt,wind_gust_kt,visibility_statute_mi,altim_in_hg,sea_level_pressure_mb,\
corrected,auto,auto_station,maintenance_indicator_on,no_signal,lightning_sensor_off,freezing_rain_sensor_off,\
present_weather_sensor_off,wx_string,sky_cover,cloud_base_ft_agl,sky_cover,cloud_base_ft_agl,sky_cover,\
cloud_base_ft_agl,sky_cover,cloud_base_ft_agl,flight_category,three_hr_pressure_tendency_mb,maxT_c,minT_c,\
maxT24hr_c,minT24hr_c,precip_in,pcp3hr_in,pcp6hr_in,pcp24hr_in,snow_in,vert_vis_ft,metar_type,elevation_m";

/// Build a 44-column record with the mapped positions populated
#[allow(clippy::too_many_arguments)]
fn record(
    station: &str,
    lat: &str,
    lon: &str,
    temp: &str,
    visibility: &str,
    sky: &str,
    base: &str,
    category: &str,
) -> String {
    let mut fields = vec![String::new(); 44];
    fields[0] = format!("{} 121853Z 17008KT 10SM {}{:03} 08/04 A3012", station, sky, 20);
    fields[1] = station.to_string();
    fields[2] = "2024-03-12T18:53:00Z".to_string();
    fields[3] = lat.to_string();
    fields[4] = lon.to_string();
    fields[5] = temp.to_string();
    fields[6] = "4.4".to_string();
    fields[7] = "170".to_string();
    fields[8] = "8".to_string();
    fields[10] = visibility.to_string();
    fields[11] = "30.12".to_string();
    fields[22] = sky.to_string();
    fields[23] = base.to_string();
    fields[30] = category.to_string();
    fields[42] = "METAR".to_string();
    fields[43] = "137".to_string();
    fields.join(",")
}

fn snapshot_text() -> String {
    let rows = [
        HEADER.to_string(),
        record("KSEA", "47.4489", "-122.3094", "8.3", "10+", "FEW", "2000", "VFR"),
        record("EGLL", "51.4775", "-0.4614", "11.0", "6.21", "BKN", "1200", "MVFR"),
        record("KPDX", "45.5958", "-122.6093", "", "2.5", "OVC", "800", "IFR"),
        "KBAD 121853Z AUTO,KBAD,2024-03-12T18:53:00Z".to_string(),
        record("KBFI", "", "-122.3020", "7.8", "0.25", "OVC", "200", "LIFR"),
        record("KOLM", "46.9694", "-122.9025", "6.1", "10+", "", "", ""),
    ];
    let mut text = rows.join("\n");
    text.push('\n');
    text
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn write_snapshot(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("metars.cache.csv.gz");
    std::fs::write(&path, gzip(snapshot_text().as_bytes())).unwrap();
    path
}

#[test]
fn test_decompress_then_parse() {
    let text = decompress(&gzip(snapshot_text().as_bytes())).unwrap();
    let observations = parse(&String::from_utf8(text).unwrap());

    let stations: Vec<&str> = observations.iter().map(|o| o.station_id.as_str()).collect();
    assert_eq!(stations, vec!["KSEA", "KPDX", "KBFI", "KOLM"]);

    let kpdx = &observations[1];
    assert_eq!(kpdx.temp_c, None);
    assert_eq!(kpdx.visibility, "2.5");
    assert_eq!(kpdx.category(), FlightCategory::Ifr);

    let kbfi = &observations[2];
    assert_eq!(kbfi.latitude, 0.0);
    assert_eq!(kbfi.longitude, -122.302);

    let kolm = &observations[3];
    assert_eq!(kolm.sky_cover, None);
    assert_eq!(kolm.cloud_base_ft_agl, None);
    assert_eq!(kolm.flight_category, "UNKNOWN");
}

#[test]
fn test_parser_statistics_account_for_every_line() {
    let options = ParserOptions::default()
        .with_coordinate_policy(CoordinatePolicy::Reject)
        .with_header_policy(HeaderPolicy::Strict);
    let result = RecordParser::new(options).parse(&snapshot_text()).unwrap();

    assert_eq!(result.observations.len(), 3);
    assert_eq!(result.stats.total_lines, 6);
    assert_eq!(result.stats.filtered_prefix, 1);
    assert_eq!(result.stats.skipped_short, 1);
    assert_eq!(result.stats.rejected_coordinates, 1);
    assert_eq!(
        result.stats.observations_parsed + result.stats.lines_dropped(),
        result.stats.total_lines
    );
}

#[tokio::test]
async fn test_file_snapshot_through_fetch_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_snapshot(&temp_dir);
    let scratch = temp_dir.path().join("metars.cache.csv");

    let store = Arc::new(ObservationStore::new());
    let config = FetchConfig::default().with_scratch_path(Some(scratch.clone()));
    let fetcher = MetarFetcher::new(FileSource::new(&path), config, store.clone());

    let outcome = fetcher.fetch_latest().await;

    assert_eq!(
        outcome,
        FetchOutcome::Published {
            cycle: 1,
            observations: 4
        }
    );
    let snapshot = store.current();
    assert_eq!(snapshot.station("ksea").unwrap().temp_c, Some(8.3));
    assert!(snapshot.station("EGLL").is_none());
    assert_eq!(std::fs::read_to_string(&scratch).unwrap(), snapshot_text());

    let counts = snapshot.category_counts();
    assert!(counts.contains(&(FlightCategory::Vfr, 1)));
    assert!(counts.contains(&(FlightCategory::Unknown, 1)));
}

#[tokio::test]
async fn test_all_stations_with_empty_prefix() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_snapshot(&temp_dir);

    let store = Arc::new(ObservationStore::new());
    let config = FetchConfig::default()
        .with_scratch_path(None)
        .with_parser(ParserOptions::default().with_station_prefix(""));
    let fetcher = MetarFetcher::new(FileSource::new(&path), config, store.clone());

    assert!(fetcher.fetch_latest().await.is_published());
    let egll = store.current().station("EGLL").cloned().unwrap();
    assert_eq!(egll.category(), FlightCategory::Mvfr);
    assert_eq!(egll.cloud_base_ft_agl, Some(1200));
}

#[tokio::test]
async fn test_missing_file_is_a_transport_failure() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(ObservationStore::new());
    let fetcher = MetarFetcher::new(
        FileSource::new(temp_dir.path().join("absent.csv.gz")),
        FetchConfig::default().with_scratch_path(None),
        store.clone(),
    );

    let outcome = fetcher.fetch_latest().await;

    assert!(matches!(outcome, FetchOutcome::TransportFailed { .. }));
    assert!(store.current().is_empty());
}

#[tokio::test]
async fn test_plain_text_file_fails_decompression() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("metars.cache.csv");
    std::fs::write(&path, snapshot_text()).unwrap();

    let store = Arc::new(ObservationStore::new());
    let fetcher = MetarFetcher::new(
        FileSource::new(&path),
        FetchConfig::default().with_scratch_path(None),
        store.clone(),
    );

    assert!(matches!(
        fetcher.fetch_latest().await,
        FetchOutcome::DecompressionFailed { cycle: 1, .. }
    ));
    assert_eq!(store.current().cycle, 0);
}
