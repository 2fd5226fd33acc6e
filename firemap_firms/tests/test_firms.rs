#![allow(unused)]

use std::fs::File;
use chrono::NaiveDate;
use firemap_common::geo::GeoBoundingBox;
use firemap_firms::*;

fn config()->FirmsConfig {
    FirmsConfig {
        base_url: "https://firms.modaps.eosdis.nasa.gov/api/area/csv".to_string(),
        map_key: "0123456789abcdef0123456789abcdef".to_string(),
        source: "VIIRS_SNPP_NRT".to_string(),
        day_range: 5,
        end_date: Some( NaiveDate::from_ymd_opt( 2024, 1, 10).unwrap())
    }
}

#[test]
fn test_request_url() {
    let config = config();
    let bbox = GeoBoundingBox::new( 16.452, -34.834, 32.891, -22.125).unwrap();
    let date = config.effective_end_date();

    let url = request_url( &config, &bbox, &date);
    println!("url: {url}");
    assert_eq!( url, "https://firms.modaps.eosdis.nasa.gov/api/area/csv/0123456789abcdef0123456789abcdef/VIIRS_SNPP_NRT/16.452,-34.834,32.891,-22.125/5/2024-01-10");

    // integral coordinates are rendered without fraction
    let bbox = GeoBoundingBox::new( -126.0, 21.0, -66.0, 50.0).unwrap();
    let url = request_url( &config, &bbox, &date);
    assert!( url.ends_with("/VIIRS_SNPP_NRT/-126,21,-66,50/5/2024-01-10"));

    let url = redacted_request_url( &config, &bbox, &date);
    assert!( !url.contains( &config.map_key));
    assert!( url.contains("/***/"));

    // only the key position is redacted, even if the key text shows up elsewhere in the URL
    let mut config = config;
    config.map_key = "csv".to_string();
    let url = redacted_request_url( &config, &bbox, &date);
    println!("redacted: {url}");
    assert_eq!( url, "https://firms.modaps.eosdis.nasa.gov/api/area/csv/***/VIIRS_SNPP_NRT/-126,21,-66,50/5/2024-01-10");
}

#[test]
fn test_config() {
    let input = r#"(
        base_url: "https://firms.modaps.eosdis.nasa.gov/api/area/csv",
        map_key: "KEY",
        source: "VIIRS_NOAA20_NRT",
        day_range: 3,
    )"#;
    let config: FirmsConfig = ron::from_str(input).unwrap();
    assert!( config.end_date.is_none());
    assert!( config.validate().is_ok());
    assert!( config.effective_end_date() < firemap_common::datetime::utc_today());

    let mut config = config;
    config.day_range = 0;
    assert!( config.validate().is_err());
    config.day_range = 11;
    assert!( config.validate().is_err());
    config.day_range = 10;
    config.map_key = String::new();
    assert!( config.validate().is_err());
}

#[test]
fn test_parse() {
    let file = File::open("tests/firms_zaf.csv").unwrap();
    let records = parse_fire_records( file).unwrap();
    for r in &records { println!("{r:?}") }

    assert_eq!( records.len(), 5);
    let r = &records[2];
    assert_eq!( r.latitude, -28.71809);
    assert_eq!( r.longitude, 24.78231);
    assert_eq!( r.acquisition_date, NaiveDate::from_ymd_opt( 2024, 1, 9).unwrap());
    assert!( (r.brightness_kelvin() - 305.87).abs() < 1e-9);
    assert!( (r.brightness_celsius() - 32.72).abs() < 1e-9);
}

#[test]
fn test_parse_minimal_columns() {
    let input = "acq_date,bright_ti5,longitude,latitude\n2024-01-08, 300.0, 30.5, -25.5\n";
    let records = parse_fire_records( input.as_bytes()).unwrap();
    assert_eq!( records.len(), 1);
    assert_eq!( records[0].longitude, 30.5);
    assert_eq!( records[0].latitude, -25.5);
}

#[test]
fn test_parse_errors() {
    // what FIRMS returns for invalid keys
    let res = parse_fire_records( "Invalid MAP_KEY.".as_bytes());
    assert!( matches!( res, Err(FirmsError::InvalidResponse(_))));

    // header only
    let res = parse_fire_records( "latitude,longitude,acq_date,bright_ti5\n".as_bytes());
    assert!( matches!( res, Err(FirmsError::EmptyDataSet(_))));

    // malformed row
    let res = parse_fire_records( "latitude,longitude,acq_date,bright_ti5\n-25.0,thirty,2024-01-08,300.0\n".as_bytes());
    assert!( matches!( res, Err(FirmsError::CsvError(_))));

    let res = parse_fire_records( "latitude,longitude,acq_date,bright_ti5\n-25.0,30.0,08/01/2024,300.0\n".as_bytes());
    assert!( matches!( res, Err(FirmsError::CsvError(_))));
}

#[test]
fn test_kelvin_to_celsius() {
    let eps = 1e-9;
    assert!( (kelvin_to_celsius(0.0) - (-273.15)).abs() < eps);
    assert!( (kelvin_to_celsius(273.15) - 0.0).abs() < eps);
    assert!( (kelvin_to_celsius(300.0) - 26.85).abs() < eps);

    let r = FireRecord::new( 30.0, -25.0, NaiveDate::from_ymd_opt( 2024, 1, 8).unwrap(), 300.0);
    assert!( (r.brightness_celsius() - 26.85).abs() < eps);
}

#[test]
fn test_csv_file_source() {
    let bbox = GeoBoundingBox::new( 16.452, -34.834, 32.891, -22.125).unwrap();
    let src = CsvFileSource::new("tests/firms_zaf.csv");
    assert_eq!( src.fetch_records(&bbox).unwrap().len(), 5);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write( &path, "latitude,longitude,acq_date,bright_ti5\n").unwrap();
    let res = CsvFileSource::new(&path).fetch_records(&bbox);
    assert!( matches!( res, Err(FirmsError::EmptyDataSet(_))));
}
