#![allow(unused)]

use std::fs;
use chrono::NaiveDate;
use firemap_common::geo::GeoBoundingBox;
use firemap_firms::FireRecord;
use firemap_region::*;

fn date (d: u32)->NaiveDate { NaiveDate::from_ymd_opt( 2024, 1, d).unwrap() }

fn regions()->Vec<RegionPolygon> {
    let text = fs::read_to_string("tests/regions.geojson").unwrap();
    parse_region_polygons( &text, 1).unwrap()
}

fn region_config (bounds: Option<GeoBoundingBox>)->RegionConfig {
    RegionConfig {
        country: "ZAF".to_string(),
        level: 1,
        boundary_url: "https://geodata.ucdavis.edu/gadm/gadm4.1/json/gadm41_${country}_${level}.json".to_string(),
        bounds
    }
}

#[test]
fn test_parse_regions() {
    let regions = regions();
    for r in &regions { println!("{}: {:?}", r.name, r.bounding_rect()) }

    assert_eq!( regions.len(), 2); // the point feature is ignored
    assert_eq!( regions[0].name, "Gauteng");
    assert_eq!( regions[1].name, "Mpumalanga");
    assert_eq!( regions[1].geometry().0.len(), 2);

    assert!( parse_region_polygons( r#"{"type":"FeatureCollection","features":[]}"#, 1).is_err());
    assert!( parse_region_polygons( "not json", 1).is_err());

    // bare geometries get a generated name
    let rs = parse_region_polygons( r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}"#, 0).unwrap();
    assert_eq!( rs[0].name, "region-0");
}

#[test]
fn test_join_fixture() {
    let records = vec![
        FireRecord::new( 28.0, -26.0, date(8), 300.0),      // Gauteng
        FireRecord::new( 18.63377, -33.95102, date(8), 291.66), // Cape Town - outside
        FireRecord::new( 30.85671, -25.61437, date(9), 298.23), // Mpumalanga
    ];

    let joined = spatial_join( &records, &regions());
    assert_eq!( joined.len(), 2);

    assert!( (joined[0].longitude - 28.0).abs() < 1e-12);
    assert!( (joined[0].latitude - -26.0).abs() < 1e-12);
    assert!( (joined[1].longitude - 30.85671).abs() < 1e-12);
    assert!( (joined[1].latitude - -25.61437).abs() < 1e-12);
    assert_eq!( joined[1].acquisition_date, date(9));
    assert_eq!( joined[1].brightness, records[2].brightness);
}

#[test]
fn test_join_is_filter() {
    let regions = regions();
    let mut records: Vec<FireRecord> = Vec::new();
    for i in 0..40 {
        for j in 0..20 {
            let lon = 25.0 + i as f64 * 0.2;
            let lat = -28.0 + j as f64 * 0.2;
            records.push( FireRecord::new( lon, lat, date(1 + (i % 3) as u32), 300.0 + j as f64));
        }
    }

    let joined = spatial_join( &records, &regions);
    println!("{} of {} records joined", joined.len(), records.len());
    assert!( joined.len() <= records.len());
    assert!( !joined.is_empty());

    let extent = GeoBoundingBox::enclosing( regions.iter().map(|r| *r.bounding_rect())).unwrap();
    for r in &joined {
        assert!( extent.contains_lon_lat( r.longitude, r.latitude));
    }
}

#[test]
fn test_join_edge_cases() {
    let regions = regions();

    // shared boundary of both provinces - reported once
    let on_edge = FireRecord::new( 29.0, -26.0, date(8), 300.0);
    // duplicates from upstream are not removed
    let dup = FireRecord::new( 28.5, -25.5, date(8), 300.0);
    // inside the small Mpumalanga exclave
    let exclave = FireRecord::new( 32.6, -25.9, date(8), 300.0);
    // between mainland and exclave
    let gap = FireRecord::new( 32.2, -25.9, date(8), 300.0);

    let joined = spatial_join( &[on_edge, dup, dup, exclave, gap], &regions);
    assert_eq!( joined.len(), 4);

    assert!( spatial_join( &[], &regions).is_empty());
    assert!( spatial_join( &[dup], &[]).is_empty());
}

#[test]
fn test_resolve_region() {
    let src = GeoJsonFileSource::new("tests/regions.geojson");

    let region = resolve_region( &region_config(None), &src).unwrap();
    assert_eq!( region.bounds.to_wsen_array(), [27.0, -27.0, 32.8, -24.5]);
    assert_eq!( region.bounds, region.polygon_bounds);

    let bbox = GeoBoundingBox::new( 16.452, -34.834, 32.891, -22.125).unwrap();
    let region = resolve_region( &region_config(Some(bbox)), &src).unwrap();
    assert_eq!( region.bounds, bbox);
    assert_eq!( region.polygons.len(), 2);

    let res = resolve_region( &region_config(None), &GeoJsonFileSource::new("tests/does_not_exist.geojson"));
    assert!( matches!( res, Err(RegionError::IOError(_))));
}

#[test]
fn test_gadm_cache() {
    let dir = tempfile::tempdir().unwrap();
    let config = region_config(None);
    let src = GadmBoundarySource::new( &config.boundary_url, dir.path()).unwrap();

    assert_eq!( src.url("ZAF", 1), "https://geodata.ucdavis.edu/gadm/gadm4.1/json/gadm41_ZAF_1.json");
    let path = src.cache_path("ZAF", 1);
    assert_eq!( path, dir.path().join("gadm41_ZAF_1.json"));

    // a cached file is used without download
    fs::copy( "tests/regions.geojson", &path).unwrap();
    let region = resolve_region( &config, &src).unwrap();
    assert_eq!( region.polygons.len(), 2);
}
