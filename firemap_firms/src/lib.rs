/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

//! import of near-real-time fire detections (hotspots) from NASAs Fire Information for Resource Management
//! System (FIRMS) area API, see https://firms.modaps.eosdis.nasa.gov/api/area/
//!
//! Request URLs have the format
//!   [BASE_URL]/[MAP_KEY]/[SOURCE]/[AREA_COORDINATES]/[DAY_RANGE]/[DATE]
//!    e.g. https://firms.modaps.eosdis.nasa.gov/api/area/csv/534b391abcdf3cf5969cb7ec8ce07de5/VIIRS_SNPP_NRT/16.452,-34.834,32.891,-22.125/5/2024-01-10
//! and the response is CSV text with (at least) the `latitude`, `longitude`, `acq_date` and `bright_ti5` columns

use std::io;
use serde::{Serialize,Deserialize};
use chrono::NaiveDate;
use geo::Point;
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::{kelvin, degree_celsius}};
use tracing::debug;

use firemap_common::{datetime::{fmt_date, yesterday_utc}, geo::GeoBoundingBox};

mod errors;
pub use errors::*;

mod source;
pub use source::*;

/// the FIRMS area API only supports full day ranges between 1 and 10 days
pub const MAX_DAY_RANGE: u32 = 10;

/// the CSV columns we need from the FIRMS response
pub const REQUIRED_COLUMNS: [&str;4] = ["latitude", "longitude", "acq_date", "bright_ti5"];

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct FirmsConfig {
    /// e.g. "https://firms.modaps.eosdis.nasa.gov/api/area/csv"
    pub base_url: String,

    pub map_key: String,  // keep this private - it is rate limited

    /// sensor/satellite data product, e.g. "VIIRS_SNPP_NRT"
    pub source: String,

    /// number of days (1..10) to retrieve
    pub day_range: u32,

    /// defaults to the most recent full day (UTC)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl FirmsConfig {
    pub fn validate (&self)->Result<()> {
        if self.base_url.is_empty() { return Err( invalid_config("empty FIRMS base_url")) }
        if self.map_key.is_empty() { return Err( invalid_config("empty FIRMS map_key")) }
        if self.source.is_empty() { return Err( invalid_config("empty FIRMS source")) }
        if self.day_range < 1 || self.day_range > MAX_DAY_RANGE {
            return Err( invalid_config( format!("day_range {} outside 1..{}", self.day_range, MAX_DAY_RANGE)))
        }
        Ok(())
    }

    pub fn effective_end_date (&self)->NaiveDate {
        self.end_date.unwrap_or_else( yesterday_utc)
    }
}

/// build the FIRMS area request URL. This is a plain concatenation of the config values - we don't
/// normalize slashes in the base URL
pub fn request_url (config: &FirmsConfig, bounds: &GeoBoundingBox, date: &NaiveDate)->String {
    format_request_url( config, &config.map_key, bounds, date)
}

/// the request URL with "***" in the map key position, for logging
pub fn redacted_request_url (config: &FirmsConfig, bounds: &GeoBoundingBox, date: &NaiveDate)->String {
    format_request_url( config, "***", bounds, date)
}

fn format_request_url (config: &FirmsConfig, map_key: &str, bounds: &GeoBoundingBox, date: &NaiveDate)->String {
    format!( "{}/{}/{}/{}/{}/{}", 
        config.base_url, map_key, config.source, bounds.to_wsen_string(), config.day_range, fmt_date(date))
}

#[inline]
pub fn kelvin_to_celsius (k: f64)->f64 {
    ThermodynamicTemperature::new::<kelvin>(k).get::<degree_celsius>()
}

/* #region records *************************************************************************************************/

/// the raw record format as it is retrieved from the FIRMS server. Other columns are ignored
/// field descriptions on https://www.earthdata.nasa.gov/data/instruments/viirs/viirs-i-band-375-m-active-fire-data
#[derive(Debug,Deserialize)]
struct RawFireRecord {
    latitude: f64,
    longitude: f64,
    acq_date: NaiveDate,
    bright_ti5: f64, // I-5 channel brightness temperature in Kelvin
}

/// a single fire detection as reported by FIRMS
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct FireRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub acquisition_date: NaiveDate,
    pub brightness: ThermodynamicTemperature,
}

impl FireRecord {
    pub fn new (longitude: f64, latitude: f64, acquisition_date: NaiveDate, brightness_kelvin: f64)->Self {
        let brightness = ThermodynamicTemperature::new::<kelvin>(brightness_kelvin);
        FireRecord { latitude, longitude, acquisition_date, brightness }
    }

    pub fn point (&self)->Point { Point::new( self.longitude, self.latitude) }

    pub fn brightness_kelvin (&self)->f64 { self.brightness.get::<kelvin>() }
    pub fn brightness_celsius (&self)->f64 { self.brightness.get::<degree_celsius>() }
}

impl From<RawFireRecord> for FireRecord {
    fn from (raw: RawFireRecord)->Self {
        FireRecord::new( raw.longitude, raw.latitude, raw.acq_date, raw.bright_ti5)
    }
}

/// a FireRecord that passed the region filter. Coordinates are taken from the (joined) point geometry
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct JoinedFireRecord {
    pub longitude: f64,
    pub latitude: f64,
    pub acquisition_date: NaiveDate,
    pub brightness: ThermodynamicTemperature,
}

impl JoinedFireRecord {
    pub fn new (point: &Point, record: &FireRecord)->Self {
        JoinedFireRecord {
            longitude: point.x(),
            latitude: point.y(),
            acquisition_date: record.acquisition_date,
            brightness: record.brightness
        }
    }

    pub fn brightness_kelvin (&self)->f64 { self.brightness.get::<kelvin>() }
    pub fn brightness_celsius (&self)->f64 { self.brightness.get::<degree_celsius>() }
}

/* #endregion records */

/// parse FIRMS CSV text into FireRecords. This is pure - it does not care where the text came from
pub fn parse_fire_records (reader: impl io::Read)->Result<Vec<FireRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim( csv::Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any( |h| h == col) {
            // FIRMS reports errors (e.g. an invalid map key) as plain text bodies, which end up in the header
            let text = headers.iter().collect::<Vec<&str>>().join(",");
            return Err( FirmsError::InvalidResponse( format!("missing column '{}' in '{}'", col, text)))
        }
    }

    let mut records: Vec<FireRecord> = Vec::new();
    for res in csv_reader.deserialize() {
        let raw: RawFireRecord = res?;
        records.push( raw.into());
    }
    debug!("parsed {} fire records", records.len());

    if records.is_empty() {
        Err( FirmsError::EmptyDataSet("FIRMS response".to_string()))
    } else {
        Ok(records)
    }
}
