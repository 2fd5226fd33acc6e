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

//! where fire records come from: the FIRMS area API or local CSV files with the same format

use std::{fs::File, path::{Path,PathBuf}};
use reqwest::blocking::Client;
use tracing::{info,debug};

use firemap_common::{datetime::fmt_date, fs::ensure_writable_dir, geo::GeoBoundingBox, net::{create_client, get_bytes}};
use crate::{errors::{Result,FirmsError}, parse_fire_records, redacted_request_url, request_url, FireRecord, FirmsConfig};

/// abstraction for fire detection providers
pub trait FireDataSource {
    /// retrieve all fire records within the given bounds. Note that implementations do not have to filter
    /// by bounds (the spatial join does)
    fn fetch_records (&self, bounds: &GeoBoundingBox)->Result<Vec<FireRecord>>;
}

/// fire data source that retrieves records with a single GET request from the FIRMS area API.
/// There is no retry and no pagination - a failed request or an empty response is an error
pub struct FirmsApiSource {
    config: FirmsConfig,
    cache_dir: Option<PathBuf>,
    client: Client,
}

impl FirmsApiSource {
    pub fn new (config: FirmsConfig, cache_dir: Option<PathBuf>)->Result<Self> {
        config.validate()?;
        let client = create_client(None)?;
        Ok( FirmsApiSource { config, cache_dir, client } )
    }

    pub fn config (&self)->&FirmsConfig { &self.config }

    fn cache_file_path (&self, dir: &Path)->PathBuf {
        let date = self.config.effective_end_date();
        let fname = format!("{}_{}_{}d.csv", self.config.source, fmt_date(&date), self.config.day_range);
        dir.join(fname)
    }
}

impl FireDataSource for FirmsApiSource {
    fn fetch_records (&self, bounds: &GeoBoundingBox)->Result<Vec<FireRecord>> {
        let date = self.config.effective_end_date();
        let url = request_url( &self.config, bounds, &date);
        info!("retrieving FIRMS data: {}", redacted_request_url( &self.config, bounds, &date));

        let data = get_bytes( &self.client, &url)?;
        debug!("received {} bytes", data.len());

        if let Some(dir) = &self.cache_dir {
            ensure_writable_dir(dir)?;
            let path = self.cache_file_path( dir);
            std::fs::write( &path, &data)?;
            debug!("FIRMS response saved to {path:?}");
        }

        parse_fire_records( data.as_slice())
    }
}

/// fire data source for previously downloaded (or synthetic) FIRMS CSV files
pub struct CsvFileSource {
    path: PathBuf
}

impl CsvFileSource {
    pub fn new (path: impl AsRef<Path>)->Self {
        CsvFileSource { path: path.as_ref().to_path_buf() }
    }
}

impl FireDataSource for CsvFileSource {
    fn fetch_records (&self, bounds: &GeoBoundingBox)->Result<Vec<FireRecord>> {
        info!("reading fire records from {:?}", self.path);
        let file = File::open( &self.path)?;
        parse_fire_records( file).map_err( |e| match e {
            FirmsError::EmptyDataSet(_) => FirmsError::EmptyDataSet( format!("{:?}", self.path)),
            other => other
        })
    }
}
