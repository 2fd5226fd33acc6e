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

//! sources of administrative boundary polygons. The main source is GADM (https://gadm.org), which provides
//! per-country/level GeoJSON files (possibly zipped) such as
//!   https://geodata.ucdavis.edu/gadm/gadm4.1/json/gadm41_ZAF_1.json

use std::{fs::File, io::Read, path::{Path,PathBuf}};
use geo::{Geometry, MultiPolygon};
use geojson::{Feature, GeoJson};
use reqwest::blocking::Client;
use tracing::{info,debug,warn};

use firemap_common::{
    fs::{extension, filepath_contents_as_string, is_non_empty_file, ensure_writable_dir}, 
    net::{create_client, download_url, url_file_name}
};
use crate::{errors::{Result,RegionError,op_failed}, RegionPolygon};

pub trait BoundarySource {
    fn load_regions (&self, country: &str, level: u8)->Result<Vec<RegionPolygon>>;
}

/// boundary source that downloads GeoJSON files into a cache dir, unless they are already there. The
/// url pattern can use `${country}` and `${level}` placeholders
pub struct GadmBoundarySource {
    url_pattern: String,
    cache_dir: PathBuf,
    client: Client,
}

impl GadmBoundarySource {
    pub fn new (url_pattern: impl ToString, cache_dir: impl AsRef<Path>)->Result<Self> {
        let client = create_client(None)?;
        Ok( GadmBoundarySource { url_pattern: url_pattern.to_string(), cache_dir: cache_dir.as_ref().to_path_buf(), client } )
    }

    pub fn url (&self, country: &str, level: u8)->String {
        expand_url_pattern( &self.url_pattern, country, level)
    }

    pub fn cache_path (&self, country: &str, level: u8)->PathBuf {
        let url = self.url( country, level);
        let fname = url_file_name( &url).map( |s| s.to_string()).unwrap_or_else( || format!("boundaries_{country}_{level}.json"));
        self.cache_dir.join( fname)
    }
}

impl BoundarySource for GadmBoundarySource {
    fn load_regions (&self, country: &str, level: u8)->Result<Vec<RegionPolygon>> {
        let path = self.cache_path( country, level);

        if is_non_empty_file( &path) {
            info!("using cached boundaries {path:?}");
        } else {
            let url = self.url( country, level);
            info!("downloading boundaries {url}");
            ensure_writable_dir( &self.cache_dir)?;
            let len = download_url( &self.client, &url, &path)?;
            debug!("{len} bytes saved to {path:?}");
        }

        let text = read_geojson_text( &path)?;
        parse_region_polygons( &text, level)
    }
}

/// boundary source for local GeoJSON files (country and level are only used to look up feature names)
pub struct GeoJsonFileSource {
    path: PathBuf
}

impl GeoJsonFileSource {
    pub fn new (path: impl AsRef<Path>)->Self {
        GeoJsonFileSource { path: path.as_ref().to_path_buf() }
    }
}

impl BoundarySource for GeoJsonFileSource {
    fn load_regions (&self, country: &str, level: u8)->Result<Vec<RegionPolygon>> {
        info!("reading boundaries from {:?}", self.path);
        let text = read_geojson_text( &self.path)?;
        parse_region_polygons( &text, level)
    }
}

pub fn expand_url_pattern (pattern: &str, country: &str, level: u8)->String {
    pattern.replace("${country}", country).replace("${level}", &level.to_string())
}

/// read GeoJSON text from a plain file or the first *.json entry of a zip archive
pub fn read_geojson_text (path: &Path)->Result<String> {
    if extension(&path) == Some("zip") {
        let mut archive = zip::ZipArchive::new( File::open(path)?)?;
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if entry.name().ends_with(".json") || entry.name().ends_with(".geojson") {
                let mut text = String::with_capacity( entry.size() as usize);
                entry.read_to_string( &mut text)?;
                return Ok(text)
            }
        }
        Err( op_failed( format!("no GeoJSON entry in {:?}", path)))

    } else {
        Ok( filepath_contents_as_string(&path)? )
    }
}

/// convert GeoJSON text into named region polygons. Only Polygon and MultiPolygon geometries are used
pub fn parse_region_polygons (text: &str, level: u8)->Result<Vec<RegionPolygon>> {
    let features: Vec<Feature> = match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(g) => vec![ Feature::from(g) ]
    };

    let name_key = format!("NAME_{level}");
    let mut polygons: Vec<RegionPolygon> = Vec::with_capacity( features.len());

    for (i,feature) in features.into_iter().enumerate() {
        let name = [name_key.as_str(), "name", "NAME"].iter()
            .find_map( |k| feature.property(*k).and_then(|v| v.as_str()).map(|s| s.to_string()))
            .unwrap_or_else( || format!("region-{i}"));

        if let Some(geometry) = feature.geometry {
            let mp = match Geometry::<f64>::try_from( geometry)? {
                Geometry::Polygon(p) => MultiPolygon::new( vec![p]),
                Geometry::MultiPolygon(mp) => mp,
                _ => {
                    debug!("ignoring non-polygon feature {name}");
                    continue
                }
            };

            match RegionPolygon::new( &name, mp) {
                Some(rp) => polygons.push( rp),
                None => warn!("ignoring empty region polygon {name}")
            }
        }
    }

    if polygons.is_empty() {
        Err( RegionError::NoRegions("GeoJSON input".to_string()))
    } else {
        Ok(polygons)
    }
}
