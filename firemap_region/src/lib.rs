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

//! the region of interest: administrative boundary polygons of a country (e.g. from [GADM](https://gadm.org)),
//! the bounding box that is used for data requests and rendering, and the spatial join of fire detections
//! with the region polygons

use serde::{Serialize,Deserialize};
use geo::{BoundingRect, Intersects, MultiPolygon, Point, Rect};
use tracing::{info,debug};

use firemap_common::geo::GeoBoundingBox;

mod errors;
pub use errors::*;

pub mod boundary;
pub use boundary::{BoundarySource, GadmBoundarySource, GeoJsonFileSource, parse_region_polygons};

mod join;
pub use join::spatial_join;

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct RegionConfig {
    /// ISO 3166-1 alpha-3 country code, e.g. "ZAF"
    pub country: String,

    /// administrative level (0: country, 1: provinces/states, ..)
    pub level: u8,

    /// boundary data URL with `${country}` and `${level}` placeholders, e.g.
    /// "https://geodata.ucdavis.edu/gadm/gadm4.1/json/gadm41_${country}_${level}.json"
    pub boundary_url: String,

    /// if set this overrides the bounding box computed from the boundary polygons
    #[serde(default)]
    pub bounds: Option<GeoBoundingBox>,
}

/// a named administrative subdivision. Used only as spatial filter
#[derive(Debug,Clone)]
pub struct RegionPolygon {
    pub name: String,
    geometry: MultiPolygon,
    bounding_rect: Rect,
}

impl RegionPolygon {
    /// returns None for empty geometries
    pub fn new (name: impl ToString, geometry: MultiPolygon)->Option<Self> {
        let bounding_rect = geometry.bounding_rect()?;
        Some( RegionPolygon { name: name.to_string(), geometry, bounding_rect } )
    }

    pub fn geometry (&self)->&MultiPolygon { &self.geometry }
    pub fn bounding_rect (&self)->&Rect { &self.bounding_rect }

    /// point-in-polygon test that includes the polygon boundary
    pub fn intersects (&self, point: &Point)->bool {
        self.bounding_rect.intersects( point) && self.geometry.intersects( point)
    }
}

/// the result of region resolution
#[derive(Debug,Clone)]
pub struct ResolvedRegion {
    /// the bounds to use for data requests and rendering
    pub bounds: GeoBoundingBox,

    /// the bounds enclosing all polygons
    pub polygon_bounds: GeoBoundingBox,

    pub polygons: Vec<RegionPolygon>,
}

/// retrieve the boundary polygons for the configured country/level and compute the region bounds.
/// Failure to obtain polygons is fatal for the pipeline
pub fn resolve_region (config: &RegionConfig, source: &dyn BoundarySource)->Result<ResolvedRegion> {
    let polygons = source.load_regions( &config.country, config.level)?;
    if polygons.is_empty() {
        return Err( RegionError::NoRegions( format!("{} level {}", config.country, config.level)))
    }

    let polygon_bounds = GeoBoundingBox::enclosing( polygons.iter().map(|p| *p.bounding_rect()))?;
    debug!("{} region polygons with bounds {}", polygons.len(), polygon_bounds);

    let bounds = match &config.bounds {
        Some(bounds) => {
            info!("using configured bounds {} instead of polygon bounds {}", bounds, polygon_bounds);
            *bounds
        }
        None => polygon_bounds
    };

    Ok( ResolvedRegion { bounds, polygon_bounds, polygons } )
}
