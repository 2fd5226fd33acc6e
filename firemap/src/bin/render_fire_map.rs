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

use std::path::PathBuf;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

use firemap_common::define_cli;
use firemap_region::{BoundarySource, GadmBoundarySource, GeoJsonFileSource};
use firemap_firms::{CsvFileSource, FireDataSource, FirmsApiSource};
use firemap_render::{BasemapSource, TileServerBasemap};
use firemap::{FireMapConfig, Pipeline};

define_cli! { ARGS [about="render an animated map of NASA FIRMS fire detections within a region"] =
    map_key: Option<String> [help="FIRMS map key (overrides the configured one)", long],
    fire_data: Option<PathBuf> [help="read fire records from a FIRMS CSV file instead of the FIRMS area API", long],
    boundaries: Option<PathBuf> [help="read region polygons from a GeoJSON file instead of the boundary service", long],
    output: Option<PathBuf> [help="output file (overrides the configured one)", short, long],
    static_map: bool [help="render a single static map instead of an animation", long="static"],
    no_basemap: bool [help="do not retrieve basemap tiles, use the background color instead", long],
    config: String [help="filename of fire map config", default_value="firemap_zaf.ron"]
}

fn main ()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())  // use RUST_LOG to set max level
        .init();

    let mut config = FireMapConfig::load( &ARGS.config)?;
    if let Some(map_key) = &ARGS.map_key { config.firms.map_key = map_key.clone() }
    if let Some(output) = &ARGS.output { config.output = output.clone() }
    if ARGS.static_map { config.animation.enabled = false }
    config.validate()?;

    let boundary_source: Box<dyn BoundarySource> = match &ARGS.boundaries {
        Some(path) => Box::new( GeoJsonFileSource::new( path)),
        None => Box::new( GadmBoundarySource::new( &config.region.boundary_url, &config.cache_dir)?)
    };
    let fire_source: Box<dyn FireDataSource> = match &ARGS.fire_data {
        Some(path) => Box::new( CsvFileSource::new( path)),
        None => Box::new( FirmsApiSource::new( config.firms.clone(), Some(config.cache_dir.clone()))?)
    };
    let basemap_source: Box<dyn BasemapSource> = if ARGS.no_basemap {
        Box::new( config.solid_basemap()?)
    } else {
        Box::new( TileServerBasemap::new( config.basemap.clone())?)
    };

    let report = Pipeline::new( config, boundary_source, fire_source, basemap_source).run()?;

    println!("{} fire records fetched, {} within region", report.fetched, report.joined);
    if let (Some(first), Some(last)) = (report.frame_dates.first(), report.frame_dates.last()) {
        println!("{} dates from {} to {}", report.frame_dates.len(), first, last);
    }
    println!("{} frame(s) saved to {:?}", report.frames, report.output);
    Ok(())
}
