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

//! the fire map pipeline: region resolution, fire data retrieval, spatial join, rendering and animation.
//! Stages run strictly sequentially, each one consuming the complete output of its predecessor. There are no
//! retries - every stage error aborts the run

use std::path::PathBuf;
use chrono::NaiveDate;
use serde::{Serialize,Deserialize};
use tracing::{info,warn};

use firemap_common::config::load_config;
use firemap_region::{resolve_region, spatial_join, BoundarySource, GadmBoundarySource, RegionConfig};
use firemap_firms::{FireDataSource, FirmsApiSource, FirmsConfig};
use firemap_render::{
    accumulate_by_date, write_gif, write_static, AnimationConfig, BasemapConfig, BasemapSource, ColorScale, 
    FrameRenderer, RenderConfig, SolidBasemap, TileServerBasemap
};

mod errors;
pub use errors::*;

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct FireMapConfig {
    pub region: RegionConfig,
    pub firms: FirmsConfig,
    pub basemap: BasemapConfig,
    pub render: RenderConfig,
    pub animation: AnimationConfig,

    /// where boundary and fire data downloads are stored
    #[serde(default="default_cache_dir")]
    pub cache_dir: PathBuf,

    /// output file (.gif for animations). Static maps are saved as .png
    #[serde(default="default_output")]
    pub output: PathBuf,
}

fn default_cache_dir()->PathBuf { PathBuf::from("cache") }
fn default_output()->PathBuf { PathBuf::from("fire_map.gif") }

impl FireMapConfig {
    pub fn load (filename: &str)->Result<Self> {
        Ok( load_config( filename)? )
    }

    pub fn validate (&self)->Result<()> {
        self.firms.validate()?;
        self.basemap.validate()?;
        self.render.validate()?;
        self.animation.validate()?;
        Ok(())
    }

    /// basemap source without tile server access, filled with the configured background color
    pub fn solid_basemap (&self)->Result<SolidBasemap> {
        Ok( SolidBasemap::from_hex( self.basemap.zoom, &self.render.background)? )
    }

    /// the file that is written by the pipeline
    pub fn output_path (&self)->PathBuf {
        if self.animation.enabled { self.output.clone() } else { self.output.with_extension("png") }
    }
}

/// what a pipeline run produced
#[derive(Debug,Clone,PartialEq)]
pub struct PipelineReport {
    pub fetched: usize,
    pub joined: usize,

    /// acquisition dates of the frame groups in display order
    pub frame_dates: Vec<NaiveDate>,

    /// number of encoded frames (1 for static maps)
    pub frames: usize,
    pub output: PathBuf,
}

impl PipelineReport {
    pub fn dropped (&self)->usize { self.fetched - self.joined }
}

pub struct Pipeline {
    config: FireMapConfig,
    boundary_source: Box<dyn BoundarySource>,
    fire_source: Box<dyn FireDataSource>,
    basemap_source: Box<dyn BasemapSource>,
}

impl Pipeline {
    pub fn new (config: FireMapConfig, boundary_source: Box<dyn BoundarySource>, fire_source: Box<dyn FireDataSource>, 
                basemap_source: Box<dyn BasemapSource>)->Self {
        Pipeline { config, boundary_source, fire_source, basemap_source }
    }

    /// pipeline with the network sources from the config (GADM boundaries, FIRMS area API and tile server basemap)
    pub fn from_config (config: FireMapConfig)->Result<Self> {
        let boundary_source = GadmBoundarySource::new( &config.region.boundary_url, &config.cache_dir)?;
        let fire_source = FirmsApiSource::new( config.firms.clone(), Some(config.cache_dir.clone()))?;
        let basemap_source = TileServerBasemap::new( config.basemap.clone())?;

        Ok( Pipeline::new( config, Box::new(boundary_source), Box::new(fire_source), Box::new(basemap_source)) )
    }

    pub fn config (&self)->&FireMapConfig { &self.config }

    pub fn run (&self)->Result<PipelineReport> {
        let config = &self.config;
        config.render.validate()?;
        config.animation.validate()?;

        //--- region
        let region = resolve_region( &config.region, self.boundary_source.as_ref())?;
        info!("resolved {} region polygons for {} level {}, bounds {}", 
              region.polygons.len(), config.region.country, config.region.level, region.bounds);

        //--- fire data
        let records = self.fire_source.fetch_records( &region.bounds)?;
        info!("fetched {} fire records", records.len());

        //--- spatial join
        let joined = spatial_join( &records, &region.polygons);
        info!("{} fire records within region, {} dropped", joined.len(), records.len() - joined.len());
        if joined.is_empty() {
            warn!("no fire records within region polygons, rendering empty map");
        }

        //--- render
        let basemap = self.basemap_source.fetch_basemap( &region.bounds).map_err( FireMapError::BasemapError)?;
        let color_scale = ColorScale::for_values( config.render.color_stops.as_slice(), joined.iter().map(|r| r.brightness_celsius()))?;
        let anim = &config.animation;
        let renderer = FrameRenderer::new( &config.render, anim.width, anim.height, anim.res, basemap, color_scale)?;

        //--- animate and save
        let groups = accumulate_by_date( &joined);
        let frame_dates: Vec<NaiveDate> = groups.iter().map(|g| g.date).collect();
        let output = config.output_path();

        let frames = if anim.enabled {
            write_gif( &renderer, &config.render, anim, &groups, &output).map_err( FireMapError::EncodingError)?
        } else {
            write_static( &renderer, &config.render, &groups, &output).map_err( FireMapError::EncodingError)?;
            1
        };
        info!("saved {} frames for {} dates to {:?}", frames, frame_dates.len(), output);

        Ok( PipelineReport { fetched: records.len(), joined: joined.len(), frame_dates, frames, output } )
    }
}
