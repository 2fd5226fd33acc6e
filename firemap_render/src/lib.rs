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

use std::path::PathBuf;
use serde::{Serialize,Deserialize};

pub mod errors;
pub use errors::*;

pub mod tiles;
pub mod color;
pub mod basemap;
pub mod frame;
pub mod animate;

pub use color::{ColorScale, DEFAULT_COLOR_STOPS};
pub use basemap::{Basemap, BasemapConfig, BasemapSource, SolidBasemap, TileServerBasemap};
pub use frame::{FrameRenderer, StyledPoint};
pub use animate::{accumulate_by_date, DateGroup, FrameSchedule, FrameSpec, write_gif, write_static};

/// visual theme of rendered maps
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct RenderConfig {
    pub title: String,

    /// "{date}" is replaced by the acquisition date of the frame
    pub subtitle: String,

    #[serde(default)]
    pub caption: String,

    #[serde(default="default_legend_title")]
    pub legend_title: String,

    /// hex rgb color stops from low to high brightness temperature
    #[serde(default="default_color_stops")]
    pub color_stops: Vec<String>,

    #[serde(default="default_point_radius")]
    pub point_radius: f32,

    #[serde(default="default_current_alpha")]
    pub current_alpha: f32,

    /// opacity of points from previous dates
    #[serde(default="default_shadow_alpha")]
    pub shadow_alpha: f32,

    #[serde(default="default_background")]
    pub background: String,

    #[serde(default="default_text_color")]
    pub text_color: String,

    /// TrueType/OpenType font file. No text is rendered if not set
    #[serde(default,skip_serializing_if="firemap_common::is_none")]
    pub font: Option<PathBuf>,
}

fn default_legend_title()->String { "Brightness °C".to_string() }
fn default_color_stops()->Vec<String> { DEFAULT_COLOR_STOPS.iter().map(|s| s.to_string()).collect() }
fn default_point_radius()->f32 { 2.0 }
fn default_current_alpha()->f32 { 0.9 }
fn default_shadow_alpha()->f32 { 0.3 }
fn default_background()->String { "1a1a1a".to_string() }
fn default_text_color()->String { "e0e0e0".to_string() }

impl RenderConfig {
    pub fn validate (&self)->Result<()> {
        if !(self.point_radius > 0.0) { return Err( invalid_config("point_radius has to be positive")) }
        if !(self.shadow_alpha > 0.0 && self.shadow_alpha <= self.current_alpha && self.current_alpha <= 1.0) {
            return Err( invalid_config("alpha values have to satisfy 0 < shadow_alpha <= current_alpha <= 1"))
        }
        Ok(())
    }
}

/// output sequence and image parameters
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct AnimationConfig {
    /// if false only a single static image is rendered
    #[serde(default="default_enabled")]
    pub enabled: bool,

    /// total number of frames including pauses
    pub n_frames: u32,
    pub fps: u32,

    /// total playback time in seconds. Overrides fps if set
    #[serde(default,skip_serializing_if="firemap_common::is_none")]
    pub duration: Option<f64>,

    /// number of frames the first state is held
    #[serde(default)]
    pub start_pause: u32,

    /// number of frames the last state is held
    #[serde(default)]
    pub end_pause: u32,

    pub width: u32,
    pub height: u32,

    /// output density in dpi. Font and marker sizes are given for 72 dpi
    #[serde(default="default_res")]
    pub res: u32,
}

fn default_enabled()->bool { true }
fn default_res()->u32 { 72 }

impl AnimationConfig {
    pub fn validate (&self)->Result<()> {
        if self.width == 0 || self.height == 0 || self.res == 0 {
            return Err( RenderError::InvalidDimensions( format!("{}x{} at {} dpi", self.width, self.height, self.res)))
        }
        if self.enabled {
            if self.fps == 0 && self.duration.is_none() { return Err( invalid_config("fps has to be positive")) }
            let n_pause = self.start_pause.checked_add( self.end_pause);
            if self.n_frames == 0 || n_pause.is_none_or( |n| n >= self.n_frames) {
                return Err( invalid_config( format!("n_frames {} has to exceed start_pause + end_pause", self.n_frames)))
            }
        }
        Ok(())
    }
}
