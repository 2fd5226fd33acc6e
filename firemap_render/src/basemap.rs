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

//! raster basemaps for the map area. A basemap covers exactly the requested bounding box in Web Mercator
//! projection and knows how to map geographic coordinates into its pixel space

use serde::{Serialize,Deserialize};
use image::{imageops, Rgba, RgbaImage};
use reqwest::blocking::Client;
use tracing::{info,debug};

use firemap_common::{geo::GeoBoundingBox, net::{create_client, get_bytes}, parse_hex_rgb};
use crate::{errors::{Result,RenderError,invalid_config}, tiles::{lat_to_pixel_y, lon_to_pixel_x, PixelBounds, TileRange, MAX_ZOOM}};

/// we don't want to hammer tile servers by accident (e.g. with a typo in the zoom level)
pub const MAX_TILES: usize = 256;

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct BasemapConfig {
    /// tile URL with `{z}`,`{x}`,`{y}` and optional `{s}` (subdomain) and `{style}` placeholders, e.g.
    /// "https://{s}.basemaps.cartocdn.com/{style}/{z}/{x}/{y}.png"
    pub url_pattern: String,

    #[serde(default)]
    pub subdomains: Vec<String>,

    pub style: String,
    pub zoom: u8,

    #[serde(default="default_tile_size")]
    pub tile_size: u32,

    /// most tile servers require a user agent that identifies the application
    pub user_agent: String,
}

fn default_tile_size()->u32 { 256 }

impl BasemapConfig {
    pub fn validate (&self)->Result<()> {
        if self.zoom > MAX_ZOOM { return Err( invalid_config( format!("zoom level {} > {}", self.zoom, MAX_ZOOM))) }
        if self.tile_size == 0 { return Err( invalid_config("zero tile_size")) }
        if !(self.url_pattern.contains("{z}") && self.url_pattern.contains("{x}") && self.url_pattern.contains("{y}")) {
            return Err( invalid_config( format!("tile url pattern without {{z}}/{{x}}/{{y}}: {}", self.url_pattern)))
        }
        Ok(())
    }

    pub fn tile_url (&self, x: u32, y: u32)->String {
        let mut url = self.url_pattern
            .replace("{style}", &self.style)
            .replace("{z}", &self.zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string());

        if !self.subdomains.is_empty() {
            let s = &self.subdomains[ ((x + y) as usize) % self.subdomains.len()];
            url = url.replace("{s}", s);
        }
        url
    }
}

/// a raster image that covers a bounding box
#[derive(Debug,Clone)]
pub struct Basemap {
    pub image: RgbaImage,
    pub bounds: GeoBoundingBox,
    pub zoom: u8,
    pub tile_size: u32,

    // global pixel coords of the upper left image corner
    origin_x: f64,
    origin_y: f64,
}

impl Basemap {
    /// wrap an image that is already cropped to the bounds
    pub fn new (image: RgbaImage, bounds: GeoBoundingBox, zoom: u8, tile_size: u32)->Self {
        let pb = PixelBounds::from_geo( &bounds, zoom, tile_size);
        Basemap { image, bounds, zoom, tile_size, origin_x: pb.x_min, origin_y: pb.y_min }
    }

    /// a single color basemap with the size the tile mosaic would have
    pub fn solid (bounds: GeoBoundingBox, zoom: u8, tile_size: u32, color: Rgba<u8>)->Self {
        let (w,h) = PixelBounds::from_geo( &bounds, zoom, tile_size).image_size();
        Basemap::new( RgbaImage::from_pixel( w, h, color), bounds, zoom, tile_size)
    }

    pub fn width (&self)->u32 { self.image.width() }
    pub fn height (&self)->u32 { self.image.height() }

    /// geographic to basemap pixel coordinates
    pub fn project (&self, lon: f64, lat: f64)->(f64,f64) {
        ( lon_to_pixel_x( lon, self.zoom, self.tile_size) - self.origin_x,
          lat_to_pixel_y( lat, self.zoom, self.tile_size) - self.origin_y )
    }
}

pub trait BasemapSource {
    fn fetch_basemap (&self, bounds: &GeoBoundingBox)->Result<Basemap>;
}

/// basemap source that retrieves, stitches and crops the slippy map tiles covering the bounds.
/// Each tile is a separate blocking GET request - any failed request is fatal
pub struct TileServerBasemap {
    config: BasemapConfig,
    client: Client,
}

impl TileServerBasemap {
    pub fn new (config: BasemapConfig)->Result<Self> {
        config.validate()?;
        let client = create_client( Some(&config.user_agent))?;
        Ok( TileServerBasemap { config, client } )
    }

    fn fetch_tile (&self, x: u32, y: u32)->Result<RgbaImage> {
        let url = self.config.tile_url( x, y);
        debug!("fetching tile {url}");
        let bytes = get_bytes( &self.client, &url)?;
        let img = image::load_from_memory( &bytes)?.to_rgba8();

        let ts = self.config.tile_size;
        if img.dimensions() == (ts,ts) { 
            Ok(img) 
        } else {
            Ok( imageops::resize( &img, ts, ts, imageops::FilterType::Triangle) )
        }
    }
}

impl BasemapSource for TileServerBasemap {
    fn fetch_basemap (&self, bounds: &GeoBoundingBox)->Result<Basemap> {
        let zoom = self.config.zoom;
        let ts = self.config.tile_size;
        let range = TileRange::covering( bounds, zoom, ts);
        if range.len() > MAX_TILES {
            return Err( invalid_config( format!("{} tiles needed for zoom level {} (max {})", range.len(), zoom, MAX_TILES)))
        }
        info!("fetching {} basemap tiles ({}) at zoom level {}", range.len(), self.config.style, zoom);

        let mut mosaic = RgbaImage::new( range.nx() * ts, range.ny() * ts);
        for (x,y) in range.tiles() {
            let tile = self.fetch_tile( x, y)?;
            imageops::replace( &mut mosaic, &tile, ((x - range.x0) * ts) as i64, ((y - range.y0) * ts) as i64);
        }

        let image = crop_to_bounds( &mosaic, &range, bounds, ts);
        Ok( Basemap::new( image, *bounds, zoom, ts) )
    }
}

/// crop a mosaic of the tiles in range to the pixel rectangle of the bounds
pub fn crop_to_bounds (mosaic: &RgbaImage, range: &TileRange, bounds: &GeoBoundingBox, tile_size: u32)->RgbaImage {
    let pb = PixelBounds::from_geo( bounds, range.zoom, tile_size);
    let (w,h) = pb.image_size();

    let x = (pb.x_min - (range.x0 * tile_size) as f64).round().max(0.0) as u32;
    let y = (pb.y_min - (range.y0 * tile_size) as f64).round().max(0.0) as u32;
    let w = w.min( mosaic.width().saturating_sub(x)).max(1);
    let h = h.min( mosaic.height().saturating_sub(y)).max(1);

    imageops::crop_imm( mosaic, x, y, w, h).to_image()
}

/// basemap source without network access that just fills the map area with a single color
pub struct SolidBasemap {
    zoom: u8,
    tile_size: u32,
    color: Rgba<u8>,
}

impl SolidBasemap {
    pub fn new (zoom: u8, color: Rgba<u8>)->Self {
        SolidBasemap { zoom, tile_size: default_tile_size(), color }
    }

    pub fn from_hex (zoom: u8, hex_color: &str)->Result<Self> {
        let [r,g,b] = parse_hex_rgb( hex_color).ok_or_else( || RenderError::InvalidColor( hex_color.to_string()))?;
        Ok( SolidBasemap::new( zoom, Rgba([r,g,b,255])) )
    }
}

impl BasemapSource for SolidBasemap {
    fn fetch_basemap (&self, bounds: &GeoBoundingBox)->Result<Basemap> {
        Ok( Basemap::solid( *bounds, self.zoom, self.tile_size, self.color) )
    }
}
