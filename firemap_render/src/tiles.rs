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

//! Web Mercator (EPSG:3857) tile math as used by slippy map tile servers, see
//! https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames

use std::f64::consts::PI;
use firemap_common::geo::GeoBoundingBox;

/// latitude limit of the Web Mercator projection
pub const MAX_MERCATOR_LAT: f64 = 85.05112878;

pub const MAX_ZOOM: u8 = 20;

/// world width/height in pixels at given zoom level
#[inline]
pub fn world_size (zoom: u8, tile_size: u32)->f64 {
    (1u64 << zoom) as f64 * tile_size as f64
}

/// global pixel x coordinate of a longitude
pub fn lon_to_pixel_x (lon: f64, zoom: u8, tile_size: u32)->f64 {
    (lon + 180.0) / 360.0 * world_size( zoom, tile_size)
}

/// global pixel y coordinate of a latitude (0 at the north edge)
pub fn lat_to_pixel_y (lat: f64, zoom: u8, tile_size: u32)->f64 {
    let lat = lat.max(-MAX_MERCATOR_LAT).min(MAX_MERCATOR_LAT).to_radians();
    (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * world_size( zoom, tile_size)
}

pub fn pixel_x_to_lon (x: f64, zoom: u8, tile_size: u32)->f64 {
    x / world_size( zoom, tile_size) * 360.0 - 180.0
}

pub fn pixel_y_to_lat (y: f64, zoom: u8, tile_size: u32)->f64 {
    let n = PI - 2.0 * PI * y / world_size( zoom, tile_size);
    n.sinh().atan().to_degrees()
}

/// the global pixel rectangle of a geographic bounding box
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct PixelBounds {
    pub x_min: f64,
    pub y_min: f64, // north
    pub x_max: f64,
    pub y_max: f64, // south
}

impl PixelBounds {
    pub fn from_geo (bounds: &GeoBoundingBox, zoom: u8, tile_size: u32)->Self {
        PixelBounds {
            x_min: lon_to_pixel_x( bounds.xmin(), zoom, tile_size),
            y_min: lat_to_pixel_y( bounds.ymax(), zoom, tile_size),
            x_max: lon_to_pixel_x( bounds.xmax(), zoom, tile_size),
            y_max: lat_to_pixel_y( bounds.ymin(), zoom, tile_size),
        }
    }

    pub fn width (&self)->f64 { self.x_max - self.x_min }
    pub fn height (&self)->f64 { self.y_max - self.y_min }

    /// integer image dimensions covering these bounds (at least 1x1)
    pub fn image_size (&self)->(u32,u32) {
        ( (self.width().round() as u32).max(1), (self.height().round() as u32).max(1) )
    }
}

/// inclusive range of tile indices that cover a bounding box at a given zoom level
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct TileRange {
    pub zoom: u8,
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl TileRange {
    pub fn covering (bounds: &GeoBoundingBox, zoom: u8, tile_size: u32)->Self {
        let pb = PixelBounds::from_geo( bounds, zoom, tile_size);
        let ts = tile_size as f64;
        let max_idx = (1u32 << zoom) - 1;

        // the max edges are exclusive
        let to_idx = |v: f64| ((v / ts).floor().max(0.0) as u32).min(max_idx);
        let x0 = to_idx( pb.x_min);
        let y0 = to_idx( pb.y_min);
        let x1 = to_idx( (pb.x_max - 1e-9).max(pb.x_min)).max(x0);
        let y1 = to_idx( (pb.y_max - 1e-9).max(pb.y_min)).max(y0);

        TileRange { zoom, x0, y0, x1, y1 }
    }

    pub fn nx (&self)->u32 { self.x1 - self.x0 + 1 }
    pub fn ny (&self)->u32 { self.y1 - self.y0 + 1 }
    pub fn len (&self)->usize { (self.nx() * self.ny()) as usize }

    /// iterate (x,y) tile indices row by row
    pub fn tiles (&self)->impl Iterator<Item=(u32,u32)> + '_ {
        (self.y0..=self.y1).flat_map( move |y| (self.x0..=self.x1).map( move |x| (x,y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse() {
        for (lon,lat) in [(16.452, -34.834), (0.0, 0.0), (-122.4, 37.7)] {
            let x = lon_to_pixel_x( lon, 7, 256);
            let y = lat_to_pixel_y( lat, 7, 256);
            assert!( (pixel_x_to_lon( x, 7, 256) - lon).abs() < 1e-9);
            assert!( (pixel_y_to_lat( y, 7, 256) - lat).abs() < 1e-9);
        }
    }
}
