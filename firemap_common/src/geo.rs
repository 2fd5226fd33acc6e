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

//! geographic (WGS84 longitude/latitude degrees) value types. We use the [geo](https://docs.rs/geo/latest/geo/index.html)
//! types underneath so that algorithms of the geo crate can be applied without copying

use std::fmt;
use serde::{Serialize,Deserialize};
use geo::{Coord, Rect};

use crate::define_error;

define_error!{ pub GeoError =
    InvalidBounds(String) : "invalid bounds: {0}"
}

pub type Result<T> = std::result::Result<T, GeoError>;

/* #region GeoBoundingBox ****************************************************************************************/

/// a validated geographic bounding box in degrees with xmin < xmax and ymin < ymax.
/// Instances can only be created through checked constructors (this includes deserialization)
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(try_from="WsenBounds", into="WsenBounds")]
pub struct GeoBoundingBox(Rect);

/// the serialized form of GeoBoundingBox
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
struct WsenBounds {
    #[serde(alias="west")] xmin: f64,
    #[serde(alias="south")] ymin: f64,
    #[serde(alias="east")] xmax: f64,
    #[serde(alias="north")] ymax: f64
}

impl TryFrom<WsenBounds> for GeoBoundingBox {
    type Error = GeoError;
    fn try_from (b: WsenBounds)->Result<Self> { GeoBoundingBox::new( b.xmin, b.ymin, b.xmax, b.ymax) }
}

impl From<GeoBoundingBox> for WsenBounds {
    fn from (bbox: GeoBoundingBox)->Self {
        WsenBounds { xmin: bbox.xmin(), ymin: bbox.ymin(), xmax: bbox.xmax(), ymax: bbox.ymax() }
    }
}

impl GeoBoundingBox {
    pub fn new (xmin: f64, ymin: f64, xmax: f64, ymax: f64)->Result<Self> {
        if !(xmin.is_finite() && ymin.is_finite() && xmax.is_finite() && ymax.is_finite()) {
            return Err( GeoError::InvalidBounds( format!("non-finite coordinate in [{xmin},{ymin},{xmax},{ymax}]")))
        }
        if xmin >= xmax {
            return Err( GeoError::InvalidBounds( format!("xmin {xmin} not < xmax {xmax}")))
        }
        if ymin >= ymax {
            return Err( GeoError::InvalidBounds( format!("ymin {ymin} not < ymax {ymax}")))
        }
        // Rect::new would silently normalize swapped corners, which we don't want to accept
        Ok( GeoBoundingBox( Rect::new( Coord{x: xmin, y: ymin}, Coord{x: xmax, y: ymax})) )
    }

    pub fn from_rect (rect: Rect)->Result<Self> {
        GeoBoundingBox::new( rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    /// the smallest box that encloses all given rects
    pub fn enclosing<I> (rects: I)->Result<Self> where I: IntoIterator<Item=Rect> {
        let mut it = rects.into_iter();
        let first = it.next().ok_or( GeoError::InvalidBounds("no geometries to enclose".to_string()))?;

        let (mut xmin, mut ymin, mut xmax, mut ymax) = (first.min().x, first.min().y, first.max().x, first.max().y);
        for r in it {
            xmin = xmin.min( r.min().x);
            ymin = ymin.min( r.min().y);
            xmax = xmax.max( r.max().x);
            ymax = ymax.max( r.max().y);
        }
        GeoBoundingBox::new( xmin, ymin, xmax, ymax)
    }

    #[inline] pub fn xmin(&self)->f64 { self.0.min().x }
    #[inline] pub fn ymin(&self)->f64 { self.0.min().y }
    #[inline] pub fn xmax(&self)->f64 { self.0.max().x }
    #[inline] pub fn ymax(&self)->f64 { self.0.max().y }

    #[inline] pub fn width(&self)->f64 { self.xmax() - self.xmin() }
    #[inline] pub fn height(&self)->f64 { self.ymax() - self.ymin() }

    pub fn rect<'a> (&'a self)->&'a Rect { &self.0 }

    pub fn center (&self)->(f64,f64) {
        ( (self.xmin() + self.xmax()) / 2.0, (self.ymin() + self.ymax()) / 2.0 )
    }

    /// inclusive containment test
    pub fn contains_lon_lat (&self, lon: f64, lat: f64)->bool {
        lon >= self.xmin() && lon <= self.xmax() && lat >= self.ymin() && lat <= self.ymax()
    }

    pub fn union (&self, other: &GeoBoundingBox)->GeoBoundingBox {
        GeoBoundingBox( Rect::new(
            Coord{ x: self.xmin().min(other.xmin()), y: self.ymin().min(other.ymin()) },
            Coord{ x: self.xmax().max(other.xmax()), y: self.ymax().max(other.ymax()) }
        ))
    }

    pub fn to_wsen_array (&self)->[f64;4] {
        [self.xmin(), self.ymin(), self.xmax(), self.ymax()]
    }

    /// "xmin,ymin,xmax,ymax" using the shortest f64 representation that round trips
    pub fn to_wsen_string (&self)->String {
        format!("{},{},{},{}", self.xmin(), self.ymin(), self.xmax(), self.ymax())
    }
}

impl fmt::Display for GeoBoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.to_wsen_string())
    }
}

/* #endregion GeoBoundingBox */
