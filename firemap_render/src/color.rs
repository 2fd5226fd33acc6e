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

use image::Rgba;
use firemap_common::{clamp01, lerp, parse_hex_rgb};
use crate::errors::{Result,RenderError};

/// inferno-like default color stops from cold (dark) to hot (bright yellow)
pub const DEFAULT_COLOR_STOPS: [&str;6] = ["000004", "420a68", "932667", "dd513a", "fca50a", "fcffa4"];

/// a continuous color scale that maps [min,max] linearly onto equidistant color stops
#[derive(Debug,Clone)]
pub struct ColorScale {
    stops: Vec<[u8;3]>,
    min: f64,
    max: f64,
}

impl ColorScale {
    pub fn new<S: AsRef<str>> (hex_stops: &[S], min: f64, max: f64)->Result<Self> {
        if hex_stops.is_empty() {
            return Err( RenderError::InvalidColor("no color stops".to_string()))
        }

        let mut stops = Vec::with_capacity( hex_stops.len());
        for s in hex_stops {
            let s = s.as_ref();
            stops.push( parse_hex_rgb(s).ok_or_else( || RenderError::InvalidColor(s.to_string()))?);
        }

        Ok( ColorScale { stops, min: min.min(max), max: max.max(min) } )
    }

    /// scale over the range of values in the provided iterator (an empty iterator gives a [0,0] range)
    pub fn for_values<S: AsRef<str>> (hex_stops: &[S], values: impl Iterator<Item=f64>)->Result<Self> {
        let (min,max) = values.fold( (f64::INFINITY, f64::NEG_INFINITY), |(lo,hi), v| (lo.min(v), hi.max(v)));
        if min.is_finite() && max.is_finite() {
            ColorScale::new( hex_stops, min, max)
        } else {
            ColorScale::new( hex_stops, 0.0, 0.0)
        }
    }

    pub fn min (&self)->f64 { self.min }
    pub fn max (&self)->f64 { self.max }

    /// normalized position of value in [0,1]. Values outside the range are clamped, a degenerate range maps to 0
    pub fn fraction (&self, v: f64)->f64 {
        let d = self.max - self.min;
        if d <= f64::EPSILON || !v.is_finite() { 0.0 } else { clamp01( (v - self.min) / d) }
    }

    pub fn rgb_at_fraction (&self, t: f64)->[u8;3] {
        let n = self.stops.len();
        if n == 1 { return self.stops[0] }

        let x = clamp01(t) * (n - 1) as f64;
        let i = (x.floor() as usize).min(n - 2);
        let f = x - i as f64;
        let (c0, c1) = (self.stops[i], self.stops[i+1]);

        let mix = |a: u8, b: u8| lerp( a as f64, b as f64, f).round() as u8;
        [ mix(c0[0],c1[0]), mix(c0[1],c1[1]), mix(c0[2],c1[2]) ]
    }

    pub fn rgb (&self, v: f64)->[u8;3] {
        self.rgb_at_fraction( self.fraction(v))
    }

    /// color for value v with alpha in [0,1]
    pub fn rgba (&self, v: f64, alpha: f64)->Rgba<u8> {
        let [r,g,b] = self.rgb(v);
        Rgba([r, g, b, (clamp01(alpha) * 255.0).round() as u8])
    }
}
