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

//! common utilities shared by the firemap crates: error/cli macros, geographic bounds,
//! filesystem and (blocking) network helpers, date functions and RON config loading

pub mod macros;
pub mod fs;
pub mod datetime;
pub mod geo;
pub mod net;
pub mod config;

// a global fn that can be used with serde(skip_serializing_if="firemap_common::is_none")
#[inline] pub fn is_none<T> (opt: &Option<T>)->bool { opt.is_none() }

/// parse a "rrggbb" or "#rrggbb" hex color spec into rgb components
pub fn parse_hex_rgb (hex_color: &str)->Option<[u8;3]> {
    let s = hex_color.trim_start_matches('#');
    if s.len() != 6 { return None }

    let v = u32::from_str_radix( s, 16).ok()?;
    let r = (v >> 16) as u8;
    let g = (v >> 8 & 0xff) as u8;
    let b = (v & 0xff) as u8;

    Some([r, g, b])
}

/// linear interpolation between a and b for t in [0,1]
#[inline] pub fn lerp (a: f64, b: f64, t: f64)->f64 { a + (b - a) * t }

#[inline] pub fn clamp01 (x: f64)->f64 { x.max(0.0).min(1.0) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_rgb() {
        assert_eq!( parse_hex_rgb("#ff8000"), Some([255,128,0]));
        assert_eq!( parse_hex_rgb("0a0b0c"), Some([10,11,12]));
        assert_eq!( parse_hex_rgb("fff"), None);
        assert_eq!( parse_hex_rgb("zzzzzz"), None);
    }
}
