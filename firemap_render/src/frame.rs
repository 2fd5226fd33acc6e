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

//! composition of single map frames: title band, basemap with fire markers, legend and caption.
//! Everything that does not change between frames is rendered once into a base image

use std::{fs,path::Path};
use ab_glyph::{Font,FontVec,PxScale};
use image::{imageops, Rgba, RgbaImage};
use imageproc::{drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_text_mut, text_size, Blend}, rect::Rect};
use tracing::warn;

use firemap_common::parse_hex_rgb;
use crate::{basemap::Basemap, color::ColorScale, errors::{Result,RenderError,op_failed}, RenderConfig};

pub const TITLE_PT: f32 = 16.0;
pub const SUBTITLE_PT: f32 = 12.0;
pub const CAPTION_PT: f32 = 9.0;
pub const LEGEND_PT: f32 = 9.0;

const MARGIN_PT: f32 = 10.0;
const LEGEND_WIDTH_PT: f32 = 80.0;
const LEGEND_BAR_WIDTH_PT: f32 = 12.0;
const LEGEND_BAR_HEIGHT_PT: f32 = 120.0;

pub fn load_font (path: &Path)->Result<FontVec> {
    if !path.is_file() {
        return Err( op_failed( format!("font not found: {:?}", path)))
    }
    let data = fs::read(path)?;
    Ok( FontVec::try_from_vec( data)? )
}

pub fn hex_color (spec: &str, alpha: u8)->Result<Rgba<u8>> {
    let [r,g,b] = parse_hex_rgb( spec).ok_or_else( || RenderError::InvalidColor( spec.to_string()))?;
    Ok( Rgba([r,g,b,alpha]) )
}

/// a fire marker in geographic coordinates with its display value and opacity
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct StyledPoint {
    pub lon: f64,
    pub lat: f64,
    pub celsius: f64,
    pub alpha: f64,
}

/// pixel rectangle of the (scaled) basemap within the frame
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct MapArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub factor: f64, // basemap pixel -> frame pixel
}

impl MapArea {
    pub fn contains (&self, x: f64, y: f64)->bool {
        x >= self.x as f64 && x < (self.x + self.width) as f64 && y >= self.y as f64 && y < (self.y + self.height) as f64
    }
}

/// pixel sizes derived from the output density
#[derive(Debug,Clone,Copy)]
struct Layout {
    scale: f32,
    margin: u32,
    title_band: u32,
    caption_band: u32,
    legend_width: u32,
}

pub struct FrameRenderer {
    config: RenderConfig,
    width: u32,
    height: u32,
    layout: Layout,
    font: Option<FontVec>,
    color_scale: ColorScale,
    basemap: Basemap,
    map_area: MapArea,
    text_color: Rgba<u8>,
    background: Rgba<u8>,
    base: RgbaImage,
}

impl FrameRenderer {
    /// create a renderer for frames of width x height pixels at `res` dpi. Marker and font sizes scale with res/72
    pub fn new (config: &RenderConfig, width: u32, height: u32, res: u32, basemap: Basemap, color_scale: ColorScale)->Result<Self> {
        if width == 0 || height == 0 || res == 0 {
            return Err( RenderError::InvalidDimensions( format!("{width}x{height} at {res} dpi")))
        }

        let font = match &config.font {
            Some(path) => Some( load_font( path)?),
            None => {
                warn!("no font configured, frames are rendered without text");
                None
            }
        };

        let scale = res as f32 / 72.0;
        let line = |pt: f32| (pt * scale * 1.33).ceil() as u32;
        let margin = (MARGIN_PT * scale).round() as u32;
        let layout = Layout {
            scale,
            margin,
            title_band: margin + line(TITLE_PT) + margin/2 + line(SUBTITLE_PT) + margin,
            caption_band: line(CAPTION_PT) + 2 * margin,
            legend_width: (LEGEND_WIDTH_PT * scale).round() as u32,
        };

        let avail_w = width as i64 - layout.legend_width as i64 - 2 * margin as i64;
        let avail_h = height as i64 - layout.title_band as i64 - layout.caption_band as i64;
        if avail_w < 1 || avail_h < 1 {
            return Err( RenderError::InvalidDimensions( format!("no room for map in {width}x{height} frame at {res} dpi")))
        }

        let factor = (avail_w as f64 / basemap.width() as f64).min( avail_h as f64 / basemap.height() as f64);
        let mw = ((basemap.width() as f64 * factor).round() as u32).max(1);
        let mh = ((basemap.height() as f64 * factor).round() as u32).max(1);
        let map_area = MapArea {
            x: margin + (avail_w as u32 - mw.min(avail_w as u32)) / 2,
            y: layout.title_band + (avail_h as u32 - mh.min(avail_h as u32)) / 2,
            width: mw,
            height: mh,
            factor,
        };

        let text_color = hex_color( &config.text_color, 255)?;
        let background = hex_color( &config.background, 255)?;

        let mut renderer = FrameRenderer { 
            config: config.clone(), width, height, layout, font, color_scale, basemap, map_area, text_color, background,
            base: RgbaImage::new(1,1)
        };
        renderer.base = renderer.render_base();
        Ok(renderer)
    }

    pub fn width (&self)->u32 { self.width }
    pub fn height (&self)->u32 { self.height }
    pub fn map_area (&self)->&MapArea { &self.map_area }
    pub fn color_scale (&self)->&ColorScale { &self.color_scale }

    /// frame pixel position of a geographic coordinate
    pub fn position (&self, lon: f64, lat: f64)->(f64,f64) {
        let (bx,by) = self.basemap.project( lon, lat);
        ( self.map_area.x as f64 + bx * self.map_area.factor, self.map_area.y as f64 + by * self.map_area.factor )
    }

    pub fn marker_radius (&self)->i32 {
        ((self.config.point_radius * self.layout.scale).round() as i32).max(1)
    }

    /// compose a frame with the given markers. `label` replaces the `{date}` placeholder of the subtitle
    pub fn render (&self, label: &str, points: &[StyledPoint])->RgbaImage {
        let mut canvas = Blend( self.base.clone());
        self.draw_title_band( &mut canvas.0, label);

        let radius = self.marker_radius();
        for p in points {
            if p.alpha <= 0.0 { continue }
            let (x,y) = self.position( p.lon, p.lat);
            if self.map_area.contains( x, y) {
                let color = self.color_scale.rgba( p.celsius, p.alpha);
                draw_filled_circle_mut( &mut canvas, (x.round() as i32, y.round() as i32), radius, color);
            }
        }

        canvas.0
    }

    fn render_base (&self)->RgbaImage {
        let mut img = RgbaImage::from_pixel( self.width, self.height, self.background);

        let a = &self.map_area;
        let map = imageops::resize( &self.basemap.image, a.width, a.height, imageops::FilterType::Triangle);
        imageops::overlay( &mut img, &map, a.x as i64, a.y as i64);

        self.draw_legend( &mut img);

        let caption_y = (self.height - self.layout.caption_band + self.layout.margin) as i32;
        self.draw_text( &mut img, &self.config.caption, CAPTION_PT, self.layout.margin as i32, caption_y);

        img
    }

    fn draw_title_band (&self, img: &mut RgbaImage, label: &str) {
        let m = self.layout.margin as i32;
        self.draw_text( img, &self.config.title, TITLE_PT, m, m);

        let subtitle = self.config.subtitle.replace("{date}", label);
        let y = m + (TITLE_PT * self.layout.scale * 1.33).ceil() as i32 + m/2;
        self.draw_text( img, &subtitle, SUBTITLE_PT, m, y);
    }

    /// vertical gradient bar with max at the top and min at the bottom
    fn draw_legend (&self, img: &mut RgbaImage) {
        let s = self.layout.scale;
        let m = self.layout.margin;
        let x = self.width - self.layout.legend_width;
        let label_h = (LEGEND_PT * s * 1.33).ceil() as u32;

        let y0 = self.map_area.y;
        self.draw_text( img, &self.config.legend_title, LEGEND_PT, x as i32, y0 as i32);

        let bar_y = y0 + label_h + m/2;
        let bar_w = ((LEGEND_BAR_WIDTH_PT * s).round() as u32).max(1);
        let bar_h = ((LEGEND_BAR_HEIGHT_PT * s).round() as u32).min( self.map_area.height.saturating_sub( label_h + m)).max(2);

        for i in 0..bar_h {
            let t = 1.0 - i as f64 / (bar_h - 1) as f64;
            let [r,g,b] = self.color_scale.rgb_at_fraction(t);
            draw_filled_rect_mut( img, Rect::at( x as i32, (bar_y + i) as i32).of_size( bar_w, 1), Rgba([r,g,b,255]));
        }

        let lx = (x + bar_w + m/2) as i32;
        let max_label = format!("{:.0}°C", self.color_scale.max());
        let min_label = format!("{:.0}°C", self.color_scale.min());
        self.draw_text( img, &max_label, LEGEND_PT, lx, bar_y as i32);
        self.draw_text( img, &min_label, LEGEND_PT, lx, (bar_y + bar_h) as i32 - label_h as i32);
    }

    fn draw_text (&self, img: &mut RgbaImage, text: &str, pt: f32, x: i32, y: i32) {
        if text.is_empty() { return }
        if let Some(font) = &self.font {
            if let Some(scale) = font.pt_to_px_scale( pt * self.layout.scale) {
                let max_w = (self.width as i32 - x).max(0) as u32;
                let text = fit_text( text, scale, font, max_w);
                draw_text_mut( img, self.text_color, x, y, scale, font, &text);
            }
        }
    }
}

/// truncate text that would not fit into max_width pixels
fn fit_text (text: &str, scale: PxScale, font: &impl Font, max_width: u32)->String {
    let mut s = text.to_string();
    while !s.is_empty() && text_size( scale, font, &s).0 > max_width {
        s.pop();
    }
    s
}
