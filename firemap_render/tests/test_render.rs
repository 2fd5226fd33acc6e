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
use firemap_common::geo::GeoBoundingBox;
use firemap_render::{*, tiles::*, basemap::crop_to_bounds};

fn zaf_bounds ()->GeoBoundingBox {
    GeoBoundingBox::new( 16.452, -34.834, 32.891, -22.125).unwrap()
}

fn render_config ()->RenderConfig {
    ron::from_str( r#"(
        title: "Fires in South Africa",
        subtitle: "Date: {date}",
        caption: "Data: NASA FIRMS",
        color_stops: ["ff0000"],
    )"#).unwrap()
}

#[test]
fn test_tile_range() {
    let bounds = zaf_bounds();
    for zoom in [3u8, 5, 7] {
        let range = TileRange::covering( &bounds, zoom, 256);
        let pb = PixelBounds::from_geo( &bounds, zoom, 256);
        println!("zoom {zoom}: {range:?} ({} tiles), pixel bounds {pb:?}", range.len());

        assert!( (range.x0 * 256) as f64 <= pb.x_min);
        assert!( (range.y0 * 256) as f64 <= pb.y_min);
        assert!( ((range.x1 + 1) * 256) as f64 >= pb.x_max);
        assert!( ((range.y1 + 1) * 256) as f64 >= pb.y_max);
        assert_eq!( range.tiles().count(), range.len());
    }

    let range = TileRange::covering( &bounds, 0, 256);
    assert_eq!( range.len(), 1);
}

#[test]
fn test_tile_url() {
    let config: BasemapConfig = ron::from_str( r#"(
        url_pattern: "https://{s}.basemaps.cartocdn.com/{style}/{z}/{x}/{y}.png",
        subdomains: ["a", "b", "c"],
        style: "dark_all",
        zoom: 5,
        user_agent: "firemap-test",
    )"#).unwrap();

    assert!( config.validate().is_ok());
    assert_eq!( config.tile_size, 256);
    assert_eq!( config.tile_url( 17, 18), "https://c.basemaps.cartocdn.com/dark_all/5/17/18.png");
    assert_eq!( config.tile_url( 18, 18), "https://a.basemaps.cartocdn.com/dark_all/5/18/18.png");

    let mut c = config.clone();
    c.zoom = 21;
    assert!( c.validate().is_err());

    let mut c = config.clone();
    c.url_pattern = "https://tiles.example.com/{z}/{y}.png".to_string();
    assert!( c.validate().is_err());
}

#[test]
fn test_basemap_projection() {
    let bounds = zaf_bounds();
    let basemap = SolidBasemap::from_hex( 6, "#0000ff").unwrap().fetch_basemap( &bounds).unwrap();
    println!("basemap {}x{} at zoom {}", basemap.width(), basemap.height(), basemap.zoom);

    let (x0,y0) = basemap.project( bounds.xmin(), bounds.ymax());
    let (x1,y1) = basemap.project( bounds.xmax(), bounds.ymin());
    assert!( x0.abs() < 1e-6 && y0.abs() < 1e-6);
    assert!( (x1 - basemap.width() as f64).abs() <= 1.0);
    assert!( (y1 - basemap.height() as f64).abs() <= 1.0);

    // Mercator stretches high latitudes: the southern half of the box covers more pixels
    let (_,ym) = basemap.project( 20.0, (bounds.ymin() + bounds.ymax()) / 2.0);
    assert!( ym < basemap.height() as f64 / 2.0);

    assert!( SolidBasemap::from_hex( 6, "blue").is_err());
}

#[test]
fn test_crop_to_bounds() {
    let bounds = zaf_bounds();
    let zoom = 5;
    let range = TileRange::covering( &bounds, zoom, 256);
    let mosaic = image::RgbaImage::from_pixel( range.nx() * 256, range.ny() * 256, Rgba([10,20,30,255]));

    let img = crop_to_bounds( &mosaic, &range, &bounds, 256);
    let (w,h) = PixelBounds::from_geo( &bounds, zoom, 256).image_size();
    println!("mosaic {}x{} cropped to {}x{} (expected {w}x{h})", mosaic.width(), mosaic.height(), img.width(), img.height());
    assert!( img.width().abs_diff(w) <= 1);
    assert!( img.height().abs_diff(h) <= 1);
}

#[test]
fn test_color_scale() {
    let cs = ColorScale::new( &["000000", "ffffff"], 0.0, 100.0).unwrap();
    assert_eq!( cs.rgb( 0.0), [0,0,0]);
    assert_eq!( cs.rgb( 50.0), [128,128,128]);
    assert_eq!( cs.rgb( 100.0), [255,255,255]);
    assert_eq!( cs.rgb( -20.0), [0,0,0]);
    assert_eq!( cs.rgb( 500.0), [255,255,255]);
    assert_eq!( cs.rgba( 100.0, 0.5), Rgba([255,255,255,128]));

    let cs = ColorScale::new( &DEFAULT_COLOR_STOPS, 20.0, 40.0).unwrap();
    assert_eq!( cs.rgb( 20.0), [0x00,0x00,0x04]);
    assert_eq!( cs.rgb( 40.0), [0xfc,0xff,0xa4]);
    assert_eq!( cs.rgb( 28.0), [0x93,0x26,0x67]); // 3rd of 6 stops

    // degenerate range maps to the first stop
    let cs = ColorScale::new( &["102030", "ffffff"], 5.0, 5.0).unwrap();
    assert_eq!( cs.rgb( 5.0), [0x10,0x20,0x30]);

    let cs = ColorScale::for_values( &DEFAULT_COLOR_STOPS, std::iter::empty()).unwrap();
    assert_eq!( (cs.min(), cs.max()), (0.0, 0.0));

    let cs = ColorScale::for_values( &DEFAULT_COLOR_STOPS, [25.0, 31.5, 18.5].into_iter()).unwrap();
    assert_eq!( (cs.min(), cs.max()), (18.5, 31.5));

    assert!( ColorScale::new( &["00zz00"], 0.0, 1.0).is_err());
    assert!( ColorScale::new::<&str>( &[], 0.0, 1.0).is_err());
}

#[test]
fn test_frame_renderer() {
    let bounds = zaf_bounds();
    let config = render_config();
    assert!( config.validate().is_ok());
    assert!( config.font.is_none());

    let basemap = SolidBasemap::from_hex( 5, "0000ff").unwrap().fetch_basemap( &bounds).unwrap();
    let cs = ColorScale::new( config.color_stops.as_slice(), 20.0, 40.0).unwrap();
    let renderer = FrameRenderer::new( &config, 400, 300, 72, basemap, cs).unwrap();
    let area = *renderer.map_area();
    println!("map area: {area:?}");
    assert!( area.x + area.width <= 400 && area.y + area.height <= 300);

    let (lon,lat) = bounds.center();
    let points = [
        StyledPoint { lon, lat, celsius: 30.0, alpha: 1.0 },
        StyledPoint { lon: 18.0, lat: -33.0, celsius: 30.0, alpha: 0.0 }, // invisible
    ];
    let img = renderer.render( "2024-01-10", &points);
    assert_eq!( img.dimensions(), (400,300));

    let (x,y) = renderer.position( lon, lat);
    assert_eq!( *img.get_pixel( x.round() as u32, y.round() as u32), Rgba([255,0,0,255]));

    let (x,y) = renderer.position( 18.0, -33.0);
    assert_eq!( *img.get_pixel( x.round() as u32, y.round() as u32), Rgba([0,0,255,255]));

    let basemap = SolidBasemap::from_hex( 5, "0000ff").unwrap().fetch_basemap( &bounds).unwrap();
    let cs = ColorScale::new( config.color_stops.as_slice(), 20.0, 40.0).unwrap();
    assert!( FrameRenderer::new( &config, 60, 60, 72, basemap, cs).is_err());
}
