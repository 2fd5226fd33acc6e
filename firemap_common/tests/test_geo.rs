#![allow(unused)]

use geo::{Coord, Rect};
use firemap_common::{config::config_from_str, geo::*};

// run with "cargo test -p firemap_common test_bbox -- --nocapture"

#[test]
fn test_bbox_invariant() {
    let bbox = GeoBoundingBox::new( 16.452, -34.834, 32.891, -22.125).unwrap();
    println!("bbox: {bbox}");
    assert!( bbox.xmin() < bbox.xmax());
    assert!( bbox.ymin() < bbox.ymax());
    assert_eq!( bbox.to_wsen_string(), "16.452,-34.834,32.891,-22.125");

    // degenerate and swapped boxes are rejected
    assert!( GeoBoundingBox::new( 10.0, 0.0, 10.0, 1.0).is_err());
    assert!( GeoBoundingBox::new( 0.0, 1.0, 1.0, 1.0).is_err());
    assert!( GeoBoundingBox::new( 20.0, 0.0, 10.0, 1.0).is_err());
    assert!( GeoBoundingBox::new( 0.0, 5.0, 1.0, -5.0).is_err());
    assert!( GeoBoundingBox::new( f64::NAN, 0.0, 1.0, 1.0).is_err());
}

#[test]
fn test_bbox_serde() {
    let bbox: GeoBoundingBox = config_from_str("(xmin: 16.452, ymin: -34.834, xmax: 32.891, ymax: -22.125)").unwrap();
    assert_eq!( bbox.to_wsen_array(), [16.452, -34.834, 32.891, -22.125]);

    let bbox1: GeoBoundingBox = config_from_str("(west: 16.452, south: -34.834, east: 32.891, north: -22.125)").unwrap();
    assert_eq!( bbox, bbox1);

    // deserialization goes through the checked ctor
    let res: std::result::Result<GeoBoundingBox,_> = config_from_str::<GeoBoundingBox>("(xmin: 32.0, ymin: -34.0, xmax: 16.0, ymax: -22.0)");
    assert!( res.is_err());

    let s = serde_json::to_string(&bbox).unwrap();
    println!("serialized: {s}");
    let bbox2: GeoBoundingBox = serde_json::from_str(&s).unwrap();
    assert_eq!( bbox, bbox2);
}

#[test]
fn test_bbox_enclosing() {
    let rects = vec![
        Rect::new( Coord{x: 18.0, y: -34.0}, Coord{x: 20.0, y: -30.0}),
        Rect::new( Coord{x: 25.0, y: -28.0}, Coord{x: 31.0, y: -22.0}),
    ];
    let bbox = GeoBoundingBox::enclosing( rects).unwrap();
    assert_eq!( bbox.to_wsen_array(), [18.0, -34.0, 31.0, -22.0]);
    assert!( bbox.contains_lon_lat( 18.0, -22.0)); // inclusive
    assert!( !bbox.contains_lon_lat( 17.99, -25.0));

    assert!( GeoBoundingBox::enclosing( Vec::<Rect>::new()).is_err());

    let other = GeoBoundingBox::new( 10.0, -40.0, 19.0, -35.0).unwrap();
    assert_eq!( bbox.union(&other).to_wsen_array(), [10.0, -40.0, 31.0, -22.0]);
}
