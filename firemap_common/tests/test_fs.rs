#![allow(unused)]

use std::fs;
use firemap_common::fs::*;

#[test]
fn test_non_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a/b/c.txt");

    ensure_parent_dir(&path).unwrap();
    assert!( dir.path().join("a/b").is_dir());
    assert!( !is_non_empty_file(&path));

    fs::write( &path, "").unwrap();
    assert!( !is_non_empty_file(&path));
    assert!( filepath_contents(&path).is_err());

    fs::write( &path, "fire").unwrap();
    assert!( is_non_empty_file(&path));
    assert_eq!( filepath_contents_as_string(&path).unwrap(), "fire");
    assert_eq!( file_length(&path), Some(4));
    assert_eq!( extension(&path), Some("txt"));
}
