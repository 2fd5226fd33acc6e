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

//! RON based configuration loading. Config files are looked up in this order:
//!   1. the given pathname as-is
//!   2. `./configs/<filename>`
//!   3. `$FIREMAP_CONFIG_DIR/<filename>`

use std::{env, path::{Path,PathBuf}};
use serde::Deserialize;
use tracing::debug;

use crate::{define_error, fs::filepath_contents};

pub const CONFIGS: &'static str = "configs";
pub const CONFIG_DIR_ENV: &'static str = "FIREMAP_CONFIG_DIR";

define_error!{ pub ConfigError =
    IOError(#[from] std::io::Error) : "IO error: {0}",
    RonError(#[from] ron::error::SpannedError) : "RON error: {0}",
    ConfigNotFound(String) : "config not found: {0}",
    InvalidConfig(String) : "invalid config: {0}"
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub fn find_config_file (filename: &str)->Option<PathBuf> {
    let path = Path::new(filename);
    if path.is_file() {
        return Some(path.to_path_buf())
    }

    if path.is_relative() {
        let p = Path::new(CONFIGS).join(path);
        if p.is_file() { return Some(p) }

        if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
            let p = Path::new(&dir).join(path);
            if p.is_file() { return Some(p) }
        }
    }

    None
}

/// load and deserialize a RON config from the first matching location
pub fn load_config<C> (filename: &str)->Result<C> where C: for <'a> Deserialize<'a> {
    let path = find_config_file( filename).ok_or_else( || ConfigError::ConfigNotFound(filename.to_string()))?;
    debug!("loading config {path:?}");
    let data = filepath_contents(&path)?;
    config_from_bytes( data.as_slice())
}

pub fn config_from_bytes<C> (data: &[u8])->Result<C> where C: for <'a> Deserialize<'a> {
    Ok( ron::de::from_bytes( data)? )
}

pub fn config_from_str<C> (s: &str)->Result<C> where C: for <'a> Deserialize<'a> {
    Ok( ron::de::from_str( s)? )
}
