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

use firemap_common::{define_error, net::NetError, config::ConfigError};

pub type Result<T> = std::result::Result<T, RenderError>;

define_error!{ pub RenderError = 
    ImageError(#[from] image::ImageError) : "image error {0}",
    IOError(#[from] std::io::Error) : "IO error: {0}",
    NetError(#[from] NetError) : "basemap tile retrieval failed: {0}",
    ConfigError(#[from] ConfigError) : "config error: {0}",
    InvalidFont( #[from] ab_glyph::InvalidFont) : "invalid font: {0}",
    InvalidColor(String) : "invalid color spec: {0}",
    InvalidDimensions(String) : "invalid dimensions: {0}",
    EncodingError(String) : "animation encoding failed: {0}",
    OpFailed(String) : "operation failed: {0}"
}

pub fn op_failed (msg: impl ToString)->RenderError {
    RenderError::OpFailed(msg.to_string())
}

pub fn invalid_config (msg: impl ToString)->RenderError {
    RenderError::ConfigError( ConfigError::InvalidConfig(msg.to_string()))
}
