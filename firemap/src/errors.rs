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

use firemap_common::{define_error, config::ConfigError};
use firemap_region::RegionError;
use firemap_firms::FirmsError;
use firemap_render::RenderError;

pub type Result<T> = std::result::Result<T, FireMapError>;

// all of these are fatal. A join without records is not an error
define_error!{ pub FireMapError = 
    BoundaryError(#[from] RegionError) : "boundary data not available: {0}",
    FireDataError(#[from] FirmsError) : "fire data retrieval failed: {0}",
    BasemapError(RenderError) : "basemap retrieval failed: {0}",
    EncodingError(RenderError) : "output encoding failed: {0}",
    RenderError(#[from] RenderError) : "render error: {0}",
    ConfigError(#[from] ConfigError) : "config error: {0}",
    IOError(#[from] std::io::Error) : "IO error: {0}",
}

pub fn invalid_config (msg: impl ToString)->FireMapError {
    FireMapError::ConfigError( ConfigError::InvalidConfig( msg.to_string()))
}
