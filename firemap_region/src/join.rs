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

use firemap_firms::{FireRecord, JoinedFireRecord};
use crate::RegionPolygon;

/// inner spatial join of fire records with region polygons: records whose point is not inside (or on the
/// boundary of) any polygon are dropped. Which polygon matched is irrelevant so the first match wins, i.e. each
/// record shows up at most once. Output coordinates are taken from the point geometry, input order is preserved
pub fn spatial_join (records: &[FireRecord], regions: &[RegionPolygon])->Vec<JoinedFireRecord> {
    records.iter().filter_map( |rec| {
        let point = rec.point();
        regions.iter()
            .find( |region| region.intersects( &point))
            .map( |_| JoinedFireRecord::new( &point, rec))
    }).collect()
}
