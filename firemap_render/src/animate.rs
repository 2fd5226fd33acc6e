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

//! date accumulation and frame sequencing for fire animations.
//!
//! Records are grouped by acquisition date in ascending order. Group k shows all points of groups 0..=k: points
//! of earlier dates stay visible as faded "shadow" marks. Between two consecutive groups the entering points fade
//! in while the current ones fade out to the shadow opacity, using a cubic-in-out easing.

use std::{collections::BTreeMap, fs::File, io::BufWriter, path::Path};
use chrono::NaiveDate;
use image::{codecs::gif::{GifEncoder,Repeat}, Delay, Frame, ImageFormat};
use tracing::{info,debug};

use firemap_common::{clamp01, datetime::fmt_date, fs::ensure_parent_dir, lerp};
use firemap_firms::JoinedFireRecord;
use crate::{errors::{Result,RenderError}, frame::{FrameRenderer,StyledPoint}, AnimationConfig, RenderConfig};

/// gif encoder speed (1: best quality/slowest .. 30: fastest)
const GIF_SPEED: i32 = 10;

/// the records of a single acquisition date together with everything that is visible once this date is reached
#[derive(Debug,Clone,PartialEq)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub entering: Vec<JoinedFireRecord>,
    pub visible: Vec<JoinedFireRecord>,
}

/// fold records into ascending date groups with running (accumulated) visible sets
pub fn accumulate_by_date (records: &[JoinedFireRecord])->Vec<DateGroup> {
    let mut by_date: BTreeMap<NaiveDate,Vec<JoinedFireRecord>> = BTreeMap::new();
    for r in records {
        by_date.entry( r.acquisition_date).or_default().push( *r);
    }

    let mut visible: Vec<JoinedFireRecord> = Vec::with_capacity( records.len());
    by_date.into_iter().map( |(date,entering)| {
        visible.extend_from_slice( &entering);
        DateGroup { date, entering, visible: visible.clone() }
    }).collect()
}

pub fn ease_cubic_in_out (t: f64)->f64 {
    let t = clamp01(t);
    if t < 0.5 { 4.0 * t * t * t } else { 1.0 - (-2.0 * t + 2.0).powi(3) / 2.0 }
}

/// position of a single frame in group time: `progress` is the transition state from `group` to `group+1`
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct FrameSpec {
    pub group: usize,
    pub progress: f64,
}

impl FrameSpec {
    /// the group whose date is shown in the frame label
    pub fn label_group (&self, n_groups: usize)->usize {
        if self.progress >= 0.5 { (self.group + 1).min( n_groups.saturating_sub(1)) } else { self.group }
    }
}

/// the complete sequence of frames. `n_frames` is the total number of frames, including `start_pause` copies of the
/// first state and `end_pause` copies of the last state. The remaining frames are spread evenly over [0, n_groups-1]
#[derive(Debug,Clone,PartialEq)]
pub struct FrameSchedule {
    pub n_groups: usize,
    pub frames: Vec<FrameSpec>,
}

impl FrameSchedule {
    pub fn new (n_groups: usize, n_frames: u32, start_pause: u32, end_pause: u32)->Result<Self> {
        if n_frames == 0 || start_pause.checked_add( end_pause).is_none_or( |n| n >= n_frames) {
            return Err( RenderError::InvalidDimensions( 
                format!("{n_frames} frames leave no room for transitions with pauses {start_pause}+{end_pause}")))
        }

        let mut frames: Vec<FrameSpec> = Vec::with_capacity( n_frames as usize);
        let last = n_groups.saturating_sub(1);
        let first_state = FrameSpec { group: 0, progress: 0.0 };
        let last_state = FrameSpec { group: last, progress: 0.0 };

        for _ in 0..start_pause { frames.push( first_state) }

        let n = n_frames - start_pause - end_pause;
        if n == 1 {
            frames.push( last_state);
        } else {
            for i in 0..n {
                let t = i as f64 * last as f64 / (n - 1) as f64;
                let group = (t.floor() as usize).min(last);
                let progress = if group == last { 0.0 } else { t - group as f64 };
                frames.push( FrameSpec { group, progress });
            }
        }

        for _ in 0..end_pause { frames.push( last_state) }

        Ok( FrameSchedule { n_groups, frames } )
    }

    pub fn len (&self)->usize { self.frames.len() }
}

/// the markers of a frame with their transition opacities
pub fn frame_points (groups: &[DateGroup], spec: &FrameSpec, current_alpha: f64, shadow_alpha: f64)->Vec<StyledPoint> {
    let mut points = Vec::new();
    if groups.is_empty() { return points }

    let k = spec.group.min( groups.len() - 1);
    let e = ease_cubic_in_out( spec.progress);

    let mut push = |recs: &[JoinedFireRecord], alpha: f64| {
        for r in recs {
            points.push( StyledPoint { lon: r.longitude, lat: r.latitude, celsius: r.brightness_celsius(), alpha });
        }
    };

    for g in &groups[..k] {
        push( &g.entering, shadow_alpha);
    }
    push( &groups[k].entering, lerp( current_alpha, shadow_alpha, e));

    if e > 0.0 && k + 1 < groups.len() {
        push( &groups[k+1].entering, current_alpha * e);
    }

    points
}

fn frame_label (groups: &[DateGroup], spec: &FrameSpec)->String {
    if groups.is_empty() {
        String::new()
    } else {
        fmt_date( &groups[spec.label_group( groups.len())].date)
    }
}

pub fn frame_delay (config: &AnimationConfig)->Delay {
    match config.duration {
        Some(secs) if secs > 0.0 => Delay::from_numer_denom_ms( (secs * 1000.0).round() as u32, config.n_frames.max(1)),
        _ => Delay::from_numer_denom_ms( 1000, config.fps.max(1))
    }
}

/// render the frame sequence for the given date groups and encode it as looping GIF. Returns the number of frames
pub fn write_gif (renderer: &FrameRenderer, render_config: &RenderConfig, config: &AnimationConfig,
                  groups: &[DateGroup], path: &Path)->Result<usize> {
    let schedule = FrameSchedule::new( groups.len(), config.n_frames, config.start_pause, config.end_pause)?;
    let delay = frame_delay( config);
    let (current_alpha, shadow_alpha) = (render_config.current_alpha as f64, render_config.shadow_alpha as f64);

    ensure_parent_dir( path)?;
    let writer = BufWriter::new( File::create(path)?);
    let mut encoder = GifEncoder::new_with_speed( writer, GIF_SPEED);
    encoder.set_repeat( Repeat::Infinite).map_err( |e| RenderError::EncodingError( e.to_string()))?;

    info!("encoding {} frames for {} date groups into {:?}", schedule.len(), groups.len(), path);
    for (i,spec) in schedule.frames.iter().enumerate() {
        let points = frame_points( groups, spec, current_alpha, shadow_alpha);
        let img = renderer.render( &frame_label( groups, spec), &points);
        encoder.encode_frame( Frame::from_parts( img, 0, 0, delay)).map_err( |e| RenderError::EncodingError( e.to_string()))?;
        debug!("frame {i}: group {} progress {:.2}, {} points", spec.group, spec.progress, points.len());
    }

    Ok( schedule.len() )
}

/// single image with all accumulated points of all groups
pub fn write_static (renderer: &FrameRenderer, render_config: &RenderConfig, groups: &[DateGroup], path: &Path)->Result<()> {
    let (label, points) = match (groups.first(), groups.last()) {
        (Some(first), Some(last)) => {
            let label = if first.date == last.date { fmt_date( &first.date) } else { format!("{} to {}", fmt_date( &first.date), fmt_date( &last.date)) };
            let alpha = render_config.current_alpha as f64;
            let points = last.visible.iter().map( |r| StyledPoint { lon: r.longitude, lat: r.latitude, celsius: r.brightness_celsius(), alpha }).collect();
            (label, points)
        }
        _ => (String::new(), Vec::new())
    };

    ensure_parent_dir( path)?;
    let img = renderer.render( &label, &points);
    img.save_with_format( path, ImageFormat::Png).map_err( |e| RenderError::EncodingError( e.to_string()))?;
    info!("saved static map with {} points to {:?}", points.len(), path);
    Ok(())
}
