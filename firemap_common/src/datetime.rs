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

use chrono::{DateTime, Days, NaiveDate, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// this should be used wherever we might have to use a configured date instead of wall clock
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

#[inline]
pub fn utc_today()->NaiveDate {
    utc_now().date_naive()
}

/// the most recent full day (UTC)
pub fn yesterday_utc()->NaiveDate {
    days_before( utc_today(), 1)
}

pub fn days_before (date: NaiveDate, n: u64)->NaiveDate {
    date.checked_sub_days( Days::new(n)).unwrap_or(NaiveDate::MIN)
}

/// ISO 8601 calendar date ("2024-01-31")
pub fn fmt_date (date: &NaiveDate)->String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date (s: &str)->Option<NaiveDate> {
    NaiveDate::parse_from_str( s.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_fmt() {
        let d = NaiveDate::from_ymd_opt( 2024, 1, 5).unwrap();
        assert_eq!( fmt_date(&d), "2024-01-05");
        assert_eq!( parse_date(" 2024-01-05 "), Some(d));
        assert_eq!( parse_date("01/05/2024"), None);
        assert_eq!( days_before(d, 5), NaiveDate::from_ymd_opt( 2023, 12, 31).unwrap());
    }
}
