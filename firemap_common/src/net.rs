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

//! common utility functions for (blocking) network operations. Firemap runs its stages strictly
//! sequential so we use the reqwest blocking client throughout

use std::{fs::File, io::Write, path::Path, time::Duration};
use reqwest::{blocking::{Client, Response}, header::{HeaderMap,HeaderValue,USER_AGENT}, StatusCode};
use regex::Regex;
use lazy_static::lazy_static;
use tracing::debug;

use crate::{define_error, fs::ensure_parent_dir};

const PATH: usize = 5;

lazy_static! {
    // [scheme,user,host,port,path,query]
    static ref URL_RE: Regex = Regex::new( r"(.+)://(?:(.+)@)?([^:/]+)(?::(\d+))?(?:/([^?]+))?(?:\?(.+))?").unwrap();
    static ref FNAME_RE: Regex = Regex::new( r"(?:.*/)?(.*)").unwrap();
}

define_error!{ pub NetError = 
    IOError(#[from] std::io::Error) : "IO error: {0}",
    NotFoundError(String) : "not found {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    StatusError(String, u16) : "request {0} failed with status {1}",
    OpFailed(String) : "operation failed: {0}"
}

pub type Result<T> = std::result::Result<T, NetError>;

/// create a blocking client with an optional user agent header. Note there is no request timeout
pub fn create_client (user_agent: Option<&str>)->Result<Client> {
    let mut headers = HeaderMap::new();
    if let Some(ua) = user_agent {
        let v = HeaderValue::from_str(ua).map_err(|e| NetError::OpFailed(format!("invalid user agent: {e}")))?;
        headers.insert( USER_AGENT, v);
    }
    Ok( Client::builder().default_headers(headers).timeout( None::<Duration>).build()? )
}

fn check_status (url: &str, response: Response)->Result<Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::NOT_FOUND => Err( NetError::NotFoundError(url.to_string())),
        other => Err( NetError::StatusError( url.to_string(), other.as_u16()))
    }
}

/// HTTP GET the given URL and store the response body in a file. Returns the number of bytes written
pub fn download_url (client: &Client, url: &str, path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    debug!("GET {url} -> {path:?}");

    let mut response = check_status( url, client.get(url).send()?)?;

    ensure_parent_dir( path)?;
    let mut file = File::create(path)?;
    let len = response.copy_to( &mut file)?;
    file.flush()?;

    Ok(len)
}

/// HTTP GET the given URL and return the response body as bytes
pub fn get_bytes (client: &Client, url: &str) -> Result<Vec<u8>> {
    debug!("GET {url}");
    let response = check_status( url, client.get(url).send()?)?;
    Ok( response.bytes()?.to_vec() )
}

/// get filename part (last path element) of complete URL
/// NOTE - this does not work for partial (relative) URLs
pub fn url_file_name<'a> (url: &'a str) -> Option<&'a str> {
    URL_RE.captures( url)
    .and_then( |cap| cap.get( PATH))
    .map( |m| m.as_str())
    .and_then( |p| FNAME_RE.captures( p))
    .and_then( |cap| cap.get(1))
    .map( |m| m.as_str())
    .filter( |s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_file_name() {
        assert_eq!( url_file_name("https://geodata.ucdavis.edu/gadm/gadm4.1/json/gadm41_ZAF_1.json"), Some("gadm41_ZAF_1.json"));
        assert_eq!( url_file_name("https://example.com/tiles/4/8/9.png?key=x"), Some("9.png"));
        assert_eq!( url_file_name("https://example.com"), None);
    }
}
