//! Historical rail map server.
//!
//! Serves the N05 rail section and station datasets as GeoJSON, optionally
//! narrowed to the features that were in service on a given date.

pub mod assemble;
pub mod cache;
pub mod config;
pub mod geojson;
pub mod timeline;
pub mod web;
