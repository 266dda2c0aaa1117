pub mod client;
pub mod config;
pub mod consts;
pub mod controller;
pub mod error;
pub mod file;
pub mod filename;
pub mod params;
pub mod payload;
pub mod preview;
