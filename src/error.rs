//! Errors for the non-realtime side of the crate: presets and their files.
//!
//! Audio processing never fails; everything here comes from parsing or disk I/O.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid preset: {0}")]
    InvalidPreset(String),

    #[error("preset not found: {0}")]
    PresetNotFound(String),

    #[error("invalid number for {attribute}: {value:?}")]
    InvalidNumber { attribute: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
