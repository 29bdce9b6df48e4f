//! Minimal NZB document model.
//!
//! An NZB is an XML listing of Usenet articles plus an optional `<head>` with
//! `<meta type="...">value</meta>` entries:
//!
//! ```xml
//! <nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
//!   <head>
//!     <meta type="title">Some.Release</meta>
//!     <meta type="password">secret</meta>
//!   </head>
//!   <file poster="a@b" date="1700000000" subject="Some.Release.part01.rar (1/2)">
//!     <groups><group>alt.binaries.test</group></groups>
//!     <segments><segment bytes="768000" number="1">id@news</segment></segments>
//!   </file>
//! </nzb>
//! ```
//!
//! Only what nzb_move needs is modelled; unknown elements and attributes are ignored.

use quick_xml::de::{DeError, from_reader, from_str};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

use crate::fs_ops::io_error_with_help_io;

#[derive(Debug, Error)]
pub enum NzbError {
    #[error("read nzb: {0}")]
    Io(#[from] io::Error),
    #[error("parse nzb: {0}")]
    Xml(#[from] DeError),
}

#[derive(Debug, Deserialize)]
struct RawNzb {
    #[serde(default)]
    head: Option<RawHead>,
    #[serde(rename = "file", default)]
    files: Vec<RawFile>,
}

#[derive(Debug, Deserialize)]
struct RawHead {
    #[serde(rename = "meta", default)]
    meta: Vec<RawMeta>,
}

#[derive(Debug, Deserialize)]
struct RawMeta {
    #[serde(rename = "@type", default)]
    key: String,
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct RawFile {
    #[serde(rename = "@subject", default)]
    subject: String,
    #[serde(rename = "@poster", default)]
    poster: String,
    #[serde(rename = "@date", default)]
    date: Option<u64>,
    #[serde(default)]
    groups: Option<RawGroups>,
    #[serde(default)]
    segments: Option<RawSegments>,
}

#[derive(Debug, Deserialize)]
struct RawGroups {
    #[serde(rename = "group", default)]
    group: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawSegments {
    #[serde(rename = "segment", default)]
    segment: Vec<RawSegment>,
}

#[derive(Debug, Deserialize)]
struct RawSegment {
    #[serde(rename = "@bytes", default)]
    bytes: u64,
    #[serde(rename = "@number", default)]
    number: u32,
    #[serde(rename = "$text", default)]
    message_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NzbSegment {
    pub number: u32,
    pub bytes: u64,
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NzbFile {
    pub subject: String,
    pub poster: String,
    /// Unix timestamp as posted.
    pub date: Option<u64>,
    pub groups: Vec<String>,
    pub segments: Vec<NzbSegment>,
}

impl NzbFile {
    pub fn bytes(&self) -> u64 {
        self.segments.iter().map(|s| s.bytes).sum()
    }
}

/// Parsed NZB: ordered head metadata plus the file list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NzbDocument {
    pub metadata: Vec<(String, String)>,
    pub files: Vec<NzbFile>,
}

impl From<RawNzb> for NzbDocument {
    fn from(raw: RawNzb) -> Self {
        let metadata = raw
            .head
            .map(|h| {
                h.meta
                    .into_iter()
                    .map(|m| (m.key.trim().to_string(), m.value.trim().to_string()))
                    .collect()
            })
            .unwrap_or_default();
        let files = raw
            .files
            .into_iter()
            .map(|f| NzbFile {
                subject: f.subject,
                poster: f.poster,
                date: f.date,
                groups: f.groups.map(|g| g.group).unwrap_or_default(),
                segments: f
                    .segments
                    .map(|s| {
                        s.segment
                            .into_iter()
                            .map(|seg| NzbSegment {
                                number: seg.number,
                                bytes: seg.bytes,
                                message_id: seg.message_id.trim().to_string(),
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect();
        NzbDocument { metadata, files }
    }
}

impl NzbDocument {
    pub fn parse(xml: &str) -> Result<Self, NzbError> {
        let raw: RawNzb = from_str(xml)?;
        Ok(raw.into())
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, NzbError> {
        let raw: RawNzb = from_reader(reader)?;
        Ok(raw.into())
    }

    /// Open and parse an NZB file. The handle is dropped before returning.
    pub fn load(path: &Path) -> Result<Self, NzbError> {
        let file = File::open(path).map_err(io_error_with_help_io("open nzb", path))?;
        Self::from_reader(BufReader::new(file))
    }

    /// First metadata value whose key matches `key` case-insensitively.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(NzbFile::bytes).sum()
    }
}
