//! # Parsing
//!
//! An rFactor 2 replay (`.vcr`) is deflate compressed on disk. Once inflated (see
//! [`crate::inflate`]) it is a little endian binary file. The number 100 as a four byte integer
//! is the sequence:
//!
//! ```plain
//! 0x64 0x00 0x00 0x00
//! ```
//!
//! A replay is split into a header, session metadata, the driver table, and the events.
//!
//! ## Header
//!
//! The replay begins with free form text terminated by a line feed, immediately followed by the
//! four byte signature `IRSR` and the format version as a 32 bit float.
//!
//! ## Metadata
//!
//! Strings are length prefixed, but the width of the prefix varies: file names use four bytes
//! while the mod and track strings use two. The session type and whether the session was private
//! are packed into a single byte. Several regions in between have not been identified and are
//! skipped.
//!
//! ## Driver table
//!
//! A count followed by fixed layout driver records, which mix one and two byte prefixed strings
//! with a 32 byte null terminated slot for the vehicle file name.
//!
//! ## Events
//!
//! The bulk of the replay. Events are not decoded while parsing, instead the replay hands out an
//! iterator ([`ReplayFile::events`]) that decodes them on demand. See [`crate::events`].

use crate::core_parser::CoreParser;
use crate::drivers::parse_drivers;
use crate::errors::DecodeError;
use crate::events::parse_events_header;
use crate::header::{parse_header, parse_metadata};
use crate::models::ReplayFile;
use tracing::debug;

/// The most drivers a replay may declare before it is deemed corrupt
pub const DEFAULT_DRIVER_LIMIT: usize = 1024;

/// The main entry point to decoding replays. Allows one to customize decoding options.
///
/// ```
/// let data = std::fs::read("does-not-exist.vcr").unwrap_or_default();
/// let res = rf2vcr::ParserBuilder::new(&data)
///     .with_driver_limit(128)
///     .parse();
/// assert!(res.is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParserBuilder<'a> {
    data: &'a [u8],
    driver_limit: Option<usize>,
}

impl<'a> ParserBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ParserBuilder {
            data,
            driver_limit: None,
        }
    }

    /// Sets the most drivers a replay may declare. Counts above this fail the decode instead
    /// of allocating for them.
    pub fn with_driver_limit(mut self, limit: usize) -> ParserBuilder<'a> {
        self.driver_limit = Some(limit);
        self
    }

    pub fn parse(self) -> Result<ReplayFile<'a>, DecodeError> {
        let mut parser = Parser::new(
            self.data,
            self.driver_limit.unwrap_or(DEFAULT_DRIVER_LIMIT),
        );
        parser.parse()
    }
}

/// Decodes an inflated replay with the default options
pub fn decode(data: &[u8]) -> Result<ReplayFile<'_>, DecodeError> {
    ParserBuilder::new(data).parse()
}

/// Holds the current state of parsing a replay
#[derive(Debug, Clone, PartialEq)]
struct Parser<'a> {
    data: &'a [u8],
    core: CoreParser<'a>,
    driver_limit: usize,
}

impl<'a> Parser<'a> {
    fn new(data: &'a [u8], driver_limit: usize) -> Self {
        Parser {
            data,
            core: CoreParser::new(data),
            driver_limit,
        }
    }

    fn parse(&mut self) -> Result<ReplayFile<'a>, DecodeError> {
        let header = parse_header(&mut self.core)
            .map_err(|e| DecodeError::new("header", self.core.bytes_read(), e))?;

        debug!(
            version = %header.format_version,
            identifier = %header.identifier,
            "decoded replay header"
        );

        let meta = parse_metadata(&mut self.core)
            .map_err(|e| DecodeError::new("metadata", self.core.bytes_read(), e))?;

        debug!(
            track = %meta.track_path,
            session = ?meta.session_type,
            private = meta.is_private_session,
            "decoded replay metadata"
        );

        let drivers = parse_drivers(&mut self.core, self.driver_limit)
            .map_err(|e| DecodeError::new("driver table", self.core.bytes_read(), e))?;

        debug!(drivers = drivers.len(), "decoded driver table");

        let events = parse_events_header(&mut self.core)
            .map_err(|e| DecodeError::new("events header", self.core.bytes_read(), e))?;

        debug!(
            slices = events.slice_count,
            events = events.total_event_count,
            offset = self.core.bytes_read(),
            "located replay events"
        );

        Ok(ReplayFile {
            identifier: header.identifier,
            format_version: header.format_version,
            format_marker: meta.format_marker,
            mod_info: meta.mod_info,
            scenario_filename: meta.scenario_filename,
            aiw_filename: meta.aiw_filename,
            mod_name: meta.mod_name,
            mod_version: meta.mod_version,
            mod_uid: meta.mod_uid,
            track_path: meta.track_path,
            session_type: meta.session_type,
            is_private_session: meta.is_private_session,
            drivers,
            slice_count: events.slice_count,
            total_event_count: events.total_event_count,
            time_start: events.time_start,
            time_end: events.time_end,
            data: self.data,
            events_offset: self.core.bytes_read(),
        })
    }
}
