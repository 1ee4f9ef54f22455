//! # Events
//!
//! After the driver table, a replay declares how many slices (simulation time steps) it holds,
//! the total number of events, and the time range covered. Each slice is its time followed by a
//! two byte count of the events within it.
//!
//! Every event starts with a little endian 32 bit header word packing:
//!
//! ```plain
//!  31   29 28     23 22    17 16        8 7        0
//! +-------+---------+--------+-----------+----------+
//! | class | unknown |  type  |   size    |  driver  |
//! +-------+---------+--------+-----------+----------+
//! ```
//!
//! followed by a single byte of unknown purpose and then the body of the event. Only two kinds
//! of events are decoded, vehicle telemetry and timing checkpoints; every other event is passed
//! over by its declared size. The declared size does not always agree with the number of bytes
//! the body turns out to occupy, so the decoder moves forward to cover the declared size when a
//! body is shorter, and trusts the bytes consumed when a body is longer.

use crate::core_parser::CoreParser;
use crate::errors::{DecodeError, ParseError};
use crate::models::{Checkpoint, DriverEvent, Event, Telemetry};
use bitter::{BitReader, LittleEndianReader};
use tracing::trace;

/// The slice and event counts that precede the event data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventsHeader {
    pub slice_count: u32,
    pub total_event_count: u32,
    pub time_start: f32,
    pub time_end: f32,
}

pub(crate) fn parse_events_header(rlp: &mut CoreParser) -> Result<EventsHeader, ParseError> {
    Ok(EventsHeader {
        slice_count: rlp.take_u32()?,
        total_event_count: rlp.take_u32()?,
        time_start: rlp.take_f32()?,
        time_end: rlp.take_f32()?,
    })
}

/// Which decoder, if any, applies to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Telemetry,
    Checkpoint,
    Unrecognized,
}

/// The unpacked event header word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventHeader {
    pub driver: u8,

    /// Declared size of the event body in bytes
    pub size: u16,
    pub event_type: u8,
    pub class: u8,
}

impl EventHeader {
    /// Unpacks the header from the first four bytes of `data`, returning `None` if there
    /// aren't four bytes
    pub fn from_bytes(data: &[u8]) -> Option<EventHeader> {
        let mut bits = LittleEndianReader::new(data.get(..4)?);
        let driver = bits.read_bits(8)? as u8;
        let size = bits.read_bits(9)? as u16;
        let event_type = bits.read_bits(6)? as u8;
        bits.read_bits(6)?;
        let class = bits.read_bits(3)? as u8;
        Some(EventHeader {
            driver,
            size,
            event_type,
            class,
        })
    }

    pub fn kind(&self) -> EventKind {
        match (self.class, self.event_type) {
            (0, 7..=16) => EventKind::Telemetry,
            (3, 6) => EventKind::Checkpoint,
            _ => EventKind::Unrecognized,
        }
    }
}

fn parse_telemetry(rlp: &mut CoreParser) -> Result<Telemetry, ParseError> {
    let info1 = rlp.take_data(4)?;
    let _info2 = rlp.take_u32()?;

    // Speed is five bytes in some yet unknown encoding
    let _speed = rlp.take_data(5)?;
    rlp.skip(23)?;
    let tc_and_brakes = rlp.take_u8()?;

    // Position (x, y, z) and orientation (roll, pitch, yaw). These don't decode to
    // believable values yet.
    for _ in 0..6 {
        rlp.take_f32()?;
    }

    let (steering, throttle, in_pit, rpm) =
        unpack_inputs(info1).ok_or(ParseError::BufferUnderrun(4, info1.len()))?;

    Ok(Telemetry {
        throttle: normalize_six_bits(throttle),
        brake: normalize_six_bits(u64::from(tc_and_brakes & 0x3f)),
        steering,
        rpm,
        in_pit,
    })
}

/// Steering (7 bits), 4 unknown bits, throttle (6 bits), pit flag, and rpm (14 bits)
fn unpack_inputs(info: &[u8]) -> Option<(u8, u64, bool, u16)> {
    let mut bits = LittleEndianReader::new(info);
    let steering = bits.read_bits(7)? as u8;
    bits.read_bits(4)?;
    let throttle = bits.read_bits(6)?;
    let in_pit = bits.read_bit()?;
    let rpm = bits.read_bits(14)? as u16;
    Some((steering, throttle, in_pit, rpm))
}

#[inline]
fn normalize_six_bits(x: u64) -> f32 {
    x as f32 / 63.0
}

fn parse_checkpoint(rlp: &mut CoreParser) -> Result<Checkpoint, ParseError> {
    let cumulative_time = rlp.take_f32()?;
    let timestamp = rlp.take_f32()?;
    let lap_number = rlp.take_u8()?;
    let sector = sector_from_raw(rlp.take_u8()?);
    Ok(Checkpoint {
        cumulative_time,
        timestamp,
        lap_number,
        sector,
    })
}

/// The top two bits hold the sector, except that the third sector is encoded as zero
fn sector_from_raw(raw: u8) -> u8 {
    match (raw >> 6) & 0x3 {
        0 => 3,
        x => x,
    }
}

/// A lazy, single pass iterator over the events of a replay. Once an error is yielded, or
/// all declared slices have been read, the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct EventStream<'a> {
    core: CoreParser<'a>,
    header: EventsHeader,
    slices_left: u32,
    events_left: u16,
    time: f32,
    done: bool,
}

impl<'a> EventStream<'a> {
    /// Creates a stream over the slices that start at `offset` of `data`
    pub fn new(data: &'a [u8], offset: usize, header: EventsHeader) -> Self {
        EventStream {
            core: CoreParser::at(data, offset),
            header,
            slices_left: header.slice_count,
            events_left: 0,
            time: header.time_start,
            done: false,
        }
    }

    pub fn header(&self) -> &EventsHeader {
        &self.header
    }

    /// Offset of the next byte the stream will decode
    pub fn bytes_read(&self) -> usize {
        self.core.bytes_read()
    }

    fn next_slice(&mut self) -> Result<(), ParseError> {
        self.time = self.core.take_f32()?;
        self.events_left = self.core.take_u16()?;
        self.slices_left -= 1;
        Ok(())
    }

    fn decode_event(&mut self) -> Result<Option<DriverEvent>, ParseError> {
        let header = self.core.take_data(4)?;
        let header = EventHeader::from_bytes(header)
            .ok_or(ParseError::BufferUnderrun(4, header.len()))?;
        self.core.skip(1)?;
        self.core.mark();

        let event = match header.kind() {
            EventKind::Telemetry => Some(Event::Telemetry(parse_telemetry(&mut self.core)?)),
            EventKind::Checkpoint => Some(Event::Checkpoint(parse_checkpoint(&mut self.core)?)),
            EventKind::Unrecognized => {
                trace!(
                    class = header.class,
                    event_type = header.event_type,
                    size = header.size,
                    "skipping unrecognized event"
                );
                None
            }
        };

        let consumed = self.core.consumed_since_mark();
        let shortfall = self.core.pad_to_mark(usize::from(header.size))?;
        if shortfall > 0 && event.is_some() {
            trace!(
                declared = header.size,
                consumed,
                "event body shorter than declared size"
            );
        }
        self.core.mark();

        Ok(event.map(|event| DriverEvent {
            time: self.time,
            driver_number: header.driver,
            event,
        }))
    }

    fn advance(&mut self) -> Result<Option<DriverEvent>, DecodeError> {
        loop {
            while self.events_left == 0 {
                if self.slices_left == 0 {
                    return Ok(None);
                }

                self.next_slice()
                    .map_err(|e| DecodeError::new("slice header", self.core.bytes_read(), e))?;
            }

            self.events_left -= 1;
            let event = self
                .decode_event()
                .map_err(|e| DecodeError::new("event", self.core.bytes_read(), e))?;

            if let Some(event) = event {
                return Ok(Some(event));
            }
        }
    }
}

impl<'a> Iterator for EventStream<'a> {
    type Item = Result<DriverEvent, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.advance() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<'a> std::iter::FusedIterator for EventStream<'a> {}
