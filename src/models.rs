/// # Models
///
/// Here lies the data structures that an rFactor 2 replay is decoded into. Everything is
/// serializable with serde so that the command line tool (or any other consumer) can emit
/// JSON, but deserialization is not implemented as the decoding is lossy: several regions of
/// the replay are skipped and are not represented here.
use crate::errors::ParseError;
use crate::events::{EventStream, EventsHeader};
use serde::Serialize;

/// The structure that a replay is decoded into. The events are not decoded upfront, instead
/// [`ReplayFile::events`] lazily walks the buffer the replay was decoded from.
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct ReplayFile<'a> {
    /// Free form text preceding the first line feed of the replay
    pub identifier: String,

    /// Version of the replay format formatted to three significant digits ("1.00")
    pub format_version: String,
    pub format_marker: String,

    /// Opaque mod information, the structure of which is not known
    pub mod_info: String,
    pub scenario_filename: String,
    pub aiw_filename: String,
    pub mod_name: String,
    pub mod_version: String,
    pub mod_uid: String,
    pub track_path: String,
    pub session_type: SessionType,
    pub is_private_session: bool,

    /// Drivers in the order they appear in the replay. Look up a driver by the number events
    /// refer to with [`ReplayFile::driver`].
    pub drivers: Vec<Driver>,

    /// Number of slices declared by the replay
    pub slice_count: u32,

    /// Total number of events declared by the replay. It is informational only, the event
    /// stream relies on per slice counts.
    pub total_event_count: u32,
    pub time_start: f32,
    pub time_end: f32,

    #[serde(skip)]
    pub(crate) data: &'a [u8],

    #[serde(skip)]
    pub(crate) events_offset: usize,
}

impl<'a> ReplayFile<'a> {
    /// Returns a single pass iterator over the events of the replay, decoded as they are
    /// requested. Each call starts a new pass from the first slice.
    pub fn events(&self) -> EventStream<'a> {
        EventStream::new(
            self.data,
            self.events_offset,
            EventsHeader {
                slice_count: self.slice_count,
                total_event_count: self.total_event_count,
                time_start: self.time_start,
                time_end: self.time_end,
            },
        )
    }

    /// Finds the driver that events refer to with `number`
    pub fn driver(&self, number: u8) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.number == number)
    }
}

#[derive(Serialize, PartialEq, Eq, Debug, Clone)]
pub struct Driver {
    /// Identifier that events use to refer to this driver. It is not the driver's index.
    pub number: u8,
    pub name: String,
    pub codriver_name: Option<String>,
    pub vehicle_name: String,
    pub vehicle_version: String,
    pub vehicle_id: String,
    pub vehicle_filename: String,
}

#[derive(Serialize, PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum SessionType {
    TestDay,
    Practice,
    Qualifying,
    Warmup,
    Race,
}

impl SessionType {
    /// Maps the session code (the low nibble of the session info byte) to the session type.
    /// Numbered sessions share a type, so practice 1 through 4 are all `Practice`.
    ///
    /// ```
    /// # use rf2vcr::SessionType;
    /// assert_eq!(SessionType::from_code(0).unwrap(), SessionType::TestDay);
    /// assert_eq!(SessionType::from_code(6).unwrap(), SessionType::Qualifying);
    /// assert!(SessionType::from_code(14).is_err());
    /// ```
    pub fn from_code(code: u8) -> Result<SessionType, ParseError> {
        match code {
            0 => Ok(SessionType::TestDay),
            1..=4 => Ok(SessionType::Practice),
            5..=8 => Ok(SessionType::Qualifying),
            9 => Ok(SessionType::Warmup),
            10..=13 => Ok(SessionType::Race),
            x => Err(ParseError::InvalidSessionCode(x)),
        }
    }
}

/// A vehicle sample of driver inputs
#[derive(Serialize, PartialEq, Debug, Clone, Copy)]
pub struct Telemetry {
    /// Throttle application from 0.0 to 1.0
    pub throttle: f32,

    /// Brake application from 0.0 to 1.0. Approximate, as the field it is derived from
    /// combines traction control and brakes.
    pub brake: f32,

    /// Raw 7 bit steering value. It has not been normalized.
    pub steering: u8,
    pub rpm: u16,
    pub in_pit: bool,
}

/// A timing line crossing
#[derive(Serialize, PartialEq, Debug, Clone, Copy)]
pub struct Checkpoint {
    /// Seconds since the start of the sector
    pub cumulative_time: f32,

    /// Session time of the crossing
    pub timestamp: f32,
    pub lap_number: u8,

    /// Sector 1, 2, or 3
    pub sector: u8,
}

#[derive(Serialize, PartialEq, Debug, Clone, Copy)]
pub enum Event {
    Telemetry(Telemetry),
    Checkpoint(Checkpoint),
}

/// An event as yielded by the event stream: what happened, to which driver, and when.
#[derive(Serialize, PartialEq, Debug, Clone, Copy)]
pub struct DriverEvent {
    /// Time of the slice the event belongs to
    pub time: f32,
    pub driver_number: u8,
    pub event: Event,
}
