//! # rf2vcr
//!
//! rf2vcr decodes [rFactor 2](https://www.studio-397.com/) replays (`.vcr` files) into session
//! metadata, the drivers that took part, and a lazily decoded stream of per driver telemetry and
//! timing events. The format is undocumented and several regions of it are still unidentified,
//! so only what is understood is exposed.
//!
//! ```no_run
//! use std::fs;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let compressed = fs::read("assets/race.vcr")?;
//! let data = rf2vcr::decompress(&compressed)?;
//! let replay = rf2vcr::ParserBuilder::new(&data).parse()?;
//!
//! for driver in &replay.drivers {
//!     println!("{} drove the {}", driver.name, driver.vehicle_name);
//! }
//!
//! for event in replay.events() {
//!     let event = event?;
//!     if let rf2vcr::Event::Checkpoint(cp) = event.event {
//!         println!("#{} lap {} sector {}", event.driver_number, cp.lap_number, cp.sector);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub use self::errors::*;
pub use self::events::{EventHeader, EventKind, EventStream, EventsHeader};
pub use self::inflate::decompress;
pub use self::models::*;
pub use self::parser::*;

mod core_parser;
mod drivers;
mod errors;
pub mod events;
mod header;
pub mod inflate;
pub mod laps;
mod models;
mod parser;
mod parsing_utils;
pub mod worker;
