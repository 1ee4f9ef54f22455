//! Groups the event stream by driver and lap, the shape consumers plot from.
//!
//! A driver is on lap 0 until their first checkpoint. Checkpoints belong to the lap they
//! declare. Crossing the end of sector 3 finishes that lap, so samples that follow are placed on
//! the next lap, while crossing the end of sectors 1 and 2 keeps the driver on the declared lap.

use crate::errors::DecodeError;
use crate::models::{Checkpoint, DriverEvent, Event, Telemetry};
use fnv::FnvHashMap;
use serde::Serialize;

/// A telemetry sample at the time of the slice it was found in
#[derive(Serialize, PartialEq, Debug, Clone, Copy)]
pub struct Sample {
    pub time: f32,
    #[serde(flatten)]
    pub telemetry: Telemetry,
}

#[derive(Serialize, PartialEq, Debug, Clone, Default)]
pub struct Lap {
    pub number: u32,
    pub samples: Vec<Sample>,
    pub checkpoints: Vec<Checkpoint>,
}

#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct DriverLaps {
    pub driver_number: u8,

    /// Laps in ascending order. Only laps with at least one sample or checkpoint are present.
    pub laps: Vec<Lap>,
}

#[derive(Debug, Default)]
struct DriverState {
    current_lap: u32,
    laps: FnvHashMap<u32, Lap>,
}

impl DriverState {
    fn lap(&mut self, number: u32) -> &mut Lap {
        self.laps.entry(number).or_insert_with(|| Lap {
            number,
            ..Lap::default()
        })
    }
}

/// Accumulates events into per driver laps
#[derive(Debug, Default)]
pub struct LapAggregator {
    drivers: FnvHashMap<u8, DriverState>,
}

impl LapAggregator {
    pub fn new() -> Self {
        LapAggregator::default()
    }

    pub fn push(&mut self, event: &DriverEvent) {
        let state = self.drivers.entry(event.driver_number).or_default();
        match event.event {
            Event::Telemetry(telemetry) => {
                let lap = state.current_lap;
                state.lap(lap).samples.push(Sample {
                    time: event.time,
                    telemetry,
                });
            }
            Event::Checkpoint(checkpoint) => {
                let lap = u32::from(checkpoint.lap_number);
                state.lap(lap).checkpoints.push(checkpoint);
                state.current_lap = if checkpoint.sector == 3 { lap + 1 } else { lap };
            }
        }
    }

    /// Drivers ordered by number, each with their laps in order
    pub fn finish(self) -> Vec<DriverLaps> {
        let mut res: Vec<DriverLaps> = self
            .drivers
            .into_iter()
            .map(|(driver_number, state)| {
                let mut laps: Vec<Lap> = state.laps.into_values().collect();
                laps.sort_by_key(|x| x.number);
                DriverLaps {
                    driver_number,
                    laps,
                }
            })
            .collect();

        res.sort_by_key(|x| x.driver_number);
        res
    }
}

/// Drains an event stream into per driver laps, stopping at the first decoding error
pub fn aggregate<I>(events: I) -> Result<Vec<DriverLaps>, DecodeError>
where
    I: IntoIterator<Item = Result<DriverEvent, DecodeError>>,
{
    let mut aggregator = LapAggregator::new();
    for event in events {
        aggregator.push(&event?);
    }
    Ok(aggregator.finish())
}
