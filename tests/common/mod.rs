#![allow(dead_code)]

//! Writes synthetic replays byte for byte in the layout the decoder expects

pub struct DriverFixture {
    pub number: u8,
    pub name: &'static str,
    pub codriver: &'static str,
    pub vehicle: &'static str,
    pub filename: &'static str,
}

pub struct ReplayWriter {
    data: Vec<u8>,
}

/// Bytes occupied by a telemetry event body
pub const TELEMETRY_BODY: u32 = 61;

/// Bytes occupied by a checkpoint event body
pub const CHECKPOINT_BODY: u32 = 10;

impl ReplayWriter {
    pub fn new(version: f32) -> Self {
        let mut data = b"rFactor2 VCR".to_vec();
        data.push(b'\n');
        data.extend_from_slice(b"IRSR");
        data.extend(version.to_le_bytes());
        ReplayWriter { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn text(&mut self, prefix: usize, s: &str) -> &mut Self {
        self.data
            .extend_from_slice(&(s.len() as u32).to_le_bytes()[..prefix]);
        self.data.extend_from_slice(s.as_bytes());
        self
    }

    pub fn bytes(&mut self, b: &[u8]) -> &mut Self {
        self.data.extend_from_slice(b);
        self
    }

    pub fn u16(&mut self, x: u16) -> &mut Self {
        self.bytes(&x.to_le_bytes())
    }

    pub fn u32(&mut self, x: u32) -> &mut Self {
        self.bytes(&x.to_le_bytes())
    }

    pub fn f32(&mut self, x: f32) -> &mut Self {
        self.bytes(&x.to_le_bytes())
    }

    pub fn metadata(&mut self, session: u8) -> &mut Self {
        self.text(4, "rFactor2 replay")
            .bytes(&[1, 2, 3, 4])
            .text(4, "mod info")
            .text(4, "GameData/Locations/Spa/Spa.scn")
            .text(4, "GameData/Locations/Spa/Spa.aiw")
            .text(2, "Endurance Series")
            .text(2, "3.11")
            .text(2, "ENDU-311")
            .text(2, "Locations/Spa")
            .bytes(&[0x00, session])
            .bytes(&[0u8; 67])
    }

    pub fn drivers(&mut self, drivers: &[DriverFixture]) -> &mut Self {
        self.u32(drivers.len() as u32);
        for d in drivers {
            self.bytes(&[d.number]).text(1, d.name).text(1, d.codriver);
            self.text(2, d.vehicle).text(2, "1.0").text(2, "VEH-1");

            let mut slot = [0xa5u8; 32];
            slot[..d.filename.len()].copy_from_slice(d.filename.as_bytes());
            slot[d.filename.len()] = 0;
            self.bytes(&slot).bytes(&[0u8; 49]).f32(0.5).f32(1.5);
        }
        self
    }

    pub fn events_header(&mut self, slices: u32, events: u32, start: f32, end: f32) -> &mut Self {
        self.u32(slices).u32(events).f32(start).f32(end)
    }

    pub fn slice(&mut self, time: f32, events: u16) -> &mut Self {
        self.f32(time).u16(events)
    }

    pub fn event_header(&mut self, class: u32, event_type: u32, size: u32, driver: u8) -> &mut Self {
        let word = (class << 29) | (event_type << 17) | (size << 8) | u32::from(driver);
        self.u32(word).bytes(&[0xff])
    }

    pub fn telemetry(&mut self, driver: u8, throttle: u32, rpm: u32, brake: u8) -> &mut Self {
        let info1 = 64 | (throttle << 11) | (rpm << 18);
        self.event_header(0, 11, TELEMETRY_BODY, driver)
            .u32(info1)
            .u32(0)
            .bytes(&[0u8; 5])
            .bytes(&[0u8; 23])
            .bytes(&[brake]);
        for _ in 0..6 {
            self.f32(0.0);
        }
        self
    }

    pub fn checkpoint(&mut self, driver: u8, timestamp: f32, lap: u8, sector: u8) -> &mut Self {
        let raw = (sector % 3) << 6;
        self.event_header(3, 6, CHECKPOINT_BODY, driver)
            .f32(25.0)
            .f32(timestamp)
            .bytes(&[lap, raw])
    }

    pub fn unrecognized(&mut self, driver: u8, size: u32) -> &mut Self {
        self.event_header(1, 0, size, driver);
        self.bytes(&vec![0x5a; size as usize])
    }

    pub fn finish(&self) -> Vec<u8> {
        self.data.clone()
    }
}

pub fn driver(number: u8, name: &'static str) -> DriverFixture {
    DriverFixture {
        number,
        name,
        codriver: "",
        vehicle: "Ferrari 488 GTE",
        filename: "488_GTE.VEH",
    }
}
