#![no_main]

use libfuzzer_sys::fuzz_target;
fuzz_target!(|data: &[u8]| {
    if let Ok(inflated) = rf2vcr::decompress(data) {
        let _ = rf2vcr::decode(&inflated).map(|replay| rf2vcr::laps::aggregate(replay.events()));
    }
});
