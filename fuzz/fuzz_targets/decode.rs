#![no_main]

use libfuzzer_sys::fuzz_target;
fuzz_target!(|data: &[u8]| {
    if let Ok(replay) = rf2vcr::decode(data) {
        for event in replay.events() {
            if event.is_err() {
                break;
            }
        }
    }
});
