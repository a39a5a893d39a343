#![no_main]

use arbiter::Setup;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(setup) = text.parse::<Setup>() {
            let roundtripped: Setup = setup.to_string().parse().expect("roundtrip");
            assert_eq!(setup, roundtripped);
        }
    }
});
