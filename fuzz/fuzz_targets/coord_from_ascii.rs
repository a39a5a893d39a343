#![no_main]

use arbiter::Coord;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(coord) = Coord::from_ascii(data) {
        let roundtripped = Coord::from_ascii(coord.to_string().as_bytes()).expect("roundtrip");
        assert_eq!(coord, roundtripped);
    }
});
