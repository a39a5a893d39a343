#![no_main]

use arbiter::{Chess, Color, Coord, Role, Setup};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Data {
    placements: Vec<(Color, Role, Coord)>,
    turn: Color,
    line: Vec<u8>,
    from: Coord,
    to: Coord,
    promotion: Option<Role>,
}

fuzz_target!(|data: Data| {
    let mut setup = Setup::empty();
    setup.turn = data.turn;
    for &(color, role, at) in data.placements.iter().take(24) {
        setup.place(role.of(color), at);
    }
    let Ok(mut pos) = Chess::from_setup(&setup) else {
        return;
    };

    for &choice in data.line.iter().take(8) {
        let legals = pos.legal_moves();
        if legals.is_empty() {
            break;
        }
        pos.play_unchecked(&legals[usize::from(choice) % legals.len()]);
    }

    let legals = pos.legal_moves();
    assert!(legals.iter().all(|m| pos.is_legal(m)));

    let expected = legals
        .iter()
        .any(|m| m.from == data.from && m.to == data.to && m.promotion == data.promotion);

    let before = pos.clone();
    let result = pos.apply(data.from, data.to, data.promotion);
    assert_eq!(result.is_ok(), expected);
    if result.is_err() {
        assert_eq!(pos.board(), before.board());
        assert_eq!(pos.turn(), before.turn());
        assert_eq!(pos.history(), before.history());
        assert_eq!(pos.repetitions(), before.repetitions());
    }
});
