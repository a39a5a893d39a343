use std::{
    fs::File,
    io::{prelude::*, BufReader},
};

use arbiter::{perft, Chess, Color, Setup};

fn test_perft_file(path: &str, node_limit: u64) {
    let file = File::open(path).expect("failed to open test suite");
    let reader = BufReader::new(file);

    let mut setup = Setup::default();
    let mut pos = Chess::default();

    for line in reader.lines().map(|l| l.unwrap()) {
        println!("{line}");

        let trimmed = line.trim();
        let mut slices = trimmed.splitn(2, ' ');

        match slices.next() {
            Some("setup") => {
                setup = match slices.next().expect("missing setup") {
                    "default" => Setup::default(),
                    placements => placements.parse().expect("invalid setup"),
                };
                pos = Chess::from_setup(&setup).expect("invalid position");
            }
            Some("turn") => {
                setup.turn = slices
                    .next()
                    .expect("missing turn")
                    .parse::<Color>()
                    .expect("invalid color");
                pos = Chess::from_setup(&setup).expect("invalid position");
            }
            Some("perft") => {
                let mut params = slices.next().expect("missing perft params").splitn(2, ' ');

                let depth = params
                    .next()
                    .expect("missing perft depth")
                    .parse()
                    .expect("depth not an integer");

                let nodes = params
                    .next()
                    .expect("missing perft nodes")
                    .parse()
                    .expect("nodes not an integer");

                if nodes <= node_limit {
                    assert_eq!(perft(&pos, depth), nodes);
                }
            }
            _ => {}
        }
    }
}

#[test]
fn test_positions() {
    test_perft_file("tests/positions.perft", 10_000);
}

#[test]
fn test_clone_does_not_leak() {
    let pos = Chess::default();
    assert_eq!(perft(&pos, 3), 8902);
    assert!(pos.history().is_empty());
    assert_eq!(pos.legal_moves().len(), 20);
}
