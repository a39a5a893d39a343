use arbiter::{Chess, Color, Coord, Outcome, Role, Setup};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    setup: String,
    turn: String,
    moves: String,
    outcome: String,
    reason: String,
}

impl Scenario {
    fn position(&self) -> Chess {
        let mut setup = match self.setup.as_str() {
            "default" => Setup::default(),
            placements => placements.parse().expect("valid placements"),
        };
        setup.turn = self.turn.parse::<Color>().expect("valid color");
        Chess::from_setup(&setup).expect("valid setup")
    }

    fn play(&self, pos: &mut Chess) {
        for token in self.moves.split_ascii_whitespace() {
            let from: Coord = token[0..2].parse().expect("valid origin");
            let to: Coord = token[2..4].parse().expect("valid destination");
            let promotion = token
                .get(4..)
                .filter(|p| !p.is_empty())
                .map(|p| p.parse::<Role>().expect("valid promotion"));
            pos.apply(from, to, promotion)
                .unwrap_or_else(|err| panic!("{}: {token}: {err}", self.name));
        }
    }
}

fn render(outcome: Option<Outcome>) -> (String, String) {
    match outcome {
        None => ("*".to_owned(), String::new()),
        Some(outcome @ Outcome::Draw(draw)) => {
            assert!(outcome.is_draw() && outcome.winner().is_none());
            (outcome.to_string(), draw.to_string())
        }
        Some(outcome) => {
            assert!(!outcome.is_draw() && outcome.winner().is_some());
            (outcome.to_string(), String::new())
        }
    }
}

#[test]
fn test_scenarios() {
    let mut reader = csv::Reader::from_path("tests/scenarios.csv").expect("reader");
    let mut count = 0;

    for scenario in reader.deserialize() {
        let scenario: Scenario = scenario.expect("valid scenario");
        let mut pos = scenario.position();

        if scenario.moves.trim().is_empty() {
            // classify the arrangement as if the other side had just moved
            pos.evaluate();
        } else {
            scenario.play(&mut pos);
        }

        let (outcome, reason) = render(pos.outcome());
        assert_eq!(
            (outcome.as_str(), reason.as_str()),
            (scenario.outcome.as_str(), scenario.reason.as_str()),
            "{}\n{:?}",
            scenario.name,
            pos.board()
        );
        count += 1;
    }

    assert!(count > 10);
}
