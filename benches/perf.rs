use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use cricket_terminal::player::FormValues;
use cricket_terminal::roster::normalize_roster;
use cricket_terminal::validate::validate_form;

const ROSTER_JSON: &str = r#"[
  {"playerId": 1, "playerName": "Virat Sharma", "playerCity": "Delhi", "phone": "9876543210", "playedIn": "Domestic", "playerType": "Batsman", "lastPlayedFor": "Team A"},
  {"playerId": 2, "playerName": "Ishan Patel", "playerCity": "Pune", "phone": "9123456780", "playedIn": "National", "playerType": "Bowler", "lastPlayedFor": "Team C"},
  {"playerId": 3, "playerName": "Arjun Rao", "playerCity": "Chennai", "phone": "9000000001", "playedIn": "International", "playerType": "All-Rounder", "lastPlayedFor": "Team E"}
]"#;

fn bench_validate_form(c: &mut Criterion) {
    let form = FormValues {
        player_name: "Rahul Sharma".to_string(),
        player_city: "Mumbai".to_string(),
        phone: "1234567890".to_string(),
        played_in: "Domestic".to_string(),
        player_type: "Batsman".to_string(),
        last_played_for: "Team A".to_string(),
    };
    c.bench_function("validate_form", |b| {
        b.iter(|| {
            let errors = validate_form(black_box(&form));
            black_box(errors.len());
        })
    });
}

fn bench_normalize_roster(c: &mut Criterion) {
    let body: serde_json::Value = serde_json::from_str(ROSTER_JSON).expect("valid roster json");
    c.bench_function("normalize_roster", |b| {
        b.iter(|| {
            let outcome = normalize_roster(black_box(&body));
            black_box(outcome.players.len());
        })
    });
}

criterion_group!(benches, bench_validate_form, bench_normalize_roster);
criterion_main!(benches);
