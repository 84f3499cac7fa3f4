//! A full reference race with many wagers across all three products.

use rust_decimal_macros::dec;
use std::io::Cursor;

use tote::engine::Tote;
use tote::session;

const REFERENCE_RACE: &str = "\
Bet:W:1:3
Bet:W:2:4
Bet:W:3:5
Bet:W:4:5
Bet:W:1:16
Bet:W:2:8
Bet:W:3:22
Bet:W:4:57
Bet:W:1:42
Bet:W:2:98
Bet:W:3:63
Bet:W:4:15
Bet:P:1:31
Bet:P:2:89
Bet:P:3:28
Bet:P:4:72
Bet:P:1:40
Bet:P:2:16
Bet:P:3:82
Bet:P:4:52
Bet:P:1:18
Bet:P:2:74
Bet:P:3:39
Bet:P:4:105
Bet:E:1,2:13
Bet:E:2,3:98
Bet:E:1,3:82
Bet:E:3,2:27
Bet:E:1,2:5
Bet:E:2,3:61
Bet:E:1,3:28
Bet:E:3,2:25
Bet:E:1,2:81
Bet:E:2,3:47
Bet:E:1,3:93
Bet:E:3,2:51
Result:2:3:1
";

#[test]
fn test_reference_race_output() {
    let mut tote = Tote::default();
    let mut out = Vec::new();
    let report = session::run(&mut tote, Cursor::new(REFERENCE_RACE), &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Win:2:$2.61\n\
         Place:2:$1.06\n\
         Place:3:$1.27\n\
         Place:1:$2.13\n\
         Exacta:2,3:$2.43\n"
    );
    assert_eq!(report.wagers_accepted, 36);
    assert_eq!(report.lines_rejected, 0);
}

#[test]
fn test_reference_race_pool_totals() {
    let mut tote = Tote::default();
    let report = session::run(&mut tote, Cursor::new(REFERENCE_RACE), &mut Vec::<u8>::new()).unwrap();
    let settlement = report.settlement().unwrap();

    let totals: Vec<_> = settlement.pools.iter().map(|t| (t.total, t.selections)).collect();
    assert_eq!(totals, vec![(dec!(338), 4), (dec!(646), 4), (dec!(611), 4)]);
}

#[test]
fn test_interleaved_noise_does_not_change_dividends() {
    let noisy: String = REFERENCE_RACE
        .lines()
        .flat_map(|line| [line, "bet:w:1:abc", ""])
        .collect::<Vec<_>>()
        .join("\n");

    let mut tote = Tote::default();
    let mut out = Vec::new();
    let report = session::run(&mut tote, Cursor::new(noisy), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(report.lines_rejected, 36);
    assert!(text.ends_with("Win:2:$2.61\nPlace:2:$1.06\nPlace:3:$1.27\nPlace:1:$2.13\nExacta:2,3:$2.43\n"));
}
