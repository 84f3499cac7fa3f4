//! End-to-end scenarios over in-memory input and output.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Cursor;

use tote::engine::dividends::DividendConfig;
use tote::engine::Tote;
use tote::session::{self, SessionOutcome, SessionReport};
use tote::types::{Product, ToteError};

fn run(input: &str) -> (Tote, SessionReport, Vec<String>) {
    run_with(DividendConfig::default(), input)
}

fn run_with(config: DividendConfig, input: &str) -> (Tote, SessionReport, Vec<String>) {
    let mut tote = Tote::new(config);
    let mut out = Vec::new();
    let report = session::run(&mut tote, Cursor::new(input), &mut out).unwrap();
    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    (tote, report, lines)
}

#[test]
fn test_win_dividend_scenario() {
    let (_, _, lines) = run("bet:w:1:10\nbet:w:2:20\nresult:1:2:3\n");
    assert_eq!(lines[0], "Win:1:$2.55");
}

#[test]
fn test_no_place_wagers_pay_zero() {
    let (_, _, lines) = run("bet:w:1:10\nbet:e:1,2:5\nresult:1:2:3\n");
    assert_eq!(&lines[1..4], ["Place:1:$0.00", "Place:2:$0.00", "Place:3:$0.00"]);
}

#[test]
fn test_exacta_dividend_scenario() {
    let (_, _, lines) = run("bet:e:3,7:50\nbet:e:1,2:30\nresult:3:7:1\n");
    assert_eq!(lines[4], "Exacta:3,7:$1.31");
}

#[test]
fn test_exacta_reverse_order_pays_zero() {
    let (_, _, lines) = run("bet:e:3,7:50\nresult:7:3:1\n");
    assert_eq!(lines[4], "Exacta:7,3:$0.00");
}

#[test]
fn test_malformed_line_does_not_touch_pools() {
    let (tote, report, lines) = run("bet:x:1:5\nbet:w:1:10\nresult:1:2:3\n");
    assert_eq!(lines[0], "Invalid input: [bet:x:1:5]");
    assert_eq!(report.lines_rejected, 1);
    assert_eq!(report.wagers_accepted, 1);
    for product in Product::ALL {
        let total = tote.pools().pool(*product).total();
        let expected = if *product == Product::Win { dec!(10) } else { Decimal::ZERO };
        assert_eq!(total, expected, "{product} pool");
    }
}

#[test]
fn test_winner_without_stake_pays_zero() {
    let (_, _, lines) = run("bet:w:1:10\nbet:w:2:20\nresult:3:1:2\n");
    assert_eq!(lines[0], "Win:3:$0.00");
}

#[test]
fn test_place_share_is_fixed_per_placegetter() {
    // 60 × 0.88 / 3 = 17.60 for each placegetter
    let (_, _, lines) = run("bet:p:1:10\nbet:p:2:20\nbet:p:4:30\nresult:1:2:3\n");
    assert_eq!(&lines[1..4], ["Place:1:$1.76", "Place:2:$0.88", "Place:3:$0.00"]);
}

#[test]
fn test_whitespace_and_case_are_normalized() {
    let (_, report, lines) = run("  BET : W : 1 : 10 \nBet:w:2:20\n RESULT:1:2:3\n");
    assert_eq!(report.lines_rejected, 0);
    assert_eq!(lines[0], "Win:1:$2.55");
}

#[test]
fn test_stakes_rounded_on_ingestion() {
    let (tote, _, _) = run("bet:w:1:1.005\nbet:w:1:1.004\nresult:1:2:3\n");
    assert_eq!(tote.pools().pool(Product::Win).lookup("1"), Some(dec!(2.01)));
}

#[test]
fn test_custom_commission() {
    let config = DividendConfig {
        win_commission: Decimal::ZERO,
        ..DividendConfig::default()
    };
    let (_, _, lines) = run_with(config, "bet:w:1:10\nbet:w:2:30\nresult:1:2:3\n");
    assert_eq!(lines[0], "Win:1:$4.00");
}

#[test]
fn test_unterminated_input_prints_no_dividends() {
    let (tote, report, lines) = run("bet:w:1:10\nbet:p:1:10");
    assert!(matches!(report.outcome, SessionOutcome::Unsettled));
    assert!(lines.is_empty());
    assert_eq!(tote.wagers_accepted(), 2);
}

#[test]
fn test_28_digit_stake_settles() {
    let (_, report, lines) = run("bet:w:1:1000000000000000000000000000\nresult:1:2:3\n");
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "Win:1:$0.85");
    assert!(report.settlement().is_some());
}

#[test]
fn test_huge_pool_with_tiny_winning_stake() {
    let (_, _, lines) = run("bet:w:1:0.01\nbet:w:2:100000000000000000000000000\nresult:1:2:3\n");
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Win:1:$85000000000000000000000000"), "{}", lines[0]);
    assert_eq!(lines[4], "Exacta:1,2:$0.00");
}

#[test]
fn test_overflowing_pool_stake_recorded_as_zero() {
    let input = "bet:p:1:50000000000000000000000000000\n\
                 bet:p:2:50000000000000000000000000000\n\
                 result:1:2:3\n";
    let (tote, report, lines) = run(input);
    assert_eq!(report.wagers_accepted, 2);
    assert_eq!(tote.pools().pool(Product::Place).lookup("2"), Some(Decimal::ZERO));
    assert_eq!(&lines[1..4], ["Place:1:$0.29", "Place:2:$0.00", "Place:3:$0.00"]);
}

#[test]
fn test_dividend_overflow_fails_session() {
    let mut tote = Tote::default();
    let mut out = Vec::new();
    let input = "bet:w:1:0.01\nbet:w:2:79000000000000000000000000000\nresult:1:2:3\n";
    let err = session::run(&mut tote, Cursor::new(input), &mut out).unwrap_err();
    assert!(matches!(err, ToteError::Overflow { product: Product::Win, .. }));
    assert!(out.is_empty());
    assert!(!tote.is_settled());
}
