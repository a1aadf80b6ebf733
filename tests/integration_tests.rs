//! Integration tests for bar injection
//!
//! Drives the public API with AlphaTex documents the way an editor preview would.

use alphabar::{analyze, inject_bars, inject_bars_with_config, preview, BarConfig, DiagnosticKind};
use pretty_assertions::assert_eq;

const SONG: &str = r#"\title "Draft"
\tempo 120
\ts 4 4
.
:4 0.6 3.6 5.6 0.6 3.6 5.6
:8 3.5 5.5 3.5 5.5 (0.6 2.5) 3.5 5.5 3.5 5.5
\ts 3 4
:4 r 0.6 3.6 r. :8 0.6"#;

#[test]
fn test_quarter_notes_fill_common_time() {
    let output = inject_bars("\\ts 4 4\n.\n:4 1.1 2.1 3.1 4.1");
    assert_eq!(output, "\\ts 4 4\n.\n:4 1.1 2.1 3.1 4.1 |");
}

#[test]
fn test_dotted_eighths_leave_measure_open() {
    let injection = analyze(".\n:8. 1.1 1.1 1.1", &BarConfig::default());
    assert_eq!(injection.output, ".\n:8. 1.1 1.1 1.1");
    assert_eq!(injection.report.bars_inserted, 0);
    assert!((injection.report.trailing_fill - 0.5625).abs() < 1e-9);
}

#[test]
fn test_triplet_is_scaled_and_never_split() {
    let injection = analyze(".\n\\tuplet 3 { 1.1 2.1 3.1 }", &BarConfig::default());
    assert_eq!(injection.output, ".\n\\tuplet 3 { 1.1 2.1 3.1 }");
    assert_eq!(injection.report.bars_inserted, 0);
    assert!((injection.report.trailing_fill - 0.5).abs() < 1e-9);
}

#[test]
fn test_time_signature_change_mid_body() {
    let output = inject_bars(".\n1 1 1\n\\ts 3 4\n1 1 1");
    assert_eq!(output, ".\n1 1 1\n\\ts 3 4\n1 1 1 |");
}

#[test]
fn test_full_song() {
    let injection = analyze(SONG, &BarConfig::default());
    let expected = r#"\title "Draft"
\tempo 120
\ts 4 4
.
:4 0.6 3.6 5.6 0.6 | 3.6 5.6
:8 3.5 5.5 3.5 5.5 | ( 0.6 2.5 ) 3.5 5.5 3.5 5.5
\ts 3 4
:4 r 0.6 3.6 | r. :8 0.6"#;
    assert_eq!(injection.output, expected);
    assert_eq!(injection.report.bars_inserted, 3);
    assert_eq!(injection.report.time_signature_changes, 2);
    assert_eq!(injection.report.body_lines, 4);
    assert!(injection.report.diagnostics.is_empty());
    assert!((injection.report.trailing_fill - 0.5).abs() < 1e-9);
}

#[test]
fn test_injection_is_idempotent() {
    let sources = [
        SONG,
        ".\n1 1 1 1 1 1 1 1 1",
        ".\n\\tuplet 3 { 1 1 1 1 1 1 } 1 1 1 1",
        ".\n1 1 1 1 | 1 1 | 1 1",
        ".\n1 1 1 1 | | 1",
        "\\ts 1 1024\n.\n1 x 1",
        ".\n( 1 1 1 1 1 ) 1 1 1 1\n:16 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1",
    ];
    for source in sources {
        let once = inject_bars(source);
        let twice = inject_bars(&once);
        assert_eq!(twice, once, "second pass changed output for {:?}", source);
    }
}

#[test]
fn test_injection_is_deterministic() {
    assert_eq!(inject_bars(SONG), inject_bars(SONG));
}

#[test]
fn test_chord_never_split() {
    for len in 1..12 {
        let chord = vec!["1.1"; len].join(" ");
        let output = inject_bars(&format!(".\n1 1 1 ( {} ) 1", chord));
        assert_eq!(output, format!(".\n1 1 1 ( {} ) 1 |", chord));
    }
}

#[test]
fn test_tuplet_closing_can_complete_measure() {
    let output = inject_bars(".\n\\tuplet 3 { 1 1 1 1 1 1 } 1");
    assert_eq!(output, ".\n\\tuplet 3 { 1 1 1 1 1 1 } | 1");
}

#[test]
fn test_quintuplet_fills_common_time() {
    let output = inject_bars(".\n\\tuplet 5 { 1 1 1 1 1 } 1");
    assert_eq!(output, ".\n\\tuplet 5 { 1 1 1 1 1 } | 1");
}

#[test]
fn test_tuplet_count_is_not_a_note() {
    // Counting the "3" would complete the measure at the closing brace
    let output = inject_bars(".\n1 1 \\tuplet 3 { 1 1 } 1 1");
    assert_eq!(output, ".\n1 1 \\tuplet 3 { 1 1 } 1 | 1");
}

#[test]
fn test_guitar_coordinates_are_not_dotted() {
    assert_eq!(inject_bars(".\n3.6 3.6 3.6 3.6"), ".\n3.6 3.6 3.6 3.6 |");
    assert_eq!(inject_bars(".\n3. 3. 3. 3."), ".\n3. 3. 3. | 3.");
}

#[test]
fn test_duration_changes_persist_across_lines() {
    let output = inject_bars(".\n:2 1\n1 :1 1");
    assert_eq!(output, ".\n:2 1\n1 | :1 1 |");
}

#[test]
fn test_compound_time() {
    let output = inject_bars("\\ts 6 8\n.\n:8 1 1 1 1 1 1 1 1 1 1 1 1");
    assert_eq!(output, "\\ts 6 8\n.\n:8 1 1 1 1 1 1 | 1 1 1 1 1 1 |");
}

#[test]
fn test_whitespace_is_normalized_in_body_only() {
    let output = inject_bars("\\title   \"A  B\"\n.\n1\t\t1   (0.1 2.2)");
    assert_eq!(output, "\\title   \"A  B\"\n.\n1 1 ( 0.1 2.2 )");
}

#[test]
fn test_windows_line_endings() {
    let output = inject_bars("\\ts 3 4\r\n.\r\n1 1 1\r\n");
    assert_eq!(output, "\\ts 3 4\n.\n1 1 1 |\n");
}

#[test]
fn test_malformed_input_is_passed_through() {
    let injection = analyze(".\n:0 :x } ) \\tuplet foo", &BarConfig::default());
    assert_eq!(injection.output, ".\n:0 :x } ) \\tuplet foo");
    let kinds: Vec<_> = injection.report.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::InvalidDuration,
            DiagnosticKind::InvalidDuration,
            DiagnosticKind::UnexpectedTupletClose,
            DiagnosticKind::UnexpectedChordClose,
            DiagnosticKind::MissingTupletCount,
        ]
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(inject_bars(""), "");
}

#[test]
fn test_config_changes_starting_point() {
    let config = BarConfig::from_yaml("time-signature: 3/4\ndefault-duration: 8\nseparator: \"||\"")
        .unwrap();
    let output = inject_bars_with_config(".\n1 1 1 1 1 1 1", &config);
    assert_eq!(output, ".\n1 1 1 1 1 1 || 1");
}

#[test]
fn test_preview_respects_auto_bar() {
    let source = ".\n1  1 1 1";
    let mut config = BarConfig::default();

    assert_eq!(preview(None, &config), "");
    assert_eq!(preview(Some(source), &config), ".\n1 1 1 1 |");

    config.auto_bar = false;
    assert_eq!(preview(Some(source), &config), source);
}

#[test]
fn test_concurrent_calls_do_not_interfere() {
    let expected = inject_bars(SONG);
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| inject_bars(SONG)))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_report_matches_analysis() {
    let config = BarConfig::default();
    assert_eq!(alphabar::report(SONG, &config), analyze(SONG, &config).report);
}
