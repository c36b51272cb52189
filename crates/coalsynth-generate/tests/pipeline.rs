use std::fs;
use std::path::PathBuf;

use coalsynth_core::{BLEND_HEADER, MOVEMENT_HEADER, STOCKPILE_HEADER, Section};
use coalsynth_generate::{
    GenerateOptions, GenerationEngine, GenerationError, SchemaPolicy, SectionStatus,
    SequencePicker,
};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing fixture at {}", path.display()))
}

fn run_with_sequence(
    input: &str,
    options: GenerateOptions,
    indices: &[usize],
) -> Result<(String, coalsynth_generate::GenerationReport), GenerationError> {
    let engine = GenerationEngine::new(options);
    let mut picker = SequencePicker::new(indices.iter().copied());
    let result = engine.run_with_picker(input.as_bytes(), Vec::new(), &mut picker)?;
    let text = String::from_utf8(result.output).expect("utf8 output");
    Ok((text, result.report))
}

fn input_with_headers(stockpile: &str, blend: &str, movements: &str) -> String {
    [
        stockpile,
        "2024-01-01",
        "5",
        "A",
        "END",
        blend,
        "1",
        "Coking",
        "END",
        movements,
        "Coking",
        "440",
        "END",
    ]
    .join("\n")
}

#[test]
fn full_day_matches_golden_output() {
    let input = fixture("day.input.txt");
    let expected = fixture("day.expected.sql");

    let (output, report) =
        run_with_sequence(&input, GenerateOptions::default(), &[0, 1, 2, 3, 4]).expect("run");

    assert_eq!(output, expected);
    assert_eq!(report.statements_written, 7);
    assert_eq!(report.movements_generated, 5);
    assert_eq!(report.bytes_written, expected.len() as u64);
    assert!(report.warnings.is_empty());
    let coals: Vec<(&str, u64)> = report
        .coals
        .iter()
        .map(|coal| (coal.coal.as_str(), coal.movements))
        .collect();
    assert_eq!(coals, [("Coking", 3), ("Thermal", 2), ("Dust", 0)]);
}

#[test]
fn crlf_input_is_accepted() {
    let input = fixture("day.input.txt").replace('\n', "\r\n");
    let expected = fixture("day.expected.sql");

    let (output, _) =
        run_with_sequence(&input, GenerateOptions::default(), &[0, 1, 2, 3, 4]).expect("run");
    assert_eq!(output, expected);
}

#[test]
fn mismatched_blend_header_misaligns_later_sections() {
    let input = input_with_headers(STOCKPILE_HEADER, "Blend:", MOVEMENT_HEADER);
    // The blend block is not consumed, so the next header read sees its
    // priority line and the movement section is skipped as well.
    let (output, report) =
        run_with_sequence(&input, GenerateOptions::default(), &[0]).expect("run");

    assert_eq!(output.lines().count(), 1);
    assert!(output.starts_with("INSERT INTO Stockpile "));
    assert_eq!(
        report.section_status(Section::Stockpile),
        Some(SectionStatus::Written)
    );
    assert_eq!(
        report.skipped_sections(),
        [Section::Blend, Section::Movements]
    );
    assert_eq!(report.warnings.len(), 2 + 1);
}

#[test]
fn mismatched_stockpile_header_still_reads_the_date() {
    let input = [
        "Stockpiles:",
        "2024-01-01",
        BLEND_HEADER,
        "1",
        "NULL",
        "END",
        MOVEMENT_HEADER,
        "Coking",
        "220",
        "END",
    ]
    .join("\n");

    let (output, report) =
        run_with_sequence(&input, GenerateOptions::default(), &[3]).expect("run");
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(report.skipped_sections(), [Section::Stockpile]);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("INSERT INTO Blend("));
    assert_eq!(
        lines[1],
        "INSERT INTO CoalMovement(Coal, Truck, DateTimeArrival) VALUES('Coking','Truck4', '2024-01-02 00:00:00');"
    );
}

#[test]
fn strict_policy_reports_header_mismatch() {
    let mut lines = vec![STOCKPILE_HEADER, "2024-01-01", "5"];
    lines.extend(["NULL"; 10]);
    lines.extend(["END", "Blend: (date)", "1", "END"]);
    let input = lines.join("\n");
    let options = GenerateOptions {
        schema_policy: SchemaPolicy::Strict,
        ..GenerateOptions::default()
    };

    let err = run_with_sequence(&input, options, &[0]).expect_err("strict mismatch");
    match err {
        GenerationError::HeaderMismatch {
            section,
            line,
            found,
            ..
        } => {
            assert_eq!(section, Section::Blend);
            assert_eq!(line, 15);
            assert_eq!(found.as_deref(), Some("Blend: (date)"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn strict_policy_rejects_short_stockpile() {
    let input = input_with_headers(STOCKPILE_HEADER, BLEND_HEADER, MOVEMENT_HEADER);
    let options = GenerateOptions {
        schema_policy: SchemaPolicy::Strict,
        ..GenerateOptions::default()
    };
    let err = run_with_sequence(&input, options, &[0]).expect_err("short stockpile");
    assert!(matches!(err, GenerationError::Core(_)));
}

#[test]
fn short_value_blocks_are_flagged_in_lenient_mode() {
    let input = input_with_headers(STOCKPILE_HEADER, BLEND_HEADER, MOVEMENT_HEADER);
    let (output, report) =
        run_with_sequence(&input, GenerateOptions::default(), &[0]).expect("run");

    assert_eq!(output.lines().count(), 4);
    let codes: Vec<&str> = report.warnings.iter().map(|w| w.code.as_str()).collect();
    assert_eq!(codes, ["column_count", "column_count"]);
}

#[test]
fn unparseable_date_fails_at_movement_section() {
    let input = input_with_headers(STOCKPILE_HEADER, BLEND_HEADER, MOVEMENT_HEADER)
        .replace("2024-01-01", "someday");
    let err = run_with_sequence(&input, GenerateOptions::default(), &[0])
        .expect_err("invalid date");
    assert!(matches!(err, GenerationError::InvalidDate(value) if value == "someday"));
}

#[test]
fn empty_input_has_no_date() {
    let err = run_with_sequence("", GenerateOptions::default(), &[0]).expect_err("empty");
    assert!(matches!(err, GenerationError::MissingDate));
}

#[test]
fn invalid_options_are_rejected() {
    let options = GenerateOptions {
        truck_count: 0,
        ..GenerateOptions::default()
    };
    let err = run_with_sequence("", options, &[0]).expect_err("no trucks");
    assert!(matches!(err, GenerationError::InvalidOptions(_)));
}

#[test]
fn seeded_runs_are_deterministic() {
    let input = fixture("day.input.txt");
    let options = GenerateOptions {
        seed: Some(42),
        ..GenerateOptions::default()
    };
    let engine = GenerationEngine::new(options);

    let a = engine.run(input.as_bytes(), Vec::new()).expect("run a");
    let b = engine.run(input.as_bytes(), Vec::new()).expect("run b");

    assert_eq!(a.output, b.output);
    assert_eq!(a.report.seed, Some(42));
    assert_ne!(a.report.run_id, b.report.run_id);
}

#[test]
fn report_serializes_section_outcomes() {
    let input = fixture("day.input.txt");
    let (_, report) =
        run_with_sequence(&input, GenerateOptions::default(), &[0]).expect("run");

    let value = serde_json::to_value(&report).expect("serialize report");
    let statuses: Vec<&str> = value["sections"]
        .as_array()
        .expect("sections array")
        .iter()
        .filter_map(|section| section["status"].as_str())
        .collect();
    assert_eq!(statuses, ["written", "written", "written"]);
    assert_eq!(value["movements_generated"], 5);
}
