use bus_seat_map::{diagnose, parse_passenger_text, validate_batch, PlanError, Strategy, Suggestion, Vocabulary, WarningKind};

#[test]
fn garbage_line_gets_name_and_location_suggestions() {
    let v = Vocabulary::default();
    let out = parse_passenger_text("abc123", &v);
    assert!(out.records.is_empty());
    assert_eq!(out.diagnostics.len(), 1);
    let d = &out.diagnostics[0];
    assert_eq!(d.line, 1);
    assert_eq!(d.text, "abc123");
    assert_eq!(d.suggestions, vec![Suggestion::MissingName, Suggestion::MissingLocation]);
    assert_eq!(validate_batch(&out, 28), Err(PlanError::NoPassengers { failed: 1 }));
}

#[test]
fn blank_lines_do_not_count_toward_line_numbers() {
    let v = Vocabulary::default();
    let out = parse_passenger_text("\n\n1. 김진욱(입완, 양재, 1)\n\n   \nabc123\n", &v);
    assert_eq!(out.line_count, 2);
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.diagnostics[0].line, 2);
}

#[test]
fn blank_input_is_empty_input() {
    let v = Vocabulary::default();
    let out = parse_passenger_text("  \n\n\t\n", &v);
    assert_eq!(out.line_count, 0);
    assert_eq!(validate_batch(&out, 28), Err(PlanError::EmptyInput));
}

#[test]
fn auto_order_counts_parsed_records_only() {
    let v = Vocabulary::default();
    let out = parse_passenger_text("김진욱/양재/1/입완\nabc\n나정선/사당/2/예정", &v);
    assert_eq!(out.records.len(), 2);
    assert_eq!(out.records[0].order_number, 1);
    assert_eq!(out.records[1].order_number, 2);
    assert_eq!(out.strategies, vec![Strategy::Slash, Strategy::Slash]);
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].line, 2);
}

#[test]
fn unknown_location_and_short_name_warn() {
    let v = Vocabulary::default();
    let out = parse_passenger_text("김진욱/부산/3/입완\n1. 김(입완, 양재, 2)\n나정선/양재동/4/예정", &v);
    assert_eq!(out.records.len(), 3);
    assert_eq!(out.warnings.len(), 2);
    assert_eq!(out.warnings[0].line, 1);
    assert_eq!(out.warnings[0].kind, WarningKind::UnknownLocation);
    assert!(out.warnings[0].message.contains("부산"));
    assert_eq!(out.warnings[1].line, 2);
    assert_eq!(out.warnings[1].kind, WarningKind::ShortName);
}

#[test]
fn missing_seat_suggestion() {
    let v = Vocabulary::default();
    let out = parse_passenger_text("김진욱 양재", &v);
    assert_eq!(out.diagnostics[0].suggestions, vec![Suggestion::MissingSeat]);
}

#[test]
fn location_alone_is_not_a_name() {
    let v = Vocabulary::default();
    let out = parse_passenger_text("양재 5", &v);
    assert_eq!(out.diagnostics[0].suggestions, vec![Suggestion::MissingName]);
}

#[test]
fn everything_present_but_unparsable_gets_format_hint() {
    let v = Vocabulary::default();
    let d = diagnose(1, "1. 김진욱(입완, 양재, 0)", &v);
    assert_eq!(d.suggestions, vec![Suggestion::CheckFormat]);
    assert!(Suggestion::CheckFormat.to_string().contains("김진욱(입완, 양재, 1)"));
}

#[test]
fn duplicate_seats_are_reported_once() {
    let v = Vocabulary::default();
    let out = parse_passenger_text("1. 김진욱(입완, 양재, 5)\n2. 나정선(예정, 사당, 5)", &v);
    assert_eq!(out.records.len(), 2);
    assert_eq!(validate_batch(&out, 28), Err(PlanError::DuplicateSeats { seats: vec![5] }));
}

#[test]
fn seat_29_is_rejected_by_range_check() {
    let v = Vocabulary::default();
    let out = parse_passenger_text("1. 김진욱(입완, 양재, 29)", &v);
    assert_eq!(out.records[0].seat_number, 29);
    assert_eq!(
        validate_batch(&out, 28),
        Err(PlanError::SeatOutOfRange { seats: vec![29], capacity: 28 })
    );
}

#[test]
fn demo_roster_uses_every_strategy() {
    let v = Vocabulary::default();
    let out = parse_passenger_text(include_str!("../demos/autumn-trip.txt"), &v);
    assert!(out.diagnostics.is_empty());
    assert!(out.warnings.is_empty());
    assert_eq!(
        out.strategies,
        vec![
            Strategy::Paren,
            Strategy::Paren,
            Strategy::Spaced,
            Strategy::Natural,
            Strategy::Slash,
            Strategy::Colon,
            Strategy::Fuzzy,
        ]
    );
    let seats: Vec<u32> = out.records.iter().map(|r| r.seat_number).collect();
    assert_eq!(seats, vec![1, 3, 5, 7, 10, 12, 14]);
    assert_eq!(out.records[6].order_number, 7);
    assert!(validate_batch(&out, 28).is_ok());
}

#[test]
fn list_index_does_not_count_as_seat() {
    let v = Vocabulary::default();
    let out = parse_passenger_text("1. 김진욱(입완, 양재)", &v);
    assert!(out.records.is_empty());
    assert_eq!(out.diagnostics[0].suggestions, vec![Suggestion::MissingSeat]);

    let d = diagnose(2, "2) 나정선 사당", &v);
    assert_eq!(d.suggestions, vec![Suggestion::MissingSeat]);
}
