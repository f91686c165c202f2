use bus_seat_map::{location_stats, PaymentStatus, PlanError, SeatBoard, Vocabulary};

const SAMPLE: &str = "1. 김진욱(입완, 양재, 1)
2. 나정선(예정, 사당, 3)
3. 박민수(입완, 강남, 5)
4. 이영희(예정, 서초, 7)
5. 최철수(입완, 논현, 10)";

fn board() -> SeatBoard {
    SeatBoard::new(28, Vocabulary::default())
}

#[test]
fn load_sample_and_count() {
    let mut b = board();
    let out = b.load(SAMPLE).expect("sample is valid");
    assert!(out.diagnostics.is_empty());
    assert!(out.warnings.is_empty());
    assert_eq!(b.records().len(), 5);

    let stats = b.statistics();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.paid, 3);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.empty, 23);

    let stats = b.location_stats();
    let order: Vec<&str> = stats.iter().map(|s| s.location.as_str()).collect();
    assert_eq!(order, vec!["양재", "사당", "강남", "서초", "논현"]);
    assert_eq!(b.occupant(5).map(|r| r.name.as_str()), Some("박민수"));
    assert!(b.occupant(2).is_none());
}

#[test]
fn rejected_batch_keeps_previous_records() {
    let mut b = board();
    b.load(SAMPLE).expect("sample is valid");

    let rejected = b.load("1. 김진욱(입완, 양재, 5)\n2. 나정선(예정, 사당, 5)").unwrap_err();
    assert_eq!(rejected.error, PlanError::DuplicateSeats { seats: vec![5] });
    assert_eq!(rejected.outcome.records.len(), 2);
    assert_eq!(b.records().len(), 5);

    let rejected = b.load("").unwrap_err();
    assert_eq!(rejected.error, PlanError::EmptyInput);
    assert_eq!(b.records().len(), 5);
}

#[test]
fn clear_resets_everything() {
    let mut b = board();
    b.load(SAMPLE).expect("sample is valid");
    b.clear();
    assert!(b.records().is_empty());
    assert_eq!(b.statistics().empty, 28);
}

#[test]
fn passenger_list_sorted_by_seat() {
    let mut b = board();
    b.load("김진욱/양재/9/입완\n나정선/사당/2/예정\n박민수/강남/4/입완").expect("valid");
    let seats: Vec<u32> = b.passenger_list().iter().map(|r| r.seat_number).collect();
    assert_eq!(seats, vec![2, 4, 9]);
}

#[test]
fn busiest_location_first() {
    let mut b = board();
    b.load("김진욱/양재/1/입완\n나정선/강남/2/예정\n박민수/강남/3/입완").expect("valid");
    let stats = location_stats(b.records());
    assert_eq!(stats[0].location, "강남");
    assert_eq!(stats[0].total, 2);
    assert_eq!(stats[0].paid, 1);
    assert_eq!(stats[0].pending, 1);
    assert_eq!(stats[1].location, "양재");
    assert_eq!(b.records()[0].payment_status, PaymentStatus::Paid);
}
