use std::collections::HashSet;
use std::fs;

use bus_seat_map::{
    emit_files, enumerate_rosters, render_markdown, render_passenger_list, render_seat_map, report_json, slugify,
    sha256_hex, unique_slug, with_fingerprint, Report, SeatBoard, Vocabulary,
};

fn loaded_board() -> SeatBoard {
    let mut b = SeatBoard::new(28, Vocabulary::default());
    b.load("1. 김진욱(입완, 양재, 1)\n2. 나정선(예정, 사당, 3)").expect("valid");
    b
}

#[test]
fn seat_map_has_seven_rows_of_four() {
    let b = loaded_board();
    let map = render_seat_map(b.records(), 28);
    let rows: Vec<&str> = map.lines().collect();
    assert_eq!(rows.len(), 7);
    assert!(rows[0].contains("[ 1 ●김진욱]"));
    assert!(rows[0].contains("[ 2 -]"));
    assert!(rows[0].contains("[ 3 ○나정선]"));
    assert!(rows[6].contains("[28 -]"));
}

#[test]
fn passenger_list_lines() {
    let b = loaded_board();
    let list = render_passenger_list(b.records());
    assert_eq!(list, "- 1번 김진욱 · 입금완료 · 양재\n- 3번 나정선 · 입금예정 · 사당");
}

#[test]
fn markdown_and_json_reports() {
    let b = loaded_board();
    let report = Report { title: "가을 산행", seat_count: 28, records: b.records(), diagnostics: &[], warnings: &[] };
    let md = render_markdown(&report);
    assert!(md.starts_with("# 가을 산행"));
    assert!(md.contains("## 좌석 배치"));
    assert!(md.contains("총 승객 2명"));
    assert!(!md.contains("## 확인 필요"));

    let json = report_json(&report);
    assert_eq!(json["statistics"]["paid"], 1);
    assert_eq!(json["records"][0]["paymentStatus"], "paid");
    assert_eq!(json["records"][1]["seatNumber"], 3);
}

#[test]
fn emit_files_with_stable_fingerprint() {
    let b = loaded_board();
    let report = Report { title: "trip", seat_count: 28, records: b.records(), diagnostics: &[], warnings: &[] };
    let md = render_markdown(&report);

    let meta1 = with_fingerprint(serde_json::json!({ "report": report_json(&report), "timestamps": { "emitted_ms": 1 } }));
    let meta2 = with_fingerprint(serde_json::json!({ "report": report_json(&report), "timestamps": { "emitted_ms": 2 } }));
    let fp = meta1["meta_fingerprint"].as_str().unwrap().to_string();
    assert_eq!(fp.len(), 64);
    assert_eq!(meta1["meta_fingerprint"], meta2["meta_fingerprint"]);

    let td = tempfile::tempdir().unwrap();
    let outdir = td.path().join("out");
    let paths = emit_files(&md, &meta1, outdir.to_str().unwrap(), "trip").expect("emit ok");
    assert_eq!(fs::read_to_string(&paths.md_path).unwrap(), md);
    assert!(fs::read_to_string(&paths.meta_path).unwrap().contains(&fp));
}

#[test]
fn enumerate_rosters_finds_nested_files() {
    let td = tempfile::tempdir().unwrap();
    let base = td.path();
    fs::create_dir_all(base.join("input/fall")).unwrap();
    fs::write(base.join("input/a.txt"), "1. 김진욱(입완, 양재, 1)\n").unwrap();
    fs::write(base.join("input/fall/b.txt"), "김진욱/양재/1/입완\n").unwrap();

    let pattern = format!("{}/input/**/*.txt", base.display());
    let files = enumerate_rosters(&pattern).expect("should find files");
    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("input/a.txt"));
}

#[test]
fn enumerate_rosters_empty_is_error() {
    let td = tempfile::tempdir().unwrap();
    let pattern = format!("{}/input/**/*.txt", td.path().display());
    let err = enumerate_rosters(&pattern).err().expect("should be error");
    assert_eq!(err.to_string(), "NoFilesFound");
}

#[test]
fn slugs_are_unique() {
    assert_eq!(slugify("2024 가을 산행!"), "2024-가을-산행");
    assert_eq!(slugify("!!!"), "roster");
    let mut used = HashSet::new();
    assert_eq!(unique_slug("trip".into(), &mut used), "trip");
    assert_eq!(unique_slug("trip".into(), &mut used), "trip-1");
}

#[test]
fn emit_replaces_previous_report_without_leftovers() {
    let td = tempfile::tempdir().unwrap();
    let outdir = td.path().join("out");
    let meta = serde_json::json!({ "roster": "trip" });

    emit_files("# 첫 번째", &meta, outdir.to_str().unwrap(), "trip").expect("first emit");
    let paths = emit_files("# 두 번째", &meta, outdir.to_str().unwrap(), "trip").expect("second emit");
    assert_eq!(fs::read_to_string(&paths.md_path).unwrap(), "# 두 번째");

    let mut names: Vec<String> =
        fs::read_dir(&outdir).unwrap().map(|e| e.unwrap().file_name().to_string_lossy().into_owned()).collect();
    names.sort();
    assert_eq!(names, vec!["trip.md", "trip.meta.json"]);
}

#[test]
fn sha256_of_known_input() {
    assert_eq!(sha256_hex(b"abc"), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
}
