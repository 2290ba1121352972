use std::path::PathBuf;

use posterkit::report::layout::{DrawOp, layout};
use posterkit::{MonthlyReport, SampleMonth};

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn department_table_closes_with_the_total() {
    for month in SampleMonth::ALL {
        let report = month.report();
        let rows = report.data.department_rows();
        let last = rows.last().unwrap();
        assert_eq!(last[0], "合計");
        assert_eq!(last[1], posterkit::report::model::format_yen(report.data.total));
        assert_eq!(last[2], "100.0%");
    }
}

#[test]
fn every_page_carries_header_and_footer() {
    let report = SampleMonth::Feb.report();
    let pages = layout(&report);
    for (i, page) in pages.iter().enumerate() {
        let texts: Vec<&str> = page.texts().collect();
        assert!(texts.contains(&"2025年2月 売上レポート"));
        assert!(texts.contains(&"TechVision株式会社"));
        let number = format!("- {} -", i + 1);
        assert!(texts.contains(&number.as_str()));
        assert!(page.ops.iter().any(|op| matches!(op, DrawOp::Line { .. })));
    }
}

#[test]
fn pdf_uses_the_japanese_cid_font() {
    let (pages, bytes) = posterkit::report::render(&SampleMonth::Jan.report()).unwrap();
    assert_eq!(pages, 2);
    assert!(contains(&bytes, b"/Type0"));
    assert!(contains(&bytes, b"/HeiseiKakuGo-W5"));
    assert!(contains(&bytes, b"/Count 2"));
    assert!(contains(&bytes, b"Tj"));
}

#[test]
fn json_report_round_trips_to_pdf() {
    let dir = PathBuf::from("target").join("report_pdf_it");
    std::fs::create_dir_all(&dir).unwrap();
    let data = dir.join("march.json");
    let json = r#"{
        "month_label": "3月",
        "year_month": "2025年3月",
        "total": 3000,
        "prev_diff": "-1.0%（2月比）",
        "departments": [
            {"name": "営業部", "amount": 2000},
            {"name": "開発部", "amount": 1000}
        ],
        "top_products": [{"name": "Widget", "dept": "営業部", "amount": 1500}]
    }"#;
    std::fs::write(&data, json).unwrap();

    let report = MonthlyReport::from_json_path(&data).unwrap();
    assert_eq!(report.data.department_rows()[1][2], "33.3%");
    let out = dir.join("march.pdf");
    let done = posterkit::report::generate(&report, &out).unwrap();
    assert_eq!(done.to_string(), format!("Generated: {}", out.display()));
    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn samples_land_in_one_directory() {
    let dir = PathBuf::from("target").join("report_pdf_samples");
    let written = posterkit::report::generate_samples(&dir).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|g| g.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["report_01.pdf", "report_02.pdf"]);
    assert!(written.iter().all(|g| g.path.exists() && g.pages == 2));
}
