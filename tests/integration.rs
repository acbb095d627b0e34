//! Integration tests for the time-clock analysis engine.
//!
//! This test suite drives the HTTP router end to end and checks engine-wide
//! properties:
//! - Slot classification and the absence grid
//! - Anomaly detection and period scoring
//! - Systematic offenders and period summaries
//! - Drop ledger and error responses
//! - Property-based invariants

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;
use serde_json::{Value, json};
use tower::ServiceExt;

use timeclock_engine::analysis::AnalysisEngine;
use timeclock_engine::api::{AppState, create_router};
use timeclock_engine::config::ConfigLoader;
use timeclock_engine::models::{ClockTime, RawPunch};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

async fn post_analyze(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn punch(employee: &str, date: &str, in_time: &str, out_time: &str) -> Value {
    json!({
        "employee": employee,
        "in_date": date,
        "out_date": date,
        "in_time": in_time,
        "out_time": out_time
    })
}

fn regular_day(employee: &str, date: &str) -> Vec<Value> {
    vec![
        punch(employee, date, "08:00a", "12:00p"),
        punch(employee, date, "12:30p", "04:30p"),
    ]
}

/// Every weekday of the fortnight starting Monday 2024-01-08.
const FORTNIGHT: [&str; 10] = [
    "01/08/24", "01/09/24", "01/10/24", "01/11/24", "01/12/24", "01/15/24", "01/16/24",
    "01/17/24", "01/18/24", "01/19/24",
];

fn full_fortnight(employee: &str) -> Vec<Value> {
    FORTNIGHT
        .iter()
        .flat_map(|date| regular_day(employee, date))
        .collect()
}

fn request(punches: Vec<Value>) -> Value {
    json!({ "punches": punches })
}

fn period_result<'a>(report: &'a Value, employee: &str, index: usize) -> &'a Value {
    let employees = report["employees"].as_array().unwrap();
    let analysis = employees
        .iter()
        .find(|e| e["employee"] == employee)
        .unwrap_or_else(|| panic!("no analysis for {}", employee));
    &analysis["period_results"][index]
}

fn anomaly_types(result: &Value) -> Vec<String> {
    result["anomalies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["type"].as_str().unwrap().to_string())
        .collect()
}

fn day_slot<'a>(report: &'a Value, employee: &str, date: &str) -> &'a Value {
    report["day_slots"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["employee"] == employee && d["date"] == date)
        .unwrap_or_else(|| panic!("no day slots for {} on {}", employee, date))
}

// =============================================================================
// SECTION 1: Slot Classification
// =============================================================================

/// IT-001: a regular day is banded slot by slot
#[tokio::test]
async fn test_regular_day_slots() {
    let body = request(vec![
        punch("Doe, Jane", "01/10/24", "07:54a", "12:01p"),
        punch("Doe, Jane", "01/10/24", "12:38p", "04:43p"),
    ]);

    let (status, response) = post_analyze(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::OK);

    let day = day_slot(&response["report"], "Doe, Jane", "2024-01-10");
    assert_eq!(day["morning_arrival"]["raw"], "07:54a");
    assert_eq!(day["morning_arrival"]["status"]["band"], "minor");
    assert_eq!(day["lunch_departure"]["status"]["band"], "acceptable");
    assert_eq!(day["lunch_return"]["status"]["band"], "major");
    assert_eq!(day["end_of_day"]["status"]["band"], "significant");
    assert_eq!(day["pair_count"], 2);
}

/// IT-002: a single morning pair leaves the afternoon empty, not absent
#[tokio::test]
async fn test_single_pair_empty_versus_absent() {
    let body = request(vec![
        punch("Doe, Jane", "01/10/24", "07:54a", "04:32p"),
        punch("Roe, Rick", "01/11/24", "08:00a", "04:30p"),
    ]);

    let (_, response) = post_analyze(create_router_for_test(), body).await;
    let report = &response["report"];

    let worked = day_slot(report, "Doe, Jane", "2024-01-10");
    assert_eq!(worked["morning_arrival"]["raw"], "07:54a");
    assert_eq!(worked["lunch_departure"]["raw"], "04:32p");
    assert_eq!(worked["lunch_return"]["status"]["kind"], "empty");
    assert_eq!(worked["end_of_day"]["status"]["kind"], "empty");

    let absent = day_slot(report, "Doe, Jane", "2024-01-11");
    assert_eq!(absent["morning_arrival"]["status"]["kind"], "absent");
    assert_eq!(absent["hours_band"], "absent");
    assert!(absent["end_of_day"]["raw"].is_null());
}

/// IT-003: more than two pairs flags the day
#[tokio::test]
async fn test_multiple_punches_flagged() {
    let body = request(vec![
        punch("Doe, Jane", "01/10/24", "08:00a", "10:00a"),
        punch("Doe, Jane", "01/10/24", "10:15a", "12:00p"),
        punch("Doe, Jane", "01/10/24", "12:30p", "04:30p"),
    ]);

    let (_, response) = post_analyze(create_router_for_test(), body).await;
    let day = day_slot(&response["report"], "Doe, Jane", "2024-01-10");

    assert_eq!(day["end_of_day"]["status"]["kind"], "multiple_punches");
    assert_eq!(day["end_of_day"]["note"], "Flagged: Additional Punches Detected");
    assert_eq!(day["worked_minutes"], 465);
}

/// IT-004: a pair closed on another date marks its out slot
#[tokio::test]
async fn test_missed_out_punch_marks_slot() {
    let body = request(vec![
        json!({
            "employee": "Doe, Jane",
            "in_date": "01/10/24",
            "out_date": "01/11/24",
            "in_time": "08:00a",
            "out_time": "12:00p"
        }),
        punch("Doe, Jane", "01/10/24", "12:30p", "04:30p"),
    ]);

    let (_, response) = post_analyze(create_router_for_test(), body).await;
    let report = &response["report"];
    let day = day_slot(report, "Doe, Jane", "2024-01-10");
    assert_eq!(day["lunch_departure"]["status"]["kind"], "missed_out_punch");

    let result = period_result(report, "Doe, Jane", 0);
    let types = anomaly_types(result);
    assert_eq!(types.len(), 10);
    assert!(types[..9].iter().all(|t| t == "missed_day"));
    assert_eq!(types[9], "date_mismatch");
}

// =============================================================================
// SECTION 2: Anomaly Detection & Scoring
// =============================================================================

/// IT-005: arrival at 08:10 is one medium late_arrival worth 5 points
#[tokio::test]
async fn test_late_arrival_scores_five() {
    let mut punches = full_fortnight("Doe, Jane");
    punches[0] = punch("Doe, Jane", "01/08/24", "08:10a", "12:00p");

    let (_, response) = post_analyze(create_router_for_test(), request(punches)).await;
    let result = period_result(&response["report"], "Doe, Jane", 0);

    assert_eq!(anomaly_types(result), vec!["late_arrival"]);
    assert_eq!(result["anomalies"][0]["minutes_late"], 10);
    assert_eq!(result["anomalies"][0]["severity"], "medium");
    assert_eq!(result["score"], 5);
}

/// IT-006: early returns are not flagged by the detector
#[tokio::test]
async fn test_early_lunch_return_not_flagged() {
    let mut punches = full_fortnight("Doe, Jane");
    punches[1] = punch("Doe, Jane", "01/08/24", "12:05p", "04:30p");

    let (_, response) = post_analyze(create_router_for_test(), request(punches)).await;
    let report = &response["report"];
    let result = period_result(report, "Doe, Jane", 0);

    assert!(anomaly_types(result).is_empty());
    // The slot grid still bands the early return.
    let day = day_slot(report, "Doe, Jane", "2024-01-08");
    assert_eq!(day["lunch_return"]["status"]["band"], "significant");
}

/// IT-007: missed days are high severity and balance the day count
#[tokio::test]
async fn test_missed_days_accounting() {
    let punches: Vec<Value> = FORTNIGHT[..6]
        .iter()
        .flat_map(|date| regular_day("Doe, Jane", date))
        .collect();

    let (_, response) = post_analyze(create_router_for_test(), request(punches)).await;
    let result = period_result(&response["report"], "Doe, Jane", 0);

    assert_eq!(result["total_days"], 10);
    assert_eq!(result["worked_days"], 6);
    assert_eq!(result["missed_days"], 4);
    assert_eq!(result["score"], 40);
    assert_eq!(result["anomalies"][0]["description"], "Missed entire work day on 01/16/24");
}

/// IT-008: a 1:00 PM starter lands in afternoon slots but reads as late
#[tokio::test]
async fn test_afternoon_starter_strategies_disagree() {
    let body = request(vec![
        punch("Doe, Jane", "01/10/24", "01:00p", "03:00p"),
        punch("Doe, Jane", "01/10/24", "03:30p", "04:30p"),
    ]);

    let (_, response) = post_analyze(create_router_for_test(), body).await;
    let report = &response["report"];

    let day = day_slot(report, "Doe, Jane", "2024-01-10");
    assert_eq!(day["morning_arrival"]["status"]["kind"], "empty");
    assert_eq!(day["lunch_return"]["raw"], "01:00p");

    let result = period_result(report, "Doe, Jane", 0);
    assert!(anomaly_types(result).contains(&"late_arrival".to_string()));
}

// =============================================================================
// SECTION 3: Offenders & Summaries
// =============================================================================

/// IT-009: two periods at 22 and 25 make a systematic offender
#[tokio::test]
async fn test_offender_by_high_score_periods() {
    let mut punches = Vec::new();
    // Fortnight one: two missed days (20) plus one incomplete day (5) = 25.
    for date in &FORTNIGHT[..7] {
        punches.extend(regular_day("Doe, Jane", date));
    }
    punches.push(punch("Doe, Jane", "01/17/24", "08:00a", "04:30p"));
    // Fortnight two: two missed days (20) plus one irregular end (2) = 22.
    let second = [
        "01/22/24", "01/23/24", "01/24/24", "01/25/24", "01/26/24", "01/29/24", "01/30/24",
        "01/31/24",
    ];
    for date in &second {
        punches.extend(regular_day("Doe, Jane", date));
    }
    punches.pop();
    punches.push(punch("Doe, Jane", "01/31/24", "12:30p", "05:00p"));

    let (_, response) = post_analyze(create_router_for_test(), request(punches)).await;
    let report = &response["report"];

    assert_eq!(period_result(report, "Doe, Jane", 0)["score"], 25);
    assert_eq!(period_result(report, "Doe, Jane", 1)["score"], 22);
    let offenders = report["offenders"].as_array().unwrap();
    assert_eq!(offenders.len(), 1);
    assert_eq!(offenders[0]["high_score_periods"], 2);
    assert_eq!(offenders[0]["mean_score"], "23.5");
}

/// IT-010: period summaries list high-risk employees highest first
#[tokio::test]
async fn test_period_summary() {
    let mut punches = full_fortnight("Doe, Jane");
    for date in &FORTNIGHT[..7] {
        punches.extend(regular_day("Roe, Rick", date));
    }
    for date in &FORTNIGHT[..8] {
        punches.extend(regular_day("Poe, Pat", date));
    }

    let (_, response) = post_analyze(create_router_for_test(), request(punches)).await;
    let summary = &response["report"]["period_summaries"][0];

    assert_eq!(summary["total_missed_days"], 5);
    assert_eq!(summary["high_risk"][0]["employee"], "Roe, Rick");
    assert_eq!(summary["high_risk"][0]["score"], 30);
    assert_eq!(summary["high_risk"][1]["employee"], "Poe, Pat");
    assert_eq!(summary["high_risk"].as_array().unwrap().len(), 2);

    let breakdown = &response["report"]["anomaly_breakdown"];
    assert_eq!(breakdown[0]["type"], "missed_day");
    assert_eq!(breakdown[0]["count"], 5);
}

// =============================================================================
// SECTION 4: Drop Ledger & Errors
// =============================================================================

/// IT-011: malformed rows are counted separately from empty results
#[tokio::test]
async fn test_dropped_rows_reported() {
    let mut punches = full_fortnight("Doe, Jane");
    punches.push(punch("Doe, Jane", "01/10/24", "8:00", "12:00p"));
    punches.push(punch("Doe, Jane", "Jan 10", "08:00a", "12:00p"));

    let (status, response) = post_analyze(create_router_for_test(), request(punches)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["report"]["accepted_punches"], 20);
    assert_eq!(response["report"]["dropped_punches"], 2);
    assert_eq!(period_result(&response["report"], "Doe, Jane", 0)["score"], 0);
}

/// IT-012: an empty batch is a legitimately empty report
#[tokio::test]
async fn test_empty_batch() {
    let (status, response) = post_analyze(create_router_for_test(), request(vec![])).await;

    assert_eq!(status, StatusCode::OK);
    assert!(response["report"]["periods"].as_array().unwrap().is_empty());
    assert_eq!(response["report"]["dropped_punches"], 0);
    assert!(response["analysis_id"].is_string());
    assert!(response["engine_version"].is_string());
}

/// IT-013: wrongly typed fields are rejected
#[tokio::test]
async fn test_wrong_field_type_returns_400() {
    let body = json!({ "punches": [{ "employee": 7 }] });
    let (status, response) = post_analyze(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["code"] == "MALFORMED_JSON" || response["code"] == "VALIDATION_ERROR");
}

// =============================================================================
// SECTION 5: Properties
// =============================================================================

const EMPLOYEES: [&str; 3] = ["Doe, Jane", "Roe, Rick", "Poe, Pat"];

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn arb_punch() -> impl Strategy<Value = RawPunch> {
    (0usize..3, 0i64..60, 0u16..1440, 0u16..1440, prop::bool::weighted(0.05)).prop_map(
        |(employee, offset, in_min, out_min, mismatch)| {
            let date = base_date() + Duration::days(offset);
            let out_date = if mismatch { date + Duration::days(1) } else { date };
            RawPunch {
                employee: EMPLOYEES[employee].to_string(),
                in_date: date.format("%m/%d/%y").to_string(),
                out_date: out_date.format("%m/%d/%y").to_string(),
                in_time: ClockTime::from_minutes(in_min).unwrap().to_token(),
                out_time: ClockTime::from_minutes(out_min).unwrap().to_token(),
            }
        },
    )
}

proptest! {
    #[test]
    fn prop_periods_tile_observed_range(rows in prop::collection::vec(arb_punch(), 1..40)) {
        let report = AnalysisEngine::default().analyze_raw(rows.clone());
        let dates: Vec<NaiveDate> = rows
            .iter()
            .map(|r| NaiveDate::parse_from_str(&r.in_date, "%m/%d/%y").unwrap())
            .collect();
        let min = *dates.iter().min().unwrap();
        let max = *dates.iter().max().unwrap();

        prop_assert!(!report.periods.is_empty());
        prop_assert!(report.periods[0].start_date <= min);
        prop_assert!(report.periods.last().unwrap().end_date >= max);
        for period in &report.periods {
            prop_assert_eq!(period.start_date.weekday(), Weekday::Mon);
            prop_assert_eq!((period.end_date - period.start_date).num_days(), 13);
        }
        for pair in report.periods.windows(2) {
            prop_assert_eq!(pair[0].end_date + Duration::days(1), pair[1].start_date);
        }
    }

    #[test]
    fn prop_day_accounting_balances(rows in prop::collection::vec(arb_punch(), 0..40)) {
        let report = AnalysisEngine::default().analyze_raw(rows);
        for analysis in &report.employees {
            prop_assert_eq!(analysis.period_results.len(), report.periods.len());
            for result in &analysis.period_results {
                prop_assert_eq!(result.worked_days + result.missed_days, result.total_days);
                let missed = result
                    .anomalies
                    .iter()
                    .filter(|a| a.anomaly_type == timeclock_engine::models::AnomalyType::MissedDay)
                    .count();
                prop_assert_eq!(missed, result.missed_days);
            }
        }
    }

    #[test]
    fn prop_analysis_is_idempotent(rows in prop::collection::vec(arb_punch(), 0..40)) {
        let engine = AnalysisEngine::default();
        prop_assert_eq!(engine.analyze_raw(rows.clone()), engine.analyze_raw(rows));
    }

    #[test]
    fn prop_grid_covers_every_employee_and_weekday(rows in prop::collection::vec(arb_punch(), 0..40)) {
        let report = AnalysisEngine::default().analyze_raw(rows);
        let mut weekdays: Vec<NaiveDate> = report
            .day_slots
            .iter()
            .map(|d| d.date)
            .collect();
        weekdays.sort();
        weekdays.dedup();

        prop_assert!(weekdays.iter().all(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)));
        prop_assert_eq!(report.day_slots.len(), report.employees.len() * weekdays.len());
    }
}
