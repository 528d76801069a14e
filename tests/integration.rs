//! Integration tests for the quote costing API.
//!
//! This test suite drives `POST /quotes/costs` against the reference cleaning
//! award data in `config/cleaning` and covers:
//! - Weekday ordinary and early/late time
//! - Saturday, Sunday and public holiday rates
//! - Shifts crossing midnight
//! - Headcount, allowances and settings overrides
//! - Weekly overtime and broken-shift reporting
//! - Rate table versions
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use cleaning_award_engine::api::{AppState, create_router};
use cleaning_award_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

const EFFECTIVE_DATE: &str = "2025-08-01";

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/cleaning").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn post_quote(router: Router, body: Value) -> (StatusCode, Value) {
    post_raw(router, body.to_string()).await
}

async fn post_raw(router: Router, body: String) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/quotes/costs")
                .header("Content-Type", "application/json")
                .body(Body::from(body))
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

fn create_shift(
    id: &str,
    day: &str,
    start_time: &str,
    end_time: &str,
    employment_type: &str,
    level: u8,
) -> Value {
    json!({
        "id": id,
        "day": day,
        "start_time": start_time,
        "end_time": end_time,
        "break_duration_minutes": 0,
        "number_of_cleaners": 1,
        "employment_type": employment_type,
        "level": level
    })
}

fn create_request(shifts: Vec<Value>) -> Value {
    json!({
        "shifts": shifts,
        "effective_date": EFFECTIVE_DATE
    })
}

fn assert_decimal(value: &Value, expected: &str) {
    let actual = value
        .as_str()
        .unwrap_or_else(|| panic!("Expected decimal string, got {}", value));
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

async fn single_shift_cost(shift: Value) -> Value {
    let (status, result) = post_quote(create_router_for_test(), create_request(vec![shift])).await;
    assert_eq!(status, StatusCode::OK, "Unexpected response: {}", result);
    result["shift_costs"][0].clone()
}

// =============================================================================
// SECTION 1: Weekday Tests
// =============================================================================

#[tokio::test]
async fn test_weekday_ordinary_8h_fulltime() {
    let cost = single_shift_cost(create_shift("s1", "monday", "09:00", "17:00", "full-time", 1)).await;

    assert_decimal(&cost["estimated_cost"], "206.80");
    assert_eq!(cost["worked_minutes"], 480);
    assert_eq!(cost["breakdown"][0]["pay_condition"], "base");
}

#[tokio::test]
async fn test_weekday_break_is_unpaid() {
    let mut shift = create_shift("s1", "wednesday", "09:00", "17:30", "part-time", 1);
    shift["break_duration_minutes"] = json!(30);
    let cost = single_shift_cost(shift).await;

    assert_decimal(&cost["estimated_cost"], "206.80");
}

#[tokio::test]
async fn test_weekday_early_start_is_split() {
    let cost = single_shift_cost(create_shift("s1", "tuesday", "04:00", "12:00", "full-time", 1)).await;

    assert_eq!(cost["breakdown"].as_array().unwrap().len(), 2);
    assert_eq!(cost["breakdown"][0]["pay_condition"], "shift-early-late");
    assert_eq!(cost["breakdown"][0]["minutes"], 120);
    assert_eq!(cost["breakdown"][1]["pay_condition"], "base");
    assert_decimal(&cost["estimated_cost"], "214.56");
}

#[tokio::test]
async fn test_weekday_overnight_keeps_start_day() {
    let cost = single_shift_cost(create_shift("s1", "friday", "22:00", "02:00", "full-time", 1)).await;

    assert_eq!(cost["breakdown"][0]["pay_condition"], "shift-early-late");
    assert_decimal(&cost["estimated_cost"], "118.91");
}

// =============================================================================
// SECTION 2: Weekend and Public Holiday Tests
// =============================================================================

#[tokio::test]
async fn test_casual_saturday_4h() {
    let cost = single_shift_cost(create_shift("s1", "saturday", "08:00", "12:00", "casual", 1)).await;

    assert_eq!(cost["breakdown"][0]["pay_condition"], "saturday");
    assert_decimal(&cost["estimated_cost"], "180.94");
}

#[tokio::test]
async fn test_fulltime_sunday_4h() {
    let cost = single_shift_cost(create_shift("s1", "sunday", "08:00", "12:00", "full-time", 2)).await;

    assert_decimal(&cost["estimated_cost"], "214.00");
}

#[tokio::test]
async fn test_public_holiday_ignores_band() {
    let cost =
        single_shift_cost(create_shift("s1", "public-holiday", "04:00", "12:00", "full-time", 1)).await;

    assert_eq!(cost["breakdown"].as_array().unwrap().len(), 1);
    assert_eq!(cost["breakdown"][0]["pay_condition"], "public-holiday");
    assert_decimal(&cost["estimated_cost"], "517.00");
}

#[tokio::test]
async fn test_saturday_overnight_stays_saturday() {
    let cost = single_shift_cost(create_shift("s1", "saturday", "22:00", "02:00", "full-time", 1)).await;

    assert_eq!(cost["breakdown"][0]["pay_condition"], "saturday");
    assert_decimal(&cost["estimated_cost"], "155.10");
}

// =============================================================================
// SECTION 3: Headcount, Allowances and Settings Tests
// =============================================================================

#[tokio::test]
async fn test_cost_scales_with_cleaners() {
    let mut shift = create_shift("s1", "monday", "09:00", "17:00", "full-time", 1);
    shift["number_of_cleaners"] = json!(3);
    let cost = single_shift_cost(shift).await;

    assert_decimal(&cost["estimated_cost"], "620.40");
}

#[tokio::test]
async fn test_toilet_cleaning_allowance_per_cleaner() {
    let mut shift = create_shift("s1", "monday", "09:00", "17:00", "full-time", 1);
    shift["number_of_cleaners"] = json!(2);
    shift["allowances"] = json!(["toilet-cleaning"]);
    let cost = single_shift_cost(shift).await;

    assert_eq!(cost["allowances"][0]["code"], "toilet-cleaning");
    assert_decimal(&cost["allowances"][0]["amount"], "7.12");
    assert_decimal(&cost["estimated_cost"], "420.72");
}

#[tokio::test]
async fn test_leading_hand_allowance_per_hour() {
    let mut shift = create_shift("s1", "monday", "09:00", "17:00", "full-time", 1);
    shift["allowances"] = json!(["leading-hand"]);
    let cost = single_shift_cost(shift).await;

    assert_decimal(&cost["allowances"][0]["amount"], "7.36");
    assert_decimal(&cost["estimated_cost"], "214.16");
}

#[tokio::test]
async fn test_settings_multiplier_override() {
    let mut body = create_request(vec![create_shift(
        "s1", "monday", "09:00", "17:00", "full-time", 1,
    )]);
    body["settings"] = json!({ "base_rate_multiplier": "1.1" });

    let (status, result) = post_quote(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["shift_costs"][0]["estimated_cost"], "227.48");
}

#[tokio::test]
async fn test_overhead_and_margin_totals() {
    let mut body = create_request(vec![create_shift(
        "s1", "monday", "09:00", "17:00", "full-time", 1,
    )]);
    body["settings"] = json!({
        "overhead_percentage_default": "10",
        "margin_percentage_default": "20"
    });

    let (status, result) = post_quote(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["totals"]["labour_cost"], "206.80");
    assert_decimal(&result["totals"]["overhead"], "20.68");
    assert_decimal(&result["totals"]["margin"], "45.50");
    assert_decimal(&result["totals"]["total_price"], "272.98");
}

// =============================================================================
// SECTION 4: Weekly Overtime and Broken Shift Tests
// =============================================================================

fn fulltime_week(level: u8, start: &str, end: &str) -> Vec<Value> {
    ["monday", "tuesday", "wednesday", "thursday", "friday"]
        .iter()
        .map(|day| create_shift(&format!("{}_shift", day), day, start, end, "full-time", level))
        .collect()
}

#[tokio::test]
async fn test_weekly_overtime_reported() {
    let body = create_request(fulltime_week(2, "08:00", "16:00"));

    let (status, result) = post_quote(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    let cohorts = result["overtime"]["cohorts"].as_array().unwrap();
    assert_eq!(cohorts.len(), 1);
    assert_eq!(cohorts[0]["cohort"]["employment_type"], "full-time");
    assert_eq!(cohorts[0]["cohort"]["level"], 2);
    assert_decimal(&cohorts[0]["excess_hours"], "2");
    assert_decimal(&cohorts[0]["allocation"]["overtime-first-2-hours"], "2");
    assert_decimal(&cohorts[0]["overtime_cost"], "80.25");

    // Overtime is advisory; labour is still 5 ordinary days.
    assert_decimal(&result["totals"]["labour_cost"], "1070.00");
}

#[tokio::test]
async fn test_sunday_overtime_reported() {
    let mut shifts = fulltime_week(2, "08:00", "16:00");
    shifts.push(create_shift("sun", "sunday", "08:00", "12:00", "full-time", 2));

    let (status, result) = post_quote(create_router_for_test(), create_request(shifts)).await;

    assert_eq!(status, StatusCode::OK);
    let allocation = &result["overtime"]["cohorts"][0]["allocation"];
    assert_decimal(&allocation["overtime-first-2-hours"], "2");
    assert_decimal(&allocation["overtime-sunday"], "4");
}

#[tokio::test]
async fn test_no_overtime_under_threshold() {
    let body = create_request(fulltime_week(1, "09:00", "16:00"));

    let (status, result) = post_quote(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["overtime"]["cohorts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_broken_shift_day_flagged() {
    let shifts = vec![
        create_shift("am", "monday", "08:00", "12:00", "part-time", 1),
        create_shift("pm", "monday", "14:00", "18:00", "part-time", 1),
        create_shift("tue_am", "tuesday", "08:00", "12:00", "part-time", 1),
        create_shift("tue_pm", "tuesday", "12:00", "16:00", "part-time", 1),
    ];

    let (status, result) = post_quote(create_router_for_test(), create_request(shifts)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["broken_shift_days"], json!(["monday"]));
}

// =============================================================================
// SECTION 5: Rate Table Version Tests
// =============================================================================

#[tokio::test]
async fn test_older_rate_table_selected_by_date() {
    let body = json!({
        "shifts": [create_shift("s1", "monday", "09:00", "17:00", "full-time", 1)],
        "effective_date": "2025-01-15"
    });

    let (status, result) = post_quote(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["shift_costs"][0]["estimated_cost"], "199.44");
}

// =============================================================================
// SECTION 6: Error Cases Tests
// =============================================================================

#[tokio::test]
async fn test_error_malformed_json() {
    let (status, error) = post_raw(create_router_for_test(), "{invalid json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_error_missing_shift_field() {
    let body = json!({
        "shifts": [{
            "day": "monday",
            "start_time": "09:00",
            "end_time": "17:00",
            "number_of_cleaners": 1,
            "employment_type": "full-time",
            "level": 1
        }]
    });

    let (status, error) = post_quote(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_error_unknown_day() {
    let body = create_request(vec![create_shift(
        "s1", "funday", "09:00", "17:00", "full-time", 1,
    )]);

    let (status, error) = post_quote(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_error_level_out_of_range() {
    let body = create_request(vec![create_shift(
        "s1", "monday", "09:00", "17:00", "full-time", 7,
    )]);

    let (status, error) = post_quote(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_error_start_equals_end() {
    let body = create_request(vec![create_shift(
        "s1", "monday", "09:00", "09:00", "full-time", 1,
    )]);

    let (status, error) = post_quote(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("s1"));
}

#[tokio::test]
async fn test_error_zero_cleaners() {
    let mut shift = create_shift("s1", "monday", "09:00", "17:00", "full-time", 1);
    shift["number_of_cleaners"] = json!(0);

    let (status, error) = post_quote(create_router_for_test(), create_request(vec![shift])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_error_unknown_allowance() {
    let mut shift = create_shift("s1", "monday", "09:00", "17:00", "full-time", 1);
    shift["allowances"] = json!(["vehicle"]);

    let (status, error) = post_quote(create_router_for_test(), create_request(vec![shift])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("vehicle"));
}

#[tokio::test]
async fn test_error_multiplier_out_of_bounds() {
    let mut body = create_request(vec![create_shift(
        "s1", "monday", "09:00", "17:00", "full-time", 1,
    )]);
    body["settings"] = json!({ "base_rate_multiplier": "3" });

    let (status, error) = post_quote(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_SETTINGS");
}

#[tokio::test]
async fn test_error_no_rate_table_for_date() {
    let body = json!({
        "shifts": [create_shift("s1", "monday", "09:00", "17:00", "full-time", 1)],
        "effective_date": "2020-01-01"
    });

    let (status, error) = post_quote(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "RATE_TABLE_NOT_FOUND");
}
