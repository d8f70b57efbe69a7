//! Rule writes: validation, conflict detection, partial updates and
//! soft deletion.

use salvo::http::StatusCode;
use serde_json::{Value, json};

use super::helpers::*;

fn weekly(employee: &str, shift: &str, days: &[u8]) -> Value {
    json!({
        "employeeId": employee,
        "shiftTypeId": shift,
        "assignmentType": "weekly",
        "startDate": "2025-05-01",
        "endDate": "2025-05-31",
        "daysOfWeek": days
    })
}

fn single(employee: &str, shift: &str, date: &str) -> Value {
    json!({
        "employeeId": employee,
        "shiftTypeId": shift,
        "assignmentType": "single",
        "startDate": date
    })
}

async fn post_as_manager(service: &salvo::Service, body: &Value) -> TestResponse {
    TestRequest::post(rota_test::component::constants::SCHEDULES_ROUTE_PREFIX)
        .as_caller("mgr-1", "Manager")
        .json(body)
        .send(service)
        .await
}

fn rule_id(rule: &Value) -> &str {
    rule["id"].as_str().expect("rule id")
}

/// ## Summary
/// A night shift blocks what overlaps it across midnight, and nothing else.
#[test_log::test(tokio::test)]
async fn overnight_shift_conflicts_only_where_it_overlaps() {
    let service = create_test_service();
    create_rule(&service, "mgr-1", "Manager", &weekly("nurse-1", "night", &[1])).await;

    // Tuesday early starts at 07:00, after Monday night ends at 06:00.
    post_as_manager(&service, &single("nurse-1", "early", "2025-05-06"))
        .await
        .assert_status(StatusCode::CREATED);

    // Monday late runs until 23:00, past the 22:00 night start.
    let msg = post_as_manager(&service, &single("nurse-1", "late", "2025-05-05"))
        .await
        .assert_status(StatusCode::CONFLICT)
        .msg();
    assert!(msg.contains("Conflict"), "{msg}");

    // Another employee is unaffected.
    post_as_manager(&service, &single("nurse-2", "late", "2025-05-05"))
        .await
        .assert_status(StatusCode::CREATED);
}

/// ## Summary
/// The same single assignment cannot be stored twice.
#[test_log::test(tokio::test)]
async fn duplicate_single_assignment_conflicts() {
    let service = create_test_service();
    let body = single("nurse-2", "early", "2025-05-20");

    post_as_manager(&service, &body)
        .await
        .assert_status(StatusCode::CREATED);
    post_as_manager(&service, &body)
        .await
        .assert_status(StatusCode::CONFLICT);
}

/// ## Summary
/// Invalid rules are rejected with 400 before anything is stored.
#[test_log::test(tokio::test)]
async fn invalid_rules_are_rejected() {
    let service = create_test_service();
    let invalid = [
        weekly("nurse-1", "early", &[]),
        json!({
            "employeeId": "nurse-1",
            "shiftTypeId": "early",
            "assignmentType": "daily",
            "startDate": "2025-05-10",
            "endDate": "2025-05-01"
        }),
        json!({
            "employeeId": "nurse-1",
            "shiftTypeId": "early",
            "assignmentType": "monthly",
            "startDate": "2025-05-01",
            "dayOfMonth": 32
        }),
        json!({
            "employeeId": "nurse-1",
            "shiftTypeId": "early",
            "assignmentType": "permanent",
            "startDate": "2025-05-01",
            "daysOfWeek": [1],
            "dayOfMonth": 1
        }),
        weekly("nurse-1", "early", &[7]),
        json!({
            "employeeId": "nurse-1",
            "shiftTypeId": "early",
            "assignmentType": "single",
            "startDate": "tomorrow"
        }),
        json!({
            "employeeId": "nurse-1",
            "shiftTypeId": "early",
            "assignmentType": "daily",
            "startDate": "2025-05-01",
            "endDate": "+20000-12-31"
        }),
    ];

    for body in &invalid {
        post_as_manager(&service, body)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    let page = TestRequest::get(&schedules_path("2025-05-01", "2025-05-31"))
        .as_caller("admin", "Admin")
        .send(&service)
        .await
        .json();
    assert_eq!(page["totalSchedules"], 0);
}

/// ## Summary
/// Missing references are 404, inactive ones are 400.
#[test_log::test(tokio::test)]
async fn referenced_employee_and_shift_type_must_exist_and_be_active() {
    let service = create_test_service();

    for (body, status) in [
        (single("nobody", "early", "2025-05-01"), StatusCode::NOT_FOUND),
        (single("nurse-1", "brunch", "2025-05-01"), StatusCode::NOT_FOUND),
        (single("nurse-1", "legacy", "2025-05-01"), StatusCode::BAD_REQUEST),
        (single("retired", "early", "2025-05-01"), StatusCode::BAD_REQUEST),
    ] {
        TestRequest::post(rota_test::component::constants::SCHEDULES_ROUTE_PREFIX)
            .as_caller("admin", "Admin")
            .json(&body)
            .send(&service)
            .await
            .assert_status(status);
    }
}

/// ## Summary
/// Refinements a kind does not use are dropped rather than applied.
#[test_log::test(tokio::test)]
async fn unused_refinements_are_dropped() {
    let service = create_test_service();
    let rule = create_rule(
        &service,
        "mgr-1",
        "Manager",
        &json!({
            "employeeId": "nurse-1",
            "shiftTypeId": "early",
            "assignmentType": "daily",
            "startDate": "2025-05-01",
            "endDate": "2025-05-07",
            "daysOfWeek": [1],
            "dayOfMonth": 3
        }),
    )
    .await;

    assert_eq!(rule["daysOfWeek"], json!([]));
    assert!(rule["dayOfMonth"].is_null());

    let page = TestRequest::get(&schedules_path("2025-05-01", "2025-05-31"))
        .as_caller("nurse-1", "Employee")
        .send(&service)
        .await
        .json();
    assert_eq!(page["totalSchedules"], 7);
}

/// ## Summary
/// Updates are partial, except that an absent end date opens the rule.
#[test_log::test(tokio::test)]
async fn update_keeps_absent_fields_and_opens_the_end_date() {
    let service = create_test_service();
    let rule = create_rule(&service, "mgr-1", "Manager", &weekly("nurse-1", "early", &[1])).await;

    let updated = TestRequest::put(&rule_path(rule_id(&rule)))
        .as_caller("mgr-1", "Manager")
        .json(&json!({ "shiftTypeId": "late", "notes": "cover" }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(updated["id"], rule["id"]);
    assert_eq!(updated["shiftTypeId"], "late");
    assert_eq!(updated["assignmentType"], "weekly");
    assert_eq!(updated["daysOfWeek"], json!([1]));
    assert_eq!(updated["notes"], "cover");
    assert!(updated["endDate"].is_null());

    let fetched = TestRequest::get(&rule_path(rule_id(&rule)))
        .as_caller("nurse-1", "Employee")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(fetched, updated);
}

/// ## Summary
/// An update that would overlap another rule is refused and changes nothing.
#[test_log::test(tokio::test)]
async fn conflicting_update_is_refused() {
    let service = create_test_service();
    create_rule(&service, "mgr-1", "Manager", &weekly("nurse-1", "early", &[1])).await;
    let tuesday = create_rule(&service, "mgr-1", "Manager", &weekly("nurse-1", "early", &[2])).await;

    TestRequest::put(&rule_path(rule_id(&tuesday)))
        .as_caller("mgr-1", "Manager")
        .json(&json!({ "daysOfWeek": [1, 2], "endDate": "2025-05-31" }))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT);

    let stored = TestRequest::get(&rule_path(rule_id(&tuesday)))
        .as_caller("mgr-1", "Manager")
        .send(&service)
        .await
        .json();
    assert_eq!(stored["daysOfWeek"], json!([2]));
}

/// ## Summary
/// Deactivated rules stop blocking; reactivating into a clash is refused.
#[test_log::test(tokio::test)]
async fn reactivation_is_conflict_checked() {
    let service = create_test_service();
    let daily = create_rule(
        &service,
        "mgr-1",
        "Manager",
        &json!({
            "employeeId": "nurse-2",
            "shiftTypeId": "early",
            "assignmentType": "daily",
            "startDate": "2025-05-01",
            "endDate": "2025-05-31"
        }),
    )
    .await;
    let path = rule_path(rule_id(&daily));

    let msg = TestRequest::delete(&path)
        .as_caller("mgr-1", "Manager")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .msg();
    assert_eq!(msg, "Schedule rule deactivated successfully.");

    post_as_manager(&service, &single("nurse-2", "early", "2025-05-10"))
        .await
        .assert_status(StatusCode::CREATED);

    TestRequest::put(&path)
        .as_caller("mgr-1", "Manager")
        .json(&json!({ "isActive": true, "endDate": "2025-05-31" }))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT);
}

/// ## Summary
/// Deactivation is a soft delete: the rule stays readable and the call repeats.
#[test_log::test(tokio::test)]
async fn deactivation_is_soft_and_repeatable() {
    let service = create_test_service();
    let rule = create_rule(&service, "mgr-1", "Manager", &weekly("nurse-1", "late", &[4])).await;
    let path = rule_path(rule_id(&rule));

    for _ in 0..2 {
        TestRequest::delete(&path)
            .as_caller("mgr-1", "Manager")
            .send(&service)
            .await
            .assert_status(StatusCode::OK);
    }

    let stored = TestRequest::get(&path)
        .as_caller("mgr-1", "Manager")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(stored["isActive"], false);
}

/// ## Summary
/// Unknown and malformed rule ids are 404 on every rule route.
#[test_log::test(tokio::test)]
async fn unknown_rules_are_not_found() {
    let service = create_test_service();

    for path in [unknown_rule_path(), rule_path("12345")] {
        TestRequest::get(&path)
            .as_caller("admin", "Admin")
            .send(&service)
            .await
            .assert_status(StatusCode::NOT_FOUND);
        TestRequest::put(&path)
            .as_caller("admin", "Admin")
            .json(&json!({}))
            .send(&service)
            .await
            .assert_status(StatusCode::NOT_FOUND);
        TestRequest::delete(&path)
            .as_caller("admin", "Admin")
            .send(&service)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
