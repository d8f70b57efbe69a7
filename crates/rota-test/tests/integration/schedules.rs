//! Schedule window queries: expansion, merging, filtering and paging.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

/// ## Summary
/// Weekly rules produce one occurrence per matching weekday in the window.
#[test_log::test(tokio::test)]
async fn weekly_rule_expands_to_matching_weekdays() {
    let service = create_test_service();
    create_rule(
        &service,
        "mgr-1",
        "Manager",
        &json!({
            "employeeId": "nurse-1",
            "shiftTypeId": "early",
            "assignmentType": "weekly",
            "startDate": "2025-05-01",
            "endDate": "2025-05-31",
            "daysOfWeek": [1, 3, 5]
        }),
    )
    .await;

    let page = TestRequest::get(&schedules_path("2025-05-01", "2025-05-31"))
        .as_caller("nurse-1", "Employee")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(page["totalSchedules"], 13);
    assert_eq!(page["totalPages"], 1);
    assert_eq!(page["currentPage"], 1);
    let dates = occurrence_dates(&page);
    assert_eq!(dates[..3], ["2025-05-02", "2025-05-05", "2025-05-07"]);
    assert_eq!(page["expandedSchedules"][0]["shiftTypeId"], "early");
    assert_eq!(page["expandedSchedules"][0]["employeeId"], "nurse-1");
}

/// ## Summary
/// Exception dates are skipped even though the pattern matches them.
#[test_log::test(tokio::test)]
async fn exceptions_are_skipped() {
    let service = create_test_service();
    create_rule(
        &service,
        "admin",
        "Admin",
        &json!({
            "employeeId": "nurse-2",
            "shiftTypeId": "late",
            "assignmentType": "daily",
            "startDate": "2025-05-01T00:00:00.000Z",
            "endDate": "2025-05-10",
            "exceptions": ["2025-05-03", "2025-05-04T00:00:00.000Z"]
        }),
    )
    .await;

    let page = TestRequest::get(&schedules_path("2025-05-01", "2025-05-31"))
        .as_caller("admin", "Admin")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let dates = occurrence_dates(&page);
    assert_eq!(dates.len(), 8);
    assert!(!dates.contains(&"2025-05-03".to_string()));
    assert!(!dates.contains(&"2025-05-04".to_string()));
}

/// ## Summary
/// A day of month beyond a month's length falls on that month's last day.
#[test_log::test(tokio::test)]
async fn monthly_day_clamps_to_short_months() {
    let service = create_test_service();
    create_rule(
        &service,
        "mgr-1",
        "Manager",
        &json!({
            "employeeId": "nurse-1",
            "shiftTypeId": "early",
            "assignmentType": "monthly",
            "startDate": "2025-01-01",
            "dayOfMonth": 31
        }),
    )
    .await;

    let page = TestRequest::get(&schedules_path("2025-01-01", "2025-06-30"))
        .as_caller("mgr-1", "Manager")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(
        occurrence_dates(&page),
        [
            "2025-01-31",
            "2025-02-28",
            "2025-03-31",
            "2025-04-30",
            "2025-05-31",
            "2025-06-30"
        ]
    );
}

/// ## Summary
/// Permanent rules keep producing occurrences years after their start.
#[test_log::test(tokio::test)]
async fn permanent_weekend_rule_is_open_ended() {
    let service = create_test_service();
    create_rule(
        &service,
        "lead-1",
        "TeamLeader",
        &json!({
            "employeeId": "nurse-3",
            "shiftTypeId": "early",
            "assignmentType": "permanent",
            "startDate": "2025-01-01",
            "daysOfWeek": [0, 6]
        }),
    )
    .await;

    let page = TestRequest::get(&schedules_path("2030-06-01", "2030-06-30"))
        .as_caller("lead-1", "TeamLeader")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(page["totalSchedules"], 10);
    assert_eq!(occurrence_dates(&page)[..2], ["2030-06-01", "2030-06-02"]);
}

/// ## Summary
/// An overnight shift is reported on the date it starts.
#[test_log::test(tokio::test)]
async fn overnight_shift_belongs_to_its_start_date() {
    let service = create_test_service();
    create_rule(
        &service,
        "mgr-1",
        "Manager",
        &json!({
            "employeeId": "nurse-2",
            "shiftTypeId": "night",
            "assignmentType": "single",
            "startDate": "2025-05-31"
        }),
    )
    .await;

    let june = TestRequest::get(&schedules_path("2025-06-01", "2025-06-30"))
        .as_caller("nurse-2", "Employee")
        .send(&service)
        .await
        .json();
    assert_eq!(june["totalSchedules"], 0);

    let may_31 = TestRequest::get(&schedules_path("2025-05-31", "2025-05-31"))
        .as_caller("nurse-2", "Employee")
        .send(&service)
        .await
        .json();
    assert_eq!(occurrence_dates(&may_31), ["2025-05-31"]);
}

/// ## Summary
/// Occurrences of several employees merge in date order, then by employee.
#[test_log::test(tokio::test)]
async fn occurrences_merge_by_date_then_employee() {
    let service = create_test_service();
    for (employee, shift) in [("nurse-2", "late"), ("nurse-1", "early")] {
        create_rule(
            &service,
            "hr-1",
            "HR",
            &json!({
                "employeeId": employee,
                "shiftTypeId": shift,
                "assignmentType": "daily",
                "startDate": "2025-05-01",
                "endDate": "2025-05-02"
            }),
        )
        .await;
    }

    let page = TestRequest::get(&schedules_path("2025-05-01", "2025-05-31"))
        .as_caller("hr-1", "HR")
        .send(&service)
        .await
        .json();

    let order: Vec<(String, String)> = page["expandedSchedules"]
        .as_array()
        .expect("occurrences")
        .iter()
        .map(|occurrence| {
            (
                occurrence["date"].as_str().expect("date").to_string(),
                occurrence["employeeId"].as_str().expect("employee").to_string(),
            )
        })
        .collect();
    let expected = [
        ("2025-05-01", "nurse-1"),
        ("2025-05-01", "nurse-2"),
        ("2025-05-02", "nurse-1"),
        ("2025-05-02", "nurse-2"),
    ]
    .map(|(date, employee)| (date.to_string(), employee.to_string()));
    assert_eq!(order, expected);
}

/// ## Summary
/// Paging splits the merged list; pages past the end are empty, not errors.
#[test_log::test(tokio::test)]
async fn paging_splits_the_merged_list() {
    let service = create_test_service();
    create_rule(
        &service,
        "mgr-1",
        "Manager",
        &json!({
            "employeeId": "nurse-1",
            "shiftTypeId": "early",
            "assignmentType": "daily",
            "startDate": "2025-05-01",
            "endDate": "2025-05-31"
        }),
    )
    .await;
    let window = schedules_path("2025-05-01", "2025-05-31");

    let last = TestRequest::get(&format!("{window}&page=4&limit=10"))
        .as_caller("nurse-1", "Employee")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(last["totalSchedules"], 31);
    assert_eq!(last["totalPages"], 4);
    assert_eq!(last["currentPage"], 4);
    assert_eq!(occurrence_dates(&last), ["2025-05-31"]);

    let beyond = TestRequest::get(&format!("{window}&page=5&limit=10"))
        .as_caller("nurse-1", "Employee")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(occurrence_dates(&beyond).is_empty());
    assert_eq!(beyond["totalSchedules"], 31);
}

/// ## Summary
/// Department and employee filters narrow what the caller can already see.
#[test_log::test(tokio::test)]
async fn department_and_employee_filters() {
    let service = create_test_service();
    for employee in ["nurse-1", "nurse-2", "nurse-3"] {
        create_rule(
            &service,
            "admin",
            "Admin",
            &json!({
                "employeeId": employee,
                "shiftTypeId": "early",
                "assignmentType": "single",
                "startDate": "2025-05-12"
            }),
        )
        .await;
    }
    let window = schedules_path("2025-05-01", "2025-05-31");

    let emergency = TestRequest::get(&format!("{window}&department=emergency"))
        .as_caller("admin", "Admin")
        .send(&service)
        .await
        .json();
    assert_eq!(emergency["totalSchedules"], 1);
    assert_eq!(emergency["expandedSchedules"][0]["employeeId"], "nurse-3");

    let nurse_2 = TestRequest::get(&format!("{window}&employeeId=nurse-2"))
        .as_caller("mgr-1", "Manager")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(nurse_2["totalSchedules"], 1);
    assert_eq!(nurse_2["expandedSchedules"][0]["employeeId"], "nurse-2");

    // The manager's own view of cardiology never reaches the emergency team.
    let cardiology = TestRequest::get(&format!("{window}&department=Cardiology"))
        .as_caller("mgr-1", "Manager")
        .send(&service)
        .await
        .json();
    assert_eq!(cardiology["totalSchedules"], 2);
}

/// ## Summary
/// Windows wider than the configured maximum are rejected.
#[test_log::test(tokio::test)]
async fn over_wide_window_is_rejected() {
    let service = create_test_service();

    let msg = TestRequest::get(&schedules_path("2025-01-01", "2026-12-31"))
        .as_caller("admin", "Admin")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .msg();

    assert!(msg.contains("exceeds"), "{msg}");
}
