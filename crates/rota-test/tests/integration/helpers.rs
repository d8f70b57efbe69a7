#![allow(clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Building a seeded in-memory store (one per test)
//! - Creating the test Salvo service
//! - Making HTTP requests as a given caller
//! - Asserting on responses
//!
//! ## Seeded Organization
//! - `admin` (Admin) and `hr-1` (HR) see and manage everyone
//! - `mgr-1` (Manager, Cardiology) manages `nurse-1`, `nurse-2` and the
//!   inactive `retired`
//! - `lead-1` (`TeamLeader`, Emergency) manages `nurse-3`
//! - Shift types `early` 07:00-15:00, `late` 15:00-23:00, `night`
//!   22:00-06:00 and the inactive `legacy` 09:00-17:00

use std::sync::Arc;

use salvo::http::header::HeaderName;
use salvo::http::{Method, StatusCode};
use salvo::prelude::*;
use salvo::test::{RequestBuilder, ResponseExt};
use serde_json::Value;

use rota_test::app::api::routes;
use rota_test::component::config::*;
use rota_test::component::constants::{
    CALLER_ID_HEADER, CALLER_ROLE_HEADER, RULES_ROUTE_PREFIX, SCHEDULES_ROUTE_PREFIX,
};
use rota_test::component::model::{ShiftTime, ShiftType};
use rota_test::component::store::{Employee, MemoryStore, Seed, StoreHandler};
use rota_test::component::{Role, RuleId};

pub use tracing;

/// Test configuration - static struct instead of loading from file.
pub fn test_config() -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        auth: AuthConfig {
            method: AuthMethod::Proxy,
            single_user: None,
        },
        schedule: ScheduleConfig {
            max_window_days: 366,
            default_page_size: 100,
            max_page_size: 500,
        },
        store: StoreConfig::default(),
    }
}

/// Single-user configuration acting as `employee_id` with `role`.
pub fn single_user_config(employee_id: &str, role: Role) -> Settings {
    let mut settings = test_config();
    settings.auth = AuthConfig {
        method: AuthMethod::SingleUser,
        single_user: Some(SingleUserAuthConfig {
            employee_id: employee_id.to_string(),
            role,
        }),
    };
    settings
}

fn shift(id: &str, name: &str, start: &str, end: &str) -> ShiftType {
    ShiftType::new(id, name, ShiftTime::parse(start, end).expect("valid shift time"))
}

/// The seeded organization described in the module docs.
pub fn test_seed() -> Seed {
    let mut legacy = shift("legacy", "Legacy day", "09:00", "17:00");
    legacy.is_active = false;

    Seed {
        employees: vec![
            Employee::new("admin", "Admin", Role::Admin),
            Employee::new("hr-1", "Human Resources", Role::Hr),
            Employee::new("mgr-1", "Cardiology Manager", Role::Manager)
                .with_department("Cardiology"),
            Employee::new("lead-1", "Emergency Lead", Role::TeamLeader)
                .with_department("Emergency"),
            Employee::new("nurse-1", "Nurse One", Role::Employee)
                .with_department("Cardiology")
                .with_manager("mgr-1"),
            Employee::new("nurse-2", "Nurse Two", Role::Employee)
                .with_department("Cardiology")
                .with_manager("mgr-1"),
            Employee::new("nurse-3", "Nurse Three", Role::Employee)
                .with_department("Emergency")
                .with_manager("lead-1"),
            Employee::new("retired", "Retired Nurse", Role::Employee)
                .with_department("Cardiology")
                .with_manager("mgr-1")
                .deactivated(),
        ],
        shift_types: vec![
            shift("early", "Early", "07:00", "15:00"),
            shift("late", "Late", "15:00", "23:00"),
            shift("night", "Night", "22:00", "06:00"),
            legacy,
        ],
        rules: Vec::new(),
    }
}

/// Creates a test service over a freshly seeded store.
pub fn create_test_service() -> Service {
    create_test_service_with(test_config(), test_seed())
}

/// Creates a test service with explicit settings and seed.
pub fn create_test_service_with(settings: Settings, seed: Seed) -> Service {
    let store = MemoryStore::from_seed(seed).expect("valid seed");

    Service::new(
        Router::new()
            .hoop(StoreHandler {
                store: Arc::new(store),
            })
            .hoop(ConfigHandler::new(settings))
            .push(routes()),
    )
}

/// Path of a schedule window query.
#[must_use]
pub fn schedules_path(start: &str, end: &str) -> String {
    format!("{SCHEDULES_ROUTE_PREFIX}?viewStartDate={start}&viewEndDate={end}")
}

/// Path of a single rule.
#[must_use]
pub fn rule_path(rule_id: &str) -> String {
    format!("{RULES_ROUTE_PREFIX}/{rule_id}")
}

/// Id of a rule that is never stored.
#[must_use]
pub fn unknown_rule_path() -> String {
    rule_path(&RuleId::generate().to_string())
}

/// Creates a rule as `caller_id` and returns the stored rule.
///
/// ## Panics
/// Panics unless the service answers 201.
pub async fn create_rule(service: &Service, caller_id: &str, role: &str, body: &Value) -> Value {
    TestRequest::post(SCHEDULES_ROUTE_PREFIX)
        .as_caller(caller_id, role)
        .json(body)
        .send(service)
        .await
        .assert_status(StatusCode::CREATED)
        .json()
}

/// Dates of the occurrences in a schedule page, in response order.
#[must_use]
pub fn occurrence_dates(page: &Value) -> Vec<String> {
    page["expandedSchedules"]
        .as_array()
        .expect("expandedSchedules array")
        .iter()
        .map(|occurrence| occurrence["date"].as_str().expect("date").to_string())
        .collect()
}

// ============================================================================
// HTTP Request Builders
// ============================================================================

/// Represents an HTTP test request.
pub struct TestRequest {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl TestRequest {
    /// Creates a new test request with the given method and path.
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Identifies the caller the way the front proxy does.
    #[must_use]
    pub fn as_caller(self, employee_id: &str, role: &str) -> Self {
        self.header(CALLER_ID_HEADER, employee_id)
            .header(CALLER_ROLE_HEADER, role)
    }

    /// Sets a JSON request body.
    #[must_use]
    pub fn json(mut self, body: &Value) -> Self {
        self.body = Some(body.clone());
        self
    }

    /// Sends the request to the test service and returns the response.
    ///
    /// ## Panics
    /// Panics if the response body cannot be read.
    pub async fn send(self, service: &Service) -> TestResponse {
        let url = format!("http://127.0.0.1:5800{}", self.path);

        let mut client = RequestBuilder::new(&url, self.method);
        for (name, value) in self.headers {
            if let Ok(header_name) = HeaderName::try_from(name.as_str()) {
                client = client.add_header(header_name, value, true);
            }
        }
        if let Some(body) = &self.body {
            client = client.json(body);
        }

        let mut response = client.send(service).await;

        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Vec<u8> = response
            .take_bytes(None)
            .await
            .expect("readable body")
            .to_vec();

        TestResponse { status, body }
    }
}

/// Represents an HTTP test response for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {expected} but got {}: {}",
            self.status,
            String::from_utf8_lossy(&self.body)
        );
        self
    }

    /// Asserts that the response body contains the expected substring.
    #[must_use]
    pub fn assert_body_contains(self, expected: &str) -> Self {
        let body = String::from_utf8_lossy(&self.body);
        assert!(
            body.contains(expected),
            "Expected body to contain '{expected}' but got:\n{body}"
        );
        self
    }

    /// Parses the body as JSON.
    ///
    /// ## Panics
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(self) -> Value {
        serde_json::from_slice(&self.body).expect("JSON response body")
    }

    /// The `msg` field of an error or confirmation body.
    #[must_use]
    pub fn msg(self) -> String {
        self.json()["msg"].as_str().expect("msg field").to_string()
    }
}
