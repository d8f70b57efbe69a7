/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const SCHEDULES_ROUTE_COMPONENT: &str = "schedules";
pub const SCHEDULES_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", SCHEDULES_ROUTE_COMPONENT);

pub const RULES_ROUTE_COMPONENT: &str = "rules";
pub const RULES_ROUTE_PREFIX: &str =
    const_str::concat!(SCHEDULES_ROUTE_PREFIX, "/", RULES_ROUTE_COMPONENT);

pub const SHIFT_TYPES_ROUTE_COMPONENT: &str = "shift-types";
pub const SHIFT_TYPES_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", SHIFT_TYPES_ROUTE_COMPONENT);

/// Headers a trusted front proxy uses to identify the caller.
pub const CALLER_ID_HEADER: &str = "x-employee-id";
pub const CALLER_ROLE_HEADER: &str = "x-employee-role";
