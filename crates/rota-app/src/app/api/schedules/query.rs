use chrono::NaiveDate;
use rota_core::EmployeeId;
use rota_schedule::model::format::parse_calendar_date;
use rota_service::auth::get_caller_from_depot;
use rota_service::schedule::{self, ExpandedSchedulePage, ScheduleQuery};
use salvo::prelude::Json;
use salvo::{Depot, Request, handler};

use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult};
use crate::store_handler::get_store_from_depot;

/// ## Summary
/// Lists the occurrences visible to the caller between `viewStartDate` and
/// `viewEndDate`, optionally narrowed by `employeeId` or `department` and
/// paged by `page` and `limit`.
///
/// ## Errors
/// Responds 401 for anonymous callers, 400 for missing or malformed
/// parameters and 403 when the requested employee is not visible.
#[handler]
pub async fn list_schedules(
    req: &mut Request,
    depot: &Depot,
) -> AppResult<Json<ExpandedSchedulePage>> {
    let caller = get_caller_from_depot(depot)?;
    let query = schedule_query(req)?;
    let store = get_store_from_depot(depot)?;
    let config = get_config_from_depot(depot)?;

    let page = schedule::list_schedules(store.as_ref(), caller, &config.schedule, &query)?;
    Ok(Json(page))
}

fn schedule_query(req: &Request) -> AppResult<ScheduleQuery> {
    let (Some(start), Some(end)) = (
        text_param(req, "viewStartDate"),
        text_param(req, "viewEndDate"),
    ) else {
        return Err(AppError::BadRequest(
            "viewStartDate and viewEndDate are required".to_string(),
        ));
    };

    let mut query = ScheduleQuery::new(
        date_param("viewStartDate", &start)?,
        date_param("viewEndDate", &end)?,
    );
    query.employee_id = text_param(req, "employeeId").map(EmployeeId::from);
    query.department = text_param(req, "department");
    query.page = number_param(req, "page")?;
    query.limit = number_param(req, "limit")?;
    Ok(query)
}

/// Trimmed query parameter, `None` when absent or blank.
fn text_param(req: &Request, name: &str) -> Option<String> {
    req.query::<String>(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn date_param(name: &str, raw: &str) -> AppResult<NaiveDate> {
    parse_calendar_date(raw)
        .ok_or_else(|| AppError::BadRequest(format!("{name} `{raw}` is not a valid date")))
}

fn number_param(req: &Request, name: &str) -> AppResult<Option<usize>> {
    text_param(req, name)
        .map(|raw| {
            raw.parse::<usize>().map_err(|_err| {
                AppError::BadRequest(format!("{name} `{raw}` is not a positive integer"))
            })
        })
        .transpose()
}
