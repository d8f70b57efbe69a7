//! Shift-type listing.

use rota_core::{CallerContext, Capability};
use rota_schedule::ShiftType;

use crate::auth::require_capability;
use crate::error::ServiceResult;
use crate::store::ShiftTypeCatalog;

/// ## Summary
/// Lists shift types ordered by name. Inactive ones are included only for
/// callers that manage shift types.
///
/// ## Errors
/// Returns `Forbidden` if the caller may not view shift types.
#[tracing::instrument(skip(catalog, caller), fields(caller = %caller.id))]
pub fn list_shift_types(
    catalog: &(impl ShiftTypeCatalog + ?Sized),
    caller: &CallerContext,
) -> ServiceResult<Vec<ShiftType>> {
    require_capability(caller, Capability::ViewShiftTypes)?;
    let include_inactive = caller.can(Capability::ManageShiftTypes);

    let mut shift_types: Vec<ShiftType> = catalog
        .list_shift_types()?
        .into_iter()
        .filter(|shift_type| include_inactive || shift_type.is_active)
        .collect();
    shift_types.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    tracing::debug!(count = shift_types.len(), include_inactive, "Listed shift types");
    Ok(shift_types)
}
