//! Rota scheduling service - integration test support.
//!
//! Re-exports the workspace crates so integration tests can use
//! `rota_test::` paths.

pub mod component {
    pub use rota_core::{
        CallerContext, Capability, EmployeeId, Role, RuleId, ShiftTypeId, constants,
    };
    pub use rota_service::{auth, error, schedule, shift_types};

    pub mod model {
        pub use rota_schedule::*;
    }

    // Settings from core plus the app's depot handler
    pub mod config {
        pub use rota_app::config::ConfigHandler;
        pub use rota_core::config::*;
    }

    pub mod store {
        pub use rota_app::store_handler::StoreHandler;
        pub use rota_service::store::*;
    }
}

pub mod app {
    pub use rota_app::*;

    pub mod api {
        pub use rota_app::app::api::*;
    }
}
