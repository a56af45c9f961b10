//! Planner server - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can reach
//! every layer through one dependency.

pub mod component {
    pub use planner_core::*;

    pub mod db {
        pub use planner_db::db::*;

        pub mod connection {
            pub use planner_app::db_handler::DbProviderHandler;
            pub use planner_db::db::connection::*;
        }
    }

    pub mod model {
        pub use planner_db::model::*;
    }

    pub mod service {
        pub use planner_service::*;
    }

    pub mod config {
        pub use planner_app::config::ConfigHandler;
        pub use planner_core::config::*;
    }
}

pub mod app {
    pub use planner_app::*;
}

pub use planner_repeat as repeat;
