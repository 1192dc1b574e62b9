//---------------------------------------
pub mod web_api {
    pub mod routes;
    pub mod controllers;
    pub mod api_error;
}

pub use web_api::routes::map_routes;
pub use web_api::api_error;
pub use web_api::controllers::*;
//---------------------------------------

//---------------------------------------
pub mod hosting {
    pub mod app_state;
    pub mod settings;
    pub mod logging;
    pub mod server;
}

pub use hosting::*;
//---------------------------------------

//---------------------------------------
pub mod data_access {
    pub mod data_context;
    pub mod store_error;
    pub mod task_repository;
}

pub use data_access::*;
//---------------------------------------

pub use taskboard_shared as shared;
