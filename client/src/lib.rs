//---------------------------------------
pub mod api {
    pub mod api_client;
    pub mod client_error;
}

pub use api::*;
//---------------------------------------

//---------------------------------------
pub mod state {
    pub mod mutation;
    pub mod task_board;
}

pub use state::*;
//---------------------------------------

pub mod dates;

pub use taskboard_shared as shared;
