//---------------------------------------
pub mod models;
pub mod dto;

pub use models::*;
pub use dto::*;
//---------------------------------------
