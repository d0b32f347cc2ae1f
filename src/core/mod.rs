pub mod api;
pub mod user;
pub mod util;
