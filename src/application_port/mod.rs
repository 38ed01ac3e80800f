mod auth_service;
mod catalog_service;
mod media_service;
mod session_authority;

pub use auth_service::*;
pub use catalog_service::*;
pub use media_service::*;
pub use session_authority::*;
