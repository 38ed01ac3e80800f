mod auth_service_impl;
mod catalog_service_impl;
mod media_service_impl;
mod session_authority_impl;

pub use auth_service_impl::*;
pub use catalog_service_impl::*;
pub use media_service_impl::*;
pub use session_authority_impl::*;
