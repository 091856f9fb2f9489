//! Business logic services for the application layer.

pub mod link_service;
pub mod redirect_service;
pub mod shorten_service;

pub use link_service::LinkService;
pub use redirect_service::RedirectService;
pub use shorten_service::ShortenService;
