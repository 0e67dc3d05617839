pub mod error_handler;

pub use error_handler::{form_error_handler, handle_domain_error};
