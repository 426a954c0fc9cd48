//! Request payload formats and settled responses

pub mod format;
pub mod response;

pub use format::ContentType;
pub use response::Response;
