pub mod field;
pub mod history;
pub mod request;
pub mod response;
