pub mod errors;
pub mod repository;
pub mod service;
pub mod todo;

pub use errors::*;
pub use repository::*;
pub use service::*;
pub use todo::*;
