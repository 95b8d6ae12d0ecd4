pub mod error;
pub mod response;
pub mod routes;
pub mod users;

pub use error::ApiError;
pub use response::ApiResponse;
pub use routes::create_router;
