pub mod cors;
pub mod request_id;

pub use cors::build_cors;
pub use request_id::RequestId;
