pub mod controllers;

pub use controllers::{configure, ServiceInfo};
