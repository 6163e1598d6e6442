//! Mathematical utilities

pub mod aabb;
pub mod ray;
pub mod rotation;

pub use aabb::Aabb;
pub use ray::Ray;
