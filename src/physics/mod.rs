//! Physics services the tour consumes: ray queries against scene colliders and
//! a capsule movement primitive.

pub mod character;
pub mod query;

pub use character::CharacterController;
pub use query::{ColliderRaycaster, PhysicsQuery, RaycastHit};
