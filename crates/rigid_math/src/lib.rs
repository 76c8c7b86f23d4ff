//! Quaternions, dual numbers and dual quaternions for representing rotations
//! and rigid-body transforms.

#[macro_use]
mod macros;

pub mod dual;
pub mod dual_quaternion;
pub mod num;
pub mod quaternion;

pub use dual::{Dual, DualComponent};
pub use dual_quaternion::DualQuaternion;
pub use num::Float;
pub use quaternion::Quaternion;
