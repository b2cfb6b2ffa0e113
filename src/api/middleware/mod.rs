//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Auth validator: bearer token → `UserContext`
//! 2. Access logger: runs after auth, so it knows the user

pub mod audit;
pub mod auth;
