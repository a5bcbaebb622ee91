//! Business operations. Each takes the caller's identity as an argument;
//! nothing here reads identity from ambient request state.

pub mod tasks;
pub mod users;

pub use tasks::TaskService;
pub use users::UserService;
