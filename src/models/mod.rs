pub mod task;
pub mod user;

pub use task::{Task, TaskId, TaskInput, TaskResponse};
pub use user::{Credentials, User, UserId, UserResponse};
