pub mod task;
pub mod user;

pub use task::{
    NewTask, Task, TaskCreateRequest, TaskPatchRequest, TaskResponse, TaskStatus,
    TaskUpdateRequest,
};
pub use user::{NewUser, User, UserProfile};
