//! Persistence layer
//!
//! Services talk to storage only through the repository traits, and the
//! combined [`Store`] bound. [`FileStorage`] is the shipped backend.

mod file;
mod lock;
mod repository;

pub use file::FileStorage;
pub use lock::FileLock;
pub use repository::{
    CommentRepository, StatusLogRepository, Store, TicketRepository, UserRepository,
};
