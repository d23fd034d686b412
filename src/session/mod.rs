pub mod factory;
pub mod file;
pub mod locks;
pub mod store;
pub mod types;
pub mod window;

pub use factory::create_session_store;
pub use file::JsonFileSessionStore;
pub use locks::SessionLocks;
pub use store::{MemorySessionStore, SessionStore};
pub use types::{Role, Turn};
pub use window::render_history;
