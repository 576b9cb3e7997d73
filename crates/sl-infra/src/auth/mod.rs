mod in_memory_session;

pub use in_memory_session::InMemoryAuthSession;
