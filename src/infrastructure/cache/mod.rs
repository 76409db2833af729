mod in_memory_page_cache;

pub use in_memory_page_cache::{DEFAULT_MAX_ENTRIES, InMemoryPageCache};
