pub mod entities;
pub mod errors;
pub mod ports;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{AuthSession, AuthUser};
pub use errors::{ActionError, CacheError, ProviderError, ValidationError};
pub use ports::{AuthProvider, PageCache};
pub use value_objects::{AccessToken, Credentials, Email, Password};
