pub mod errors;
pub mod models;

pub use errors::UsernameError;
pub use models::User;
pub use models::UserId;
pub use models::Username;
