pub mod claims;
pub mod errors;
pub mod issuer;
pub mod settings;
pub mod validator;

pub use claims::TokenClaims;
pub use errors::JwtError;
pub use errors::TokenRejection;
pub use errors::ValidationError;
pub use issuer::AccessToken;
pub use issuer::TokenIssuer;
pub use settings::TokenSettings;
pub use validator::TokenValidator;

/// The only signing algorithm issued or accepted.
pub const SIGNING_ALGORITHM: jsonwebtoken::Algorithm = jsonwebtoken::Algorithm::HS256;
