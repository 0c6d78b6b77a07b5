/// Authentication and authorization for Epic Events
///
/// - `password`: Argon2id hashing and verification
/// - `session`: credential check producing an [`AuthContext`]
/// - `authorization`: the static role→permission table and the gate
///
/// The `AuthContext` returned by login is passed explicitly into every
/// service call; there is no global session state.

pub mod authorization;
pub mod password;
pub mod session;

pub use authorization::{require_permission, AuthzError, Permission};
pub use session::{authenticate, AuthContext, AuthError};
