/// Permission-gated CRUD services
///
/// Each operation takes the database pool, the authenticated identity, and
/// a typed input; it runs the authorization gate, then input validation,
/// then the model call, and returns the affected record(s) or a
/// [`crate::error::ServiceError`].
///
/// The services are the only write path the CLI uses. Provisioning
/// (`epicevents seed`) writes through the models directly.

pub mod clients;
pub mod collaborators;
pub mod contracts;
pub mod events;
