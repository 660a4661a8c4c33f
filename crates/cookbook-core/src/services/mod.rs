//! Application services - authentication, authorization and the mutation
//! surface, composed explicitly from ports.

mod credentials;
mod mutation;
pub mod ownership;
mod relations;

pub use credentials::{CredentialVerifier, Identity};
pub use mutation::{AuthPayload, MutationService};
pub use relations::{CategoryView, PostView, RELATED_LIMIT, RelationResolver};
