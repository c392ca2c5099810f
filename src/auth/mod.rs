mod identity;
mod user;

pub use identity::{DynIdentity, IdentityProvider, StaticIdentity};
pub use user::Requester;
