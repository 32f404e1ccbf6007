//! Collaborator abstraction trait definition

mod credential_provider;

pub use credential_provider::{CredentialProvider, InMemoryCredentialProvider};
