//! Application services for identity management.

mod registry;

pub use registry::{
    IdentityService, IdentityServiceError, IdentityServiceResult, RegisterIdentityRequest,
};
