//! DTOs for the Web API.

mod request;
mod response;
mod validation;

pub use request::{LoginRequest, SignupRequest, UpdateProfileRequest};
pub use response::{AccountResponse, MessageResponse};
pub use validation::ValidatedJson;
