pub mod activities_service;
pub mod seed_service;
pub mod signup_request;
