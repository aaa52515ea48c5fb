pub mod access;
pub mod aggregate;
pub mod auth;
pub mod projects;
pub mod stats;
