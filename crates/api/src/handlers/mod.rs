pub mod auth;
pub mod dashboard;
pub mod leases;
pub mod properties;
pub mod tenants;
