pub mod configuration;
pub mod contact;
pub mod domain;
pub mod providers;
pub mod routes;
pub mod startup;
pub mod telemetry;
