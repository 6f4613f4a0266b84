// Application layer - Use cases and ports
pub mod error;
pub mod forecast_service;
pub mod kpi_service;
pub mod production_repository;
pub mod streaming_service;
