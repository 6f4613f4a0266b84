// Domain layer - Pure KPI, gauge and forecast logic
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod gauge;
pub mod kpi;
pub mod production;
