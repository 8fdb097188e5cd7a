pub mod analytics_service;
pub mod chart_service;
pub mod ledger_service;
pub mod series_service;
