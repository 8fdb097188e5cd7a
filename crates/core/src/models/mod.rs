pub mod account;
pub mod analytics;
pub mod balance;
pub mod ledger;
pub mod series;
pub mod settings;
pub mod transaction;
