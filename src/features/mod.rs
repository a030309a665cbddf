pub mod alerts;
pub mod health;
pub mod reports;
pub mod users;
