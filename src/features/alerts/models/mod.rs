pub mod alert_subscription;

pub use alert_subscription::{encode_crime_types, AlertSubscription};
