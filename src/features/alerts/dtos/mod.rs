pub mod alert_dto;

pub use alert_dto::{AlertSubscriptionResponseDto, CreateAlertSubscriptionDto};
