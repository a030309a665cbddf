pub mod alert_handler;

pub use alert_handler::{
    __path_create_alert_subscription, __path_list_alert_subscriptions, create_alert_subscription,
    list_alert_subscriptions,
};
