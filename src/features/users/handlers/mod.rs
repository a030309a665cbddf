pub mod user_handler;

pub use user_handler::{__path_login, __path_register, login, register};
