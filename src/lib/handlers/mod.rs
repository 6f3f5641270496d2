pub mod log;

pub use self::log::log_handler;
