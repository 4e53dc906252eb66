/// Logs a warning message with an 'ALERT:' prefix.
#[macro_export]
macro_rules! alert {
    ($($arg:tt)*) => {
        ::tracing::warn!("ALERT: {}", format_args!($($arg)*));
    };
}
