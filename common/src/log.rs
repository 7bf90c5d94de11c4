#[doc(hidden)]
pub use tracing;

/// Target for raw terminal lines, written verbatim to stdout.
pub const PRINT_TARGET: &str = "drone::print";

/// Target for success messages.
pub const SUCCESS_TARGET: &str = "drone::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::log::tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)*)
    };
}
