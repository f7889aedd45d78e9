mod debounce;
mod toasts;

pub use debounce::Debouncer;
pub use toasts::{ToastManager, DEFAULT_TOAST_DURATION};
