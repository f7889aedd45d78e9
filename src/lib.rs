mod behaviours;
mod components;
mod effect;
mod environment;
mod error;
mod helper;

pub use behaviours::{Debouncer, ToastManager, DEFAULT_TOAST_DURATION};
pub use components::posts::{PostsAction, PostsStore, Query, State};
pub use effect::Effect;
pub use environment::storage::Publisher;
pub use environment::types::{
    CreatePost, Post, PostId, Toast, ToastKind, UpdatePost, User, UserId, UserOption,
};
pub use environment::{Api, Config, Confirm, Environment, Model};
pub use error::{Error, Result};
pub use helper::{filter_posts, format_date, format_date_str, generate_id, paginate, Page};

/// Handy macro for future localization
#[macro_export]
macro_rules! loc {
    ($x:expr $(,)?) => {
        $x
    };
}

/// Log to stdout, `RUST_LOG` overrides the default `debug` filter.
/// Calling it more than once is fine.
pub fn init_logging() {
    use env_logger::Env;
    use std::io::Write;
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:{} {} [{}] - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stdout)
        .try_init();
}
