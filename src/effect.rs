use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::future::Future;

/// What a reducer wants to happen after it changed the state
pub enum Effect<Action> {
    None,
    /// Reduce another action right away
    Action(Action),
    /// Await the future, then reduce the action it resolves to
    Future(BoxFuture<'static, Action>),
}

impl<Action> std::fmt::Debug for Effect<Action> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => f.write_str("Effect::None"),
            Effect::Action(_) => f.write_str("Effect::Action"),
            Effect::Future(_) => f.write_str("Effect::Future"),
        }
    }
}

impl<Action: Send + 'static> Effect<Action> {
    pub const NONE: Self = Effect::None;

    pub fn action(action: Action) -> Self {
        Effect::Action(action)
    }

    pub fn future<T, F>(
        future: F,
        mapper: impl FnOnce(T) -> Action + Send + 'static,
    ) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Effect::Future(future.map(mapper).boxed())
    }
}
