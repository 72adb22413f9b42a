use std::{fmt::Display, panic::Location};

use anyhow::Context;

pub mod prelude {
    extern crate anyhow;
    pub use anyhow::{anyhow, bail, Context, Result};

    extern crate thiserror;
    pub use thiserror::Error;

    pub use super::{LocatedError, LocatedOption};
}

/// Format the source location of a `#[track_caller]` call site as `[file:line:column]`
fn caller_tag(caller: &Location) -> String {
    format!("[{}:{}:{}]", caller.file(), caller.line(), caller.column())
}

/// Attach a context message to a `Result`, prefixed with the location of the caller.
pub trait LocatedError<T, E> {
    /// Wrap the error value with additional context + the location at which it was called.
    fn loc<C>(self, context: C) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Same as `loc()`, but the context is only evaluated once an error does occur.
    fn with_loc<C, F>(self, f: F) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> LocatedError<T, E> for Result<T, E>
where
    E: Display + Send + Sync + 'static,
    Result<T, E>: Context<T, E>,
{
    #[track_caller]
    fn loc<C>(self, context: C) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static
    {
        let tag = caller_tag(Location::caller());
        self.with_context(|| format!("{tag} {context}"))
    }

    #[track_caller]
    fn with_loc<C, F>(self, f: F) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C
    {
        let tag = caller_tag(Location::caller());
        self.with_context(|| format!("{tag} {}", f()))
    }
}

/// Turn an `Option` into a located `anyhow::Result`.
pub trait LocatedOption<T> {
    /// Convert `None` into an error carrying `context` + the location at which it was called.
    fn loc<C>(self, context: C) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Same as `loc()`, but the context is only evaluated when `self` is `None`.
    fn with_loc<C, F>(self, f: F) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> LocatedOption<T> for Option<T> {
    #[track_caller]
    fn loc<C>(self, context: C) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static
    {
        let tag = caller_tag(Location::caller());
        self.with_context(|| format!("{tag} {context}"))
    }

    #[track_caller]
    fn with_loc<C, F>(self, f: F) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C
    {
        let tag = caller_tag(Location::caller());
        self.with_context(|| format!("{tag} {}", f()))
    }
}
