use super::derive::Operation;
use crate::stmt::{Value, ValueRecord};
use crate::{Driver, Result};

use async_trait::async_trait;
use std::{fmt, sync::Arc};

/// Converts a value between the API boundary and the storage boundary.
///
/// `input` is `None` when the value is absent. Returning `None` leaves the
/// field out of the write or the output.
#[async_trait]
pub trait Resolve: Send + Sync + 'static {
    async fn resolve(&self, input: Option<Value>, cx: &ResolveCx<'_>) -> Result<Option<Value>>;
}

/// What a resolver knows about the call it serves.
pub struct ResolveCx<'a> {
    pub list: &'a str,
    pub field: &'a str,
    pub operation: Operation,
    pub driver: &'a dyn Driver,
    /// The stored record, when resolving output
    pub item: Option<&'a ValueRecord>,
}

/// Shared handle to a resolver.
#[derive(Clone)]
pub struct Resolver {
    inner: Arc<dyn Resolve>,
    identity: bool,
}

struct Identity;

struct FromFn<F>(F);

struct FromItem<F>(F);

impl Resolver {
    pub fn new(resolve: impl Resolve) -> Resolver {
        Resolver {
            inner: Arc::new(resolve),
            identity: false,
        }
    }

    /// Passes values through untouched.
    pub fn identity() -> Resolver {
        Resolver {
            inner: Arc::new(Identity),
            identity: true,
        }
    }

    /// Resolver backed by a synchronous function.
    pub fn from_fn<F>(f: F) -> Resolver
    where
        F: Fn(Option<Value>) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        Resolver::new(FromFn(f))
    }

    /// Output resolver computed from the stored record rather than the
    /// field's own value.
    pub fn from_item<F>(f: F) -> Resolver
    where
        F: Fn(&ValueRecord) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        Resolver::new(FromItem(f))
    }

    pub fn is_identity(&self) -> bool {
        self.identity
    }

    pub async fn resolve(&self, input: Option<Value>, cx: &ResolveCx<'_>) -> Result<Option<Value>> {
        self.inner.resolve(input, cx).await
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.identity {
            f.write_str("Resolver(identity)")
        } else {
            f.write_str("Resolver(..)")
        }
    }
}

impl ResolveCx<'_> {
    pub fn path(&self) -> String {
        format!("{}.{}", self.list, self.field)
    }
}

#[async_trait]
impl Resolve for Identity {
    async fn resolve(&self, input: Option<Value>, _cx: &ResolveCx<'_>) -> Result<Option<Value>> {
        Ok(input)
    }
}

#[async_trait]
impl<F> Resolve for FromFn<F>
where
    F: Fn(Option<Value>) -> Result<Option<Value>> + Send + Sync + 'static,
{
    async fn resolve(&self, input: Option<Value>, _cx: &ResolveCx<'_>) -> Result<Option<Value>> {
        (self.0)(input)
    }
}

#[async_trait]
impl<F> Resolve for FromItem<F>
where
    F: Fn(&ValueRecord) -> Result<Option<Value>> + Send + Sync + 'static,
{
    async fn resolve(&self, _input: Option<Value>, cx: &ResolveCx<'_>) -> Result<Option<Value>> {
        match cx.item {
            Some(item) => (self.0)(item),
            None => Err(crate::err!("`{}` can only be resolved from a stored record", cx.path())),
        }
    }
}
