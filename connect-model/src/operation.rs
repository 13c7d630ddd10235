//! Binding between request shapes and the operations they drive

use connect_core::Validate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// A request shape for one service operation.
pub trait Operation: Serialize + Validate + fmt::Display + Send + Sync {
    /// Operation name as the service knows it, e.g. `GetMetricDataV2`.
    const NAME: &'static str;

    type Output: DeserializeOwned + fmt::Display + Send + 'static;
}

/// Requests that carry a client token for idempotent retries.
pub trait IdempotentOperation: Operation {
    fn client_token(&self) -> Option<&str>;
    fn set_client_token(&mut self, token: Option<String>);
}

/// Requests whose results are split into pages linked by `NextToken`.
pub trait PaginatedOperation: Operation + Clone {
    type Item: Send + 'static;

    fn next_token(&self) -> Option<&str>;
    fn set_next_token(&mut self, token: Option<String>);

    fn output_next_token(output: &Self::Output) -> Option<&str>;
    fn output_items(output: Self::Output) -> Vec<Self::Item>;
}

/// Implements [`Operation`] for a request shape.
macro_rules! impl_operation {
    ($Request:ident => $Output:ident, $name:literal) => {
        impl $crate::operation::Operation for $Request {
            const NAME: &'static str = $name;
            type Output = $Output;
        }
    };
}

/// Implements [`IdempotentOperation`] over the request's `ClientToken` field.
macro_rules! impl_idempotent {
    ($Request:ident) => {
        impl $crate::operation::IdempotentOperation for $Request {
            fn client_token(&self) -> Option<&str> {
                $Request::client_token(self)
            }

            fn set_client_token(&mut self, token: Option<String>) {
                $Request::set_client_token(self, token)
            }
        }
    };
}

/// Implements [`PaginatedOperation`]; `$items` is the result's list field.
macro_rules! impl_paginated {
    ($Request:ident => $Output:ident, $items:ident: $Item:ty) => {
        impl $crate::operation::PaginatedOperation for $Request {
            type Item = $Item;

            fn next_token(&self) -> Option<&str> {
                $Request::next_token(self)
            }

            fn set_next_token(&mut self, token: Option<String>) {
                $Request::set_next_token(self, token)
            }

            fn output_next_token(output: &$Output) -> Option<&str> {
                output.next_token()
            }

            fn output_items(output: $Output) -> Vec<$Item> {
                output.$items.unwrap_or_default()
            }
        }
    };
}

pub(crate) use impl_idempotent;
pub(crate) use impl_operation;
pub(crate) use impl_paginated;
