//! Client-side routing.
//!
//! A [`RouteContainer`] owns the current [`Route`] and the [`History`] it is
//! synchronized with. Descendants receive a [`RouteContext`] through
//! [`RenderContext`](crate::RenderContext) and use it to read the route and to
//! request navigation; they never write the route themselves.

mod container;
mod context;
mod history;
mod link;
mod route;

pub use container::*;
pub use context::*;
pub use history::*;
pub use link::*;
pub use route::*;
