//! A client-side router for single-page applications, built on a small
//! signal-based state management runtime, together with the todo list
//! components it was written for.
//!
//! ```
//! use sigroute::{core::Runtime, History, MemoryHistory, Route, RouteContainer, RouterConfig};
//!
//! let mut rt = Runtime::new();
//! let history = MemoryHistory::new("/");
//! let router = RouteContainer::mount(history.clone(), RouterConfig::default()).unwrap();
//!
//! router.navigate(Route::new("/active").unwrap(), rt.ac());
//! assert_eq!(router.current_route(&mut rt.sc()), "/active");
//! assert_eq!(history.len(), 2);
//!
//! history.back(rt.ac());
//! assert_eq!(router.current_route(&mut rt.sc()), "/");
//! ```

mod config;
pub mod core;
mod effect_fn;
mod error;
mod router;
mod signal;
mod state;
mod subscription;
pub mod todo;
mod view;

pub use config::*;
pub use crate::core::{ActionContext, SignalContext};
pub use effect_fn::*;
pub use error::*;
pub use router::*;
pub use signal::*;
pub use state::*;
pub use subscription::*;
pub use view::*;
