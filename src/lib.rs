//! # optask
//!
//! Composable asynchronous partial functions.
//!
//! An [`AsyncOptional<A, B>`](service::AsyncOptional) is a service: an
//! asynchronous function from a request `A` to a response `B` that may
//! instead declare itself undefined for that request. Request-handling
//! logic — route matching, middleware, fallback chains — is built by
//! algebraic composition under strict laws:
//!
//! - **Monad laws** for sequencing (`point`, `flat_map`,
//!   `flat_map_task`).
//! - **Identity and associativity** for fallback (`or`, `or_else`,
//!   `empty`).
//! - **Disjoint channels** for routing misses (undefined) and faults
//!   (failed computations): `attempt`/`handle_error` recover only faults,
//!   `or`/`or_else` recover only undefined results.
//! - **Deterministic racing** (`choose_any`): candidates start
//!   concurrently, but declaration order is priority order among defined
//!   outcomes.
//!
//! The deferred-computation type the services run over is
//! [`Task`](task::Task), a minimal effect type resolving to
//! `Result<A, Fault>`: it owns no executor and is driven by whatever
//! runtime awaits it.
//!
//! # Example
//!
//! ```rust,ignore
//! use optask::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ping = AsyncOptional::from_partial(|path: String| {
//!         (path == "/ping").then(|| Task::now("pong".to_string()))
//!     });
//!     let routes = ping.or_else(AsyncOptional::point("404".to_string()));
//!
//!     let response = routes.apply("/ping".into()).await.unwrap();
//!     assert_eq!(response, Some("pong".to_string()));
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod fault;
pub mod option_transformer;
pub mod service;
pub mod task;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use optask::prelude::*;
/// ```
pub mod prelude {
    pub use crate::fault::Fault;
    pub use crate::option_transformer::OptionT;
    pub use crate::service::{Algebra, AsyncOptional};
    pub use crate::task::Task;
}
