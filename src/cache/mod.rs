//! Browser caching strategies
//!
//! The mode selector records which strategy is active, and the negotiator
//! applies it to individual resource requests.

pub mod mode;
pub mod negotiator;
pub mod resource;
pub mod selector;
pub mod validator;

pub use mode::{mode_from_query, CachingMode};
pub use negotiator::{negotiate, CachePolicy, Negotiated, Validators};
pub use resource::{Resource, ResourceError};
pub use selector::ModeSelector;
