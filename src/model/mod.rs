//! Plain data structures mapped by the [`profiles`](crate::profiles).

pub mod foo;
pub mod foo_extend;

pub use foo::*;
pub use foo_extend::*;
