//! Feed module
//!
//! Chat message rendering for newly published posts.

pub mod renderer;

#[allow(unused_imports)]
pub use renderer::{
    is_fresh, permalink, render, render_post, with_broadcast_mention, BROADCAST_MENTION,
    PERMALINK_BASE,
};
