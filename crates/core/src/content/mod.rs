//! Content tree model, the walker that rewrites its text leaves, and the
//! HTML adapter that builds trees from markup.

pub mod content_model;
pub mod html;
pub mod tree_walker;

pub use content_model::{ContentNode, ElementNode, OtherNode, TextNode};
pub use tree_walker::walk_text_nodes;
