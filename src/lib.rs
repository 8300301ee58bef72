pub mod ast;
pub mod indent;
pub mod tag;
pub mod error;
pub mod render;
pub mod markup;
pub mod document;
pub mod tree_builder;

pub use ast::{Expr, Kind, Node};
pub use document::{Document, flatten};
pub use error::RenderError;
pub use indent::RenderOptions;
pub use markup::render_markup;
pub use render::render;
pub use tree_builder::{parse_tree, serialize_document};
