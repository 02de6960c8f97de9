//! Document assembly and rendering

pub mod filename;
pub mod format;
pub mod plan;
pub mod render;

pub use filename::{build_file_name, sanitize_token};
pub use format::{format_currency, format_quantity};
pub use plan::{
    assemble, Block, DocumentHeader, DocumentOptions, DocumentPlan, FooterBlock, HeaderBlock,
    ItemListBlock, ItemRow, MarkupLine, NotesBlock, RollupBlock,
};
pub use render::{DocumentFormat, DocumentRenderer, RenderError, TemplateRenderer};
