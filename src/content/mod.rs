mod category;
mod document;

pub use self::{
    category::Category,
    document::{
        AssetRef, Block, ContentDocument, ImageBlock, ImageRef, MarkDef, RelatedItem, Span,
        TextBlock,
    },
};
