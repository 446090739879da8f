//! Decoding of fetched pages into row oriented values.
mod null_bitmap;
mod page;
mod value;

pub use self::{
    null_bitmap::is_null,
    page::Page,
    value::{DATE_FORMAT, TIMESTAMP_FORMAT, Value, decode},
};
