pub mod catalog;
pub mod csv_codec;
pub mod duplicates;
pub mod grouping;
pub mod images;
pub mod mask;
pub mod payload;
pub mod sync;
pub mod template;

pub use crate::domain::model::{NewProduct, NewProductVariant, Row};
pub use crate::domain::ports::{CatalogClient, ImageReader, Progress, Storage};
pub use crate::utils::error::Result;
