mod catalog;
mod collect;
mod countries;
mod parse;
mod years;

pub use catalog::{Language, WordCatalog, WordId, WordRecord};
pub use collect::{catalog_from_json, load_word_catalog};
pub use countries::{BoundingBox, CountryBoxes};
pub use years::{YEAR_PERIODS, visible_at_cutoff};
