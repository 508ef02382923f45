pub mod enumerate_idx;
pub mod index_newtype;
