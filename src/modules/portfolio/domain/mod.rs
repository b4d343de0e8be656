pub mod owned;
pub mod validate;
