pub mod extractor;
pub mod html;
pub mod test_utils;
pub mod validation;
