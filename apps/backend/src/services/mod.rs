//! Document text extraction

pub mod extract;
