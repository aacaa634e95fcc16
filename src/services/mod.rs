pub mod catalog;
pub mod interactions;
pub mod recommendation;
pub mod scoring;
