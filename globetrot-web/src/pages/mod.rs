pub mod not_found;
pub mod story;
pub mod travel;
