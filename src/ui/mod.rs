pub mod panels;
pub mod plot;
pub mod story;
pub mod table;
