pub mod charts;
pub mod panels;
