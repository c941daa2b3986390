pub mod point;
pub mod regression;
pub mod series;
