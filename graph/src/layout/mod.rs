pub mod row_builder;

pub use row_builder::{Lane, LaneIdx, Row, RowBuilder};
