pub mod core;
pub mod decor;
pub mod layout;
pub mod render;

pub use core::{CommitNode, Dag, DagStats, Edge, EdgeType};
pub use decor::{BranchLabel, RefDecorator};
pub use layout::{Lane, LaneIdx, Row, RowBuilder};
pub use render::{AsciiRenderer, Color, RenderOptions};
