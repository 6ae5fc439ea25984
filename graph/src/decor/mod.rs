pub mod refs;

pub use refs::{BranchLabel, Decoration, RefDecorator};
