//! The compute kernel: group walk, hash fan-out, match output and the
//! launch driver.

pub mod driver;
pub mod hasher;
pub mod output;
pub mod table;
pub mod walk;


pub use driver::{LaunchResult, SearchEngine};
pub use output::{OutputSink, ITEM_SIZE32};
pub use table::GeneratorTable;
pub use walk::{GroupWalker, PointVisitor};
