pub mod options;

pub use options::{AmgOptions, SmootherType};
