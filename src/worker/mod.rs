pub mod scanner;

pub use scanner::{SpreadReport, SpreadScanner};
