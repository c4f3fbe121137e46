pub mod report;
pub mod input;
pub mod combined;

pub use report::*;
pub use input::*;
pub use combined::*;
