mod comment;
mod pagination;
mod search;

pub use comment::*;
pub use pagination::*;
pub use search::*;
