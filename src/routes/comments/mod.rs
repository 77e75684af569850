mod comment;
mod likes;
mod routes;
mod search;

pub use comment::*;
pub use likes::*;
pub use routes::*;
pub use search::*;
