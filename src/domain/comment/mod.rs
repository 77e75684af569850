mod comment_content;
mod identifiers;
mod new_comment;
mod types;

pub use comment_content::CommentContent;
pub use identifiers::parse_id;
pub use new_comment::NewComment;
pub use types::*;
