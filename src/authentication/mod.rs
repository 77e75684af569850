mod middleware;

pub use middleware::{UserId, reject_anonymous_users};
