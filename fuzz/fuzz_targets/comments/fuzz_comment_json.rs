// Run with: cargo fuzz run fuzz_comment_json
// Feeds arbitrary JSON through the create payload into NewComment.
#![no_main]

use libfuzzer_sys::fuzz_target;
use techhub_comments::domain::{CreateCommentPayload, NewComment};

fuzz_target!(|data: &[u8]| {
    if let Ok(payload) = serde_json::from_slice::<CreateCommentPayload>(data) {
        let has_content = payload
            .content
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty());

        if let Ok(comment) = NewComment::try_from(payload) {
            assert!(has_content, "blank content was accepted");
            assert!(!comment.content.as_ref().trim().is_empty());
        }
    }
});
