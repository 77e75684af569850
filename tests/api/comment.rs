use crate::helpers::spawn_app;
use serde_json::json;
use uuid::Uuid;

// ============================================================================
// Create Comment
// ============================================================================

#[actix_web::test]
async fn create_comment_returns_201_for_valid_input() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = Uuid::new_v4();

    let response = app
        .create_comment(&json!({
            "content": "This is a test comment",
            "postId": post_id.to_string()
        }))
        .await;

    assert_eq!(
        response.status.as_u16(),
        201,
        "Expected 201 Created for valid comment creation"
    );
    assert_eq!(response.body["content"], "This is a test comment");
    assert_eq!(response.body["post"], post_id.to_string());
    assert_eq!(response.body["user"], app.test_user.user_id.to_string());
    assert_eq!(response.body["likes"], json!([]));
    assert!(response.body.get("id").is_some(), "Missing 'id' field");
    assert!(
        response.body.get("createdAt").is_some(),
        "Missing 'createdAt' field"
    );
}

#[actix_web::test]
async fn create_comment_returns_400_for_missing_fields_and_persists_nothing() {
    let app = spawn_app().await;
    app.login().await;

    let invalid_payloads = vec![
        json!({ "postId": Uuid::new_v4().to_string() }),
        json!({ "content": "", "postId": Uuid::new_v4().to_string() }),
        json!({ "content": "   ", "postId": Uuid::new_v4().to_string() }),
        json!({ "content": "No post id" }),
        json!({ "content": "Bad post id", "postId": "not-a-uuid" }),
        json!({}),
    ];

    for payload in invalid_payloads {
        let response = app.create_comment(&payload).await;
        assert_eq!(
            response.status.as_u16(),
            400,
            "The API did not return 400 for invalid input: {payload:?}"
        );
        assert!(
            response.body["error"].is_string(),
            "Missing error message for {payload:?}"
        );
    }

    assert_eq!(app.store.comment_count().await, 0);
}

#[actix_web::test]
async fn create_comment_returns_400_with_error_body_for_malformed_json() {
    let app = spawn_app().await;
    app.login().await;

    let response = app
        .send(
            actix_web::test::TestRequest::post()
                .uri("/v1/comments")
                .insert_header(("Content-Type", "application/json"))
                .set_payload("{ not json"),
        )
        .await;

    assert_eq!(response.status.as_u16(), 400);
    assert!(response.body["error"].is_string());
}

#[actix_web::test]
async fn create_comment_returns_401_if_unauthenticated() {
    let app = spawn_app().await;

    let response = app
        .create_comment(&json!({
            "content": "Comment without login",
            "postId": Uuid::new_v4().to_string()
        }))
        .await;

    assert_eq!(
        response.status.as_u16(),
        401,
        "Expected 401 for unauthenticated comment creation"
    );
    assert_eq!(response.body["error"], "User has not logged in");
    assert_eq!(app.store.comment_count().await, 0);
}

// ============================================================================
// Get Comments
// ============================================================================

#[actix_web::test]
async fn created_comment_is_retrievable_by_id_with_author_name() {
    let app = spawn_app().await;
    app.login().await;
    let comment_id = app
        .create_sample_comment(Uuid::new_v4(), "Retrievable")
        .await;
    app.logout();

    let response = app.get_comment(comment_id).await;

    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.body["id"], comment_id.to_string());
    assert_eq!(response.body["content"], "Retrievable");
    assert_eq!(response.body["user"]["id"], app.test_user.user_id.to_string());
    assert_eq!(response.body["user"]["username"], app.test_user.user_name);
}

#[actix_web::test]
async fn get_comment_returns_404_for_unknown_id() {
    let app = spawn_app().await;

    let response = app.get_comment(Uuid::new_v4()).await;

    assert_eq!(response.status.as_u16(), 404);
    assert_eq!(response.body["error"], "comment not found");
}

#[actix_web::test]
async fn get_comment_returns_400_for_malformed_id() {
    let app = spawn_app().await;

    let response = app.get_comment("not-a-uuid").await;

    assert_eq!(response.status.as_u16(), 400);
}

#[actix_web::test]
async fn comments_for_post_are_listed_newest_first() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = Uuid::new_v4();

    for i in 0..3 {
        app.create_sample_comment(post_id, &format!("Comment {i}"))
            .await;
    }
    app.create_sample_comment(Uuid::new_v4(), "On another post")
        .await;

    let response = app.get_comments_for_post(post_id).await;
    assert_eq!(response.status.as_u16(), 200);

    let contents: Vec<_> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(contents, ["Comment 2", "Comment 1", "Comment 0"]);
}

#[actix_web::test]
async fn comments_for_post_without_comments_is_an_empty_list() {
    let app = spawn_app().await;

    let response = app.get_comments_for_post(Uuid::new_v4()).await;

    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.body, json!([]));
}

#[actix_web::test]
async fn comments_for_post_returns_400_for_malformed_post_id() {
    let app = spawn_app().await;

    let response = app.get_comments_for_post("abc").await;

    assert_eq!(response.status.as_u16(), 400);
}

#[actix_web::test]
async fn comments_for_user_include_post_title() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = Uuid::new_v4();
    app.store.register_post(post_id, "A post worth reading").await;

    app.create_sample_comment(post_id, "First").await;
    app.create_sample_comment(post_id, "Second").await;
    app.login_as_other_user().await;
    app.create_sample_comment(post_id, "Not mine").await;

    let response = app.get_comments_for_user(app.test_user.user_id).await;
    assert_eq!(response.status.as_u16(), 200);

    let comments = response.body.as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "Second");
    assert_eq!(comments[0]["post"]["id"], post_id.to_string());
    assert_eq!(comments[0]["post"]["title"], "A post worth reading");
    assert_eq!(comments[1]["content"], "First");
}

// ============================================================================
// Update Comment
// ============================================================================

#[actix_web::test]
async fn owner_can_update_comment_content() {
    let app = spawn_app().await;
    app.login().await;
    let comment_id = app.create_sample_comment(Uuid::new_v4(), "Before").await;

    let response = app
        .update_comment(comment_id, &json!({ "content": "After" }))
        .await;

    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.body["content"], "After");
    assert_eq!(response.body["id"], comment_id.to_string());

    let fetched = app.get_comment(comment_id).await;
    assert_eq!(fetched.body["content"], "After");
}

#[actix_web::test]
async fn non_owner_cannot_update_comment() {
    let app = spawn_app().await;
    app.login().await;
    let comment_id = app.create_sample_comment(Uuid::new_v4(), "Original").await;

    app.login_as_other_user().await;
    let response = app
        .update_comment(comment_id, &json!({ "content": "Hijacked" }))
        .await;

    assert_eq!(response.status.as_u16(), 403);

    let fetched = app.get_comment(comment_id).await;
    assert_eq!(fetched.body["content"], "Original");
}

#[actix_web::test]
async fn update_returns_400_for_missing_content() {
    let app = spawn_app().await;
    app.login().await;
    let comment_id = app.create_sample_comment(Uuid::new_v4(), "Original").await;

    for payload in [json!({}), json!({ "content": "" }), json!({ "content": " " })] {
        let response = app.update_comment(comment_id, &payload).await;
        assert_eq!(
            response.status.as_u16(),
            400,
            "The API did not return 400 for {payload:?}"
        );
    }
}

#[actix_web::test]
async fn update_returns_404_for_unknown_comment() {
    let app = spawn_app().await;
    app.login().await;

    let response = app
        .update_comment(Uuid::new_v4(), &json!({ "content": "Anything" }))
        .await;

    assert_eq!(response.status.as_u16(), 404);
}

#[actix_web::test]
async fn update_returns_401_if_unauthenticated() {
    let app = spawn_app().await;
    app.login().await;
    let comment_id = app.create_sample_comment(Uuid::new_v4(), "Original").await;
    app.logout();

    let response = app
        .update_comment(comment_id, &json!({ "content": "Anonymous edit" }))
        .await;

    assert_eq!(response.status.as_u16(), 401);
}

// ============================================================================
// Delete Comment
// ============================================================================

#[actix_web::test]
async fn owner_can_delete_comment() {
    let app = spawn_app().await;
    app.login().await;
    let comment_id = app.create_sample_comment(Uuid::new_v4(), "Short lived").await;

    let response = app.delete_comment(comment_id).await;

    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.body["message"], "Comment deleted successfully");
    assert_eq!(app.get_comment(comment_id).await.status.as_u16(), 404);
}

#[actix_web::test]
async fn owner_can_delete_comment_via_alias_path() {
    let app = spawn_app().await;
    app.login().await;
    let comment_id = app.create_sample_comment(Uuid::new_v4(), "Short lived").await;

    let response = app.delete_comment_via_alias(comment_id).await;

    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(app.get_comment(comment_id).await.status.as_u16(), 404);
}

#[actix_web::test]
async fn non_owner_cannot_delete_comment_on_either_path() {
    let app = spawn_app().await;
    app.login().await;
    let comment_id = app.create_sample_comment(Uuid::new_v4(), "Protected").await;

    app.login_as_other_user().await;
    assert_eq!(app.delete_comment(comment_id).await.status.as_u16(), 403);
    assert_eq!(
        app.delete_comment_via_alias(comment_id).await.status.as_u16(),
        403
    );

    assert_eq!(app.get_comment(comment_id).await.status.as_u16(), 200);
}

#[actix_web::test]
async fn deleting_twice_returns_404() {
    let app = spawn_app().await;
    app.login().await;
    let comment_id = app.create_sample_comment(Uuid::new_v4(), "Once").await;

    assert_eq!(app.delete_comment(comment_id).await.status.as_u16(), 200);
    assert_eq!(
        app.delete_comment_via_alias(comment_id).await.status.as_u16(),
        404
    );
}

#[actix_web::test]
async fn delete_returns_400_for_malformed_id() {
    let app = spawn_app().await;
    app.login().await;

    let response = app.delete_comment("not-a-uuid").await;

    assert_eq!(response.status.as_u16(), 400);
}

#[actix_web::test]
async fn delete_returns_401_if_unauthenticated() {
    let app = spawn_app().await;

    let response = app.delete_comment(Uuid::new_v4()).await;

    assert_eq!(response.status.as_u16(), 401);
}
