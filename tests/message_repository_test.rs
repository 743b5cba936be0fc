use aeroportal::{
    auth::AuthService,
    domain::{ContactRequest, SignupRequest, SupportMessage},
    repository::{
        MessageRepository, ProfileRepository, SqliteMessageRepository, SqliteProfileRepository,
    },
};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

#[tokio::test]
async fn test_contact_message_without_account() -> anyhow::Result<()> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let repo = SqliteMessageRepository::new(pool.clone());

    // Landing-page submissions carry no profile.
    let created = repo
        .create(SupportMessage {
            id: Uuid::new_v4(),
            profile_id: None,
            sender_name: "Jordan Vee".to_string(),
            sender_email: "jordan@example.com".to_string(),
            inquiry_type: "Course Inquiry".to_string(),
            body: "Do you offer weekend ground school?".to_string(),
            created_at: Utc::now(),
        })
        .await?;
    assert!(created.profile_id.is_none());

    let messages = repo.list_all().await?;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender_name, "Jordan Vee");
    assert_eq!(messages[0].inquiry_type, "Course Inquiry");

    Ok(())
}

#[tokio::test]
async fn test_dashboard_message_keeps_profile_and_lists_newest_first() -> anyhow::Result<()> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let profiles = SqliteProfileRepository::new(pool.clone());
    let hash = AuthService::hash_password("secure_password123").await?;
    let profile = profiles
        .create(
            &SignupRequest {
                email: "student@example.com".to_string(),
                password: "secure_password123".to_string(),
                full_name: "Student Pilot".to_string(),
            },
            &hash,
        )
        .await?;

    let repo = SqliteMessageRepository::new(pool.clone());

    repo.create(SupportMessage {
        id: Uuid::new_v4(),
        profile_id: Some(profile.id),
        sender_name: profile.full_name.clone(),
        sender_email: profile.email.clone(),
        inquiry_type: "Support: Video will not play".to_string(),
        body: "Module 3 stalls at the intro.".to_string(),
        created_at: Utc::now() - Duration::hours(2),
    })
    .await?;
    repo.create(SupportMessage {
        id: Uuid::new_v4(),
        profile_id: None,
        sender_name: "Walk-in Visitor".to_string(),
        sender_email: "visitor@example.com".to_string(),
        inquiry_type: "Mentorship".to_string(),
        body: "Looking for a mentor.".to_string(),
        created_at: Utc::now(),
    })
    .await?;

    let messages = repo.list_all().await?;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender_name, "Walk-in Visitor");
    assert_eq!(messages[1].profile_id, Some(profile.id));
    assert!(messages[1].inquiry_type.starts_with("Support: "));

    Ok(())
}

#[test]
fn test_contact_request_defaults_inquiry_type() {
    let req: ContactRequest = serde_json::from_str(
        r#"{"name":"Jordan Vee","email":"jordan@example.com","message":"Hello"}"#,
    )
    .unwrap();
    assert_eq!(req.inquiry_type, "Course Inquiry");
}
