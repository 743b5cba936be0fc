use aeroportal::{
    auth,
    auth::AuthService,
    domain::SignupRequest,
    repository::{ProfileRepository, SqliteProfileRepository},
};
use sqlx::SqlitePool;

#[tokio::test]
async fn test_profile_crud() -> anyhow::Result<()> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let repo = SqliteProfileRepository::new(pool.clone());
    let hash = AuthService::hash_password("secure_password123").await?;

    let profile = repo
        .create(
            &SignupRequest {
                email: "test@example.com".to_string(),
                password: "secure_password123".to_string(),
                full_name: "Test User".to_string(),
            },
            &hash,
        )
        .await?;
    assert_eq!(profile.email, "test@example.com");
    assert_eq!(profile.rank, "Cadet");

    let found = repo.find_by_id(profile.id).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, profile.id);

    let found_by_email = repo.find_by_email("test@example.com").await?;
    assert!(found_by_email.is_some());

    let profiles = repo.list().await?;
    assert_eq!(profiles.len(), 1);

    let promoted = repo.update_rank(profile.id, "Flight Officer").await?;
    assert_eq!(promoted.rank, "Flight Officer");

    repo.delete(profile.id).await?;
    let deleted = repo.find_by_id(profile.id).await?;
    assert!(deleted.is_none());

    Ok(())
}

#[tokio::test]
async fn test_password_hashing() -> anyhow::Result<()> {
    let password = "my_secure_password";
    let hash = AuthService::hash_password(password).await?;

    assert!(AuthService::verify_password(password, &hash).await?);
    assert!(!AuthService::verify_password("wrong_password", &hash).await?);

    Ok(())
}

#[tokio::test]
async fn test_password_change_replaces_stored_hash() -> anyhow::Result<()> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let repo = SqliteProfileRepository::new(pool.clone());
    let old_hash = AuthService::hash_password("old_password_123").await?;
    let profile = repo
        .create(
            &SignupRequest {
                email: "pilot@example.com".to_string(),
                password: "old_password_123".to_string(),
                full_name: "Test Pilot".to_string(),
            },
            &old_hash,
        )
        .await?;

    let new_hash = AuthService::hash_password("new_password_456").await?;
    auth::set_password_hash(&pool, profile.id, &new_hash).await?;

    let stored = auth::get_password_hash(&pool, "pilot@example.com")
        .await?
        .unwrap();
    assert!(!AuthService::verify_password("old_password_123", &stored).await?);
    assert!(AuthService::verify_password("new_password_456", &stored).await?);

    // Sessions opened under the old password go away with it.
    let auth_service = AuthService::new(pool.clone());
    let (_, token) = auth_service.create_session(profile.id, 24).await?;
    auth_service.invalidate_sessions_for(profile.id).await?;
    assert!(auth_service.validate_session(&token).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_password_change_for_unknown_profile_fails() -> anyhow::Result<()> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let hash = AuthService::hash_password("whatever_password").await?;
    let result = auth::set_password_hash(&pool, uuid::Uuid::new_v4(), &hash).await;
    assert!(result.is_err());

    Ok(())
}
