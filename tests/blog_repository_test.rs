use aeroportal::{
    domain::{slugify, BlogPost},
    repository::{BlogRepository, SqliteBlogRepository},
};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

fn post(title: &str) -> BlogPost {
    let now = Utc::now();
    BlogPost {
        id: Uuid::new_v4(),
        title: title.to_string(),
        slug: slugify(title),
        description: "A short teaser".to_string(),
        content: "<p>Full article body</p>".to_string(),
        image_url: None,
        author: "Abel".to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_blog_post_crud() -> anyhow::Result<()> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let repo = SqliteBlogRepository::new(pool.clone());

    let created = repo.create(post("My First Solo Flight")).await?;
    assert_eq!(created.slug, "my-first-solo-flight");

    let by_slug = repo.find_by_slug("my-first-solo-flight").await?;
    assert_eq!(by_slug.map(|p| p.id), Some(created.id));

    let mut edited = created.clone();
    edited.title = "My First Solo".to_string();
    edited.image_url = Some("uploads/cover.jpg".to_string());
    let updated = repo.update(edited).await?;
    assert_eq!(updated.title, "My First Solo");
    assert_eq!(updated.image_url.as_deref(), Some("uploads/cover.jpg"));
    assert!(updated.updated_at >= created.updated_at);

    repo.delete(created.id).await?;
    assert!(repo.find_by_id(created.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_list_returns_newest_first() -> anyhow::Result<()> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let repo = SqliteBlogRepository::new(pool.clone());

    let mut older = post("Checkride Prep");
    older.created_at = Utc::now() - Duration::days(2);
    let mut newer = post("Crosswind Landings");
    newer.created_at = Utc::now();

    repo.create(older).await?;
    repo.create(newer).await?;

    let posts = repo.list_all().await?;
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].slug, "crosswind-landings");
    assert_eq!(posts[1].slug, "checkride-prep");

    Ok(())
}

#[tokio::test]
async fn test_duplicate_slug_is_rejected() -> anyhow::Result<()> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let repo = SqliteBlogRepository::new(pool.clone());

    repo.create(post("Weather Minimums")).await?;
    let duplicate = repo.create(post("Weather Minimums")).await;
    assert!(duplicate.is_err());

    Ok(())
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() -> anyhow::Result<()> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let repo = SqliteBlogRepository::new(pool.clone());
    let result = repo.update(post("Ghost Entry")).await;
    assert!(result.is_err());

    Ok(())
}
