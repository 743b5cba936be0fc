use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::state::AppState,
    domain::{slugify, BlogPost, CreateBlogPostRequest, UpdateBlogPostRequest},
    error::{AppError, Result},
    uploads,
};

/// GET /public/blog
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<BlogPost>>> {
    let posts = state.service_context.blog_repo.list_all().await?;

    Ok(Json(posts))
}

/// GET /public/blog/:slug
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>> {
    let post = state
        .service_context
        .blog_repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

/// GET /public/feed/rss
pub async fn rss_feed(State(state): State<AppState>) -> Result<Response> {
    let posts = state.service_context.blog_repo.list_all().await?;
    let rss = generate_rss_feed(&posts, &state.settings.server.base_url);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        rss,
    )
        .into_response())
}

/// POST /api/admin/blog
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateBlogPostRequest>,
) -> Result<(StatusCode, Json<BlogPost>)> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let slug = resolve_slug(req.slug.as_deref(), &req.title)?;
    if state
        .service_context
        .blog_repo
        .find_by_slug(&slug)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!("Slug already in use: {}", slug)));
    }

    let now = Utc::now();
    let post = state
        .service_context
        .blog_repo
        .create(BlogPost {
            id: Uuid::new_v4(),
            title: req.title,
            slug,
            description: req.description,
            content: req.content,
            image_url: req.image_url,
            author: req.author,
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/admin/blog/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBlogPostRequest>,
) -> Result<Json<BlogPost>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let existing = state
        .service_context
        .blog_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let slug = resolve_slug(req.slug.as_deref(), &req.title)?;
    if slug != existing.slug {
        if let Some(other) = state.service_context.blog_repo.find_by_slug(&slug).await? {
            if other.id != id {
                return Err(AppError::Conflict(format!("Slug already in use: {}", slug)));
            }
        }
    }

    let post = state
        .service_context
        .blog_repo
        .update(BlogPost {
            id,
            title: req.title,
            slug,
            description: req.description,
            content: req.content,
            image_url: req.image_url,
            author: req.author,
            created_at: existing.created_at,
            updated_at: existing.updated_at,
        })
        .await?;

    Ok(Json(post))
}

/// POST /api/admin/blog/cover-image
///
/// Multipart with a single `file` part. Returns the stored URL path for the
/// admin editor to put on the post.
pub async fn upload_cover_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .ok_or_else(|| AppError::Validation("Missing filename".to_string()))?
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let image_url =
            uploads::save_uploaded_file(&state.settings.uploads.dir, &filename, &data).await?;

        return Ok(Json(json!({ "image_url": image_url })));
    }

    Err(AppError::Validation("Missing file".to_string()))
}

/// DELETE /api/admin/blog/:id
///
/// Removes the post and its stored cover image, if any.
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    let post = state
        .service_context
        .blog_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    state.service_context.blog_repo.delete(id).await?;

    if let Some(image_url) = &post.image_url {
        uploads::delete_uploaded_file(image_url).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String> {
    let slug = match explicit {
        Some(s) if !s.trim().is_empty() => slugify(s),
        _ => slugify(title),
    };
    if slug.is_empty() {
        return Err(AppError::Validation(
            "Title does not produce a usable slug".to_string(),
        ));
    }
    Ok(slug)
}

// Helper function to generate RSS feed
fn generate_rss_feed(posts: &[BlogPost], base_url: &str) -> String {
    let mut rss = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
<channel>
    <title>Aeroportal Flight Log</title>
    <link>"#,
    );
    rss.push_str(base_url);
    rss.push_str("/blog</link>\n");
    rss.push_str("    <description>Aviation tutoring, mentorship, and industry insights.</description>\n");
    rss.push_str("    <language>en-us</language>\n");
    rss.push_str("    <lastBuildDate>");
    rss.push_str(&Utc::now().to_rfc2822());
    rss.push_str("</lastBuildDate>\n");

    for post in posts.iter().take(20) {
        rss.push_str("    <item>\n");
        rss.push_str(&format!("        <title><![CDATA[{}]]></title>\n", post.title));
        rss.push_str(&format!(
            "        <description><![CDATA[{}]]></description>\n",
            post.description
        ));
        rss.push_str(&format!("        <link>{}/blog/{}</link>\n", base_url, post.slug));
        rss.push_str(&format!(
            "        <guid isPermaLink=\"false\">{}</guid>\n",
            post.id
        ));
        rss.push_str(&format!(
            "        <pubDate>{}</pubDate>\n",
            post.created_at.to_rfc2822()
        ));
        rss.push_str("    </item>\n");
    }

    rss.push_str("</channel>\n</rss>");
    rss
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, slug: &str) -> BlogPost {
        BlogPost {
            id: Uuid::new_v4(),
            title: title.to_string(),
            slug: slug.to_string(),
            description: "desc".to_string(),
            content: "<p>body</p>".to_string(),
            image_url: None,
            author: "Abel".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn explicit_slug_wins_over_title() {
        assert_eq!(
            resolve_slug(Some("Custom Slug"), "Some Title").unwrap(),
            "custom-slug"
        );
        assert_eq!(resolve_slug(None, "Some Title").unwrap(), "some-title");
        assert_eq!(resolve_slug(Some("  "), "Some Title").unwrap(), "some-title");
        assert!(resolve_slug(None, "???").is_err());
    }

    #[test]
    fn rss_feed_lists_posts_with_links() {
        let feed = generate_rss_feed(
            &[post("First Flight", "first-flight")],
            "https://example.com",
        );
        assert!(feed.contains("<title><![CDATA[First Flight]]></title>"));
        assert!(feed.contains("<link>https://example.com/blog/first-flight</link>"));
        assert!(feed.contains("<guid isPermaLink=\"false\">"));
    }
}
