use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{find_course, CourseMaterial, MaterialKind},
    error::{AppError, Result},
    uploads,
};

/// POST /api/admin/courses/:key/materials
///
/// Multipart form: `title`, `kind` (pdf | video | link), and either a `file`
/// part (pdf, video) or a `url` part (link).
pub async fn upload(
    State(state): State<AppState>,
    Path(key): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CourseMaterial>)> {
    if find_course(&key).is_none() {
        return Err(AppError::NotFound(format!("Unknown course: {}", key)));
    }

    let mut title: Option<String> = None;
    let mut kind: Option<MaterialKind> = None;
    let mut url: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        match field.name().unwrap_or_default() {
            "title" => {
                title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(e.to_string()))?,
                );
            }
            "kind" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                kind = Some(match raw.as_str() {
                    "pdf" => MaterialKind::Pdf,
                    "video" => MaterialKind::Video,
                    "link" => MaterialKind::Link,
                    other => {
                        return Err(AppError::Validation(format!(
                            "Unknown material kind: {}",
                            other
                        )))
                    }
                });
            }
            "url" => {
                url = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(e.to_string()))?,
                );
            }
            "file" => {
                let filename = field
                    .file_name()
                    .ok_or_else(|| AppError::Validation("Missing filename".to_string()))?
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                file = Some((filename, data.to_vec()));
            }
            _ => {}
        }
    }

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Title is required".to_string()))?;
    let kind = kind.ok_or_else(|| AppError::Validation("Material kind is required".to_string()))?;

    let file_url = match kind {
        MaterialKind::Link => url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| AppError::Validation("A URL is required for link materials".to_string()))?,
        MaterialKind::Pdf | MaterialKind::Video => {
            let (filename, data) =
                file.ok_or_else(|| AppError::Validation("A file is required".to_string()))?;
            uploads::save_uploaded_file(&state.settings.uploads.dir, &filename, &data).await?
        }
    };

    let material = state
        .service_context
        .material_repo
        .create(CourseMaterial {
            id: Uuid::new_v4(),
            course_id: key,
            title,
            kind,
            file_url,
            created_at: Utc::now(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(material)))
}

/// DELETE /api/admin/materials/:id
///
/// Removes the row and, for stored files, the file behind it.
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    let material = state
        .service_context
        .material_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Material not found".to_string()))?;

    state.service_context.material_repo.delete(id).await?;

    if material.kind != MaterialKind::Link {
        uploads::delete_uploaded_file(&material.file_url).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}
