use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Allowed extensions for uploaded course materials
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "mp4", "jpg", "jpeg", "png", "webp"];

/// Maximum file size (50 MB; video modules are the common case)
const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Save an uploaded file to the uploads directory.
/// Returns the public URL path to the file (e.g., "uploads/abc123.pdf"),
/// which is what gets stored on the material row.
pub async fn save_uploaded_file(
    uploads_dir: &str,
    filename: &str,
    data: &[u8],
) -> Result<String> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::Validation("File too large (max 50 MB)".to_string()));
    }

    let extension = filename
        .rsplit('.')
        .next()
        .map(|s| s.to_lowercase())
        .ok_or_else(|| AppError::Validation("Invalid filename".to_string()))?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::Validation(format!(
            "Invalid file type. Allowed: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    let uploads_path = PathBuf::from(uploads_dir);
    fs::create_dir_all(&uploads_path).await.map_err(|e| {
        AppError::Internal(format!("Failed to create uploads directory: {}", e))
    })?;

    let new_filename = format!("{}.{}", Uuid::new_v4(), extension);
    let file_path = uploads_path.join(&new_filename);

    let mut file = fs::File::create(&file_path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create file: {}", e)))?;

    file.write_all(data)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to write file: {}", e)))?;

    Ok(format!("uploads/{}", new_filename))
}

/// Delete an uploaded file by its URL path (e.g., "uploads/abc123.pdf").
/// External link URLs pass through untouched.
pub async fn delete_uploaded_file(url_path: &str) -> Result<()> {
    if !url_path.starts_with("uploads/") {
        return Ok(());
    }

    let path = PathBuf::from(url_path);
    if path.exists() {
        fs::remove_file(&path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete file: {}", e)))?;
    }

    Ok(())
}
