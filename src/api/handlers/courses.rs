use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{find_course, Course, CourseMaterial, CourseStanding, SyllabusItem, COURSES},
    error::{AppError, Result},
};

#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub course: Course,
    pub standing: CourseStanding,
}

/// GET /api/courses
///
/// The static catalog, annotated with the caller's standing per course.
pub async fn catalog(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<CatalogEntry>>> {
    let mut entries = Vec::with_capacity(COURSES.len());
    for course in COURSES {
        let standing = state
            .service_context
            .enrollment_service
            .standing_for_course(user.profile.id, course.key)
            .await?;
        entries.push(CatalogEntry {
            course: course.clone(),
            standing,
        });
    }

    Ok(Json(entries))
}

/// GET /api/courses/:key/syllabus
pub async fn syllabus(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Vec<SyllabusItem>>> {
    if find_course(&key).is_none() {
        return Err(AppError::NotFound(format!("Unknown course: {}", key)));
    }

    let items = state
        .service_context
        .syllabus_repo
        .list_by_course(&key)
        .await?;

    Ok(Json(items))
}

/// GET /api/courses/:key/materials
///
/// Classroom content is gated on an active enrollment; admins can always see
/// what students would.
pub async fn materials(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(key): Path<String>,
) -> Result<Json<Vec<CourseMaterial>>> {
    if find_course(&key).is_none() {
        return Err(AppError::NotFound(format!("Unknown course: {}", key)));
    }

    if !user.is_admin {
        let standing = state
            .service_context
            .enrollment_service
            .standing_for_course(user.profile.id, &key)
            .await?;
        if standing != CourseStanding::Active {
            return Err(AppError::Forbidden);
        }
    }

    let materials = state
        .service_context
        .material_repo
        .list_by_course(&key)
        .await?;

    Ok(Json(materials))
}
