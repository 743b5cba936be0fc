use serde::Serialize;

/// A course offering. The catalog is static: course keys are referenced by
/// enrollments and announcement targets but the offerings themselves are
/// defined in code, not in the database.
#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub price_label: &'static str,
}

pub const COURSES: &[Course] = &[
    Course {
        key: "aerogenesis",
        title: "Aerogenesis",
        description: "The foundational course for aspiring aviators. Covers history, physics, and systems.",
        price_label: "3,000 ETB",
    },
    Course {
        key: "mentorship",
        title: "Career Mentorship",
        description: "One-on-one guidance to navigate your aviation career path.",
        price_label: "1,500 ETB",
    },
];

pub fn find_course(key: &str) -> Option<&'static Course> {
    COURSES.iter().find(|c| c.key == key)
}
