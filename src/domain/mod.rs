pub mod announcement;
pub mod blog;
pub mod course;
pub mod enrollment;
pub mod material;
pub mod message;
pub mod notification;
pub mod profile;
pub mod recency;
pub mod syllabus;

pub use announcement::*;
pub use blog::*;
pub use course::*;
pub use enrollment::*;
pub use material::*;
pub use message::*;
pub use notification::*;
pub use profile::*;
pub use syllabus::*;
