use aeroportal::{
    auth::AuthService,
    domain::{Announcement, EnrollmentStatus, Severity, SignupRequest, TargetGroup, COURSES},
    repository::{
        AnnouncementRepository, EnrollmentRepository, ProfileRepository,
        SqliteAnnouncementRepository, SqliteEnrollmentRepository, SqliteProfileRepository,
    },
};
use chrono::Utc;
use clap::Parser;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

#[derive(Parser)]
#[command(about = "Seed the database with demo accounts and enrollments")]
struct Args {
    /// Number of extra randomly generated student accounts
    #[arg(long, default_value_t = 10)]
    students: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:aeroportal.db".to_string());

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let profile_repo = SqliteProfileRepository::new(db_pool.clone());
    let enrollment_repo = SqliteEnrollmentRepository::new(db_pool.clone());
    let announcement_repo = SqliteAnnouncementRepository::new(db_pool.clone());

    println!("👥 Creating accounts...");

    let password_hash = AuthService::hash_password("password123").await?;

    let admin = profile_repo
        .create(
            &SignupRequest {
                email: "admin@aeroportal.local".to_string(),
                password: "password123".to_string(),
                full_name: "Portal Admin".to_string(),
            },
            &password_hash,
        )
        .await?;
    println!("  ✅ Created admin account (admin@aeroportal.local / password123)");
    println!("     Add {} to the admin.emails allow-list to grant admin access", admin.email);

    // One student per lifecycle state so every admin view has something to show
    let amara = profile_repo
        .create(
            &SignupRequest {
                email: "amara@example.com".to_string(),
                password: "password123".to_string(),
                full_name: "Amara Bekele".to_string(),
            },
            &password_hash,
        )
        .await?;
    let enrollment = enrollment_repo.upsert_pending(&amara, "aerogenesis").await?;
    enrollment_repo
        .update_status(enrollment.id, EnrollmentStatus::Active)
        .await?;

    let dawit = profile_repo
        .create(
            &SignupRequest {
                email: "dawit@example.com".to_string(),
                password: "password123".to_string(),
                full_name: "Dawit Haile".to_string(),
            },
            &password_hash,
        )
        .await?;
    enrollment_repo.upsert_pending(&dawit, "aerogenesis").await?;

    let selam = profile_repo
        .create(
            &SignupRequest {
                email: "selam@example.com".to_string(),
                password: "password123".to_string(),
                full_name: "Selam Tesfaye".to_string(),
            },
            &password_hash,
        )
        .await?;
    let enrollment = enrollment_repo.upsert_pending(&selam, "mentorship").await?;
    enrollment_repo
        .update_status(enrollment.id, EnrollmentStatus::Rejected)
        .await?;

    println!("  ✅ Created 3 named students (active / pending / rejected)");

    for i in 0..args.students {
        let profile = profile_repo
            .create(
                &SignupRequest {
                    email: format!("{}.{}", i, SafeEmail().fake::<String>()),
                    password: "password123".to_string(),
                    full_name: Name().fake(),
                },
                &password_hash,
            )
            .await?;

        // Roughly half of the generated students request a course
        if i % 2 == 0 {
            let course = &COURSES[i % COURSES.len()];
            enrollment_repo.upsert_pending(&profile, course.key).await?;
        }
    }
    println!("  ✅ Created {} generated students", args.students);

    println!("📣 Creating announcements...");

    announcement_repo
        .create(Announcement {
            id: Uuid::new_v4(),
            title: "Welcome aboard".to_string(),
            message: "Orientation materials are now available on your dashboard.".to_string(),
            severity: Severity::Info,
            target: TargetGroup::All,
            is_active: true,
            created_at: Utc::now(),
        })
        .await?;

    announcement_repo
        .create(Announcement {
            id: Uuid::new_v4(),
            title: "Aerogenesis week 2 schedule change".to_string(),
            message: "Thursday's session moves to 18:00 EAT.".to_string(),
            severity: Severity::Alert,
            target: TargetGroup::Course("aerogenesis".to_string()),
            is_active: true,
            created_at: Utc::now(),
        })
        .await?;

    announcement_repo
        .create(Announcement {
            id: Uuid::new_v4(),
            title: "Enrollment is open".to_string(),
            message: "Pick a course from the catalog to get started.".to_string(),
            severity: Severity::Success,
            target: TargetGroup::NotRegistered,
            is_active: true,
            created_at: Utc::now(),
        })
        .await?;

    println!("  ✅ Created 3 announcements");
    println!("🎉 Seeding complete!");

    Ok(())
}
