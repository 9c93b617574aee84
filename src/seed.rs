//! Demo accounts and tasks for local runs (`SEED_DEMO_DATA=true`).

use chrono::{Duration, Utc};

use crate::auth::PasswordHasher;
use crate::error::AppError;
use crate::models::{NewTask, NewUser, TaskStatus};
use crate::store::{TaskStore, UserStore};

const DEMO_USERS: [(&str, &str, &str, i64); 2] = [
    ("demo_user", "demo@example.com", "Demo123!", 30),
    ("john_doe", "john.doe@example.com", "John123!", 15),
];

/// Loads two users and three tasks. Does nothing if any user already exists.
pub fn seed_demo_data(
    users: &dyn UserStore,
    tasks: &dyn TaskStore,
    hasher: &dyn PasswordHasher,
) -> Result<(), AppError> {
    if users.get_by_id(1)?.is_some() {
        log::info!("User store already populated; skipping demo data");
        return Ok(());
    }

    let now = Utc::now();
    let mut ids = Vec::with_capacity(DEMO_USERS.len());
    for (username, email, password, age_days) in DEMO_USERS {
        let user = users.create(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hasher.hash(password)?,
            created_at: now - Duration::days(age_days),
        })?;
        ids.push(user.id);
    }

    let demo_tasks = [
        (
            "Complete API Documentation",
            "Write comprehensive documentation for all API endpoints",
            TaskStatus::InProgress,
            now + Duration::days(7),
            ids[0],
            now - Duration::days(5),
        ),
        (
            "Implement User Authentication",
            "Add JWT-based authentication to the API",
            TaskStatus::Completed,
            now + Duration::days(3),
            ids[0],
            now - Duration::days(10),
        ),
        (
            "Setup CI/CD Pipeline",
            "Configure automated build and deployment pipeline",
            TaskStatus::Pending,
            now + Duration::days(14),
            ids[1],
            now - Duration::days(2),
        ),
    ];

    for (title, description, status, due_date, user_id, created_at) in demo_tasks {
        tasks.create(NewTask {
            title: title.to_string(),
            description: description.to_string(),
            status,
            due_date,
            user_id,
            created_at,
            updated_at: None,
        })?;
    }

    log::info!(
        "Seeded {} demo users and {} demo tasks",
        ids.len(),
        demo_tasks.len()
    );
    Ok(())
}
