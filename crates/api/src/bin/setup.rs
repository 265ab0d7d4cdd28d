//! One-shot database setup: apply migrations, create the first superadmin and
//! seed sample content into empty tables. Safe to run repeatedly.

use anyhow::{bail, Context};
use showcase_api::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use showcase_core::content::{PortfolioInput, ServiceInput};
use showcase_core::roles::Role;
use showcase_db::models::user::CreateUser;
use showcase_db::repositories::{PortfolioRepo, ServiceRepo, UserRepo};
use showcase_db::DbPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "showcase_setup=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = showcase_db::create_pool(&database_url, 2)
        .await
        .context("Failed to connect to database")?;

    showcase_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    ensure_superadmin(&pool).await?;
    seed_portfolio(&pool).await?;
    seed_services(&pool).await?;

    pool.close().await;
    tracing::info!("Setup complete");
    Ok(())
}

async fn ensure_superadmin(pool: &DbPool) -> anyhow::Result<()> {
    if UserRepo::exists_with_role(pool, Role::Superadmin.as_str()).await? {
        tracing::info!("Superadmin already exists, skipping");
        return Ok(());
    }

    let email = std::env::var("SETUP_ADMIN_EMAIL")
        .context("SETUP_ADMIN_EMAIL must be set to create the first superadmin")?;
    let password = std::env::var("SETUP_ADMIN_PASSWORD")
        .context("SETUP_ADMIN_PASSWORD must be set to create the first superadmin")?;
    let name = std::env::var("SETUP_ADMIN_NAME").unwrap_or_else(|_| "Admin User".into());

    if let Err(msg) = validate_password_strength(&password, MIN_PASSWORD_LENGTH) {
        bail!("SETUP_ADMIN_PASSWORD rejected: {msg}");
    }
    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("Password hashing failed: {e}"))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            name,
            email,
            password_hash,
            role: Role::Superadmin.as_str().to_string(),
        },
    )
    .await
    .context("Failed to create superadmin")?;

    tracing::info!(user_id = user.id, email = %user.email, "Superadmin created");
    Ok(())
}

async fn seed_portfolio(pool: &DbPool) -> anyhow::Result<()> {
    if PortfolioRepo::count_all(pool).await? > 0 {
        tracing::info!("Portfolio already has items, skipping sample data");
        return Ok(());
    }

    let input = PortfolioInput {
        title: "Sample Web Application".into(),
        description: "A modern web application with a Rust API and a single-page front end, \
                      showing how we take a product from idea to launch."
            .into(),
        short_description: Some("Modern web application with a Rust API".into()),
        category: "web-development".into(),
        technologies: vec!["Rust".into(), "Axum".into(), "PostgreSQL".into(), "React".into()],
        live_url: Some("https://example.com".into()),
        github_url: Some("https://github.com/example/project".into()),
        client: Some("Sample Client".into()),
        is_featured: Some(true),
        sort_order: Some(1),
        ..Default::default()
    }
    .into_validated()?;

    let item = PortfolioRepo::create(pool, &input, None).await?;
    tracing::info!(portfolio_id = item.id, "Sample portfolio item created");
    Ok(())
}

fn sample_services() -> Vec<ServiceInput> {
    let list = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    vec![
        ServiceInput {
            title: "Web Development".into(),
            description: "Custom web applications built with modern, well-tested technology."
                .into(),
            short_description: Some("Custom web applications".into()),
            icon: Some("💻".into()),
            category: "development".into(),
            features: list(&["Responsive design", "SEO", "Performance", "Security"]),
            technologies: list(&["Rust", "TypeScript", "React", "PostgreSQL"]),
            pricing: "custom".into(),
            estimated_duration: Some("4-12 weeks".into()),
            is_featured: Some(true),
            sort_order: Some(1),
            ..Default::default()
        },
        ServiceInput {
            title: "UI/UX Design".into(),
            description: "Clear, accessible interfaces designed around how people actually work."
                .into(),
            short_description: Some("Clear and accessible interfaces".into()),
            icon: Some("🎨".into()),
            category: "design".into(),
            features: list(&["User research", "Wireframing", "Prototyping", "User testing"]),
            technologies: list(&["Figma", "Sketch"]),
            pricing: "hourly".into(),
            estimated_duration: Some("2-8 weeks".into()),
            is_featured: Some(true),
            sort_order: Some(2),
            ..Default::default()
        },
        ServiceInput {
            title: "Mobile App Development".into(),
            description: "Native and cross-platform mobile applications for iOS and Android."
                .into(),
            short_description: Some("Native and cross-platform mobile apps".into()),
            icon: Some("📱".into()),
            category: "development".into(),
            features: list(&["Native performance", "Cross-platform", "Store publishing"]),
            technologies: list(&["React Native", "Flutter", "Swift", "Kotlin"]),
            pricing: "fixed".into(),
            estimated_duration: Some("8-16 weeks".into()),
            is_featured: Some(true),
            sort_order: Some(3),
            ..Default::default()
        },
    ]
}

async fn seed_services(pool: &DbPool) -> anyhow::Result<()> {
    if ServiceRepo::count_all(pool).await? > 0 {
        tracing::info!("Services already exist, skipping sample data");
        return Ok(());
    }

    for input in sample_services() {
        let service = ServiceRepo::create(pool, &input.into_validated()?, None).await?;
        tracing::info!(service_id = service.id, title = %service.title, "Sample service created");
    }
    Ok(())
}
