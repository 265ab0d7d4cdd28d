//! Integration tests for portfolio and service listing queries.

use showcase_core::content::{PortfolioInput, ServiceInput, FEATURED_LIMIT};
use showcase_db::models::portfolio::PortfolioFilter;
use showcase_db::models::service::ServiceFilter;
use showcase_db::repositories::{PortfolioRepo, ServiceRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn project(title: &str, category: &str, technologies: &[&str]) -> PortfolioInput {
    PortfolioInput {
        title: title.to_string(),
        description: format!("{title} built for a long-standing client."),
        category: category.to_string(),
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    }
}

fn service(title: &str, category: &str) -> ServiceInput {
    ServiceInput {
        title: title.to_string(),
        description: format!("{title} delivered end to end by our team."),
        category: category.to_string(),
        features: vec!["Discovery workshop".to_string()],
        technologies: vec!["Rust".to_string()],
        pricing: "fixed".to_string(),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_portfolio_create_sets_thumbnail_and_images(pool: PgPool) {
    let item = PortfolioRepo::create(
        &pool,
        &project("Clinic booking", "web-development", &["Rust"]),
        Some("/uploads/image-1.png"),
    )
    .await
    .unwrap();
    assert_eq!(item.thumbnail.as_deref(), Some("/uploads/image-1.png"));
    assert_eq!(item.images, vec!["/uploads/image-1.png"]);
    assert!(item.is_completed);
    assert!(item.is_active);
    assert!(!item.is_featured);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_portfolio_update_appends_image(pool: PgPool) {
    let item = PortfolioRepo::create(
        &pool,
        &project("Clinic booking", "web-development", &["Rust"]),
        Some("/uploads/a.png"),
    )
    .await
    .unwrap();

    let mut input = project("Clinic booking v2", "saas", &["Rust", "Axum"]);
    input.is_featured = Some(true);
    let updated = PortfolioRepo::update(&pool, item.id, &input, Some("/uploads/b.png"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Clinic booking v2");
    assert_eq!(updated.category, "saas");
    assert_eq!(updated.thumbnail.as_deref(), Some("/uploads/b.png"));
    assert_eq!(updated.images, vec!["/uploads/a.png", "/uploads/b.png"]);
    assert!(updated.is_featured);

    // Without a new upload the images are untouched.
    let again = PortfolioRepo::update(&pool, item.id, &input, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again.thumbnail.as_deref(), Some("/uploads/b.png"));
    assert_eq!(again.images.len(), 2);
    assert!(again.is_featured);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_portfolio_list_filters_and_order(pool: PgPool) {
    let mut pinned = project("Pinned storefront", "e-commerce", &["Shopify"]);
    pinned.sort_order = Some(-1);
    PortfolioRepo::create(&pool, &pinned, None).await.unwrap();
    PortfolioRepo::create(&pool, &project("Booking engine", "saas", &["Rust"]), None)
        .await
        .unwrap();
    let mut hidden = project("Hidden prototype", "saas", &["Rust"]);
    hidden.is_active = Some(false);
    PortfolioRepo::create(&pool, &hidden, None).await.unwrap();

    let all = PortfolioRepo::list(&pool, &PortfolioFilter::default(), 12, 0)
        .await
        .unwrap();
    let titles: Vec<&str> = all.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Pinned storefront", "Booking engine"]);
    assert_eq!(
        PortfolioRepo::count(&pool, &PortfolioFilter::default())
            .await
            .unwrap(),
        2
    );
    assert_eq!(PortfolioRepo::count_all(&pool).await.unwrap(), 3);

    let saas = PortfolioFilter {
        category: Some("saas".into()),
        ..Default::default()
    };
    assert_eq!(PortfolioRepo::count(&pool, &saas).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_portfolio_search_matches_text_or_exact_technology(pool: PgPool) {
    PortfolioRepo::create(&pool, &project("Booking engine", "saas", &["Rust"]), None)
        .await
        .unwrap();
    PortfolioRepo::create(&pool, &project("Trust portal", "other", &["PHP"]), None)
        .await
        .unwrap();
    PortfolioRepo::create(&pool, &project("Mobile shop", "mobile-app", &["Kotlin"]), None)
        .await
        .unwrap();

    let by_tech = PortfolioFilter {
        search: Some("rust".into()),
        ..Default::default()
    };
    let rows = PortfolioRepo::list(&pool, &by_tech, 12, 0).await.unwrap();
    let mut titles: Vec<&str> = rows.iter().map(|i| i.title.as_str()).collect();
    titles.sort();
    // "Trust portal" matches the title substring, "Booking engine" the technology.
    assert_eq!(titles, vec!["Booking engine", "Trust portal"]);

    let partial_tech = PortfolioFilter {
        search: Some("Kot".into()),
        ..Default::default()
    };
    assert_eq!(PortfolioRepo::count(&pool, &partial_tech).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_portfolio_categories_and_featured(pool: PgPool) {
    for title in ["Booking engine", "Invoice portal"] {
        let mut input = project(title, "saas", &["Rust"]);
        input.is_featured = Some(true);
        PortfolioRepo::create(&pool, &input, None).await.unwrap();
    }
    PortfolioRepo::create(&pool, &project("Mobile shop", "mobile-app", &["Kotlin"]), None)
        .await
        .unwrap();

    let categories = PortfolioRepo::categories(&pool).await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].category, "saas");
    assert_eq!(categories[0].count, 2);

    let featured = PortfolioRepo::featured(&pool, FEATURED_LIMIT).await.unwrap();
    assert_eq!(featured.len(), 2);
    assert!(featured.iter().all(|i| i.is_featured));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_portfolio_delete(pool: PgPool) {
    let item = PortfolioRepo::create(&pool, &project("Booking engine", "saas", &["Rust"]), None)
        .await
        .unwrap();
    assert!(PortfolioRepo::delete(&pool, item.id).await.unwrap());
    assert!(PortfolioRepo::find_by_id(&pool, item.id).await.unwrap().is_none());
    assert!(PortfolioRepo::update(&pool, item.id, &project("Gone item", "saas", &["Rust"]), None)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_service_crud(pool: PgPool) {
    let created = ServiceRepo::create(&pool, &service("Web Development", "development"), None)
        .await
        .unwrap();
    assert_eq!(created.pricing, "fixed");
    assert_eq!(created.image, None);

    let updated = ServiceRepo::update(
        &pool,
        created.id,
        &service("Web Development Plus", "development"),
        Some("/uploads/image-2.webp"),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.title, "Web Development Plus");
    assert_eq!(updated.image.as_deref(), Some("/uploads/image-2.webp"));

    let kept = ServiceRepo::update(&pool, created.id, &service("Web Development", "development"), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.image.as_deref(), Some("/uploads/image-2.webp"));

    assert!(ServiceRepo::delete(&pool, created.id).await.unwrap());
    assert!(ServiceRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_service_listing(pool: PgPool) {
    let mut featured = service("UI/UX Design", "design");
    featured.is_featured = Some(true);
    ServiceRepo::create(&pool, &featured, None).await.unwrap();
    ServiceRepo::create(&pool, &service("Web Development", "development"), None)
        .await
        .unwrap();
    ServiceRepo::create(&pool, &service("API Development", "development"), None)
        .await
        .unwrap();

    let only_featured = ServiceFilter {
        featured: Some(true),
        ..Default::default()
    };
    assert_eq!(ServiceRepo::count(&pool, &only_featured).await.unwrap(), 1);

    let development = ServiceFilter {
        category: Some("development".into()),
        ..Default::default()
    };
    let rows = ServiceRepo::list(&pool, &development, 10, 0).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "API Development");

    let categories = ServiceRepo::categories(&pool).await.unwrap();
    assert_eq!(categories[0].category, "development");
    assert_eq!(categories[0].count, 2);

    assert_eq!(ServiceRepo::featured(&pool, 6).await.unwrap().len(), 1);
}
