//! Postgres-backed repository tests.
//!
//! - Need a reachable database via `DATABASE_URL`; `sqlx::test` creates a fresh
//!   schema per test and applies `./migrations`.
//! - Marked `#[ignore]`; run with `cargo test -- --ignored`.

use plainblog::application::repos::{CreatePostParams, PostsRepo, RepoError, UpdatePostParams};
use plainblog::infra::db::PostgresRepositories;
use sqlx::PgPool;

fn params(title: &str) -> CreatePostParams {
    CreatePostParams {
        title: title.to_string(),
        subtitle: "World".to_string(),
        date: "March 07, 2024".to_string(),
        body: "<p>...</p>".to_string(),
        author: "A".to_string(),
        img_url: "http://x/y.png".to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn create_assigns_ids_in_insertion_order(pool: PgPool) {
    let repo = PostgresRepositories::new(pool);

    let first = repo.create_post(params("First")).await.expect("first");
    let second = repo.create_post(params("Second")).await.expect("second");
    assert!(second.id > first.id);

    let titles: Vec<_> = repo
        .list_posts()
        .await
        .expect("list")
        .into_iter()
        .map(|post| post.title)
        .collect();
    assert_eq!(titles, ["First", "Second"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn duplicate_titles_hit_the_unique_constraint(pool: PgPool) {
    let repo = PostgresRepositories::new(pool);
    repo.create_post(params("Hello")).await.expect("first");

    let err = repo
        .create_post(params("Hello"))
        .await
        .expect_err("duplicate title");
    match err {
        RepoError::Duplicate { constraint } => assert_eq!(constraint, "posts_title_key"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(repo.list_posts().await.expect("list").len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn update_keeps_the_creation_date(pool: PgPool) {
    let repo = PostgresRepositories::new(pool);
    let created = repo.create_post(params("Hello")).await.expect("create");

    let updated = repo
        .update_post(UpdatePostParams {
            id: created.id,
            title: "Hello again".to_string(),
            subtitle: "Everyone".to_string(),
            body: "<p>new</p>".to_string(),
            author: "B".to_string(),
            img_url: "https://example.com/z.png".to_string(),
        })
        .await
        .expect("update");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.date, created.date);
    assert_eq!(updated.title, "Hello again");

    let found = repo
        .find_by_id(created.id)
        .await
        .expect("find")
        .expect("present");
    assert_eq!(found, updated);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn missing_rows_are_not_found(pool: PgPool) {
    let repo = PostgresRepositories::new(pool);

    assert!(repo.find_by_id(404).await.expect("find").is_none());
    assert!(matches!(
        repo.delete_post(404).await,
        Err(RepoError::NotFound)
    ));

    let err = repo
        .update_post(UpdatePostParams {
            id: 404,
            title: "T".to_string(),
            subtitle: "S".to_string(),
            body: "B".to_string(),
            author: "A".to_string(),
            img_url: "http://x/y.png".to_string(),
        })
        .await
        .expect_err("missing row");
    assert!(matches!(err, RepoError::NotFound));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn delete_removes_the_row(pool: PgPool) {
    let repo = PostgresRepositories::new(pool);
    let post = repo.create_post(params("Hello")).await.expect("create");

    repo.delete_post(post.id).await.expect("delete");
    assert!(repo.find_by_id(post.id).await.expect("find").is_none());
    repo.health_check().await.expect("healthy");
}
