#[cfg(test)]
mod tests {
    use crate::database::entity::{post, user};
    use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};
    use quill_core::domain::{Post, PostState, User};
    use quill_core::ports::{PostFilter, PostRepository, UserRepository};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

    /// With the `mock` feature enabled `DatabaseConnection` is not `Clone`;
    /// share the underlying mock connection by cloning its `Arc` instead.
    fn share(db: &DatabaseConnection) -> DatabaseConnection {
        match db {
            DatabaseConnection::MockDatabaseConnection(conn) => {
                DatabaseConnection::MockDatabaseConnection(std::sync::Arc::clone(conn))
            }
            _ => unreachable!("tests only use mock connections"),
        }
    }

    fn post_model(title: &str, author: &str, state: &str) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: uuid::Uuid::new_v4(),
            title: title.to_owned(),
            content: "words".to_owned(),
            category: "tech".to_owned(),
            author: author.to_owned(),
            state: state.to_owned(),
            image_url: None,
            tags: vec!["rust".to_owned()],
            read_time: 1,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn find_post_by_id_maps_into_the_domain() {
        let model = post_model("Test Post", "blard", "published");
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.id, post_id);
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.state, quill_core::domain::PostState::Published);
        assert_eq!(post.tags, vec!["rust".to_owned()]);
    }

    #[tokio::test]
    async fn unknown_state_in_storage_degrades_to_draft() {
        let model = post_model("Odd", "blard", "limbo");
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let post = repo.find_by_id(post_id).await.unwrap().unwrap();
        assert_eq!(post.state, quill_core::domain::PostState::Draft);
    }

    // The in-memory repositories promise the same filter/sort/offset
    // semantics; these pin the SQL side of that contract via the mock's
    // statement log.
    #[tokio::test]
    async fn find_page_filters_orders_desc_and_offsets() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();
        let repo = PostgresPostRepository::new(share(&db));

        let filter = PostFilter {
            state: Some(PostState::Published),
            author: Some("blard".to_owned()),
        };
        repo.find_page(&filter, 12, 6).await.unwrap();

        let log = db.into_transaction_log();
        let stmt = format!("{}", log[0].statements()[0]);
        assert!(stmt.contains(r#""posts"."state""#));
        assert!(stmt.contains(r#""posts"."author""#));
        assert!(stmt.contains(r#"ORDER BY "posts"."created_at" DESC"#));
        assert!(stmt.contains("LIMIT"));
        assert!(stmt.contains("OFFSET"));
        // The raw record offset and the page size both reach the statement.
        assert!(stmt.contains("12"));
        assert!(stmt.contains("6"));
    }

    #[tokio::test]
    async fn search_is_ilike_over_author_and_title_published_only() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();
        let repo = PostgresPostRepository::new(share(&db));

        repo.search("smith").await.unwrap();

        let log = db.into_transaction_log();
        let stmt = format!("{}", log[0].statements()[0]);
        assert!(stmt.contains("ILIKE"));
        assert!(stmt.contains(r#""posts"."state""#));
        assert!(stmt.contains("published"));
        assert!(stmt.contains("%smith%"));
    }

    #[tokio::test]
    async fn find_user_by_email_maps_into_the_domain() {
        let now = chrono::Utc::now();
        let user_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                email: "blard@example.com".to_owned(),
                username: Some("blard".to_owned()),
                password_hash: Some("$argon2id$...".to_owned()),
                google_id: None,
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let result: Option<User> = repo.find_by_email("blard@example.com").await.unwrap();

        let found = result.unwrap();
        assert_eq!(found.id, user_id);
        assert_eq!(found.username.as_deref(), Some("blard"));
        assert!(found.google_id.is_none());
    }
}
