#![cfg(test)]
crate::reexport!(container);
crate::reexport!(context);
pub use rstest::*;

pub(crate) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Only initialize once for all tests
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
            .with_test_writer() // ensures it integrates with `cargo test` output
            .init();
    });
}

/// These start a MySQL container; run them with `cargo test -- --ignored`.
mod isolated_integration_tests {
    use super::{super::*, *};

    async fn sakila(ctx: &IsolatedIntegrationTest) -> Result {
        sqlx::query(
            "CREATE TABLE actor (
                actor_id SMALLINT UNSIGNED PRIMARY KEY,
                first_name VARCHAR(45) NOT NULL,
                last_name VARCHAR(45) NOT NULL
            )",
        )
        .execute(&ctx.pool)
        .await?;
        sqlx::query("CREATE TABLE film (film_id SMALLINT UNSIGNED PRIMARY KEY, title VARCHAR(128))")
            .execute(&ctx.pool)
            .await?;
        Ok(())
    }

    #[test_context(IsolatedIntegrationTest)]
    #[tokio::test]
    #[ignore = "needs docker"]
    async fn can_connect(ctx: &mut IsolatedIntegrationTest) -> Result {
        let database: Option<String> = sqlx::query_scalar("SELECT DATABASE()")
            .fetch_one(&ctx.pool)
            .await?;
        assert_eq!(database.as_deref(), Some(ctx.database.as_str()));
        Ok(())
    }

    #[test_context(IsolatedIntegrationTest)]
    #[tokio::test]
    #[ignore = "needs docker"]
    async fn live_schema_source(ctx: &mut IsolatedIntegrationTest) -> Result {
        sakila(ctx).await?;
        let source = MySqlSchema::new(ctx.pool.clone());
        assert_eq!(source.tables(None).await?, vec!["actor", "film"]);
        assert_eq!(
            source.columns(None, "actor").await?,
            vec!["actor_id", "first_name", "last_name"]
        );
        assert_eq!(
            source.columns(Some(&ctx.database), "film").await?,
            vec!["film_id", "title"]
        );
        assert!(source.columns(None, "missing").await?.is_empty());
        Ok(())
    }

    #[test_context(IsolatedIntegrationTest)]
    #[tokio::test]
    #[ignore = "needs docker"]
    async fn snapshot_matches_live(ctx: &mut IsolatedIntegrationTest) -> Result {
        sakila(ctx).await?;
        let live = MySqlSchema::connect(&url(&ctx.database).await).await?;
        let snapshot = Database::load(live.pool()).await?;
        assert_eq!(snapshot.current_schema.as_deref(), Some(ctx.database.as_str()));
        assert_eq!(snapshot.tables(None).await?, live.tables(None).await?);
        assert_eq!(
            snapshot.columns(None, "actor").await?,
            live.columns(None, "actor").await?
        );
        Ok(())
    }

    #[test_context(IsolatedIntegrationTest)]
    #[rstest]
    #[case("SELECT * FROM actor WHERE ", 26, "actor_id")]
    #[case("SELECT f FROM film", 8, "film_id")]
    #[tokio::test]
    #[ignore = "needs docker"]
    async fn completes_against_live_schema(
        ctx: &mut IsolatedIntegrationTest,
        #[case] sql: &str,
        #[case] cursor: usize,
        #[case] expected: &str,
    ) -> Result {
        sakila(ctx).await?;
        let engine = Autocomplete::new(MySqlSchema::new(ctx.pool.clone()));
        let completion = engine.suggestions(sql, cursor).await;
        assert!(
            completion.suggestions.iter().any(|s| s == expected),
            "{expected} missing from {:?}",
            completion.suggestions
        );
        Ok(())
    }
}
