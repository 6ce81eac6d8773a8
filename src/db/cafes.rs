//! Cafe table operations
//!
//! Every query touches at most one row (or reads many); atomicity is
//! whatever SQLite gives a single statement. Column lists are written out
//! explicitly so the wire shape never depends on schema introspection.

use serde::Serialize;
use sqlx::SqlitePool;

/// One cafe row, serialized field-for-field into API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Cafe {
    pub id: i64,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

/// Insert payload: every column except the assigned id
#[derive(Debug, Clone)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

const ALL_COLUMNS: &str = "id, name, map_url, img_url, location, seats, \
     has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price";

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Cafe>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {ALL_COLUMNS} FROM cafes ORDER BY id"))
        .fetch_all(pool)
        .await
}

/// Exact, case-sensitive match on `location`. No match is an empty vec, not an error.
pub async fn find_by_location(pool: &SqlitePool, location: &str) -> Result<Vec<Cafe>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {ALL_COLUMNS} FROM cafes WHERE location = $1 ORDER BY id"
    ))
    .bind(location)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Cafe>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {ALL_COLUMNS} FROM cafes WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Insert a cafe and return the stored row with its assigned id.
///
/// A duplicate `name` surfaces as the driver's unique-violation error;
/// callers detect it via `Error::as_database_error().is_unique_violation()`.
pub async fn insert(pool: &SqlitePool, cafe: &NewCafe) -> Result<Cafe, sqlx::Error> {
    sqlx::query_as(&format!(
        r#"
        INSERT INTO cafes (
            name, map_url, img_url, location, seats,
            has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {ALL_COLUMNS}
        "#
    ))
    .bind(&cafe.name)
    .bind(&cafe.map_url)
    .bind(&cafe.img_url)
    .bind(&cafe.location)
    .bind(&cafe.seats)
    .bind(cafe.has_toilet)
    .bind(cafe.has_wifi)
    .bind(cafe.has_sockets)
    .bind(cafe.can_take_calls)
    .bind(&cafe.coffee_price)
    .fetch_one(pool)
    .await
}

/// Set `coffee_price` on one row. Returns false when no row has that id.
pub async fn update_price(
    pool: &SqlitePool,
    id: i64,
    new_price: &str,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("UPDATE cafes SET coffee_price = $1 WHERE id = $2")
        .bind(new_price)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Remove one row. Returns false when no row has that id.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM cafes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        // One connection: each in-memory SQLite connection is its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    fn sample(name: &str, location: &str) -> NewCafe {
        NewCafe {
            name: name.into(),
            map_url: "https://maps.example.com/x".into(),
            img_url: "https://img.example.com/x.jpg".into(),
            location: location.into(),
            seats: "20-30".into(),
            has_toilet: true,
            has_wifi: true,
            has_sockets: false,
            can_take_calls: false,
            coffee_price: Some("£2.40".into()),
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let pool = test_pool().await;
        let a = insert(&pool, &sample("A", "Soho")).await.unwrap();
        let b = insert(&pool, &sample("B", "Soho")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.name, "A");
        assert_eq!(a.coffee_price.as_deref(), Some("£2.40"));
    }

    #[tokio::test]
    async fn duplicate_name_is_unique_violation() {
        let pool = test_pool().await;
        insert(&pool, &sample("Twin", "Soho")).await.unwrap();
        let err = insert(&pool, &sample("Twin", "Peckham")).await.unwrap_err();
        assert!(
            err.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
        );
        assert_eq!(list_all(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn find_by_location_is_exact_match() {
        let pool = test_pool().await;
        insert(&pool, &sample("A", "Peckham")).await.unwrap();
        insert(&pool, &sample("B", "peckham")).await.unwrap();
        insert(&pool, &sample("C", "Peckham")).await.unwrap();

        let hits = find_by_location(&pool, "Peckham").await.unwrap();
        assert_eq!(
            hits.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            ["A", "C"]
        );
        assert!(find_by_location(&pool, "Hackney").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_price_touches_only_that_column() {
        let pool = test_pool().await;
        let before = insert(&pool, &sample("A", "Soho")).await.unwrap();
        assert!(update_price(&pool, before.id, "£3.10").await.unwrap());

        let after = find_by_id(&pool, before.id).await.unwrap().unwrap();
        assert_eq!(after.coffee_price.as_deref(), Some("£3.10"));
        assert_eq!(
            Cafe {
                coffee_price: before.coffee_price.clone(),
                ..after
            },
            before
        );
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let pool = test_pool().await;
        assert!(!update_price(&pool, 99, "£1").await.unwrap());
        assert!(!delete(&pool, 99).await.unwrap());

        let cafe = insert(&pool, &sample("A", "Soho")).await.unwrap();
        assert!(delete(&pool, cafe.id).await.unwrap());
        assert!(find_by_id(&pool, cafe.id).await.unwrap().is_none());
    }
}
