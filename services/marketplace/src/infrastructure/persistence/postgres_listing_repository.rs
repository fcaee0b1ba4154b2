//! PostgreSQL 房源 Repository 实现

use async_trait::async_trait;
use sharebnb_adapter_postgres::{QueryTimer, map_sqlx_error};
use sharebnb_errors::AppResult;
use sqlx::PgPool;

use crate::domain::listing::{Listing, ListingId, NewListing};
use crate::domain::repositories::ListingRepository;

pub struct PostgresListingRepository {
    pool: PgPool,
}

impl PostgresListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for PostgresListingRepository {
    async fn insert(&self, listing: &NewListing) -> AppResult<Listing> {
        let timer = QueryTimer::new("listings", "insert");
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            INSERT INTO listings (host_username, title, description, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, host_username, title, description, price
            "#,
        )
        .bind(&listing.host_username)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.price)
        .fetch_one(&self.pool)
        .await;

        Ok(timer.observe(row).map_err(map_sqlx_error)?.into())
    }

    async fn find_all(&self) -> AppResult<Vec<Listing>> {
        let timer = QueryTimer::new("listings", "select_all");
        let rows = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT id, host_username, title, description, price
            FROM listings
            "#,
        )
        .fetch_all(&self.pool)
        .await;

        let rows = timer.observe(rows).map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(Listing::from).collect())
    }

    async fn find_by_id(&self, id: ListingId) -> AppResult<Option<Listing>> {
        let timer = QueryTimer::new("listings", "select_by_id");
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT id, host_username, title, description, price
            FROM listings
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await;

        Ok(timer.observe(row).map_err(map_sqlx_error)?.map(Listing::from))
    }
}

#[derive(sqlx::FromRow)]
struct ListingRow {
    id: i32,
    host_username: String,
    title: String,
    description: String,
    price: i32,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Listing {
            id: ListingId(row.id),
            host_username: row.host_username,
            title: row.title,
            description: row.description,
            price: row.price,
        }
    }
}
