//! The drink document store: domain model, the `DrinkStore` seam, the
//! Postgres implementation, and an in-process store for tests.

use std::sync::{Mutex, MutexGuard};

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, types::Json, FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// A catalog record. `images` and `attributes` are always arrays in JSON,
/// never null; name/size/price may be null (absent fields are stored as-is,
/// not rejected).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    pub id: Uuid,
    pub name: Option<String>,
    pub size: Option<String>,
    pub price: Option<f64>,
    pub images: Vec<String>,
    pub attributes: Vec<Attribute>,
}

/// Drink fields before the store has assigned an identifier.
#[derive(Debug, Clone, Default)]
pub struct NewDrink {
    pub name: Option<String>,
    pub size: Option<String>,
    pub price: Option<f64>,
    pub images: Vec<String>,
    pub attributes: Vec<Attribute>,
}

#[async_trait]
pub trait DrinkStore: Send + Sync {
    /// All drinks in store-native order.
    async fn list(&self) -> anyhow::Result<Vec<Drink>>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Drink>>;
    async fn insert(&self, drink: NewDrink) -> anyhow::Result<Drink>;
    /// Persist the full current state of an existing drink.
    async fn save(&self, drink: &Drink) -> anyhow::Result<Drink>;
    /// Delete-by-id; deleting an id that is not present is not an error.
    async fn delete(&self, id: Uuid) -> anyhow::Result<()>;
}

// ---- Postgres ----

#[derive(Debug, FromRow)]
struct DrinkRow {
    id: Uuid,
    name: Option<String>,
    size: Option<String>,
    price: Option<f64>,
    images: Json<Vec<String>>,
    attributes: Json<Vec<Attribute>>,
}

impl From<DrinkRow> for Drink {
    fn from(r: DrinkRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            size: r.size,
            price: r.price,
            images: r.images.0,
            attributes: r.attributes.0,
        }
    }
}

pub struct PgDrinkStore {
    pool: PgPool,
}

impl PgDrinkStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;

        // Run migrations if present
        if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        Ok(Self { pool })
    }
}

#[async_trait]
impl DrinkStore for PgDrinkStore {
    async fn list(&self) -> anyhow::Result<Vec<Drink>> {
        let rows = sqlx::query_as::<_, DrinkRow>(
            r#"
            SELECT id, name, size, price, images, attributes
            FROM drinks
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("list drinks")?;
        Ok(rows.into_iter().map(Drink::from).collect())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Drink>> {
        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            SELECT id, name, size, price, images, attributes
            FROM drinks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("get drink")?;
        Ok(row.map(Drink::from))
    }

    async fn insert(&self, drink: NewDrink) -> anyhow::Result<Drink> {
        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            INSERT INTO drinks (id, name, size, price, images, attributes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, size, price, images, attributes
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(drink.name)
        .bind(drink.size)
        .bind(drink.price)
        .bind(Json(drink.images))
        .bind(Json(drink.attributes))
        .fetch_one(&self.pool)
        .await
        .context("insert drink")?;
        Ok(row.into())
    }

    async fn save(&self, drink: &Drink) -> anyhow::Result<Drink> {
        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            UPDATE drinks
            SET name = $2, size = $3, price = $4, images = $5, attributes = $6
            WHERE id = $1
            RETURNING id, name, size, price, images, attributes
            "#,
        )
        .bind(drink.id)
        .bind(&drink.name)
        .bind(&drink.size)
        .bind(drink.price)
        .bind(Json(&drink.images))
        .bind(Json(&drink.attributes))
        .fetch_one(&self.pool)
        .await
        .context("save drink")?;
        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM drinks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete drink")?;
        Ok(())
    }
}

// ---- In-process store ----

/// Keeps drinks in insertion order behind a mutex. Used by tests and as a
/// store that needs no database at all.
#[derive(Default)]
pub struct MemoryDrinkStore {
    drinks: Mutex<Vec<Drink>>,
}

impl MemoryDrinkStore {
    fn guard(&self) -> anyhow::Result<MutexGuard<'_, Vec<Drink>>> {
        self.drinks
            .lock()
            .map_err(|_| anyhow::anyhow!("drink store mutex poisoned"))
    }
}

#[async_trait]
impl DrinkStore for MemoryDrinkStore {
    async fn list(&self) -> anyhow::Result<Vec<Drink>> {
        Ok(self.guard()?.clone())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Drink>> {
        Ok(self.guard()?.iter().find(|d| d.id == id).cloned())
    }

    async fn insert(&self, drink: NewDrink) -> anyhow::Result<Drink> {
        let stored = Drink {
            id: Uuid::new_v4(),
            name: drink.name,
            size: drink.size,
            price: drink.price,
            images: drink.images,
            attributes: drink.attributes,
        };
        self.guard()?.push(stored.clone());
        Ok(stored)
    }

    async fn save(&self, drink: &Drink) -> anyhow::Result<Drink> {
        let mut drinks = self.guard()?;
        let slot = drinks
            .iter_mut()
            .find(|d| d.id == drink.id)
            .ok_or_else(|| anyhow::anyhow!("drink {} not in store", drink.id))?;
        *slot = drink.clone();
        Ok(drink.clone())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.guard()?.retain(|d| d.id != id);
        Ok(())
    }
}
