use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::common::AppError;
use crate::models::{
    CreateWarehouseItemRequest, StockMovementRequest, StockMovementType,
    UpdateWarehouseItemRequest, WarehouseItem, WarehouseItemWithPart,
};

const JOINED_COLUMNS: &str = r#"
    w.id, w.part_id, p.article AS part_article, p.name AS part_name,
    w.quantity, w.min_stock_level, w.max_stock_level, w.location,
    w.created_at, w.updated_at
"#;

#[derive(Clone)]
pub struct WarehouseRepository {
    pool: PgPool,
}

impl WarehouseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<WarehouseItemWithPart>, AppError> {
        let sql = format!(
            r#"
            SELECT {JOINED_COLUMNS}
            FROM warehouse_items w
            JOIN parts p ON p.id = w.part_id
            ORDER BY p.name ASC
            "#
        );
        let items = sqlx::query_as::<_, WarehouseItemWithPart>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    /// Stock records at or below their reorder threshold.
    pub async fn find_with_low_stock(&self) -> Result<Vec<WarehouseItemWithPart>, AppError> {
        let sql = format!(
            r#"
            SELECT {JOINED_COLUMNS}
            FROM warehouse_items w
            JOIN parts p ON p.id = w.part_id
            WHERE w.quantity <= w.min_stock_level
            ORDER BY w.quantity ASC
            "#
        );
        let items = sqlx::query_as::<_, WarehouseItemWithPart>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<WarehouseItem>, AppError> {
        let item = sqlx::query_as::<_, WarehouseItem>("SELECT * FROM warehouse_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    pub async fn find_by_part(&self, part_id: Uuid) -> Result<Option<WarehouseItem>, AppError> {
        let item =
            sqlx::query_as::<_, WarehouseItem>("SELECT * FROM warehouse_items WHERE part_id = $1")
                .bind(part_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(item)
    }

    pub async fn find_by_article(
        &self,
        article: &str,
    ) -> Result<Option<WarehouseItemWithPart>, AppError> {
        let sql = format!(
            r#"
            SELECT {JOINED_COLUMNS}
            FROM warehouse_items w
            JOIN parts p ON p.id = w.part_id
            WHERE p.article = $1
            "#
        );
        let item = sqlx::query_as::<_, WarehouseItemWithPart>(&sql)
            .bind(article)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    pub async fn find_by_location(&self, location: &str) -> Result<Vec<WarehouseItem>, AppError> {
        let items = sqlx::query_as::<_, WarehouseItem>(
            "SELECT * FROM warehouse_items WHERE location = $1 ORDER BY created_at DESC",
        )
        .bind(location)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn create(
        &self,
        req: &CreateWarehouseItemRequest,
    ) -> Result<WarehouseItem, AppError> {
        req.validate()?;
        sqlx::query_as::<_, WarehouseItem>(
            r#"
            INSERT INTO warehouse_items (part_id, quantity, min_stock_level,
                                         max_stock_level, location)
            VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 0), $5)
            RETURNING *
            "#,
        )
        .bind(req.part_id)
        .bind(req.quantity)
        .bind(req.min_stock_level)
        .bind(req.max_stock_level)
        .bind(&req.location)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::map_conflict)
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateWarehouseItemRequest,
    ) -> Result<Option<WarehouseItem>, AppError> {
        req.validate()?;
        let item = sqlx::query_as::<_, WarehouseItem>(
            r#"
            UPDATE warehouse_items
            SET quantity = COALESCE($1, quantity),
                min_stock_level = COALESCE($2, min_stock_level),
                max_stock_level = COALESCE($3, max_stock_level),
                location = COALESCE($4, location),
                updated_at = now()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(req.quantity)
        .bind(req.min_stock_level)
        .bind(req.max_stock_level)
        .bind(&req.location)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_db)?;
        Ok(item)
    }

    /// Applies a stock movement to the record. Incoming adds, outgoing
    /// subtracts, adjustment replaces the quantity outright. Draining below
    /// zero trips the quantity CHECK and surfaces as `CheckViolation`.
    pub async fn apply_movement(
        &self,
        id: Uuid,
        movement: &StockMovementRequest,
    ) -> Result<Option<WarehouseItem>, AppError> {
        movement.validate()?;
        let sql = match movement.movement_type {
            StockMovementType::Incoming => {
                "UPDATE warehouse_items SET quantity = quantity + $1, updated_at = now() \
                 WHERE id = $2 RETURNING *"
            }
            StockMovementType::Outgoing => {
                "UPDATE warehouse_items SET quantity = quantity - $1, updated_at = now() \
                 WHERE id = $2 RETURNING *"
            }
            StockMovementType::Adjustment => {
                "UPDATE warehouse_items SET quantity = $1, updated_at = now() \
                 WHERE id = $2 RETURNING *"
            }
        };

        let item = sqlx::query_as::<_, WarehouseItem>(sql)
            .bind(movement.quantity)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_db)?;
        Ok(item)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM warehouse_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn map_conflict(e: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::WarehouseItemAlreadyExists;
            }
            if db_err.is_foreign_key_violation() {
                return AppError::MissingReference("part");
            }
        }
        AppError::from_db(e)
    }
}
