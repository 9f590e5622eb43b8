//! Seat repository, including the soft reservation writes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::seat::{self, Entity as SeatEntity};
use crate::domain::Seat;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SeatRepository: Send + Sync {
    /// Seats of a showtime ordered by row then number
    async fn list_by_showtime(&self, showtime_id: Uuid) -> AppResult<Vec<Seat>>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Seat>>;

    /// Clear holds taken before `cutoff` on unoccupied seats. Returns rows cleared.
    async fn release_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;

    /// Tag unoccupied seats as held. Last write wins. Returns rows updated.
    async fn reserve(&self, ids: &[Uuid], tag: String, at: DateTime<Utc>) -> AppResult<u64>;
}

pub struct SeatStore {
    db: DatabaseConnection,
}

impl SeatStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SeatRepository for SeatStore {
    async fn list_by_showtime(&self, showtime_id: Uuid) -> AppResult<Vec<Seat>> {
        let models = SeatEntity::find()
            .filter(seat::Column::ShowtimeId.eq(showtime_id))
            .order_by_asc(seat::Column::SeatRow)
            .order_by_asc(seat::Column::SeatNumber)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Seat::from).collect())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Seat>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = SeatEntity::find()
            .filter(seat::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(seat::Column::SeatRow)
            .order_by_asc(seat::Column::SeatNumber)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Seat::from).collect())
    }

    async fn release_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = SeatEntity::update_many()
            .col_expr(seat::Column::ReservedAt, Expr::value(Option::<DateTime<Utc>>::None))
            .col_expr(seat::Column::ReservedBy, Expr::value(Option::<String>::None))
            .filter(seat::Column::ReservedAt.lt(cutoff))
            .filter(seat::Column::IsOccupied.eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn reserve(&self, ids: &[Uuid], tag: String, at: DateTime<Utc>) -> AppResult<u64> {
        let result = SeatEntity::update_many()
            .col_expr(seat::Column::ReservedAt, Expr::value(Some(at)))
            .col_expr(seat::Column::ReservedBy, Expr::value(Some(tag)))
            .filter(seat::Column::Id.is_in(ids.iter().copied()))
            .filter(seat::Column::IsOccupied.eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Statement, Value};

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    /// Every statement the mock connection ran, in order.
    fn executed(db: DatabaseConnection) -> Vec<Statement> {
        db.into_transaction_log()
            .iter()
            .flat_map(|t| t.statements().to_vec())
            .collect()
    }

    fn bound(stmt: &Statement) -> Vec<Value> {
        stmt.values.clone().map(|v| v.0).unwrap_or_default()
    }

    #[tokio::test]
    async fn test_find_by_no_ids_skips_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let seats = SeatStore::new(db).find_by_ids(&[]).await.unwrap();
        assert!(seats.is_empty());
    }

    #[tokio::test]
    async fn test_list_maps_seat_type() {
        let showtime_id = Uuid::new_v4();
        let row = seat::Model {
            id: Uuid::new_v4(),
            showtime_id,
            seat_row: "A".to_string(),
            seat_number: 1,
            seat_type: "premium".to_string(),
            is_occupied: false,
            reserved_at: None,
            reserved_by: None,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();

        let seats = SeatStore::new(db).list_by_showtime(showtime_id).await.unwrap();
        assert_eq!(seats[0].seat_type, crate::domain::SeatType::Premium);
    }

    #[tokio::test]
    async fn test_reserve_only_touches_unoccupied_seats() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(2)])
            .into_connection();
        let store = SeatStore::new(db);

        let ids = [Uuid::new_v4(), Uuid::new_v4()];
        let updated = store
            .reserve(&ids, "a@example.com:r1".to_string(), Utc::now())
            .await
            .unwrap();
        assert_eq!(updated, 2);

        let statements = executed(store.db);
        assert_eq!(statements.len(), 1);
        let sql = &statements[0].sql;
        assert!(sql.starts_with(r#"UPDATE "seats""#));
        assert!(sql.contains(r#""is_occupied" = $"#));
    }

    #[tokio::test]
    async fn test_release_expired_clears_stale_unoccupied_holds() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(3)])
            .into_connection();
        let store = SeatStore::new(db);
        let cutoff = Utc::now();

        let cleared = store.release_expired(cutoff).await.unwrap();
        assert_eq!(cleared, 3);

        let statements = executed(store.db);
        assert_eq!(statements.len(), 1);
        let sql = &statements[0].sql;
        assert!(sql.starts_with(r#"UPDATE "seats" SET "reserved_at" = $1, "reserved_by" = $2"#));
        assert!(sql.contains(r#""seats"."reserved_at" < $3"#));
        assert!(sql.contains(r#""seats"."is_occupied" = $4"#));

        let values = bound(&statements[0]);
        assert_eq!(values[2], Value::from(cutoff));
        assert_eq!(values[3], Value::Bool(Some(false)));
    }
}
