use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
    sea_query::{Expr, ExprTrait},
};

use crate::{
    entities::movie::{self, Entity as Movie},
    error::{AppError, AppResult},
};

/// Row-level operations over the `movies` table. Soft-deleted rows are
/// invisible to every method here.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn count(&self) -> AppResult<u64> {
        let count = Movie::find()
            .filter(movie::Column::DeletedAt.is_null())
            .count(&self.db)
            .await?;
        Ok(count)
    }

    pub async fn find(&self, id: i32) -> AppResult<Option<movie::Model>> {
        let found = Movie::find_by_id(id)
            .filter(movie::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        Ok(found)
    }

    pub async fn find_all(&self) -> AppResult<Vec<movie::Model>> {
        let movies = Movie::find()
            .filter(movie::Column::DeletedAt.is_null())
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    pub async fn insert(&self, title: &str, available_seats: i32) -> AppResult<movie::Model> {
        let now = now_sec();
        let model = movie::ActiveModel {
            title: Set(title.to_string()),
            available_seats: Set(available_seats),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Applies only the provided fields; `None` when no live row matches.
    pub async fn update(
        &self,
        id: i32,
        title: Option<String>,
        available_seats: Option<i32>,
    ) -> AppResult<Option<movie::Model>> {
        let Some(existing) = self.find(id).await? else {
            return Ok(None);
        };
        let mut active: movie::ActiveModel = existing.into();
        if let Some(title) = title {
            active.title = Set(title);
        }
        if let Some(seats) = available_seats {
            active.available_seats = Set(seats);
        }
        active.updated_at = Set(now_sec());
        Ok(Some(active.update(&self.db).await?))
    }

    /// Marks the row deleted; `false` when there was no live row to delete.
    pub async fn soft_delete(&self, id: i32) -> AppResult<bool> {
        let result = Movie::update_many()
            .col_expr(movie::Column::DeletedAt, Expr::value(now_sec()))
            .filter(movie::Column::Id.eq(id))
            .filter(movie::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Decrements the seat count in a single conditional UPDATE so that two
    /// racing bookings can never drive the inventory negative. A zero-row
    /// update is disambiguated by a follow-up read: the movie is either
    /// gone or short on seats.
    pub async fn decrease_seats(&self, id: i32, quantity: i32) -> AppResult<movie::Model> {
        let result = Movie::update_many()
            .col_expr(
                movie::Column::AvailableSeats,
                Expr::col(movie::Column::AvailableSeats).sub(quantity),
            )
            .col_expr(movie::Column::UpdatedAt, Expr::value(now_sec()))
            .filter(movie::Column::Id.eq(id))
            .filter(movie::Column::DeletedAt.is_null())
            .filter(movie::Column::AvailableSeats.gte(quantity))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            let movie = self.find(id).await?.ok_or(AppError::NotFound)?;
            return Err(AppError::InsufficientSeats {
                available: movie.available_seats,
                requested: quantity,
            });
        }

        self.find(id).await?.ok_or(AppError::NotFound)
    }

    /// Inserts the sample rows only when the table holds no live rows. The
    /// count and the inserts are not one transaction; startup is
    /// single-instance.
    pub async fn seed_if_empty(&self, rows: &[(&str, i32)]) -> AppResult<()> {
        let count = self.count().await?;
        if count > 0 {
            tracing::debug!(count, "movies already present, skipping seed");
            return Ok(());
        }
        for (title, seats) in rows {
            let movie = self.insert(title, *seats).await?;
            tracing::info!(title = %movie.title, seats = movie.available_seats, "seeded movie");
        }
        Ok(())
    }
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}

#[cfg(test)]
mod tests {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    use super::MovieStore;
    use crate::{db::SEED_MOVIES, error::AppError};

    async fn setup() -> MovieStore {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        MovieStore::new(db)
    }

    #[tokio::test]
    async fn seed_runs_once() {
        let store = setup().await;

        store.seed_if_empty(&SEED_MOVIES).await.expect("first seed");
        assert_eq!(store.count().await.expect("count"), 4);

        store.seed_if_empty(&SEED_MOVIES).await.expect("second seed");
        assert_eq!(store.count().await.expect("count"), 4);

        let titles: Vec<String> = store
            .find_all()
            .await
            .expect("find_all")
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, ["The Matrix", "Inception", "Interstellar", "The Dark Knight"]);
    }

    #[tokio::test]
    async fn update_applies_only_provided_fields() {
        let store = setup().await;
        let movie = store.insert("Alien", 30).await.expect("insert");

        let updated = store
            .update(movie.id, Some("Aliens".to_string()), None)
            .await
            .expect("update")
            .expect("movie exists");
        assert_eq!(updated.title, "Aliens");
        assert_eq!(updated.available_seats, 30);

        let updated = store
            .update(movie.id, None, Some(12))
            .await
            .expect("update")
            .expect("movie exists");
        assert_eq!(updated.title, "Aliens");
        assert_eq!(updated.available_seats, 12);
    }

    #[tokio::test]
    async fn update_missing_movie_returns_none() {
        let store = setup().await;
        let updated = store.update(999, Some("Nope".to_string()), None).await.expect("update");
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn soft_delete_hides_row() {
        let store = setup().await;
        let movie = store.insert("Heat", 25).await.expect("insert");

        assert!(store.soft_delete(movie.id).await.expect("delete"));
        assert!(store.find(movie.id).await.expect("find").is_none());
        assert_eq!(store.count().await.expect("count"), 0);

        // already deleted: nothing left to mark
        assert!(!store.soft_delete(movie.id).await.expect("second delete"));
    }

    #[tokio::test]
    async fn decrease_subtracts_and_persists() {
        let store = setup().await;
        let movie = store.insert("Dune", 50).await.expect("insert");

        let updated = store.decrease_seats(movie.id, 20).await.expect("decrease");
        assert_eq!(updated.available_seats, 30);

        let reloaded = store.find(movie.id).await.expect("find").expect("movie exists");
        assert_eq!(reloaded.available_seats, 30);
    }

    #[tokio::test]
    async fn decrease_beyond_availability_fails_and_preserves_state() {
        let store = setup().await;
        let movie = store.insert("Dune", 50).await.expect("insert");

        let err = store.decrease_seats(movie.id, 60).await.expect_err("must fail");
        assert!(matches!(err, AppError::InsufficientSeats { available: 50, requested: 60 }));

        let reloaded = store.find(movie.id).await.expect("find").expect("movie exists");
        assert_eq!(reloaded.available_seats, 50);
    }

    #[tokio::test]
    async fn decrease_missing_or_deleted_movie_is_not_found() {
        let store = setup().await;

        let err = store.decrease_seats(999, 1).await.expect_err("must fail");
        assert!(matches!(err, AppError::NotFound));

        let movie = store.insert("Seven", 10).await.expect("insert");
        store.soft_delete(movie.id).await.expect("delete");
        let err = store.decrease_seats(movie.id, 1).await.expect_err("must fail");
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn racing_decrements_cannot_oversell() {
        let store = setup().await;
        let movie = store.insert("Tenet", 50).await.expect("insert");

        let (a, b) = tokio::join!(
            store.decrease_seats(movie.id, 30),
            store.decrease_seats(movie.id, 30),
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1, "exactly one booking may win");

        let reloaded = store.find(movie.id).await.expect("find").expect("movie exists");
        assert_eq!(reloaded.available_seats, 20);
    }
}
