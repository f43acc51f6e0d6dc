use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string(Movies::Title))
                    .col(integer(Movies::AvailableSeats).default(0))
                    .col(big_integer(Movies::CreatedAt))
                    .col(big_integer(Movies::UpdatedAt))
                    .col(big_integer_null(Movies::DeletedAt))
                    .to_owned(),
            )
            .await?;

        // every read filters live rows on deleted_at
        manager
            .create_index(
                Index::create()
                    .name("idx_movies_deleted_at")
                    .table(Movies::Table)
                    .col(Movies::DeletedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Title,
    AvailableSeats,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
