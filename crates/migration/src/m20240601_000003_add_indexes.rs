use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Destination: case-insensitive unique name. Expression indexes are
        // not expressible through the index builder.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uniq_destination_name_ci ON destination (LOWER(name))",
            )
            .await?;

        // Trip: index on destination_id (filtering + cascade)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_trip_destination")
                    .table(Trip::Table)
                    .col(Trip::DestinationId)
                    .to_owned(),
            )
            .await?;

        // Trip: default listing order
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_trip_start_date")
                    .table(Trip::Table)
                    .col(Trip::StartDate)
                    .col(Trip::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS uniq_destination_name_ci")
            .await?;
        manager
            .drop_index(Index::drop().name("idx_trip_destination").table(Trip::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_trip_start_date").table(Trip::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Trip { Table, DestinationId, StartDate, Id }
