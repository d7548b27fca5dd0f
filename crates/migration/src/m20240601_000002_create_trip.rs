//! Create `trip` table with FK to `destination`.
//!
//! Deleting a destination removes its trips (also done explicitly by the service layer).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trip::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Trip::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(date(Trip::StartDate).not_null())
                    .col(date(Trip::EndDate).not_null())
                    .col(double(Trip::Price).not_null())
                    .col(big_integer(Trip::DestinationId).not_null())
                    .check(Expr::col(Trip::StartDate).lte(Expr::col(Trip::EndDate)))
                    .check(Expr::col(Trip::Price).gt(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trip_destination")
                            .from(Trip::Table, Trip::DestinationId)
                            .to(Destination::Table, Destination::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Trip::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Trip { Table, Id, StartDate, EndDate, Price, DestinationId }

#[derive(DeriveIden)]
enum Destination { Table, Id }
