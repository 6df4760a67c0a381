use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Password,
    Role,
}

#[derive(Iden)]
enum Cards {
    Table,
    Id,
    Name,
    Bank,
    UserId,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    Description,
    Amount,
    Date,
    DueDate,
    Installment,
    TotalInstallments,
    Responsible,
    CardId,
    PurchaseId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cards::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cards::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Cards::Name).string().not_null())
                    .col(ColumnDef::new(Cards::Bank).string().not_null())
                    .col(ColumnDef::new(Cards::UserId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cards-user_id")
                            .from(Cards::Table, Cards::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-cards-user_id")
                    .table(Cards::Table)
                    .col(Cards::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::Description).string().not_null())
                    .col(ColumnDef::new(Expenses::Amount).double().not_null())
                    .col(ColumnDef::new(Expenses::Date).timestamp().not_null())
                    .col(ColumnDef::new(Expenses::DueDate).timestamp().not_null())
                    .col(ColumnDef::new(Expenses::Installment).integer().not_null())
                    .col(
                        ColumnDef::new(Expenses::TotalInstallments)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::Responsible).string().not_null())
                    .col(ColumnDef::new(Expenses::CardId).string().not_null())
                    .col(ColumnDef::new(Expenses::PurchaseId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-card_id")
                            .from(Expenses::Table, Expenses::CardId)
                            .to(Cards::Table, Cards::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-due_date")
                    .table(Expenses::Table)
                    .col(Expenses::DueDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-purchase_id")
                    .table(Expenses::Table)
                    .col(Expenses::PurchaseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-responsible")
                    .table(Expenses::Table)
                    .col(Expenses::Responsible)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
