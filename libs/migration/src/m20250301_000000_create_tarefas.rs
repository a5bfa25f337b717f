use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // status is stored as its integer code (0 = Pendente, 1 = Finalizado)
        manager
            .create_table(
                Table::create()
                    .table(Tarefas::Table)
                    .if_not_exists()
                    .col(pk_auto(Tarefas::Id))
                    .col(string(Tarefas::Titulo).default(""))
                    .col(text_null(Tarefas::Descricao))
                    .col(date_time(Tarefas::Data))
                    .col(integer(Tarefas::Status).default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tarefas_data")
                    .table(Tarefas::Table)
                    .col(Tarefas::Data)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tarefas_status")
                    .table(Tarefas::Table)
                    .col(Tarefas::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tarefas::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tarefas {
    Table,
    Id,
    Titulo,
    Descricao,
    Data,
    Status,
}
