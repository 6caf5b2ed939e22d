use sea_orm_migration::{
    prelude::*,
    schema::{integer, pk_auto, string, timestamp},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tag::Table)
                    .if_not_exists()
                    .col(pk_auto(Tag::Id))
                    .col(string(Tag::TagName).unique_key())
                    .col(
                        timestamp(Tag::CreatedAt)
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .col(
                        timestamp(Tag::UpdatedAt)
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .to_owned(),
            )
            .await?;

        // Articles live outside this service; only the link table is owned here.
        manager
            .create_table(
                Table::create()
                    .table(ArticleTag::Table)
                    .if_not_exists()
                    .col(pk_auto(ArticleTag::Id))
                    .col(integer(ArticleTag::ArticleId))
                    .col(integer(ArticleTag::TagId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-article_tag-tag_id")
                            .from(ArticleTag::Table, ArticleTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-article_tag-article_id")
                    .table(ArticleTag::Table)
                    .col(ArticleTag::ArticleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArticleTag::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Tag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tag {
    Table,
    Id,
    TagName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ArticleTag {
    Table,
    Id,
    ArticleId,
    TagId,
}
