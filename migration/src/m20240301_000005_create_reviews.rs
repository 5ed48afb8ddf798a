use sea_orm_migration::{prelude::*, schema::*};

use super::m20240301_000001_create_users::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FeedbackReview::Table)
                    .if_not_exists()
                    .col(pk_auto(FeedbackReview::Id))
                    .col(integer(FeedbackReview::UserId).not_null())
                    .col(string_len(FeedbackReview::Title, 200).not_null())
                    .col(text(FeedbackReview::Content).not_null())
                    .col(integer(FeedbackReview::Rating).not_null().default(5))
                    .col(
                        timestamp_with_time_zone(FeedbackReview::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(FeedbackReview::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_review_user")
                            .from(FeedbackReview::Table, FeedbackReview::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Faq::Table)
                    .if_not_exists()
                    .col(pk_auto(Faq::Id))
                    .col(string_len(Faq::Question, 255).not_null())
                    .col(text(Faq::Answer).not_null())
                    .col(
                        timestamp_with_time_zone(Faq::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Faq::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Faq::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(FeedbackReview::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FeedbackReview {
    Table,
    Id,
    UserId,
    Title,
    Content,
    Rating,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Faq {
    Table,
    Id,
    Question,
    Answer,
    CreatedAt,
    UpdatedAt,
}
