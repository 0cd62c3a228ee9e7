//! GraphQL object types.
//!
//! Database rows are wrapped rather than derived so `bely-db` stays free of
//! GraphQL concerns.

use async_graphql::{Context, Object, Result, SimpleObject};
use bely_core::content::ContentTarget;
use bely_core::feedback::RatingSummary;
use bely_core::types::{DbId, Timestamp};
use bely_db::models::article::Article;
use bely_db::models::author::{Author, ProductAuthorCredit};
use bely_db::models::feedback::{CommentWithUser, RatingWithUser};
use bely_db::models::literary_work::LiteraryWork;
use bely_db::models::place::Place;
use bely_db::models::product::Product;
use bely_db::repositories::{AuthorRepo, CommentRepo, RatingRepo};
use bely_db::DbPool;
use rust_decimal::Decimal;

use super::gql_error;

/* --------------------------------------------------------------------------
Leaf objects
-------------------------------------------------------------------------- */

#[derive(SimpleObject)]
#[graphql(name = "RatingSummary")]
pub struct SummaryObject {
    /// `null` when the target has no ratings.
    pub average: Option<f64>,
    pub count: i64,
}

impl From<RatingSummary> for SummaryObject {
    fn from(s: RatingSummary) -> Self {
        Self {
            average: s.average,
            count: s.count,
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "Rating")]
pub struct RatingObject {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub value: i32,
    pub created_at: Timestamp,
}

impl From<RatingWithUser> for RatingObject {
    fn from(r: RatingWithUser) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            username: r.username,
            value: i32::from(r.value),
            created_at: r.created_at,
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "Comment")]
pub struct CommentObject {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub avatar_path: Option<String>,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CommentWithUser> for CommentObject {
    fn from(c: CommentWithUser) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            username: c.username,
            avatar_path: c.avatar_path,
            text: c.text,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "Author")]
pub struct AuthorObject {
    pub id: DbId,
    pub name: String,
    pub bio: String,
    pub photo_path: Option<String>,
    pub created_at: Timestamp,
}

impl From<Author> for AuthorObject {
    fn from(a: Author) -> Self {
        Self {
            id: a.id,
            name: a.name,
            bio: a.bio,
            photo_path: a.photo_path,
            created_at: a.created_at,
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "AuthorCredit")]
pub struct AuthorCreditObject {
    pub author_id: DbId,
    pub name: String,
    pub photo_path: Option<String>,
    pub role: String,
}

impl From<ProductAuthorCredit> for AuthorCreditObject {
    fn from(c: ProductAuthorCredit) -> Self {
        Self {
            author_id: c.author_id,
            name: c.name,
            photo_path: c.photo_path,
            role: c.role,
        }
    }
}

/* --------------------------------------------------------------------------
Feedback shared by all content nodes
-------------------------------------------------------------------------- */

/// A content target with its rating summary, prefetched when listed.
pub struct Feedback {
    target: ContentTarget,
    summary: Option<RatingSummary>,
}

impl Feedback {
    pub fn new(target: ContentTarget, summary: Option<RatingSummary>) -> Self {
        Self { target, summary }
    }

    async fn summary(&self, ctx: &Context<'_>) -> Result<RatingSummary> {
        if let Some(summary) = self.summary {
            return Ok(summary);
        }
        let pool = ctx.data::<DbPool>()?;
        RatingRepo::summary(pool, self.target)
            .await
            .map_err(gql_error)
    }

    async fn ratings(&self, ctx: &Context<'_>) -> Result<Vec<RatingObject>> {
        let pool = ctx.data::<DbPool>()?;
        let ratings = RatingRepo::list_for_target(pool, self.target)
            .await
            .map_err(gql_error)?;
        Ok(ratings.into_iter().map(Into::into).collect())
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<CommentObject>> {
        let pool = ctx.data::<DbPool>()?;
        let comments = CommentRepo::list_for_target(pool, self.target)
            .await
            .map_err(gql_error)?;
        Ok(comments.into_iter().map(Into::into).collect())
    }
}

/* --------------------------------------------------------------------------
Content nodes
-------------------------------------------------------------------------- */

pub struct ArticleNode {
    pub article: Article,
    pub feedback: Feedback,
}

#[Object(name = "Article")]
impl ArticleNode {
    async fn id(&self) -> DbId {
        self.article.id
    }

    async fn title(&self) -> &str {
        &self.article.title
    }

    async fn slug(&self) -> &str {
        &self.article.slug
    }

    async fn image_path(&self) -> Option<&str> {
        self.article.image_path.as_deref()
    }

    async fn content(&self) -> &str {
        &self.article.content
    }

    async fn created_at(&self) -> Timestamp {
        self.article.created_at
    }

    async fn updated_at(&self) -> Timestamp {
        self.article.updated_at
    }

    async fn average_rating(&self, ctx: &Context<'_>) -> Result<Option<f64>> {
        Ok(self.feedback.summary(ctx).await?.average)
    }

    async fn rating_count(&self, ctx: &Context<'_>) -> Result<i64> {
        Ok(self.feedback.summary(ctx).await?.count)
    }

    async fn ratings(&self, ctx: &Context<'_>) -> Result<Vec<RatingObject>> {
        self.feedback.ratings(ctx).await
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<CommentObject>> {
        self.feedback.comments(ctx).await
    }
}

pub struct ProductNode {
    pub product: Product,
    pub feedback: Feedback,
}

#[Object(name = "Product")]
impl ProductNode {
    async fn id(&self) -> DbId {
        self.product.id
    }

    async fn title(&self) -> &str {
        &self.product.title
    }

    async fn price(&self) -> Decimal {
        self.product.price
    }

    async fn image_path(&self) -> Option<&str> {
        self.product.image_path.as_deref()
    }

    async fn description(&self) -> &str {
        &self.product.description
    }

    async fn created_at(&self) -> Timestamp {
        self.product.created_at
    }

    /// Served from the cached column, kept in step with every rating write.
    async fn average_rating(&self) -> Option<f64> {
        self.product.average_rating
    }

    async fn rating_count(&self, ctx: &Context<'_>) -> Result<i64> {
        Ok(self.feedback.summary(ctx).await?.count)
    }

    async fn ratings(&self, ctx: &Context<'_>) -> Result<Vec<RatingObject>> {
        self.feedback.ratings(ctx).await
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<CommentObject>> {
        self.feedback.comments(ctx).await
    }

    async fn authors(&self, ctx: &Context<'_>) -> Result<Vec<AuthorCreditObject>> {
        let pool = ctx.data::<DbPool>()?;
        let credits = AuthorRepo::list_for_product(pool, self.product.id)
            .await
            .map_err(gql_error)?;
        Ok(credits.into_iter().map(Into::into).collect())
    }
}

pub struct PlaceNode {
    pub place: Place,
    pub feedback: Feedback,
}

#[Object(name = "Place")]
impl PlaceNode {
    async fn id(&self) -> DbId {
        self.place.id
    }

    async fn title(&self) -> &str {
        &self.place.title
    }

    async fn address(&self) -> &str {
        &self.place.address
    }

    async fn description(&self) -> &str {
        &self.place.description
    }

    async fn created_at(&self) -> Timestamp {
        self.place.created_at
    }

    async fn average_rating(&self, ctx: &Context<'_>) -> Result<Option<f64>> {
        Ok(self.feedback.summary(ctx).await?.average)
    }

    async fn rating_count(&self, ctx: &Context<'_>) -> Result<i64> {
        Ok(self.feedback.summary(ctx).await?.count)
    }

    async fn ratings(&self, ctx: &Context<'_>) -> Result<Vec<RatingObject>> {
        self.feedback.ratings(ctx).await
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<CommentObject>> {
        self.feedback.comments(ctx).await
    }
}

pub struct LiteraryWorkNode {
    pub work: LiteraryWork,
    pub feedback: Feedback,
}

#[Object(name = "LiteraryWork")]
impl LiteraryWorkNode {
    async fn id(&self) -> DbId {
        self.work.id
    }

    async fn title(&self) -> &str {
        &self.work.title
    }

    async fn content(&self) -> &str {
        &self.work.content
    }

    async fn image_path(&self) -> Option<&str> {
        self.work.image_path.as_deref()
    }

    async fn created_at(&self) -> Timestamp {
        self.work.created_at
    }

    async fn average_rating(&self, ctx: &Context<'_>) -> Result<Option<f64>> {
        Ok(self.feedback.summary(ctx).await?.average)
    }

    async fn rating_count(&self, ctx: &Context<'_>) -> Result<i64> {
        Ok(self.feedback.summary(ctx).await?.count)
    }

    async fn ratings(&self, ctx: &Context<'_>) -> Result<Vec<RatingObject>> {
        self.feedback.ratings(ctx).await
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<CommentObject>> {
        self.feedback.comments(ctx).await
    }
}
