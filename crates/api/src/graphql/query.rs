use std::collections::HashMap;

use async_graphql::{Context, Object, Result};
use bely_core::catalog::{
    clamp_limit, clamp_offset, search_pattern, validate_price_range, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
use bely_core::content::{ContentKind, ContentTarget};
use bely_core::error::CoreError;
use bely_core::feedback::RatingSummary;
use bely_core::types::DbId;
use bely_db::models::product::ProductFilter;
use bely_db::repositories::{
    ArticleRepo, AuthorRepo, LiteraryWorkRepo, PlaceRepo, ProductRepo, RatingRepo,
};
use bely_db::DbPool;
use rust_decimal::Decimal;

use super::gql_error;
use super::types::{ArticleNode, AuthorObject, Feedback, LiteraryWorkNode, PlaceNode, ProductNode};

pub struct QueryRoot;

fn page(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    (
        clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        clamp_offset(offset),
    )
}

/// Rating summaries for a listed page, fetched in one query.
async fn prefetch(
    pool: &DbPool,
    kind: ContentKind,
    ids: &[DbId],
) -> Result<HashMap<DbId, RatingSummary>> {
    RatingRepo::summaries(pool, kind, ids)
        .await
        .map_err(gql_error)
}

fn listed(kind: ContentKind, id: DbId, summaries: &HashMap<DbId, RatingSummary>) -> Feedback {
    let summary = summaries
        .get(&id)
        .copied()
        .unwrap_or_else(RatingSummary::empty);
    Feedback::new(ContentTarget::new(kind, id), Some(summary))
}

fn single(kind: ContentKind, id: DbId) -> Feedback {
    Feedback::new(ContentTarget::new(kind, id), None)
}

#[Object]
impl QueryRoot {
    /// Articles, newest first.
    async fn articles(
        &self,
        ctx: &Context<'_>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ArticleNode>> {
        let pool = ctx.data::<DbPool>()?;
        let (limit, offset) = page(limit, offset);
        let articles = ArticleRepo::list(pool, limit, offset)
            .await
            .map_err(gql_error)?;
        let ids: Vec<DbId> = articles.iter().map(|a| a.id).collect();
        let summaries = prefetch(pool, ContentKind::Article, &ids).await?;
        Ok(articles
            .into_iter()
            .map(|article| ArticleNode {
                feedback: listed(ContentKind::Article, article.id, &summaries),
                article,
            })
            .collect())
    }

    /// One article by `id` or `slug`; exactly one must be given.
    async fn article(
        &self,
        ctx: &Context<'_>,
        id: Option<DbId>,
        slug: Option<String>,
    ) -> Result<Option<ArticleNode>> {
        let pool = ctx.data::<DbPool>()?;
        let article = match (id, slug) {
            (Some(id), None) => ArticleRepo::find_by_id(pool, id).await,
            (None, Some(slug)) => ArticleRepo::find_by_slug(pool, &slug).await,
            _ => {
                return Err(gql_error(CoreError::Validation(
                    "Provide exactly one of `id` or `slug`".into(),
                )))
            }
        }
        .map_err(gql_error)?;
        Ok(article.map(|article| ArticleNode {
            feedback: single(ContentKind::Article, article.id),
            article,
        }))
    }

    /// Products matching an optional price range and title search.
    async fn products(
        &self,
        ctx: &Context<'_>,
        min_price: Option<Decimal>,
        max_price: Option<Decimal>,
        search: Option<String>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ProductNode>> {
        let pool = ctx.data::<DbPool>()?;
        validate_price_range(min_price, max_price).map_err(gql_error)?;
        let (limit, offset) = page(limit, offset);
        let filter = ProductFilter {
            min_price,
            max_price,
            title_pattern: search_pattern(search.as_deref()),
            limit,
            offset,
        };
        let products = ProductRepo::list(pool, &filter).await.map_err(gql_error)?;
        let ids: Vec<DbId> = products.iter().map(|p| p.id).collect();
        let summaries = prefetch(pool, ContentKind::Product, &ids).await?;
        Ok(products
            .into_iter()
            .map(|product| ProductNode {
                feedback: listed(ContentKind::Product, product.id, &summaries),
                product,
            })
            .collect())
    }

    async fn product(&self, ctx: &Context<'_>, id: DbId) -> Result<Option<ProductNode>> {
        let pool = ctx.data::<DbPool>()?;
        let product = ProductRepo::find_by_id(pool, id).await.map_err(gql_error)?;
        Ok(product.map(|product| ProductNode {
            feedback: single(ContentKind::Product, id),
            product,
        }))
    }

    async fn places(
        &self,
        ctx: &Context<'_>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<PlaceNode>> {
        let pool = ctx.data::<DbPool>()?;
        let (limit, offset) = page(limit, offset);
        let places = PlaceRepo::list(pool, limit, offset)
            .await
            .map_err(gql_error)?;
        let ids: Vec<DbId> = places.iter().map(|p| p.id).collect();
        let summaries = prefetch(pool, ContentKind::Place, &ids).await?;
        Ok(places
            .into_iter()
            .map(|place| PlaceNode {
                feedback: listed(ContentKind::Place, place.id, &summaries),
                place,
            })
            .collect())
    }

    async fn place(&self, ctx: &Context<'_>, id: DbId) -> Result<Option<PlaceNode>> {
        let pool = ctx.data::<DbPool>()?;
        let place = PlaceRepo::find_by_id(pool, id).await.map_err(gql_error)?;
        Ok(place.map(|place| PlaceNode {
            feedback: single(ContentKind::Place, id),
            place,
        }))
    }

    async fn literary_works(
        &self,
        ctx: &Context<'_>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<LiteraryWorkNode>> {
        let pool = ctx.data::<DbPool>()?;
        let (limit, offset) = page(limit, offset);
        let works = LiteraryWorkRepo::list(pool, limit, offset)
            .await
            .map_err(gql_error)?;
        let ids: Vec<DbId> = works.iter().map(|w| w.id).collect();
        let summaries = prefetch(pool, ContentKind::LiteraryWork, &ids).await?;
        Ok(works
            .into_iter()
            .map(|work| LiteraryWorkNode {
                feedback: listed(ContentKind::LiteraryWork, work.id, &summaries),
                work,
            })
            .collect())
    }

    async fn literary_work(
        &self,
        ctx: &Context<'_>,
        id: DbId,
    ) -> Result<Option<LiteraryWorkNode>> {
        let pool = ctx.data::<DbPool>()?;
        let work = LiteraryWorkRepo::find_by_id(pool, id)
            .await
            .map_err(gql_error)?;
        Ok(work.map(|work| LiteraryWorkNode {
            feedback: single(ContentKind::LiteraryWork, id),
            work,
        }))
    }

    async fn authors(
        &self,
        ctx: &Context<'_>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<AuthorObject>> {
        let pool = ctx.data::<DbPool>()?;
        let (limit, offset) = page(limit, offset);
        let authors = AuthorRepo::list(pool, limit, offset)
            .await
            .map_err(gql_error)?;
        Ok(authors.into_iter().map(Into::into).collect())
    }

    async fn author(&self, ctx: &Context<'_>, id: DbId) -> Result<Option<AuthorObject>> {
        let pool = ctx.data::<DbPool>()?;
        let author = AuthorRepo::find_by_id(pool, id).await.map_err(gql_error)?;
        Ok(author.map(Into::into))
    }
}
