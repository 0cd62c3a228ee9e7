use async_graphql::{Context, Object, Result};
use bely_core::content::ContentTarget;
use bely_core::error::CoreError;
use bely_core::feedback::validate_rating;
use bely_core::types::DbId;
use bely_db::repositories::RatingRepo;
use bely_db::DbPool;

use super::gql_error;
use super::types::SummaryObject;
use crate::middleware::auth::AuthUser;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create or replace the caller's rating on a target. Requires a bearer token.
    async fn rate(
        &self,
        ctx: &Context<'_>,
        target_type: String,
        target_id: DbId,
        value: i32,
    ) -> Result<SummaryObject> {
        let user = ctx.data_opt::<AuthUser>().ok_or_else(|| {
            gql_error(CoreError::Unauthorized("Authentication required".into()))
        })?;
        let pool = ctx.data::<DbPool>()?;

        let target = ContentTarget::parse(&target_type, target_id).map_err(gql_error)?;
        let value = validate_rating(value).map_err(gql_error)?;

        let (_, summary) = RatingRepo::upsert(pool, user.user_id, target, value)
            .await
            .map_err(gql_error)?
            .ok_or_else(|| gql_error(target.not_found()))?;

        tracing::info!(
            user_id = user.user_id,
            target_type = %target.kind,
            target_id,
            value,
            "Rating saved via GraphQL"
        );
        Ok(summary.into())
    }
}
