pub mod articles;
pub mod auth;
pub mod authors;
pub mod cart;
pub mod comments;
pub mod feedback;
pub mod graphql;
pub mod health;
pub mod literary_works;
pub mod places;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (auth)
/// /auth/profile                                    get, update, deactivate (auth)
///
/// /articles                                        list, create (admin)
/// /articles/{id}                                   get, update, delete (admin)
/// /articles/slug/{slug}                            get by slug
///
/// /products                                        list (filters), create (admin)
/// /products/statistics                             catalog figures
/// /products/sheets                                 batch sheet data (POST)
/// /products/{id}                                   get, update, delete (admin)
/// /products/{id}/sheet                             sheet data
/// /products/{id}/authors                           list, credit (PUT, admin)
/// /products/{id}/authors/{author_id}               remove credit (admin)
///
/// /places                                          list, create (admin)
/// /places/{id}                                     get, update, delete (admin)
///
/// /literary-works                                  list, create (admin)
/// /literary-works/{id}                             get, update, delete (admin)
///
/// /authors                                         list, create (admin)
/// /authors/{id}                                    get, update, delete (admin)
///
/// /feedback/{target_type}/{target_id}/ratings      list, rate (PUT), remove own (DELETE)
/// /feedback/{target_type}/{target_id}/comments     list, create (auth)
/// /comments/{id}                                   edit (author), delete (author or admin)
///
/// /cart                                            view, clear (auth)
/// /cart/items                                      add (auth)
/// /cart/items/{id}                                 update quantity, remove (auth)
///
/// /graphql                                         GraphQL endpoint (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/articles", articles::router())
        .nest("/products", products::router())
        .nest("/places", places::router())
        .nest("/literary-works", literary_works::router())
        .nest("/authors", authors::router())
        .nest("/feedback", feedback::router())
        .nest("/comments", comments::router())
        .nest("/cart", cart::router())
        .merge(graphql::router())
}
