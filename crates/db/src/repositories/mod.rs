//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod article_repo;
pub mod author_repo;
pub mod cart_repo;
pub mod comment_repo;
pub mod content_repo;
pub mod literary_work_repo;
pub mod place_repo;
pub mod product_repo;
pub mod rating_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use article_repo::ArticleRepo;
pub use author_repo::AuthorRepo;
pub use cart_repo::CartRepo;
pub use comment_repo::CommentRepo;
pub use content_repo::ContentRepo;
pub use literary_work_repo::LiteraryWorkRepo;
pub use place_repo::PlaceRepo;
pub use product_repo::ProductRepo;
pub use rating_repo::RatingRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
