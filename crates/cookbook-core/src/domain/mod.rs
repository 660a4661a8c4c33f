//! Domain entities - the core business objects.

mod category;
mod post;
mod user;

pub use category::{Category, validate_category_name};
pub use post::{NewPost, Post, PostPatch, PostStatus};
pub use user::{
    MIN_PASSWORD_LEN, PublicUser, User, mask_email, normalize_email, validate_email,
    validate_password,
};
