use crate::domain::{content::Collection, errors::DomainError};

const CNT_BLOG_SLUG: &str = "blog_posts_slug_key";
const CNT_WRITING_SLUG: &str = "writings_slug_key";

const SQLSTATE_UNIQUE_VIOLATION: &str = "23505";
const SQLSTATE_UNDEFINED_TABLE: &str = "42P01";

/// Maps a driver error raised while working on `collection`'s table.
pub fn map_sqlx(collection: Collection) -> impl Fn(sqlx::Error) -> DomainError {
    move |err| map_sqlx_error(collection, &err)
}

fn map_sqlx_error(collection: Collection, err: &sqlx::Error) -> DomainError {
    let sqlx::Error::Database(db_err) = err else {
        return DomainError::Persistence(err.to_string());
    };

    if let Some(CNT_BLOG_SLUG | CNT_WRITING_SLUG) = db_err.constraint() {
        return slug_conflict(collection);
    }

    match db_err.code().as_deref() {
        Some(SQLSTATE_UNIQUE_VIOLATION) => slug_conflict(collection),
        Some(SQLSTATE_UNDEFINED_TABLE) => DomainError::CollectionUnavailable(collection),
        _ => DomainError::Persistence(db_err.message().to_string()),
    }
}

fn slug_conflict(collection: Collection) -> DomainError {
    DomainError::Conflict(format!(
        "A {} with this slug already exists",
        collection.label()
    ))
}
