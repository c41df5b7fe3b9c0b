use crate::domain::content::entity::ContentItem;

/// Combines the newest items of both collections into one feed, most recent
/// first, truncated to `limit`.
pub fn merge_latest(
    blog_posts: Vec<ContentItem>,
    writings: Vec<ContentItem>,
    limit: usize,
) -> Vec<ContentItem> {
    let mut combined: Vec<ContentItem> = blog_posts.into_iter().chain(writings).collect();
    combined.sort_by(|a, b| {
        b.recency()
            .cmp(&a.recency())
            .then_with(|| b.updated_at.cmp(&a.updated_at))
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    combined.truncate(limit);
    combined
}
