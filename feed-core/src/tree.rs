//! Comment forest traversal.
//!
//! The backend delivers each post's comments as a pre-nested forest, so
//! every local operation is a plain recursive walk. The client never
//! rebuilds the tree from a flat list.

use echo_feed_types::{Comment, CommentId};

/// Find a comment anywhere in the forest.
pub fn find(forest: &[Comment], id: CommentId) -> Option<&Comment> {
    for comment in forest {
        if comment.id == id {
            return Some(comment);
        }
        if let Some(found) = find(&comment.replies, id) {
            return Some(found);
        }
    }
    None
}

/// Find a comment anywhere in the forest, mutably.
pub fn find_mut(forest: &mut [Comment], id: CommentId) -> Option<&mut Comment> {
    for comment in forest {
        if comment.id == id {
            return Some(comment);
        }
        if let Some(found) = find_mut(&mut comment.replies, id) {
            return Some(found);
        }
    }
    None
}

/// Total number of comments in the forest, nested replies included.
pub fn total(forest: &[Comment]) -> usize {
    forest.iter().map(|c| 1 + total(&c.replies)).sum()
}

/// Visit every comment in pre-order with its nesting depth (roots are
/// depth 0). Pre-order matches how a threaded view renders.
pub fn walk<'a, F>(forest: &'a [Comment], visit: &mut F)
where
    F: FnMut(&'a Comment, usize),
{
    walk_at(forest, 0, visit)
}

fn walk_at<'a, F>(forest: &'a [Comment], depth: usize, visit: &mut F)
where
    F: FnMut(&'a Comment, usize),
{
    for comment in forest {
        visit(comment, depth);
        walk_at(&comment.replies, depth + 1, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use echo_feed_types::CommentId;

    fn comment(id: i64, parent: Option<i64>, replies: Vec<Comment>) -> Comment {
        Comment {
            id: CommentId::new(id),
            author: "ada".into(),
            content: format!("comment {id}"),
            created_at: Utc::now(),
            likes_count: 0,
            user_has_liked: false,
            parent: parent.map(CommentId::new),
            replies,
        }
    }

    /// Two roots; the first has a child with a grandchild.
    fn sample_forest() -> Vec<Comment> {
        vec![
            comment(1, None, vec![comment(2, Some(1), vec![comment(3, Some(2), vec![])])]),
            comment(4, None, vec![]),
        ]
    }

    #[test]
    fn find_locates_deeply_nested_comment() {
        let forest = sample_forest();
        let found = find(&forest, CommentId::new(3)).unwrap();
        assert_eq!(found.parent, Some(CommentId::new(2)));
    }

    #[test]
    fn find_returns_none_for_missing_id() {
        let forest = sample_forest();
        assert!(find(&forest, CommentId::new(99)).is_none());
    }

    #[test]
    fn find_mut_reaches_nested_comment() {
        let mut forest = sample_forest();
        let found = find_mut(&mut forest, CommentId::new(2)).unwrap();
        found.likes_count = 7;
        assert_eq!(forest[0].replies[0].likes_count, 7);
    }

    #[test]
    fn total_counts_all_depths() {
        assert_eq!(total(&sample_forest()), 4);
        assert_eq!(total(&[]), 0);
    }

    #[test]
    fn walk_is_preorder_with_depths() {
        let forest = sample_forest();
        let mut seen = Vec::new();
        walk(&forest, &mut |c, depth| seen.push((c.id.value(), depth)));
        assert_eq!(seen, vec![(1, 0), (2, 1), (3, 2), (4, 0)]);
    }
}
