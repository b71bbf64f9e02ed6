use std::fmt;

use rand::seq::IndexedRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyCommentPool;

impl fmt::Display for EmptyCommentPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "comment pool is empty")
    }
}

impl std::error::Error for EmptyCommentPool {}

/// Immutable, non-empty, ordered set of comments to post after entering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPool {
    comments: Vec<String>,
}

impl CommentPool {
    pub fn new(comments: Vec<String>) -> Result<Self, EmptyCommentPool> {
        if comments.is_empty() {
            return Err(EmptyCommentPool);
        }
        Ok(Self { comments })
    }

    /// Uniformly random member of the pool.
    pub fn pick(&self) -> &str {
        self.pick_with(&mut rand::rng())
    }

    pub fn pick_with<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // Non-empty by construction.
        self.comments
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn contains(&self, comment: &str) -> bool {
        self.comments.iter().any(|c| c == comment)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.comments
    }
}
