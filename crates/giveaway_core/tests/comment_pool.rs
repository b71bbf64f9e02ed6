use giveaway_core::{CommentPool, EmptyCommentPool};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn empty_pool_is_rejected() {
    assert_eq!(CommentPool::new(Vec::new()), Err(EmptyCommentPool));
}

#[test]
fn pick_always_returns_a_member() {
    let pool = CommentPool::new(vec![
        "Thanks".to_string(),
        "Thanks!".to_string(),
        "Thank you :)".to_string(),
    ])
    .unwrap();

    for _ in 0..200 {
        let picked = pool.pick();
        assert!(pool.contains(picked), "{picked} not in pool");
    }
}

#[test]
fn single_comment_pool_is_deterministic() {
    let pool = CommentPool::new(vec!["Thanks.".to_string()]).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        assert_eq!(pool.pick_with(&mut rng), "Thanks.");
    }
}

#[test]
fn pick_reaches_every_member_eventually() {
    let pool = CommentPool::new(vec!["a".to_string(), "b".to_string()]).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    let mut seen_a = false;
    let mut seen_b = false;
    for _ in 0..200 {
        match pool.pick_with(&mut rng) {
            "a" => seen_a = true,
            "b" => seen_b = true,
            other => panic!("unexpected comment {other}"),
        }
    }
    assert!(seen_a && seen_b);
}
