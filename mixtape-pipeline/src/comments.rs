//! Flattening of nested comment threads.

use mixtape_common::CommentNode;

/// Every comment body in the forest, depth-first pre-order: a comment comes
/// before its replies, siblings keep their order. Comments without a body are
/// skipped but their replies are still visited.
///
/// Uses an explicit stack, so reply depth is bounded by memory rather than the
/// call stack.
pub fn collect_bodies(forest: Option<&[CommentNode]>) -> Vec<&str> {
    let Some(roots) = forest else {
        return Vec::new();
    };

    let mut bodies = Vec::new();
    let mut stack: Vec<&CommentNode> = roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if let Some(body) = node.body.as_deref() {
            bodies.push(body);
        }
        stack.extend(node.children.iter().rev());
    }
    bodies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(body: &str) -> CommentNode {
        CommentNode::new(body)
    }

    #[test]
    fn absent_forest_yields_nothing() {
        assert!(collect_bodies(None).is_empty());
        assert!(collect_bodies(Some(&[][..])).is_empty());
    }

    #[test]
    fn three_levels_in_pre_order() {
        let forest = vec![
            CommentNode::new("a").with_children(vec![
                CommentNode::new("a1").with_children(vec![leaf("a1x"), leaf("a1y")]),
                leaf("a2"),
            ]),
            CommentNode::new("b").with_children(vec![
                CommentNode::new("b1").with_children(vec![leaf("b1x")]),
            ]),
        ];
        assert_eq!(
            collect_bodies(Some(forest.as_slice())),
            vec!["a", "a1", "a1x", "a1y", "a2", "b", "b1", "b1x"]
        );
    }

    #[test]
    fn bodiless_comments_still_expose_replies() {
        let forest = vec![CommentNode {
            body: None,
            children: vec![leaf("reply")],
        }];
        assert_eq!(collect_bodies(Some(forest.as_slice())), vec!["reply"]);
    }

    #[test]
    fn deep_threads_do_not_overflow() {
        let mut node = leaf("bottom");
        for i in 0..100_000 {
            node = CommentNode::new(format!("level {i}")).with_children(vec![node]);
        }
        let forest = vec![node];
        let bodies = collect_bodies(Some(forest.as_slice()));
        assert_eq!(bodies.len(), 100_001);
        assert_eq!(bodies.first(), Some(&"level 99999"));
        assert_eq!(bodies.last(), Some(&"bottom"));
        // Dropping a 100k-deep tree recurses; unwind it by hand.
        let mut forest = forest;
        while let Some(mut n) = forest.pop() {
            forest.append(&mut n.children);
        }
    }
}
