//! Precomputed field-of-vision trie.

use std::collections::VecDeque;

use crate::{los, Point};

const ROOT: usize = 0;

#[derive(Clone, Debug)]
struct FovNode {
    point: Point,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Prefix trie of sightlines radiating from the origin out to a fixed radius.
///
/// Every sightline from the origin to a cell on the boundary of the square of
/// side `2 * radius + 1` is threaded into the trie, so rays that start along
/// the same cells share nodes. Threading stops once a cell lies further than
/// `radius - 0.5` from the origin, which rounds the covered region into a
/// disc. The trie is immutable once built and can be shared between every
/// viewer using the same radius.
#[derive(Clone, Debug)]
pub struct Fov {
    radius: i32,
    nodes: Vec<FovNode>,
}

impl Fov {
    /// Builds the trie for the provided radius. Negative radii act as zero.
    #[must_use]
    pub fn new(radius: i32) -> Self {
        let radius = radius.max(0);
        let mut fov = Self {
            radius,
            nodes: vec![FovNode {
                point: Point::ORIGIN,
                parent: None,
                children: Vec::new(),
            }],
        };

        // One boundary per octant, mirrored into the other seven.
        for i in 0..=radius {
            for octant in 0..8 {
                let (x, y) = if octant & 1 == 0 { (i, radius) } else { (radius, i) };
                let x = if octant & 2 == 0 { -x } else { x };
                let y = if octant & 4 == 0 { -y } else { y };
                let line = los(Point::ORIGIN, Point::new(x, y));
                fov.insert(&line);
            }
        }
        fov
    }

    /// Radius the trie was built for.
    #[must_use]
    pub const fn radius(&self) -> i32 {
        self.radius
    }

    /// Number of nodes in the trie, including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Walks the trie breadth-first, visiting every reachable node once.
    ///
    /// `blocked` receives each node's offset from the origin and its parent's
    /// offset (`None` for the root). Returning `true` prunes the node's
    /// subtree, so rays stop at the first cell the caller deems opaque.
    pub fn field_of_vision<F>(&self, mut blocked: F)
    where
        F: FnMut(Point, Option<Point>) -> bool,
    {
        let mut queue = VecDeque::with_capacity(self.nodes.len());
        queue.push_back(ROOT);
        while let Some(index) = queue.pop_front() {
            let node = &self.nodes[index];
            let parent = node.parent.map(|parent| self.nodes[parent].point);
            if blocked(node.point, parent) {
                continue;
            }
            queue.extend(node.children.iter().copied());
        }
    }

    fn insert(&mut self, line: &[Point]) {
        // len > radius - 0.5  <=>  len^2 > radius^2 - radius for integer cells.
        let cutoff = self.radius * self.radius - self.radius;
        let mut current = ROOT;
        for &point in line.iter().skip(1) {
            if point.len_squared() > cutoff {
                break;
            }
            let existing = self.nodes[current]
                .children
                .iter()
                .copied()
                .find(|&child| self.nodes[child].point == point);
            current = match existing {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(FovNode {
                        point,
                        parent: Some(current),
                        children: Vec::new(),
                    });
                    self.nodes[current].children.push(child);
                    child
                }
            };
        }
    }
}
