use glam::Vec2;

use crate::{
    collision::aabb::BoundingBox,
    core::body_set::{BodyHandle, BodySet},
};

/// Items a node holds before it tries to split.
pub const MAX_OBJECTS: usize = 10;

/// Deepest level a node may split at.
pub const MAX_LEVELS: usize = 5;

#[derive(Debug, Clone)]
struct QuadNode {
    level: usize,
    bounds: BoundingBox,
    items: Vec<(BodyHandle, BoundingBox)>,
    children: Option<Box<[QuadNode; 4]>>,
}

impl QuadNode {
    fn new(level: usize, bounds: BoundingBox) -> Self {
        Self {
            level,
            bounds,
            items: Vec::new(),
            children: None,
        }
    }

    fn clear(&mut self) {
        self.items.clear();
        self.children = None;
    }

    fn split(&mut self) {
        let min = self.bounds.min;
        let max = self.bounds.max;
        let mid = self.bounds.center();
        let level = self.level + 1;
        self.children = Some(Box::new([
            QuadNode::new(level, BoundingBox::new(min, mid)),
            QuadNode::new(
                level,
                BoundingBox::new(Vec2::new(mid.x, min.y), Vec2::new(max.x, mid.y)),
            ),
            QuadNode::new(
                level,
                BoundingBox::new(Vec2::new(min.x, mid.y), Vec2::new(mid.x, max.y)),
            ),
            QuadNode::new(level, BoundingBox::new(mid, max)),
        ]));
    }

    /// Quadrant that fully contains `bbox`, `None` when it straddles a
    /// midline or pokes outside this node.
    fn quadrant(&self, bbox: &BoundingBox) -> Option<usize> {
        let inside = bbox.min.x >= self.bounds.min.x
            && bbox.max.x <= self.bounds.max.x
            && bbox.min.y >= self.bounds.min.y
            && bbox.max.y <= self.bounds.max.y;
        if !inside {
            return None;
        }

        let mid = self.bounds.center();
        let left = bbox.max.x < mid.x;
        let right = bbox.min.x > mid.x;
        let low = bbox.max.y < mid.y;
        let high = bbox.min.y > mid.y;
        match (left, right, low, high) {
            (true, _, true, _) => Some(0),
            (_, true, true, _) => Some(1),
            (true, _, _, true) => Some(2),
            (_, true, _, true) => Some(3),
            _ => None,
        }
    }

    fn insert(&mut self, handle: BodyHandle, bbox: BoundingBox) {
        if self.children.is_some() {
            if let (Some(index), Some(children)) = (self.quadrant(&bbox), self.children.as_mut()) {
                children[index].insert(handle, bbox);
                return;
            }
        }

        self.items.push((handle, bbox));

        if self.items.len() > MAX_OBJECTS && self.level < MAX_LEVELS {
            if self.children.is_none() {
                self.split();
            }
            let items = std::mem::take(&mut self.items);
            for (handle, bbox) in items {
                match (self.quadrant(&bbox), self.children.as_mut()) {
                    (Some(index), Some(children)) => children[index].insert(handle, bbox),
                    _ => self.items.push((handle, bbox)),
                }
            }
        }
    }

    fn query(&self, bbox: &BoundingBox, out: &mut Vec<BodyHandle>) {
        out.extend(self.items.iter().map(|(handle, _)| *handle));
        let Some(children) = self.children.as_ref() else {
            return;
        };
        match self.quadrant(bbox) {
            Some(index) => children[index].query(bbox, out),
            None => {
                for child in children.iter() {
                    child.collect_all(out);
                }
            }
        }
    }

    fn collect_all(&self, out: &mut Vec<BodyHandle>) {
        out.extend(self.items.iter().map(|(handle, _)| *handle));
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.collect_all(out);
            }
        }
    }

    fn depth(&self) -> usize {
        match self.children.as_ref() {
            Some(children) => children.iter().map(QuadNode::depth).max().unwrap_or(0) + 1,
            None => 0,
        }
    }
}

/// Region quadtree over body bounding boxes, rebuilt every step.
///
/// An item that straddles a quadrant boundary stays in the parent node.
/// Queries return a superset of the items whose boxes may overlap the
/// query box: when the query box itself straddles a node, everything
/// below that node is reported.
#[derive(Debug, Clone)]
pub struct QuadTree {
    root: QuadNode,
    len: usize,
}

impl QuadTree {
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            root: QuadNode::new(0, bounds),
            len: 0,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        self.root.bounds
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of split levels below the root.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn clear(&mut self) {
        self.root.clear();
        self.len = 0;
    }

    pub fn insert(&mut self, handle: BodyHandle, bbox: BoundingBox) {
        self.root.insert(handle, bbox);
        self.len += 1;
    }

    /// Candidate handles for `bbox`, sorted and without duplicates.
    pub fn query(&self, bbox: &BoundingBox) -> Vec<BodyHandle> {
        let mut results = Vec::new();
        self.root.query(bbox, &mut results);
        results.sort();
        results.dedup();
        results
    }
}

/// Broad phase driver returning potentially colliding body pairs.
#[derive(Debug, Clone)]
pub struct BroadPhase {
    tree: QuadTree,
}

impl BroadPhase {
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            tree: QuadTree::new(bounds),
        }
    }

    pub fn tree(&self) -> &QuadTree {
        &self.tree
    }

    /// Rebuilds the tree from the current body poses.
    pub fn rebuild(&mut self, bodies: &BodySet) {
        self.tree.clear();
        for body in bodies.iter() {
            self.tree.insert(body.id, body.bounding_box());
        }
    }

    /// Rebuilds the tree and lists every pair whose boxes overlap.
    ///
    /// A pair may appear once from each side; deduplication is left to the
    /// caller's pair cache.
    pub fn get_potential_pairs(&mut self, bodies: &BodySet) -> Vec<(BodyHandle, BodyHandle)> {
        self.rebuild(bodies);

        let mut pairs = Vec::new();
        for body in bodies.iter() {
            let bbox = body.bounding_box();
            for other in self.tree.query(&bbox) {
                if other == body.id {
                    continue;
                }
                let overlaps = bodies
                    .get(other)
                    .is_some_and(|other_body| bbox.overlaps(&other_body.bounding_box()));
                if overlaps {
                    pairs.push((body.id, other));
                }
            }
        }
        pairs
    }
}
