//! BSP trees over convex polygons, the core of the CSG booleans.
//!
//! Each node holds a splitting plane, the polygons coplanar with it, and
//! front/back subtrees. Union is expressed as clipping each solid's polygons
//! against the other's tree and keeping what lies outside.
//!
//! Trees built from curved solids degenerate into long chains (every face of
//! a convex solid lands behind every other), so all traversals use explicit
//! work stacks instead of recursion.

use crate::polygon::{Plane, Polygon, Split};

/// A node of a BSP tree.
#[derive(Debug, Default)]
pub(crate) struct Node {
    plane: Option<Plane>,
    polygons: Vec<Polygon>,
    front: Option<Box<Node>>,
    back: Option<Box<Node>>,
}

impl Node {
    /// Build a tree from a polygon soup.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut node = Self::default();
        node.build(polygons);
        node
    }

    /// Swap solid and empty space.
    pub fn invert(&mut self) {
        let mut stack: Vec<&mut Node> = vec![self];
        while let Some(node) = stack.pop() {
            let Node {
                plane,
                polygons,
                front,
                back,
            } = node;
            for p in polygons.iter_mut() {
                p.flip();
            }
            if let Some(plane) = plane {
                plane.flip();
            }
            std::mem::swap(front, back);
            stack.extend(front.as_deref_mut());
            stack.extend(back.as_deref_mut());
        }
    }

    /// Remove the parts of `polygons` that lie inside this tree's solid.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut kept = Vec::new();
        let mut work: Vec<(&Node, Vec<Polygon>)> = vec![(self, polygons)];

        while let Some((node, polygons)) = work.pop() {
            let Some(plane) = &node.plane else {
                kept.extend(polygons);
                continue;
            };

            let mut split = Split::default();
            for p in polygons {
                plane.split_polygon(p, &mut split);
            }
            let mut front = split.front;
            front.append(&mut split.coplanar_front);
            let mut back = split.back;
            back.append(&mut split.coplanar_back);

            match node.front.as_deref() {
                Some(child) => work.push((child, front)),
                None => kept.extend(front),
            }
            // Polygons behind a leaf plane are inside the solid.
            if let Some(child) = node.back.as_deref() {
                work.push((child, back));
            }
        }

        kept
    }

    /// Clip every polygon in this tree against `other`.
    pub fn clip_to(&mut self, other: &Node) {
        let mut stack: Vec<&mut Node> = vec![self];
        while let Some(node) = stack.pop() {
            let polygons = std::mem::take(&mut node.polygons);
            node.polygons = other.clip_polygons(polygons);
            stack.extend(node.front.as_deref_mut());
            stack.extend(node.back.as_deref_mut());
        }
    }

    /// Collect every polygon in the tree.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut out = Vec::new();
        let mut stack: Vec<&Node> = vec![self];
        while let Some(node) = stack.pop() {
            out.extend(node.polygons.iter().cloned());
            stack.extend(node.front.as_deref());
            stack.extend(node.back.as_deref());
        }
        out
    }

    /// Insert polygons, creating subtrees as needed.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        let mut work: Vec<(&mut Node, Vec<Polygon>)> = vec![(self, polygons)];

        while let Some((node, polygons)) = work.pop() {
            if polygons.is_empty() {
                continue;
            }
            let Node {
                plane,
                polygons: coplanar,
                front,
                back,
            } = node;
            let plane = *plane.get_or_insert(polygons[0].plane);

            let mut split = Split::default();
            for p in polygons {
                plane.split_polygon(p, &mut split);
            }
            coplanar.append(&mut split.coplanar_front);
            coplanar.append(&mut split.coplanar_back);

            if !split.front.is_empty() {
                work.push((&mut **front.get_or_insert_with(Box::default), split.front));
            }
            if !split.back.is_empty() {
                work.push((&mut **back.get_or_insert_with(Box::default), split.back));
            }
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = Vec::new();
        stack.extend(self.front.take());
        stack.extend(self.back.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.front.take());
            stack.extend(node.back.take());
        }
    }
}

/// Union of two polygon soups bounding closed solids.
pub(crate) fn union(a: Vec<Polygon>, b: Vec<Polygon>) -> Vec<Polygon> {
    let mut a = Node::new(a);
    let mut b = Node::new(b);
    a.clip_to(&b);
    b.clip_to(&a);
    b.invert();
    b.clip_to(&a);
    b.invert();
    a.build(b.all_polygons());
    a.all_polygons()
}
