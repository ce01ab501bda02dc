//! Per-mesh bounding volume hierarchy (BLAS) construction.
//!
//! Top-down build: at each node the triangle set is split at the median
//! centroid along the longest centroid-extent axis, with a stable
//! tie-break on the original triangle index, so identical input always
//! produces byte-identical output. Leaves hold at most
//! [`MAX_TRIS_PER_LEAF`] triangles and reference a contiguous slice of
//! the reordered `tri_refs` array.

use std::cmp::Ordering;

use glam::Vec3;

use crate::math::Aabb;

/// Leaf threshold in triangles.
pub const MAX_TRIS_PER_LEAF: u32 = 4;

/// One BVH node, in per-mesh index space.
///
/// Interior nodes have `left, right >= 0` and `tri_count == 0`; leaves
/// have `left == right == -1` and `tri_count > 0`, with `tri_offset`
/// indexing into the builder's `tri_refs`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BvhNode {
    pub bounds: Aabb,
    pub left: i32,
    pub right: i32,
    pub tri_offset: u32,
    pub tri_count: u32,
}

impl BvhNode {
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.tri_count > 0
    }
}

/// A built BLAS: flat node array (root at index 0) plus the triangle
/// order the leaves reference.
#[derive(Debug, Clone)]
pub struct Blas {
    pub nodes: Vec<BvhNode>,
    pub tri_refs: Vec<u32>,
}

/// Builds the BLAS for one mesh given its positions and triangle indices.
///
/// Degenerate (zero-area) triangles are kept; their bounds come from
/// vertex min/max, so they never introduce NaN.
#[must_use]
pub fn build_blas(positions: &[Vec3], indices: &[u32]) -> Blas {
    let tri_count = indices.len() / 3;
    let mut tri_refs: Vec<u32> = (0..tri_count as u32).collect();

    let tri_bounds: Vec<Aabb> = (0..tri_count)
        .map(|t| {
            let (a, b, c) = triangle(positions, indices, t as u32);
            Aabb::from_points([a, b, c])
        })
        .collect();
    let centroids: Vec<Vec3> = tri_bounds.iter().map(Aabb::center).collect();

    let mut nodes = Vec::with_capacity(tri_count.max(1) * 2);
    nodes.push(BvhNode {
        bounds: Aabb::EMPTY,
        left: -1,
        right: -1,
        tri_offset: 0,
        tri_count: 0,
    });

    if tri_count == 0 {
        return Blas { nodes, tri_refs };
    }

    // Iterative top-down build; the work list replaces recursion so the
    // depth of the tree never touches the thread stack.
    let mut work = vec![(0usize, 0usize, tri_count)];
    while let Some((node_index, start, end)) = work.pop() {
        let refs = &mut tri_refs[start..end];
        let mut bounds = Aabb::EMPTY;
        let mut centroid_bounds = Aabb::EMPTY;
        for &t in refs.iter() {
            bounds = bounds.union(&tri_bounds[t as usize]);
            centroid_bounds.grow(centroids[t as usize]);
        }

        let count = end - start;
        if count as u32 <= MAX_TRIS_PER_LEAF {
            nodes[node_index] = BvhNode {
                bounds,
                left: -1,
                right: -1,
                tri_offset: start as u32,
                tri_count: count as u32,
            };
            continue;
        }

        let extent = centroid_bounds.size();
        let axis = if extent.x >= extent.y && extent.x >= extent.z {
            0
        } else if extent.y >= extent.z {
            1
        } else {
            2
        };

        refs.sort_by(|&a, &b| {
            let ca = centroids[a as usize][axis];
            let cb = centroids[b as usize][axis];
            ca.partial_cmp(&cb).unwrap_or(Ordering::Equal).then(a.cmp(&b))
        });
        let mid = start + count / 2;

        let left = nodes.len();
        let right = left + 1;
        for _ in 0..2 {
            nodes.push(BvhNode {
                bounds: Aabb::EMPTY,
                left: -1,
                right: -1,
                tri_offset: 0,
                tri_count: 0,
            });
        }
        nodes[node_index] = BvhNode {
            bounds,
            left: left as i32,
            right: right as i32,
            tri_offset: 0,
            tri_count: 0,
        };
        work.push((right, mid, end));
        work.push((left, start, mid));
    }

    Blas { nodes, tri_refs }
}

fn triangle(positions: &[Vec3], indices: &[u32], tri: u32) -> (Vec3, Vec3, Vec3) {
    let i = tri as usize * 3;
    (
        positions[indices[i] as usize],
        positions[indices[i + 1] as usize],
        positions[indices[i + 2] as usize],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_triangle_is_a_leaf_root() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let blas = build_blas(&positions, &[0, 1, 2]);
        assert_eq!(blas.nodes.len(), 1);
        let root = blas.nodes[0];
        assert!(root.is_leaf());
        assert_eq!(root.tri_count, 1);
        assert_eq!((root.left, root.right), (-1, -1));
    }

    #[test]
    fn empty_mesh_builds_empty_leaf() {
        let blas = build_blas(&[], &[]);
        assert_eq!(blas.nodes.len(), 1);
        assert_eq!(blas.nodes[0].tri_count, 0);
        assert!(blas.tri_refs.is_empty());
    }
}
