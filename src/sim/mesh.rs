//! Procedural arc-solid mesh construction
//!
//! Builds the visual geometry for one ring segment: a closed arc-shaped
//! prism with outer wall, inner wall, top cap and bottom cap. The mesh is
//! visual only; collision uses the box approximation in [`super::ring`].

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::arc_point;

/// Angular samples per arc solid, regardless of span. Longer spans get
/// coarser per-degree resolution, which suits the game's low-poly look.
pub const ARC_STEPS: usize = 10;

/// Mesh vertex with position and normal, laid out for direct GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Recompute vertex normals by area-weighted face accumulation.
    ///
    /// Winding is counter-clockwise seen from outside, so accumulated
    /// normals face outward.
    pub fn recompute_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let pa = Vec3::from(self.vertices[a].position);
            let pb = Vec3::from(self.vertices[b].position);
            let pc = Vec3::from(self.vertices[c].position);
            // Cross product length carries the area weighting.
            let face = (pb - pa).cross(pc - pa);
            acc[a] += face;
            acc[b] += face;
            acc[c] += face;
        }

        for (vertex, n) in self.vertices.iter_mut().zip(acc) {
            vertex.normal = n.normalize_or_zero().to_array();
        }
    }
}

/// Build an arc prism spanning `span_deg` degrees from `start_deg`,
/// between `inner_radius` and `outer_radius`, `height` thick and
/// vertically centered on y = 0. Only the four visible faces are
/// emitted; the angular end walls are left open, as they are never
/// seen edge-on in play.
pub fn build_arc_solid(
    start_deg: f32,
    span_deg: f32,
    inner_radius: f32,
    outer_radius: f32,
    height: f32,
) -> Mesh {
    let step_deg = span_deg / ARC_STEPS as f32;
    let half_h = height / 2.0;

    // Four stacked points per angular sample:
    // 0 inner-bottom, 1 outer-bottom, 2 inner-top, 3 outer-top.
    let mut vertices = Vec::with_capacity((ARC_STEPS + 1) * 4);
    for i in 0..=ARC_STEPS {
        let angle = start_deg + i as f32 * step_deg;
        for (radius, y) in [
            (inner_radius, -half_h),
            (outer_radius, -half_h),
            (inner_radius, half_h),
            (outer_radius, half_h),
        ] {
            vertices.push(Vertex {
                position: arc_point(radius, angle, y).to_array(),
                normal: [0.0; 3],
            });
        }
    }

    // Two triangles per face per angular step: top, bottom, outer, inner.
    let mut indices = Vec::with_capacity(ARC_STEPS * 24);
    for i in 0..ARC_STEPS as u32 {
        let base = i * 4;
        let next = (i + 1) * 4;

        // Top cap (y = +h/2), facing up
        indices.extend_from_slice(&[base + 2, base + 3, next + 2]);
        indices.extend_from_slice(&[base + 3, next + 3, next + 2]);

        // Bottom cap (y = -h/2), facing down
        indices.extend_from_slice(&[base, next, base + 1]);
        indices.extend_from_slice(&[next, next + 1, base + 1]);

        // Outer wall, facing away from the axis
        indices.extend_from_slice(&[base + 1, next + 1, base + 3]);
        indices.extend_from_slice(&[next + 1, next + 3, base + 3]);

        // Inner wall, facing the axis
        indices.extend_from_slice(&[base, base + 2, next]);
        indices.extend_from_slice(&[base + 2, next + 2, next]);
    }

    let mut mesh = Mesh { vertices, indices };
    mesh.recompute_normals();
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_solid_counts() {
        let mesh = build_arc_solid(0.0, 45.0, 0.5, 2.0, 0.3);
        assert_eq!(mesh.vertices.len(), (ARC_STEPS + 1) * 4);
        // Four faces, two triangles each, per angular step.
        assert_eq!(mesh.triangle_count(), ARC_STEPS * 8);
    }

    #[test]
    fn test_indices_in_range() {
        let mesh = build_arc_solid(90.0, 45.0, 0.5, 2.0, 0.3);
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn test_vertices_within_ring_band() {
        let mesh = build_arc_solid(30.0, 45.0, 0.5, 2.0, 0.3);
        for v in &mesh.vertices {
            let p = Vec3::from(v.position);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((0.5 - 1e-4..=2.0 + 1e-4).contains(&r), "radius {r}");
            assert!(p.y.abs() <= 0.15 + 1e-5);
        }
    }

    #[test]
    fn test_normals_are_unit_and_outward() {
        let mesh = build_arc_solid(0.0, 45.0, 0.5, 2.0, 0.3);
        for v in &mesh.vertices {
            let n = Vec3::from(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-3);
        }
        // Outer-top corner vertices should never point toward the axis.
        for (i, v) in mesh.vertices.iter().enumerate() {
            if i % 4 == 3 {
                let p = Vec3::from(v.position);
                let radial = Vec3::new(p.x, 0.0, p.z).normalize();
                let n = Vec3::from(v.normal);
                assert!(n.dot(radial) > -1e-3, "vertex {i} points inward");
            }
        }
    }

    #[test]
    fn test_face_normals_point_away_from_solid() {
        // Cap faces must wind so their cross product points along +/-Y,
        // wall faces radially away from the band they bound.
        let mesh = build_arc_solid(0.0, 45.0, 0.5, 2.0, 0.3);
        for tri in mesh.indices.chunks_exact(3) {
            let pa = Vec3::from(mesh.vertices[tri[0] as usize].position);
            let pb = Vec3::from(mesh.vertices[tri[1] as usize].position);
            let pc = Vec3::from(mesh.vertices[tri[2] as usize].position);
            let face = (pb - pa).cross(pc - pa);

            let ys = [pa.y, pb.y, pc.y];
            if ys.iter().all(|&y| y > 0.0) {
                assert!(face.y > 0.0, "top-cap face points down");
            } else if ys.iter().all(|&y| y < 0.0) {
                assert!(face.y < 0.0, "bottom-cap face points up");
            } else {
                // Wall triangle: every vertex sits at one radius.
                let centroid = (pa + pb + pc) / 3.0;
                let radial = Vec3::new(centroid.x, 0.0, centroid.z);
                let d = face.dot(radial);
                if radial.length() > 1.0 {
                    assert!(d > 0.0, "outer wall points toward the axis");
                } else {
                    assert!(d < 0.0, "inner wall points away from the axis");
                }
            }
        }
    }

    #[test]
    fn test_quad_strip_edges_shared() {
        // Along the strip every undirected edge belongs to exactly two
        // triangles. The two angular end columns are left open (the solid
        // has outer, inner, top and bottom faces only), so edges whose
        // vertices both sit in an end column may appear once.
        use std::collections::HashMap;

        let mesh = build_arc_solid(0.0, 45.0, 0.5, 2.0, 0.3);
        let mut edges: HashMap<(u32, u32), u32> = HashMap::new();
        for tri in mesh.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = (a.min(b), a.max(b));
                *edges.entry(key).or_default() += 1;
            }
        }

        let end_column = |v: u32| {
            let col = v as usize / 4;
            col == 0 || col == ARC_STEPS
        };
        for (&(a, b), &count) in &edges {
            assert!(count <= 2, "edge ({a},{b}) used {count} times");
            if count == 1 {
                assert!(
                    end_column(a) && end_column(b),
                    "interior edge ({a},{b}) used once"
                );
            }
        }
    }
}
