use std::f32::consts::TAU;

use crate::error::MeshError;

use super::{Mesh, Vertex};

/// Blue channel of the per-vertex debug color.
const DEBUG_COLOR_BLUE: f32 = 0.05;

/// Shape parameters of a torus lying in the XY plane, centred on the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TorusParams {
    /// Segments around the large loop.
    pub rings: u32,
    /// Segments around the tube's cross-section.
    pub tube_segments: u32,
    /// Radius of the tube.
    pub tube_radius: f32,
    /// Distance from the origin to the tube's centre line.
    pub ring_radius: f32,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            rings: 90,
            tube_segments: 30,
            tube_radius: 0.2,
            ring_radius: 0.6,
        }
    }
}

impl TorusParams {
    pub fn vertex_count(&self) -> usize {
        self.rings as usize * self.tube_segments as usize
    }

    pub fn index_count(&self) -> usize {
        self.vertex_count() * 6
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if self.rings < 3 {
            return Err(MeshError::TooFewRings(self.rings));
        }
        if self.tube_segments < 3 {
            return Err(MeshError::TooFewTubeSegments(self.tube_segments));
        }
        let vertices = self.rings as u64 * self.tube_segments as u64;
        if vertices > u16::MAX as u64 + 1 {
            return Err(MeshError::IndexOverflow { vertices });
        }
        let radii_ok = self.tube_radius.is_finite()
            && self.ring_radius.is_finite()
            && self.tube_radius > 0.0
            && self.tube_radius < self.ring_radius;
        if !radii_ok {
            return Err(MeshError::InvalidRadii {
                tube: self.tube_radius,
                ring: self.ring_radius,
            });
        }
        Ok(())
    }
}

/// Sweeps a circle of `tube_radius` around a loop of `ring_radius`.
///
/// Vertex `i * tube_segments + j` sits at ring angle `2πi/rings` and tube
/// angle `2πj/tube_segments`. Both loops wrap with modular indexing, so the
/// result is closed with no seam vertices. Triangles are counter-clockwise
/// seen from outside.
pub fn build_torus(params: &TorusParams) -> Result<Mesh, MeshError> {
    params.validate()?;

    let rings = params.rings as usize;
    let segments = params.tube_segments as usize;

    let mut vertices = Vec::with_capacity(params.vertex_count());
    for i in 0..rings {
        let theta = TAU * i as f32 / rings as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        let centre = [params.ring_radius * cos_t, params.ring_radius * sin_t, 0.0];

        for j in 0..segments {
            let phi = TAU * j as f32 / segments as f32;
            let (sin_p, cos_p) = phi.sin_cos();

            // Unit length by construction.
            let normal = [cos_t * sin_p, sin_t * sin_p, cos_p];
            let u = i as f32 / rings as f32;
            let v = j as f32 / segments as f32;

            vertices.push(Vertex {
                position: [
                    centre[0] + params.tube_radius * normal[0],
                    centre[1] + params.tube_radius * normal[1],
                    centre[2] + params.tube_radius * normal[2],
                ],
                color: [u, v, DEBUG_COLOR_BLUE],
                normal,
                texcoord: [u, v],
            });
        }
    }

    let at = |i: usize, j: usize| (i * segments + j) as u16;

    let mut indices = Vec::with_capacity(params.index_count());
    for i in 0..rings {
        let i_next = (i + 1) % rings;
        for j in 0..segments {
            let j_next = (j + 1) % segments;

            indices.extend_from_slice(&[at(i, j), at(i, j_next), at(i_next, j)]);
            indices.extend_from_slice(&[at(i, j_next), at(i_next, j_next), at(i_next, j)]);
        }
    }

    log::debug!(
        "built torus: {} vertices, {} indices",
        vertices.len(),
        indices.len()
    );

    Ok(Mesh { vertices, indices })
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use approx::assert_relative_eq;
    use glam::Vec3;

    use super::*;

    fn params(rings: u32, tube_segments: u32) -> TorusParams {
        TorusParams { rings, tube_segments, ..TorusParams::default() }
    }

    fn edge_counts(mesh: &Mesh) -> HashMap<(u16, u16), usize> {
        let mut counts = HashMap::new();
        for [a, b, c] in mesh.triangles() {
            for (p, q) in [(a, b), (b, c), (c, a)] {
                *counts.entry((p.min(q), p.max(q))).or_insert(0) += 1;
            }
        }
        counts
    }

    // ── counts ────────────────────────────────────────────────────────────

    #[test]
    fn default_torus_counts() {
        let mesh = build_torus(&TorusParams::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 2700);
        assert_eq!(mesh.indices.len(), 16200);
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    fn counts_follow_params() {
        for (r, c) in [(3, 3), (4, 7), (12, 5), (90, 30)] {
            let mesh = build_torus(&params(r, c)).unwrap();
            assert_eq!(mesh.vertex_count(), (r * c) as usize);
            assert_eq!(mesh.indices.len(), (r * c * 6) as usize);
            assert!(mesh.indices.iter().all(|&i| (i as u32) < r * c));
        }
    }

    #[test]
    fn every_vertex_is_referenced() {
        let mesh = build_torus(&params(7, 4)).unwrap();
        let used: HashSet<u16> = mesh.indices.iter().copied().collect();
        assert_eq!(used.len(), mesh.vertex_count());
    }

    // ── topology ──────────────────────────────────────────────────────────

    #[test]
    fn surface_is_closed() {
        for (r, c) in [(3, 3), (5, 4), (90, 30)] {
            let mesh = build_torus(&params(r, c)).unwrap();
            let edges = edge_counts(&mesh);
            assert!(edges.values().all(|&n| n == 2), "boundary or non-manifold edge");

            let v = mesh.vertex_count() as i64;
            let e = edges.len() as i64;
            let f = mesh.triangle_count() as i64;
            assert_eq!(v - e + f, 0, "euler characteristic of a torus");
        }
    }

    #[test]
    fn no_degenerate_triangles() {
        let mesh = build_torus(&params(3, 3)).unwrap();
        for [a, b, c] in mesh.triangles() {
            assert!(a != b && b != c && a != c);
        }
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn normals_are_unit_length() {
        let mesh = build_torus(&TorusParams::default()).unwrap();
        for v in &mesh.vertices {
            assert_relative_eq!(Vec3::from(v.normal).length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn positions_lie_on_the_tube() {
        let p = TorusParams::default();
        let mesh = build_torus(&p).unwrap();
        for v in &mesh.vertices {
            let pos = Vec3::from(v.position);
            let centre = Vec3::new(pos.x, pos.y, 0.0).normalize() * p.ring_radius;
            assert_relative_eq!(pos.distance(centre), p.tube_radius, epsilon = 1e-5);
        }
    }

    #[test]
    fn winding_faces_outward() {
        for p in [TorusParams::default(), params(12, 8)] {
            let mesh = build_torus(&p).unwrap();
            for [a, b, c] in mesh.triangles() {
                let [va, vb, vc] = [a, b, c].map(|i| mesh.vertices[i as usize]);
                let face = (Vec3::from(vb.position) - Vec3::from(va.position))
                    .cross(Vec3::from(vc.position) - Vec3::from(va.position));
                let outward =
                    Vec3::from(va.normal) + Vec3::from(vb.normal) + Vec3::from(vc.normal);
                assert!(face.dot(outward) > 0.0);
            }
        }
    }

    #[test]
    fn debug_color_is_normalized_grid_position() {
        let mesh = build_torus(&params(4, 5)).unwrap();
        let v = mesh.vertices[2 * 5 + 3];
        assert_eq!(v.color, [0.5, 0.6, DEBUG_COLOR_BLUE]);
        assert_eq!(v.texcoord, [0.5, 0.6]);
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn rejects_degenerate_counts() {
        assert_eq!(build_torus(&params(2, 30)), Err(MeshError::TooFewRings(2)));
        assert_eq!(build_torus(&params(90, 0)), Err(MeshError::TooFewTubeSegments(0)));
    }

    #[test]
    fn rejects_meshes_beyond_16_bit_indices() {
        assert_eq!(
            build_torus(&params(300, 300)),
            Err(MeshError::IndexOverflow { vertices: 90_000 })
        );
        assert!(build_torus(&params(256, 256)).is_ok());
    }

    #[test]
    fn rejects_self_intersecting_radii() {
        let p = TorusParams { tube_radius: 0.6, ring_radius: 0.6, ..TorusParams::default() };
        assert!(matches!(build_torus(&p), Err(MeshError::InvalidRadii { .. })));

        let p = TorusParams { tube_radius: f32::NAN, ..TorusParams::default() };
        assert!(matches!(build_torus(&p), Err(MeshError::InvalidRadii { .. })));
    }
}
