use approx::assert_abs_diff_eq;
use can_viewer::geometry::{
    build_band, build_cap, build_crushed_positions, crush_profile, BandParams, CanGeometry,
    Shading, MIN_CRUSH_SCALE,
};
use glam::Vec3;

fn params(segments: u32, height_segments: u32, shading: Shading) -> BandParams {
    BandParams {
        segments,
        height_segments,
        height: 2.0,
        radius: 1.0,
        shading,
    }
}

fn all_params() -> Vec<BandParams> {
    let mut all = Vec::new();
    for segments in 3..=12 {
        for height_segments in 1..=4 {
            for shading in [Shading::Smooth, Shading::Flat] {
                all.push(params(segments, height_segments, shading));
            }
        }
    }
    all
}

#[test]
fn test_band_buffer_sizes() {
    for p in all_params() {
        let band = build_band(&p).unwrap();
        band.validate().unwrap();

        let s = p.segments as usize;
        let h = p.height_segments as usize;
        assert_eq!(band.vertex_count(), 2 * s * (h + 1));
        assert_eq!(band.triangle_count(), 2 * s * h);
        assert_eq!(band.topology.indices.len() % 3, 0);
        assert!(band
            .topology
            .indices
            .iter()
            .all(|&i| (i as usize) < band.vertex_count()));
    }
}

#[test]
fn test_band_winding_faces_outward() {
    for p in all_params() {
        let band = build_band(&p).unwrap();
        for tri in band.triangles() {
            let face = band.face_normal(tri);
            assert!(face.length() > 0.0, "degenerate triangle {tri:?}");

            let center: Vec3 = tri.iter().map(|&i| band.positions[i as usize]).sum::<Vec3>() / 3.0;
            let radial = Vec3::new(center.x, 0.0, center.z);
            assert!(face.dot(radial) > 0.0, "triangle {tri:?} faces inward");

            for &i in &tri {
                assert!(
                    face.dot(band.topology.normals[i as usize]) > 0.0,
                    "normal at {i} disagrees with winding of {tri:?}"
                );
            }
        }
    }
}

#[test]
fn test_uv_seam_wraps_by_one() {
    for p in all_params() {
        let band = build_band(&p).unwrap();
        let uvs = band.topology.uvs.as_ref().unwrap();
        for ring in 0..=p.height_segments {
            let first = p.vertex_index(ring, 0, 0) as usize;
            let last = p.vertex_index(ring, p.segments - 1, 1) as usize;

            assert_eq!(uvs[first][0] - uvs[last][0], 1.0);
            assert_eq!(uvs[first][1], uvs[last][1]);
            assert_abs_diff_eq!(band.positions[first], band.positions[last], epsilon = 1e-5);
        }
    }
}

#[test]
fn test_uv_v_follows_ring() {
    let p = params(6, 3, Shading::Smooth);
    let band = build_band(&p).unwrap();
    let uvs = band.topology.uvs.unwrap();
    for ring in 0..=3 {
        let slot = p.vertex_index(ring, 2, 1) as usize;
        assert_eq!(uvs[slot][1], (ring + 1) as f32 / 4.0);
    }
}

#[test]
fn test_rings_span_height() {
    let p = BandParams {
        height: 3.0,
        radius: 0.5,
        ..params(8, 4, Shading::Smooth)
    };
    let band = build_band(&p).unwrap();
    let (min_y, max_y) = band
        .positions
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v.y), hi.max(v.y)));
    assert_abs_diff_eq!(min_y, -1.5, epsilon = 1e-6);
    assert_abs_diff_eq!(max_y, 1.5, epsilon = 1e-6);
    for v in &band.positions {
        assert_abs_diff_eq!(Vec3::new(v.x, 0.0, v.z).length(), 0.5, epsilon = 1e-6);
    }
}

#[test]
fn test_crushed_pose_keeps_end_rings() {
    for p in all_params() {
        let band = build_band(&p).unwrap();
        let crushed = build_crushed_positions(&p).unwrap();
        assert_eq!(crushed.len(), band.vertex_count());

        let ring_len = p.ring_len();
        let top = p.height_segments as usize * ring_len;
        assert_eq!(&crushed[..ring_len], &band.positions[..ring_len]);
        assert_eq!(&crushed[top..], &band.positions[top..]);

        for (c, r) in crushed.iter().zip(&band.positions) {
            assert_eq!(c.y, r.y);
            assert!(Vec3::new(c.x, 0.0, c.z).length() <= Vec3::new(r.x, 0.0, r.z).length() + 1e-6);
        }
    }
}

#[test]
fn test_crush_profile_pinches_middle() {
    let profile = crush_profile(4);
    assert_eq!(profile.len(), 5);
    assert_eq!(profile[0], 1.0);
    assert_eq!(profile[4], 1.0);
    assert_eq!(profile[2], MIN_CRUSH_SCALE);
    assert_abs_diff_eq!(profile[1], std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-6);
    assert!(profile.iter().all(|&s| (MIN_CRUSH_SCALE..=1.0).contains(&s)));
}

#[test]
fn test_caps_face_away_from_can() {
    let geometry = CanGeometry::build(&params(10, 2, Shading::Smooth)).unwrap();
    let top = &geometry.top_cap;
    let bottom = &geometry.bottom_cap;
    top.validate().unwrap();
    bottom.validate().unwrap();

    assert_eq!(top.vertex_count(), 12);
    assert_eq!(top.triangle_count(), 10);
    for tri in top.triangles() {
        assert!(top.face_normal(tri).y > 0.0);
    }
    for tri in bottom.triangles() {
        assert!(bottom.face_normal(tri).y < 0.0);
    }
    assert!(bottom.topology.normals.iter().all(|&n| n == Vec3::NEG_Y));
    assert!(bottom.positions.iter().all(|v| v.y == -1.0));
}

#[test]
fn test_cap_rim_matches_band_ends() {
    let p = params(7, 3, Shading::Flat);
    let geometry = CanGeometry::build(&p).unwrap();
    let top_ring = p.height_segments;
    for step in 0..p.segments {
        let band_vertex = geometry.band.positions[p.vertex_index(top_ring, step, 0) as usize];
        let cap_vertex = geometry.top_cap.positions[step as usize + 1];
        assert_abs_diff_eq!(band_vertex, cap_vertex, epsilon = 1e-5);
    }
}

#[test]
fn test_cap_uvs_are_planar() {
    let cap = build_cap(4, 2.0, 0.0).unwrap();
    let uvs = cap.topology.uvs.unwrap();
    assert_eq!(uvs[0], [0.5, 0.5]);
    assert_abs_diff_eq!(uvs[1][0], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(uvs[1][1], 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(uvs[2][0], 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(uvs[2][1], 1.0, epsilon = 1e-6);
}

#[test]
fn test_degenerate_parameters_rejected() {
    assert!(build_band(&params(2, 1, Shading::Smooth)).is_err());
    assert!(build_band(&params(3, 0, Shading::Smooth)).is_err());
    assert!(build_cap(2, 1.0, 0.0).is_err());
    assert!(build_cap(3, 0.0, 0.0).is_err());
    let flat = BandParams {
        height: 0.0,
        ..params(3, 1, Shading::Smooth)
    };
    assert!(CanGeometry::build(&flat).is_err());
}
