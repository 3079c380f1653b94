//! Property-based tests for STL encoding.
//!
//! Run with: cargo test -p mesh-io -- proptest

#![allow(clippy::unwrap_used, clippy::expect_used)]

use mesh_io::{StlClassification, classify_stl, parse_stl, write_stl_ascii, write_stl_binary};
use mesh_types::{Facet, MeshBounds, Point3, TriangleSoup, Vector3};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Coordinates exactly representable in a binary STL.
fn arb_coord() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0_f32), -1.0e4_f32..1.0e4_f32].prop_map(f64::from)
}

fn arb_point() -> impl Strategy<Value = Point3<f64>> {
    (arb_coord(), arb_coord(), arb_coord()).prop_map(|(x, y, z)| Point3::new(x, y, z))
}

fn arb_facet() -> impl Strategy<Value = Facet> {
    (arb_point(), arb_point(), arb_point(), arb_point())
        .prop_map(|(n, a, b, c)| Facet::new(Vector3::from(n.coords), [a, b, c]))
}

fn arb_soup() -> impl Strategy<Value = TriangleSoup> {
    prop::collection::vec(arb_facet(), 1..40).prop_map(|facets| TriangleSoup {
        name: "prop".to_string(),
        facets,
    })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs())
}

fn assert_vertices_close(expected: &TriangleSoup, actual: &TriangleSoup) {
    assert_eq!(expected.facet_count(), actual.facet_count());
    for (e, a) in expected.facets.iter().zip(&actual.facets) {
        for (ev, av) in e.vertices.iter().zip(&a.vertices) {
            for axis in 0..3 {
                assert!(
                    close(ev[axis], av[axis]),
                    "vertex drifted: {ev:?} -> {av:?}"
                );
            }
        }
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_binary_ascii_binary_preserves_vertices(soup in arb_soup()) {
        let mut binary = Vec::new();
        write_stl_binary(&soup, &mut binary).unwrap();
        prop_assert_eq!(classify_stl(&binary), StlClassification::Binary);
        let decoded = parse_stl(&binary).unwrap();

        let mut text = Vec::new();
        write_stl_ascii(&decoded, &mut text).unwrap();
        prop_assert_eq!(classify_stl(&text), StlClassification::Ascii);
        let from_text = parse_stl(&text).unwrap();
        assert_vertices_close(&decoded, &from_text);

        let mut binary_again = Vec::new();
        write_stl_binary(&from_text, &mut binary_again).unwrap();
        let final_soup = parse_stl(&binary_again).unwrap();
        assert_vertices_close(&decoded, &final_soup);
    }

    #[test]
    fn proptest_bounds_contain_every_vertex(soup in arb_soup()) {
        let bounds = soup.bounds();
        for facet in &soup.facets {
            for v in &facet.vertices {
                prop_assert!(bounds.contains(v));
            }
        }
    }

    #[test]
    fn proptest_truncation_is_always_detected(soup in arb_soup(), cut in 1_usize..50) {
        let mut binary = Vec::new();
        write_stl_binary(&soup, &mut binary).unwrap();
        binary.truncate(binary.len() - cut);
        prop_assert!(parse_stl(&binary).is_err());
    }
}
