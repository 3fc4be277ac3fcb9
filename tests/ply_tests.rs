// Host-side tests for the PLY reader and CPU mesh preparation.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod scene_core {
    pub mod mesh {
        include!("../src/core/mesh.rs");
    }
    pub mod ply {
        include!("../src/core/ply.rs");
    }
}

use glam::Vec3;
use scene_core::mesh::MeshData;
use scene_core::ply::*;

const ASCII_QUAD: &str = "ply
format ascii 1.0
comment unit quad
element vertex 4
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
1 1 0
0 1 0
4 0 1 2 3
";

/// One triangle with an extra per-vertex colour channel to skip over.
fn binary_triangle(big_endian: bool) -> Vec<u8> {
    let format = if big_endian {
        "binary_big_endian"
    } else {
        "binary_little_endian"
    };
    let header = format!(
        "ply\nformat {format} 1.0\nelement vertex 3\nproperty float x\nproperty float y\n\
         property float z\nproperty uchar red\nelement face 1\n\
         property list uchar int vertex_indices\nend_header\n"
    );
    let mut out = header.into_bytes();
    let f = |v: f32| if big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
    let i = |v: i32| if big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
    for p in [[0.0f32, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, -1.5]] {
        for c in p {
            out.extend_from_slice(&f(c));
        }
        out.push(200);
    }
    out.push(3);
    for idx in [0, 1, 2] {
        out.extend_from_slice(&i(idx));
    }
    out
}

#[test]
fn ascii_quad_is_fan_triangulated() {
    let mesh = parse_ply(ASCII_QUAD.as_bytes()).unwrap();
    assert_eq!(mesh.positions.len(), 4);
    assert_eq!(mesh.positions[2], Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
}

#[test]
fn binary_little_endian_skips_extra_properties() {
    let mesh = parse_ply(&binary_triangle(false)).unwrap();
    assert_eq!(
        mesh.positions,
        vec![
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, -1.5)
        ]
    );
    assert_eq!(mesh.indices, vec![0, 1, 2]);
}

#[test]
fn both_endians_decode_the_same_mesh() {
    let le = parse_ply(&binary_triangle(false)).unwrap();
    let be = parse_ply(&binary_triangle(true)).unwrap();
    assert_eq!(le, be);
}

#[test]
fn crlf_header_is_accepted() {
    let text = ASCII_QUAD.replace('\n', "\r\n");
    let mesh = parse_ply(text.as_bytes()).unwrap();
    assert_eq!(mesh.indices.len(), 6);
}

#[test]
fn unrelated_elements_are_skipped() {
    let text = "ply
format ascii 1.0
element vertex 3
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
element edge 1
property int vertex1
property int vertex2
end_header
0 0 0
1 0 0
0 1 0
3 0 1 2
0 1
";
    let mesh = parse_ply(text.as_bytes()).unwrap();
    assert_eq!(mesh.indices, vec![0, 1, 2]);
}

#[test]
fn missing_magic_is_rejected() {
    let text = ASCII_QUAD.replacen("ply\n", "plx\n", 1);
    assert_eq!(parse_ply(text.as_bytes()), Err(PlyError::MissingMagic));
}

#[test]
fn unknown_format_is_rejected() {
    let text = ASCII_QUAD.replace("format ascii", "format binary_middle_endian");
    assert_eq!(
        parse_ply(text.as_bytes()),
        Err(PlyError::UnsupportedFormat("binary_middle_endian".into()))
    );
}

#[test]
fn missing_format_line_is_rejected() {
    let text = ASCII_QUAD.replace("format ascii 1.0\n", "");
    assert!(matches!(
        parse_ply(text.as_bytes()),
        Err(PlyError::MalformedHeader(_))
    ));
}

#[test]
fn unknown_property_type_is_rejected() {
    let text = ASCII_QUAD.replace("property float z", "property quad z");
    assert_eq!(
        parse_ply(text.as_bytes()),
        Err(PlyError::UnknownType("quad".into()))
    );
}

#[test]
fn truncated_binary_body_is_an_error() {
    let mut bytes = binary_triangle(false);
    bytes.truncate(bytes.len() - 6);
    assert_eq!(
        parse_ply(&bytes),
        Err(PlyError::UnexpectedEof("binary body"))
    );
}

#[test]
fn out_of_range_face_index_is_an_error() {
    let text = ASCII_QUAD.replace("4 0 1 2 3", "4 0 1 2 9");
    assert_eq!(
        parse_ply(text.as_bytes()),
        Err(PlyError::IndexOutOfRange { index: 9, count: 4 })
    );
}

#[test]
fn negative_face_index_is_an_error() {
    let text = ASCII_QUAD.replace("4 0 1 2 3", "3 -1 1 2");
    assert_eq!(
        parse_ply(text.as_bytes()),
        Err(PlyError::InvalidValue("vertex index -1".into()))
    );
}

#[test]
fn fractional_face_index_is_an_error() {
    let text = ASCII_QUAD.replace("4 0 1 2 3", "3 0 1.5 2");
    assert!(matches!(
        parse_ply(text.as_bytes()),
        Err(PlyError::InvalidValue(_))
    ));
}

#[test]
fn oversized_face_count_is_an_error() {
    let text = "ply
format ascii 1.0
element vertex 3
property float x
property float y
property float z
element face 6148914691236517206
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
0 1 0
3 0 1 2
";
    assert!(matches!(
        parse_ply(text.as_bytes()),
        Err(PlyError::MalformedHeader(_))
    ));
}

#[test]
fn oversized_vertex_count_fails_without_allocating() {
    let mut bytes = b"ply\nformat binary_little_endian 1.0\n\
        element vertex 2305843009213693952\nproperty float x\nproperty float y\n\
        property float z\nend_header\n"
        .to_vec();
    for c in [0.0f32, 1.0, 2.0] {
        bytes.extend_from_slice(&c.to_le_bytes());
    }
    assert_eq!(
        parse_ply(&bytes),
        Err(PlyError::UnexpectedEof("binary body"))
    );
}

#[test]
fn vertex_without_z_is_an_error() {
    let text = ASCII_QUAD.replace("property float z\n", "");
    assert_eq!(parse_ply(text.as_bytes()), Err(PlyError::MissingPosition));
}

#[test]
fn bad_ascii_token_is_an_error() {
    let text = ASCII_QUAD.replace("1 1 0", "1 one 0");
    assert_eq!(
        parse_ply(text.as_bytes()),
        Err(PlyError::InvalidValue("one".into()))
    );
}

#[test]
fn counter_clockwise_triangle_gets_outward_normal() {
    let mut mesh = MeshData::from(parse_ply(&binary_triangle(false)).unwrap());
    mesh.positions[2] = Vec3::new(0.0, 2.0, 0.0);
    mesh.compute_vertex_normals();
    for n in &mesh.normals {
        assert!(n.abs_diff_eq(Vec3::Z, 1e-6), "{n:?}");
    }
}

#[test]
fn shared_vertices_average_face_normals() {
    let mut mesh = MeshData {
        positions: vec![
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
        ],
        normals: Vec::new(),
        // one face in XY facing +Z, one in YZ facing +X
        indices: vec![0, 1, 2, 0, 2, 3],
    };
    mesh.compute_vertex_normals();
    let shared = mesh.normals[0];
    assert!((shared.length() - 1.0).abs() < 1e-6);
    assert!(shared.x > 0.0 && shared.z > 0.0);
    assert!(mesh.normals[1].abs_diff_eq(Vec3::Z, 1e-6));
    assert!(mesh.normals[3].abs_diff_eq(Vec3::X, 1e-6));
}

#[test]
fn scale_and_bounds() {
    let mut mesh = MeshData::from(parse_ply(ASCII_QUAD.as_bytes()).unwrap());
    mesh.scale(0.5);
    let (lo, hi) = mesh.bounds().unwrap();
    assert_eq!(lo, Vec3::ZERO);
    assert_eq!(hi, Vec3::new(0.5, 0.5, 0.0));
    assert!(MeshData::default().bounds().is_none());
}

#[test]
fn interleaved_vertices_pair_position_and_normal() {
    let mut mesh = MeshData::from(parse_ply(ASCII_QUAD.as_bytes()).unwrap());
    mesh.compute_vertex_normals();
    let verts = mesh.vertices();
    assert_eq!(verts.len(), 4);
    assert_eq!(verts[1].position, [1.0, 0.0, 0.0]);
    assert_eq!(verts[1].normal, [0.0, 0.0, 1.0]);
}
