use polymesh::{AttributeKind, HybridLayout, Mesh, MeshError, Mode, VertexBuffer};

fn index_buffer(indices: Vec<u32>) -> VertexBuffer {
    VertexBuffer::new(AttributeKind::Index, 1, indices).unwrap()
}

fn quad() -> Mesh {
    let mut mesh = Mesh::new();
    mesh.set_buffer(AttributeKind::Position, 3, vec![0.0f32; 12])
        .unwrap();
    mesh.set_buffer(AttributeKind::Index, 1, vec![0u32, 1, 2, 2, 1, 3])
        .unwrap();
    mesh.update_counts().unwrap();
    mesh
}

#[test]
fn no_levels() {
    let mesh = quad();
    assert_eq!(mesh.num_lod_levels(), 0);
    assert!(matches!(
        mesh.lod_level(0),
        Err(MeshError::IndexOutOfRange {
            index: 0,
            len: 0,
            ..
        })
    ));
}

#[test]
fn level_counts() {
    let mut mesh = quad();
    mesh.set_lod_levels(vec![
        index_buffer(vec![0, 1, 2, 2, 1, 3]),
        index_buffer(vec![0, 1, 3]),
    ]).unwrap();
    assert_eq!(mesh.num_lod_levels(), 2);
    assert_eq!(mesh.lod_triangle_count(0).unwrap(), 2);
    assert_eq!(mesh.lod_triangle_count(1).unwrap(), 1);
    assert!(matches!(
        mesh.lod_triangle_count(2),
        Err(MeshError::IndexOutOfRange {
            index: 2,
            len: 2,
            ..
        })
    ));
    assert_eq!(mesh.lod_level(1).unwrap().len(), 3);

    let vertices = mesh.vertex_count().unwrap() as u32;
    for level in mesh.lod_levels() {
        let data = level.read();
        assert!(data.indices().unwrap().iter().all(|i| i < vertices));
    }

    mesh.set_mode(Mode::TriangleStrip);
    assert_eq!(mesh.lod_triangle_count(0).unwrap(), 4);
    assert_eq!(mesh.lod_triangle_count(1).unwrap(), 1);
}

#[test]
fn invalid_levels_are_rejected() {
    let mut mesh = quad();
    mesh.set_lod_levels(vec![index_buffer(vec![0, 1, 2])])
        .unwrap();

    assert!(matches!(
        mesh.set_lod_levels(vec![index_buffer(vec![0, 1, 4])]),
        Err(MeshError::IndexOutOfRange {
            index: 4,
            len: 4,
            ..
        })
    ));
    assert!(matches!(
        mesh.set_lod_levels(vec![
            VertexBuffer::new(AttributeKind::Position, 1, vec![0u32, 1, 2]).unwrap()
        ]),
        Err(MeshError::FormatMismatch { .. })
    ));
    assert!(matches!(
        mesh.set_lod_levels(vec![
            VertexBuffer::new(AttributeKind::Index, 1, vec![0.0f32, 1.0, 2.0]).unwrap()
        ]),
        Err(MeshError::FormatMismatch { .. })
    ));
    // the previous set survives
    assert_eq!(mesh.num_lod_levels(), 1);

    mesh.clear_lod_levels();
    assert_eq!(mesh.num_lod_levels(), 0);
}

#[test]
fn hybrid_levels_cannot_be_counted() {
    let mut mesh = quad();
    mesh.set_mode(Mode::Hybrid);
    mesh.set_hybrid_layout(Some(HybridLayout::new([1, 1], vec![6]).unwrap()));
    mesh.update_counts().unwrap();
    mesh.set_lod_levels(vec![index_buffer(vec![0, 1, 2])])
        .unwrap();
    assert!(matches!(
        mesh.lod_triangle_count(0),
        Err(MeshError::InvalidState(_))
    ));
}

#[test]
fn levels_before_positions_are_checked_on_count() {
    let mut mesh = Mesh::new();
    mesh.set_lod_levels(vec![index_buffer(vec![0, 1, 99])])
        .unwrap();
    mesh.set_buffer(AttributeKind::Position, 3, vec![0.0f32; 9])
        .unwrap();
    assert!(matches!(
        mesh.update_counts(),
        Err(MeshError::IndexOutOfRange {
            index: 99,
            len: 3,
            ..
        })
    ));
    assert!(mesh.counts().is_err());

    mesh.set_lod_levels(vec![index_buffer(vec![0, 1, 2])])
        .unwrap();
    assert_eq!(mesh.update_counts().unwrap().vertices, 3);
}

#[test]
fn shrinking_positions_invalidates_levels() {
    let mut mesh = quad();
    mesh.set_lod_levels(vec![index_buffer(vec![0, 1, 3])])
        .unwrap();
    mesh.set_buffer(AttributeKind::Position, 3, vec![0.0f32; 9])
        .unwrap();
    assert!(matches!(
        mesh.update_counts(),
        Err(MeshError::IndexOutOfRange {
            index: 3,
            len: 3,
            ..
        })
    ));
    // the last good counts remain
    assert_eq!(mesh.vertex_count().unwrap(), 4);

    mesh.clear_lod_levels();
    assert_eq!(mesh.update_counts().unwrap().vertices, 3);
}

#[test]
fn levels_must_be_index_streams_without_positions() {
    let mut mesh = Mesh::new();
    assert!(matches!(
        mesh.set_lod_levels(vec![
            VertexBuffer::new(AttributeKind::Index, 1, vec![0.0f32, 1.0, 2.0]).unwrap()
        ]),
        Err(MeshError::FormatMismatch { .. })
    ));
}
