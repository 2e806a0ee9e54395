use polymesh::{
    AttributeKind, Mesh, MeshError, NumericFormat, Usage, VertexBuffer, VertexData,
};

#[test]
fn set_and_get() {
    let mut mesh = Mesh::new();
    assert!(mesh.buffer(AttributeKind::Position).is_none());

    mesh.set_buffer(AttributeKind::Position, 3, vec![0.0f32; 9])
        .unwrap();
    let pb = mesh.buffer(AttributeKind::Position).unwrap();
    assert_eq!(pb.kind(), AttributeKind::Position);
    assert_eq!(pb.components(), 3);
    assert_eq!(pb.format(), NumericFormat::F32);
    assert_eq!(pb.len(), 9);
    assert_eq!(pb.element_count(), 3);
    assert_eq!(pb.usage(), Usage::Static);
    assert!(!pb.normalized());
}

#[test]
fn incompatible_resets_are_rejected() {
    let mut mesh = Mesh::new();
    mesh.set_buffer(AttributeKind::Normal, 3, vec![0.0f32; 3])
        .unwrap();

    assert!(matches!(
        mesh.set_buffer(AttributeKind::Normal, 4, vec![0.0f32; 4]),
        Err(MeshError::IncompatibleBuffer {
            kind: AttributeKind::Normal,
            existing: (3, NumericFormat::F32),
            requested: (4, NumericFormat::F32),
        })
    ));
    assert!(matches!(
        mesh.set_buffer(AttributeKind::Normal, 3, vec![0i16; 3]),
        Err(MeshError::IncompatibleBuffer {
            requested: (3, NumericFormat::I16),
            ..
        })
    ));
    // untouched
    assert_eq!(
        mesh.buffer(AttributeKind::Normal).unwrap().len(),
        3
    );
}

#[test]
fn compatible_resets_replace_data() {
    let mut mesh = Mesh::new();
    mesh.set_buffer(AttributeKind::Normal, 3, vec![0.0f32; 3])
        .unwrap();
    mesh.set_buffer(AttributeKind::Normal, 3, vec![1.0f32; 6])
        .unwrap();
    let nb = mesh.buffer(AttributeKind::Normal).unwrap();
    assert_eq!(nb.element_count(), 2);
    assert_eq!(nb.map::<f32, _>(|v| v.to_vec()).unwrap(), vec![1.0; 6]);
    assert_eq!(mesh.buffer_list().len(), 1);
}

#[test]
fn clearing_allows_new_layout() {
    let mut mesh = Mesh::new();
    mesh.set_buffer(AttributeKind::Color, 4, vec![0u8; 4])
        .unwrap();
    mesh.clear_buffer(AttributeKind::Color);
    assert!(mesh.buffer(AttributeKind::Color).is_none());
    mesh.set_buffer(AttributeKind::Color, 3, vec![0.5f32; 3])
        .unwrap();
    assert_eq!(
        mesh.buffer(AttributeKind::Color).unwrap().format(),
        NumericFormat::F32
    );

    // absent buffers clear quietly
    mesh.clear_buffer(AttributeKind::Tangent);
}

#[test]
fn invalid_layouts() {
    let mut mesh = Mesh::new();
    for components in [0, 5] {
        assert!(matches!(
            mesh.set_buffer(AttributeKind::Position, components, vec![0.0f32; 20]),
            Err(MeshError::InvalidLayout { .. })
        ));
    }
    assert!(matches!(
        mesh.set_buffer(AttributeKind::Position, 3, vec![0.0f32; 4]),
        Err(MeshError::InvalidLayout {
            components: 3,
            len: 4,
            ..
        })
    ));
    assert!(mesh.buffers().is_empty());
}

#[test]
fn buffers_keep_insertion_order() {
    let mut mesh = Mesh::new();
    let uv0 = AttributeKind::texcoord(0).unwrap();
    for kind in [
        AttributeKind::Index,
        AttributeKind::Position,
        uv0,
        AttributeKind::Normal,
    ] {
        mesh.set_buffer(kind, 1, vec![0u16; 3]).unwrap();
    }
    mesh.clear_buffer(AttributeKind::Position);
    assert_eq!(
        mesh.buffers().kinds().collect::<Vec<_>>(),
        vec![AttributeKind::Index, uv0, AttributeKind::Normal]
    );
    assert_eq!(
        mesh.buffer_list()
            .iter()
            .map(VertexBuffer::kind)
            .collect::<Vec<_>>(),
        mesh.buffers().iter().map(VertexBuffer::kind).collect::<Vec<_>>()
    );
    assert!(mesh.buffers().get(uv0).is_some());
}

#[test]
fn texcoord_and_custom_kinds_are_bounded() {
    assert!(AttributeKind::texcoord(7).is_some());
    assert!(AttributeKind::texcoord(8).is_none());
    assert!(AttributeKind::custom(15).is_some());
    assert!(AttributeKind::custom(16).is_none());

    let mut mesh = Mesh::new();
    let a = AttributeKind::custom(0).unwrap();
    let b = AttributeKind::custom(1).unwrap();
    mesh.set_buffer(a, 1, vec![1.0f32]).unwrap();
    mesh.set_buffer(b, 2, vec![2u32, 3]).unwrap();
    assert_eq!(mesh.buffer(a).unwrap().components(), 1);
    assert_eq!(mesh.buffer(b).unwrap().components(), 2);
}

#[test]
fn insert_refuses_duplicates() {
    let mut mesh = Mesh::new();
    let buf = VertexBuffer::new(AttributeKind::Size, 1, vec![1.0f32, 2.0]).unwrap();
    mesh.insert_buffer(buf.clone()).unwrap();
    assert!(matches!(
        mesh.insert_buffer(buf),
        Err(MeshError::BufferAlreadySet(AttributeKind::Size))
    ));
}

#[test]
fn floats_from_integers() {
    let mut mesh = Mesh::new();
    assert!(mesh
        .buffer_as_floats(AttributeKind::Color)
        .unwrap()
        .is_none());

    mesh.set_buffer(AttributeKind::Color, 4, vec![255u8, 0, 255, 0])
        .unwrap();
    assert!(mesh.buffer(AttributeKind::Color).unwrap().normalized());
    assert_eq!(
        mesh.buffer_as_floats(AttributeKind::Color).unwrap(),
        Some(vec![1.0, 0.0, 1.0, 0.0])
    );

    mesh.set_buffer(AttributeKind::Normal, 3, vec![-2i16, 0, 7])
        .unwrap();
    assert_eq!(
        mesh.buffer_as_floats(AttributeKind::Normal).unwrap(),
        Some(vec![-2.0, 0.0, 7.0])
    );

    let packed = VertexBuffer::new(AttributeKind::Tangent, 3, vec![i16::MIN, 0, i16::MAX])
        .unwrap()
        .with_normalized(true);
    assert_eq!(packed.as_floats().unwrap(), vec![-1.0, 0.0, 1.0]);

    mesh.set_buffer(AttributeKind::BoneIndex, 1, vec![7u32])
        .unwrap();
    assert!(matches!(
        mesh.buffer_as_floats(AttributeKind::BoneIndex),
        Err(MeshError::FormatMismatch {
            format: NumericFormat::U32,
            ..
        })
    ));
}

#[test]
fn typed_access() {
    let buf = VertexBuffer::new(AttributeKind::Position, 3, [1.0f32, 2.0, 3.0]).unwrap();
    assert!(matches!(
        buf.map::<u16, _>(|v| v.len()),
        Err(MeshError::FormatMismatch { .. })
    ));
    buf.update::<f32, _>(|v| v[1] = 5.0).unwrap();
    assert_eq!(buf.map::<f32, _>(|v| v[1]).unwrap(), 5.0);
    assert_eq!(buf.with_bytes(|b| b.len()), 12);
    assert_eq!(*buf.read(), VertexData::F32(vec![1.0, 5.0, 3.0]));
}

#[test]
fn set_static_resets_usage() {
    let mut mesh = Mesh::new();
    mesh.insert_buffer(
        VertexBuffer::new(AttributeKind::Position, 3, vec![0.0f32; 3])
            .unwrap()
            .with_usage(Usage::Stream),
    )
    .unwrap();
    mesh.insert_buffer(
        VertexBuffer::new(AttributeKind::InstanceData, 4, vec![0.0f32; 16])
            .unwrap()
            .with_usage(Usage::Dynamic),
    )
    .unwrap();
    mesh.set_static();
    assert!(mesh.buffers().iter().all(|b| b.usage() == Usage::Static));
}

#[test]
fn weight_limit() {
    let mut mesh = Mesh::new();
    mesh.set_max_num_weights(4).unwrap();
    assert_eq!(mesh.max_num_weights(), 4);
    assert!(matches!(
        mesh.set_max_num_weights(5),
        Err(MeshError::InvalidWeightCount(5))
    ));
    assert_eq!(mesh.max_num_weights(), 4);
}
