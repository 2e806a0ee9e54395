use nalgebra::point;
use polymesh::{Aabb, AabbError, AttributeKind, BoundingSphere, BoundingVolume, Mesh, MeshError};

fn scattered() -> Mesh {
    let mut mesh = Mesh::new();
    mesh.set_buffer(
        AttributeKind::Position,
        3,
        vec![-1.0f32, 0.0, 2.0, 3.0, -2.0, 0.0, 0.0, 5.0, 1.0],
    )
    .unwrap();
    mesh
}

#[test]
fn nothing_to_bound() {
    let mut mesh = Mesh::new();
    mesh.update_bound().unwrap();
    assert_eq!(*mesh.bound(), BoundingVolume::default());
    assert!(!mesh.bound().as_aabb().unwrap().is_valid());
}

#[test]
fn box_around_positions() {
    let mut mesh = scattered();
    mesh.update_bound().unwrap();
    let bb = mesh.bound().as_aabb().unwrap();
    assert_eq!(bb.mins, point![-1.0, -2.0, 0.0]);
    assert_eq!(bb.maxs, point![3.0, 5.0, 2.0]);
    assert_eq!(mesh.bound().center(), point![1.0, 1.5, 1.0]);
}

#[test]
fn sphere_keeps_its_shape() {
    let mut mesh = scattered();
    mesh.set_bound(BoundingSphere::new(point![0.0f32, 0.0, 0.0], 0.0).into());
    mesh.update_bound().unwrap();
    assert!(matches!(mesh.bound(), BoundingVolume::Sphere(_)));
    for p in [
        point![-1.0, 0.0, 2.0],
        point![3.0, -2.0, 0.0],
        point![0.0, 5.0, 1.0],
    ] {
        assert!(mesh.bound().contains(&p));
    }
    assert!(!mesh.bound().contains(&point![10.0, 0.0, 0.0]));
}

#[test]
fn positions_must_be_float_triples() {
    let mut mesh = Mesh::new();
    mesh.set_buffer(AttributeKind::Position, 3, vec![0i16; 3])
        .unwrap();
    assert!(matches!(
        mesh.update_bound(),
        Err(MeshError::FormatMismatch { .. })
    ));

    let mut mesh = Mesh::new();
    mesh.set_buffer(AttributeKind::Position, 2, vec![0.0f32; 4])
        .unwrap();
    assert!(matches!(
        mesh.update_bound(),
        Err(MeshError::FormatMismatch { .. })
    ));
}

#[test]
fn four_component_positions() {
    let mut mesh = Mesh::new();
    mesh.set_buffer(
        AttributeKind::Position,
        4,
        vec![1.0f32, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, 1.0],
    )
    .unwrap();
    mesh.update_bound().unwrap();
    let bb = mesh.bound().as_aabb().unwrap();
    assert_eq!(bb.mins, point![-1.0, -1.0, -1.0]);
    assert_eq!(bb.maxs, point![1.0, 1.0, 1.0]);
}

#[test]
fn box_construction() {
    assert!(matches!(
        Aabb::try_new(point![1.0f32, 0.0, 0.0], point![0.0, 1.0, 1.0]),
        Err(AabbError::Inverted(..))
    ));
    let empty: [nalgebra::Point3<f64>; 0] = [];
    assert!(matches!(Aabb::from_points(&empty), Err(AabbError::Empty)));

    let a = Aabb::new(point![0.0f64, 0.0, 0.0], point![1.0, 1.0, 1.0]);
    let b = Aabb::new(point![0.5f64, 0.5, 0.5], point![2.0, 2.0, 2.0]);
    assert!(a.intersects(&b));
    let merged = a.merged(&b);
    assert_eq!(merged.mins, a.mins);
    assert_eq!(merged.maxs, b.maxs);

    let s = BoundingSphere::from(a);
    assert!(s.contains(&a.maxs));
}
