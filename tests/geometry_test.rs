use cgmath::{InnerSpace, Vector3};
use folio_ngin::data_structures::geometry::{
    MeshData, Primitive, build_all, cuboid, grid_lines, icosphere,
};

fn assert_outward_winding(name: &str, mesh: &MeshData) {
    let mut checked = 0;
    for [a, b, c] in mesh.triangles() {
        let (pa, pb, pc) = (
            Vector3::from(a.position),
            Vector3::from(b.position),
            Vector3::from(c.position),
        );
        let face = (pb - pa).cross(pc - pa);
        // pole triangles of swept meshes collapse to a line
        if face.magnitude() < 1e-6 {
            continue;
        }
        let normal = Vector3::from(a.normal) + Vector3::from(b.normal) + Vector3::from(c.normal);
        assert!(face.dot(normal) > 0.0, "{name}: inward triangle {a:?} {b:?} {c:?}");
        checked += 1;
    }
    assert!(checked > 0, "{name} has no triangles");
}

#[test]
fn should_wind_every_primitive_counter_clockwise_from_outside() {
    for (primitive, mesh) in build_all() {
        assert_outward_winding(primitive.name(), &mesh);
    }
}

#[test]
fn should_emit_unit_normals_and_valid_indices() {
    for primitive in Primitive::ALL {
        let mesh = primitive.build();
        assert_eq!(mesh.indices.len() % 3, 0, "{}", primitive.name());
        assert!(mesh.indices.iter().all(|i| (*i as usize) < mesh.vertices.len()));
        for v in &mesh.vertices {
            let length = Vector3::from(v.normal).magnitude();
            assert!((length - 1.0).abs() < 1e-4, "{}: normal of length {length}", primitive.name());
        }
    }
}

#[test]
fn should_build_a_unit_cube() {
    let mesh = cuboid();
    assert_eq!(mesh.vertices.len(), 24);
    assert_eq!(mesh.indices.len(), 36);
    for v in &mesh.vertices {
        assert!(v.position.iter().all(|c| c.abs() == 0.5));
    }
}

#[test]
fn should_subdivide_the_icosahedron() {
    assert_eq!(icosphere(0).triangles().count(), 20);
    let mesh = icosphere(1);
    assert_eq!(mesh.triangles().count(), 80);
    for v in &mesh.vertices {
        assert!((Vector3::from(v.position).magnitude() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn should_lay_out_grid_lines_with_a_highlighted_centre() {
    let centre = [0.0, 1.0, 1.0, 1.0];
    let line = [0.1, 0.1, 0.1, 1.0];
    let vertices = grid_lines(40.0, 40, -4.0, centre, line);
    assert_eq!(vertices.len(), 41 * 4);
    assert!(vertices.iter().all(|v| v.position[1] == -4.0));
    assert!(vertices.iter().all(|v| v.position[0].abs() <= 20.0 && v.position[2].abs() <= 20.0));

    let highlighted: Vec<_> = vertices.iter().filter(|v| v.colour == centre).collect();
    assert_eq!(highlighted.len(), 4);
    // the centre lines cross at the origin
    assert!(highlighted.iter().any(|v| v.position[2] == 0.0));
    assert!(highlighted.iter().any(|v| v.position[0] == 0.0));
}
