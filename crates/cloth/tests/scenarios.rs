//! End-to-end frame loop scenarios: reveal, drag, release, reset.

use cloth::{Cloth, ClothConfig, ClothEvent, MeshLayout, Pointer, Then};

const DT: f32 = 1.0 / 60.0;

fn settle(cloth: &mut Cloth, vertices: &mut [f32]) {
    let pointer = Pointer::new();
    for _ in 0..200 {
        cloth.frame(DT, &pointer, vertices).unwrap();
    }
    assert!(cloth.is_settled());
}

#[test]
fn four_point_cloth_brush_scenario() {
    let mut cloth = Cloth::builder(1, 1).spacing(100.0, 80.0).seed(11).build().unwrap();
    let mut vertices = vec![0.0; cloth.vertex_len()];
    settle(&mut cloth, &mut vertices);
    assert_eq!(vertices, vec![0.0, 0.0, 100.0, 0.0, 0.0, 80.0, 100.0, 80.0]);

    // Pointer down exactly on point 0 with velocity (5, 0)
    let pointer = Pointer::from_state(true, 0.0, 0.0, Some((-5.0, 0.0)));
    cloth.update(0.016, &pointer, &mut vertices).unwrap();

    let x0 = vertices[0];
    assert!(x0.is_finite());
    assert!((0.0..=5.0).contains(&x0), "x0={x0}");
    assert_eq!(&vertices[2..], &[100.0, 0.0, 0.0, 80.0, 100.0, 80.0]);

    // Just beside point 0 the push is the full velocity
    let pointer = Pointer::from_state(true, x0 - 3.0, 0.0, Some((x0 - 8.0, 0.0)));
    cloth.update(0.016, &pointer, &mut vertices).unwrap();
    assert!((vertices[0] - (x0 + 5.0)).abs() < 1e-4);
    assert_eq!(vertices[1], 0.0);
}

#[test]
fn drag_across_centered_mesh() {
    let config = ClothConfig {
        points_x: 11,
        points_y: 11,
        seed: Some(3),
        ..ClothConfig::default()
    };
    let layout = MeshLayout::centered(100.0, 100.0, 400.0, 300.0);
    let mut cloth = Cloth::from_config(&config, &layout).unwrap();
    assert_eq!(cloth.spacing(), (10.0, 10.0));
    assert_eq!(cloth.brush().origin, (150.0, 100.0));

    let mut vertices = vec![0.0; cloth.vertex_len()];
    settle(&mut cloth, &mut vertices);
    let rest = vertices.clone();

    // Drag horizontally through the middle row (mesh-local y = 50)
    let mut pointer = Pointer::new();
    pointer.press(150.0 + 20.0, 100.0 + 52.0);
    for step in 1..=12 {
        pointer.move_to(170.0 + step as f32 * 4.0, 152.0);
        cloth.frame(DT, &pointer, &mut vertices).unwrap();
    }
    pointer.release();

    assert!(vertices.iter().all(|v| v.is_finite()));
    assert_ne!(vertices, rest, "drag should warp the mesh");

    // Top row is far from the brush and stays put
    assert_eq!(&vertices[..22], &rest[..22]);

    // Releasing stops further displacement
    let warped = vertices.clone();
    for _ in 0..10 {
        cloth.frame(DT, &pointer, &mut vertices).unwrap();
    }
    assert_eq!(vertices, warped);

    // A reset brings everything home
    cloth.reset();
    settle(&mut cloth, &mut vertices);
    assert_eq!(vertices, rest);
}

#[test]
fn animating_points_ignore_brush() {
    let mut cloth = Cloth::builder(2, 2).spacing(10.0, 10.0).seed(8).build().unwrap();
    let mut vertices = vec![0.0; cloth.vertex_len()];
    let pointer = Pointer::from_state(true, 10.0, 10.0, Some((0.0, 0.0)));

    // Still revealing: the brush has no effect, positions follow the tweens
    let mut reference = cloth.clone();
    let mut reference_vertices = vertices.clone();
    cloth.frame(DT, &pointer, &mut vertices).unwrap();
    reference
        .frame(DT, &Pointer::new(), &mut reference_vertices)
        .unwrap();
    assert_eq!(vertices, reference_vertices);
}

#[test]
fn randomize_then_reset_chain() {
    let mut cloth = Cloth::builder(3, 3).spacing(5.0, 5.0).seed(21).reveal(false).build().unwrap();
    let mut vertices = vec![0.0; cloth.vertex_len()];
    cloth.write_vertices(&mut vertices).unwrap();
    let rest = vertices.clone();

    // Point 0 resets itself when its hop lands; the others stay displaced
    cloth.randomize(Then::Reset);
    settle(&mut cloth, &mut vertices);
    assert_eq!(&vertices[..2], &rest[..2]);
    assert_ne!(&vertices[2..], &rest[2..]);
    assert!(cloth.drain_events().is_empty());

    let id = cloth.next_completion_id();
    cloth.randomize_all(id);
    settle(&mut cloth, &mut vertices);
    assert_eq!(cloth.drain_events(), vec![ClothEvent::Completed(id)]);
}
