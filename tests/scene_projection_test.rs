use icosa::core::{project_into, Bounce, Point2, Scene, VERTEX_COUNT};
use icosa::types::Geometry;

#[test]
fn apex_identity_pose_projects_symmetrically() {
    let scene = Scene::new(Geometry::new(80, 24).unwrap());
    assert_eq!(scene.bounce().height(), scene.params().max_height);
    assert_eq!(scene.bounce().squash(), 0.0);

    let mut points = [Point2::default(); VERTEX_COUNT];
    scene.project_into(&mut points);

    let cx = scene.viewport().center_x;
    assert_eq!(cx, 80.0);
    for (i, p) in points.iter().enumerate() {
        let mirrored = points
            .iter()
            .any(|q| (q.x - cx + (p.x - cx)).abs() < 1e-3 && (q.y - p.y).abs() < 1e-3);
        assert!(mirrored, "vertex {i} at {p:?} has no mirror image");
    }
    let mean_x = points.iter().map(|p| p.x).sum::<f32>() / VERTEX_COUNT as f32;
    assert!((mean_x - cx).abs() < 1e-3);
}

#[test]
fn projection_is_repeatable_between_steps() {
    let mut scene = Scene::new(Geometry::new(120, 40).unwrap());
    for _ in 0..37 {
        scene.step();
        scene.spin();
    }
    let mut a = [Point2::default(); VERTEX_COUNT];
    let mut b = [Point2::default(); VERTEX_COUNT];
    scene.project_into(&mut a);
    scene.project_into(&mut b);
    assert_eq!(a, b);
}

#[test]
fn squash_flattens_the_solid_on_impact() {
    let mut scene = Scene::new(Geometry::new(80, 24).unwrap());
    let mut points = [Point2::default(); VERTEX_COUNT];

    let height_of = |pts: &[Point2; VERTEX_COUNT]| {
        let top = pts.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        let bottom = pts.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        bottom - top
    };

    // Fall to the first impact.
    while scene.step().is_none() {}
    assert!(scene.bounce().squash() > 0.0);
    let squashed_pose = scene.pose();
    scene.project_into(&mut points);
    let squashed = height_of(&points);

    // Same pose, no squash: compare against a fresh state at the same angles.
    let reference = Bounce::new(0.0, 0.0, 0.0);
    let mut unsquashed = [Point2::default(); VERTEX_COUNT];
    project_into(
        scene.mesh(),
        squashed_pose,
        &reference,
        scene.viewport(),
        &mut unsquashed,
    );
    assert!(squashed < height_of(&unsquashed));
}

#[test]
fn solid_rests_on_the_floor_line_at_impact() {
    let mut scene = Scene::new(Geometry::new(80, 24).unwrap());
    while scene.step().is_none() {}
    assert_eq!(scene.bounce().height(), 0.0);
    let vp = scene.viewport();
    assert!((vp.center_y(0.0) - (vp.floor_y - vp.scale * 0.2)).abs() < 1e-4);
}
