use approx::assert_relative_eq;
use impulse2d::*;

const DT: f32 = 1.0 / 60.0;
const GRAVITY: f32 = 9.8;
const FLOOR_TOP: f32 = 590.0;

fn weightless_world() -> PhysicsWorld {
    PhysicsWorld::new(PhysicsConfig::default().with_gravity(Vec2::ZERO))
}

fn circle_at(x: f32, y: f32) -> RigidBody {
    RigidBody::new(Shape::circle(1.0).unwrap(), Vec2::new(x, y), Material::default()).unwrap()
}

fn box_at(x: f32, y: f32) -> RigidBody {
    RigidBody::new(Shape::rectangle(2.0, 2.0).unwrap(), Vec2::new(x, y), Material::default())
        .unwrap()
}

fn add_floor(world: &mut PhysicsWorld) -> BodyHandle {
    let floor = RigidBody::new(
        Shape::rectangle(400.0, 20.0).unwrap(),
        Vec2::new(500.0, 600.0),
        Material::default().with_density(0.0),
    )
    .unwrap();
    world.add_body(floor)
}

#[test]
fn bodies_fall_under_gravity() {
    let mut world = PhysicsWorld::default();
    let handle = world.add_body(circle_at(100.0, 100.0));

    world.step();

    let body = world.body(handle).expect("body should exist");
    assert_relative_eq!(body.linear_velocity.y, GRAVITY * DT, epsilon = 1e-5);
    assert_relative_eq!(body.position.y, 100.0 + 0.5 * GRAVITY * DT * DT, epsilon = 1e-4);
    assert_eq!(body.position.x, 100.0);
}

#[test]
fn zero_dt_leaves_every_body_untouched() {
    let mut world = weightless_world();
    let a = world.add_body(circle_at(100.0, 100.0).with_velocity(Vec2::new(3.0, -1.0), 0.5));
    let b = world.add_body(box_at(101.0, 100.0));

    world.step_with_dt(0.0);

    let body_a = world.body(a).unwrap();
    assert_eq!(body_a.position, Vec2::new(100.0, 100.0));
    assert_eq!(body_a.linear_velocity, Vec2::new(3.0, -1.0));
    assert_eq!(body_a.angular_velocity, 0.5);
    assert_eq!(world.body(b).unwrap().position, Vec2::new(101.0, 100.0));
}

#[test]
fn separated_boxes_keep_their_velocities() {
    let mut world = weightless_world();
    // Bounding boxes overlap once rotated, but the shapes do not touch.
    let a = world.add_body(box_at(200.0, 200.0).with_velocity(Vec2::new(0.5, 0.0), 0.0));
    let b = world.add_body(
        box_at(202.3, 202.3)
            .with_orientation(std::f32::consts::FRAC_PI_4)
            .with_velocity(Vec2::new(-0.5, 0.0), 0.0),
    );

    world.step();

    assert!(world.contacts().is_empty());
    assert_eq!(world.body(a).unwrap().linear_velocity, Vec2::new(0.5, 0.0));
    assert_eq!(world.body(b).unwrap().linear_velocity, Vec2::new(-0.5, 0.0));
}

#[test]
fn elastic_head_on_circles_swap_velocities() {
    let mut world = weightless_world();
    let material = Material::default().with_restitution(1.0).with_friction(0.0, 0.0);
    let a = world.add_body(
        RigidBody::new(Shape::circle(1.0).unwrap(), Vec2::new(100.0, 100.0), material)
            .unwrap()
            .with_velocity(Vec2::X, 0.0),
    );
    let b = world.add_body(
        RigidBody::new(Shape::circle(1.0).unwrap(), Vec2::new(101.9, 100.0), material)
            .unwrap()
            .with_velocity(-Vec2::X, 0.0),
    );

    world.step();

    assert_eq!(world.contacts().len(), 1);
    let va = world.body(a).unwrap().linear_velocity;
    let vb = world.body(b).unwrap().linear_velocity;
    assert_relative_eq!(va.x, -1.0, epsilon = 1e-4);
    assert_relative_eq!(vb.x, 1.0, epsilon = 1e-4);
    assert_relative_eq!(va.y, 0.0, epsilon = 1e-6);
    assert!(world.body(b).unwrap().position.x - world.body(a).unwrap().position.x > 1.9);
}

#[test]
fn box_comes_to_rest_on_static_floor() {
    let mut world = PhysicsWorld::default();
    let floor = add_floor(&mut world);
    let crate_box = world.add_body(box_at(500.0, 587.0));

    for _ in 0..300 {
        world.step();
    }

    let body = world.body(crate_box).unwrap();
    let penetration = body.position.y + 1.0 - FLOOR_TOP;
    let slop = world.config().slop;
    assert!(
        (-0.01..=slop + 0.01).contains(&penetration),
        "box should rest on the floor, penetration = {penetration}"
    );
    // Only the second half step of gravity is left after the contact impulse.
    assert!(body.linear_velocity.y.abs() <= GRAVITY * DT * 0.6);
    assert!(body.orientation().abs() < 0.05);
    assert_eq!(world.body(floor).unwrap().position, Vec2::new(500.0, 600.0));
}

#[test]
fn circle_comes_to_rest_on_static_floor() {
    let mut world = PhysicsWorld::default();
    add_floor(&mut world);
    let ball = world.add_body(circle_at(500.0, 587.0));

    for _ in 0..300 {
        world.step();
    }

    let body = world.body(ball).unwrap();
    let penetration = body.position.y + 1.0 - FLOOR_TOP;
    assert!(
        (-0.01..=world.config().slop + 0.01).contains(&penetration),
        "circle should rest on the floor, penetration = {penetration}"
    );
    assert!(body.linear_velocity.y.abs() <= GRAVITY * DT * 0.6);
    assert!(body.linear_velocity.x.abs() < 1e-3);
}

#[test]
fn body_touching_floor_does_not_sink() {
    let mut world = PhysicsWorld::default();
    add_floor(&mut world);
    let start = Vec2::new(500.0, 589.001);
    let ball = world.add_body(circle_at(start.x, start.y));

    world.step();

    assert_eq!(world.contacts().len(), 1);
    let body = world.body(ball).unwrap();
    assert_relative_eq!(body.position.y, start.y, epsilon = 1e-5);
    assert_relative_eq!(body.linear_velocity.y, 0.5 * GRAVITY * DT, epsilon = 1e-4);
}

#[test]
fn static_pairs_never_produce_manifolds() {
    let mut world = PhysicsWorld::default();
    add_floor(&mut world);
    add_floor(&mut world);

    world.step();

    assert!(world.contacts().is_empty());
    assert_eq!(world.last_profile().manifold_count, 0);
}

#[test]
fn engine_spawns_bodies_and_advances_in_fixed_steps() {
    let mut engine = PhysicsEngine::new(PhysicsConfig::default());
    let handle = engine
        .spawn(Shape::circle(1.0).unwrap(), Vec2::new(50.0, 50.0), Material::default())
        .expect("valid material");

    assert_eq!(engine.update(DT * 3.5), 3);
    let body = engine.get_body(handle).unwrap();
    assert!(body.position.y > 50.0);
    assert_relative_eq!(body.linear_velocity.y, GRAVITY * DT * 3.0, epsilon = 1e-4);

    let rejected = engine.spawn(
        Shape::circle(1.0).unwrap(),
        Vec2::ZERO,
        Material::default().with_restitution(2.0),
    );
    assert!(matches!(
        rejected,
        Err(PhysicsError::Material(MaterialError::RestitutionOutOfRange(_)))
    ));
}

#[test]
fn removed_bodies_are_no_longer_simulated() {
    let mut world = PhysicsWorld::default();
    let handle = world.add_body(circle_at(10.0, 10.0));
    assert!(world.remove_body(handle).is_some());
    assert!(world.body(handle).is_none());
    assert!(world.remove_body(handle).is_none());

    world.step();
    assert_eq!(world.body_count(), 0);
}
