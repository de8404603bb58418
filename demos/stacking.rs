use impulse2d::*;

fn main() -> Result<(), PhysicsError> {
    let mut world = PhysicsWorld::new(PhysicsConfig::default().with_scene_iterations(20));
    world.set_frame_budget(Some(4.0));

    world.add_body(RigidBody::new(
        Shape::rectangle(400.0, 20.0)?,
        Vec2::new(500.0, 600.0),
        Material::default().with_density(0.0),
    )?);

    let mut stack = Vec::new();
    for i in 0..5 {
        let body = RigidBody::new(
            Shape::rectangle(20.0, 20.0)?,
            Vec2::new(500.0, 579.0 - i as f32 * 21.0),
            Material::default().with_restitution(0.0),
        )?;
        stack.push(world.add_body(body));
    }

    for _ in 0..120 {
        world.step();
    }

    println!("Simulated stack of boxes for 2 seconds");
    for handle in stack {
        if let Some(body) = world.body(handle) {
            println!("  {handle:?}: y = {:.2}, angle = {:.3}", body.position.y, body.orientation());
        }
    }
    println!("last step: {:?}", world.last_profile());
    Ok(())
}
