use impulse2d::*;

fn main() -> Result<(), PhysicsError> {
    let mut engine = PhysicsEngine::new(PhysicsConfig::default());

    engine.spawn(
        Shape::rectangle(400.0, 20.0)?,
        Vec2::new(500.0, 600.0),
        Material::default().with_density(0.0),
    )?;

    let ball = engine.spawn(
        Shape::circle(5.0)?,
        Vec2::new(500.0, 500.0),
        Material::default().with_restitution(0.6),
    )?;

    // Two seconds of wall time at 60 Hz.
    let steps = engine.update(2.0);
    if let Some(body) = engine.get_body(ball) {
        println!(
            "after {steps} steps: position {:?}, velocity {:?}",
            body.position, body.linear_velocity
        );
    }
    Ok(())
}
