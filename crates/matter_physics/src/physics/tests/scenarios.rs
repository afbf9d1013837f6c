//! End-to-end scenarios run through a [`Universe`]

use approx::assert_relative_eq;

use crate::config::PhysicsConfig;
use crate::foundation::math::Vec3;
use crate::graphic::NullSink;
use crate::matter::Matter;
use crate::physics::{CollisionBox, Mass, ResolutionConfig, ResolutionMode};
use crate::world::Universe;

fn config(g: f64, resolution: ResolutionMode) -> PhysicsConfig {
    PhysicsConfig {
        gravitational_constant: g,
        resolution: ResolutionConfig {
            mode: resolution,
            restitution: 0.0,
        },
        ..PhysicsConfig::default()
    }
}

#[test]
fn test_thrust_scenario_one_step() {
    let mut universe = Universe::new(config(0.0, ResolutionMode::None)).unwrap();
    let mass = Mass::new(10.0, Vec3::zeros(), Vec3::zeros())
        .unwrap()
        .with_base_force(Vec3::new(10.0, 0.0, 0.0));
    let id = universe.spawn(Matter::new(mass, CollisionBox::circle(1.0).unwrap()));

    universe.tick(1.0, &mut NullSink).unwrap();

    let matter = universe.get(id).unwrap();
    assert_relative_eq!(matter.velocity(), Vec3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(matter.position(), Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn test_zero_dt_tick_changes_nothing() {
    let mut universe = Universe::new(config(1.0, ResolutionMode::Separate)).unwrap();
    let a = universe.spawn(Matter::new(
        Mass::new(3.0, Vec3::new(1.0, 2.0, 0.0), Vec3::new(4.0, -1.0, 0.0)).unwrap(),
        CollisionBox::circle(0.5).unwrap(),
    ));
    universe.spawn(Matter::new(
        Mass::new(5.0, Vec3::new(-6.0, 0.0, 0.0), Vec3::zeros()).unwrap(),
        CollisionBox::rectangle(1.0, 1.0).unwrap(),
    ));

    universe.tick(0.0, &mut NullSink).unwrap();

    let matter = universe.get(a).unwrap();
    assert_eq!(matter.position(), Vec3::new(1.0, 2.0, 0.0));
    assert_eq!(matter.velocity(), Vec3::new(4.0, -1.0, 0.0));
}

#[test]
fn test_rectangle_meets_circle() {
    let mut universe = Universe::new(config(0.0, ResolutionMode::None)).unwrap();
    let rect = universe.spawn(Matter::new(
        Mass::new(1.0, Vec3::zeros(), Vec3::zeros()).unwrap(),
        CollisionBox::rectangle(2.0, 2.0).unwrap(),
    ));
    let circle = universe.spawn(Matter::new(
        Mass::new(1.0, Vec3::new(3.0, 0.0, 0.0), Vec3::new(-1.5, 0.0, 0.0)).unwrap(),
        CollisionBox::circle(1.0).unwrap(),
    ));

    assert!(!universe.get(rect).unwrap().collides_with(universe.get(circle).unwrap()));

    // Circle moves from x = 3.0 to x = 1.5
    let report = universe.tick(1.0, &mut NullSink).unwrap();

    assert_eq!(report.collisions.len(), 1);
    assert!(universe.get(rect).unwrap().collides_with(universe.get(circle).unwrap()));
}

#[test]
fn test_circular_orbit_stays_bounded() {
    // v = sqrt(G M / r) gives a circular orbit of period 2πr / v
    let (g, planet_mass, radius): (f64, f64, f64) = (1.0, 1000.0, 10.0);
    let speed = (g * planet_mass / radius).sqrt();

    let mut universe = Universe::new(config(g, ResolutionMode::None)).unwrap();
    universe.spawn(
        Matter::new(
            Mass::new(planet_mass, Vec3::zeros(), Vec3::zeros()).unwrap(),
            CollisionBox::circle(1.0).unwrap(),
        )
        .static_scenery(),
    );
    let moon = universe.spawn(Matter::new(
        Mass::new(1.0, Vec3::new(radius, 0.0, 0.0), Vec3::new(0.0, speed, 0.0)).unwrap(),
        CollisionBox::circle(0.1).unwrap(),
    ));

    let dt = 1e-3;
    let period = std::f64::consts::TAU * radius / speed;
    let steps = (period / dt) as usize;

    for _ in 0..steps {
        universe.tick(dt, &mut NullSink).unwrap();
        let r = universe.get(moon).unwrap().position().magnitude();
        assert!((r - radius).abs() < 0.01 * radius, "orbit drifted to r = {r}");
    }

    // Roughly back where it started after one period
    let end = universe.get(moon).unwrap().position();
    assert!((end - Vec3::new(radius, 0.0, 0.0)).magnitude() < 0.5);
}

#[test]
fn test_box_comes_to_rest_on_ground() {
    let mut universe = Universe::new(config(0.0, ResolutionMode::Separate)).unwrap();
    universe.spawn(
        Matter::new(
            Mass::new(1.0, Vec3::zeros(), Vec3::zeros()).unwrap(),
            CollisionBox::rectangle(20.0, 1.0).unwrap(),
        )
        .static_scenery(),
    );
    let crate_id = universe.spawn(Matter::new(
        Mass::new(1.0, Vec3::new(0.0, 3.0, 0.0), Vec3::zeros())
            .unwrap()
            .with_base_force(Vec3::new(0.0, -10.0, 0.0)),
        CollisionBox::rectangle(1.0, 1.0).unwrap(),
    ));

    for _ in 0..300 {
        universe.tick(0.01, &mut NullSink).unwrap();
    }

    let resting = universe.get(crate_id).unwrap();
    assert_relative_eq!(resting.position().y, 1.0, epsilon = 0.01);
    assert!(resting.velocity().y.abs() < 0.2);
    assert_relative_eq!(resting.position().x, 0.0);
}
