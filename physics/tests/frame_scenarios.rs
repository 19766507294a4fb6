use std::f32::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use skate_physics::collision::{CollisionResolver, Quat, box_on_floor, ground_plane};
use skate_physics::{
    DEFAULT_DT, FrameInput, GeometryDef, KinematicIntegrator, MovementState, PhysicsSettings,
    SceneGeometry, ShapeDef, SkateBody, Vec3,
};

const REST: f32 = 0.5;

fn flat_park() -> SceneGeometry {
    SceneGeometry::build(vec![ground_plane(0, 0.0)])
}

fn spawn(position: Vec3) -> SkateBody {
    SkateBody::new(PhysicsSettings::default(), position)
}

fn rail(id: u32, bottom: f32, z: f32) -> GeometryDef {
    let radius = 0.05;
    GeometryDef::new(
        id,
        "rail_flat",
        ShapeDef::CylinderY {
            radius,
            half_height: 3.0,
        },
    )
    .at(Vec3::new(0.0, bottom + radius, z))
    .rotated(Quat::from_axis_angle(&Vec3::z_axis(), FRAC_PI_2))
}

#[test]
fn forward_for_sixty_frames_on_flat_ground() {
    let scene = flat_park();
    let mut body = spawn(Vec3::new(0.0, REST, 0.0));
    let settings = PhysicsSettings::default();

    let mut last_z = 0.0;
    for frame in 0..60 {
        let out = body.step(&FrameInput::forward(), &scene, DEFAULT_DT);

        assert!(out.position.z < last_z, "frame {frame}: z did not decrease");
        last_z = out.position.z;

        assert!(out.horizontal_speed <= settings.base_speed);
        assert_relative_eq!(out.position.y, REST, epsilon = 1.0e-4);
        assert_relative_eq!(out.position.x, 0.0);
        assert_eq!(out.movement, MovementState::Grounded);
        assert!(!out.is_jumping && !out.in_air && !out.collided);
    }
    assert!(body.state().wheel_rotation > 0.0);
}

#[test]
fn jump_in_place_follows_gravity_and_lands_on_ground() {
    let scene = flat_park();
    let mut body = spawn(Vec3::new(0.0, REST, 0.0));
    let settings = PhysicsSettings::default();

    let out = body.step(&FrameInput::idle().with_jump(1.5), &scene, DEFAULT_DT);
    assert!(out.is_jumping);
    assert_eq!(out.movement, MovementState::Jumping);
    let mut vy = body.state().velocity.y;
    assert_relative_eq!(vy, settings.jump_force * 1.5 - settings.gravity, epsilon = 1.0e-6);

    let mut saw_in_air = false;
    let mut landed = false;
    for _ in 0..200 {
        let out = body.step(&FrameInput::idle(), &scene, DEFAULT_DT);
        saw_in_air |= out.in_air;

        if out.movement == MovementState::Landed {
            assert_eq!(out.position.y, out.ground.height);
            assert_relative_eq!(out.position.y, REST, epsilon = 1.0e-5);
            assert!(!out.is_jumping);
            assert!(!out.in_air);
            assert_eq!(body.state().velocity.y, 0.0);
            landed = true;
            break;
        }

        assert!(out.position.y > REST);
        let next = body.state().velocity.y;
        assert_relative_eq!(next, vy - settings.gravity, epsilon = 1.0e-5);
        vy = next;
    }
    assert!(saw_in_air);
    assert!(landed, "body never landed");

    let out = body.step(&FrameInput::idle(), &scene, DEFAULT_DT);
    assert_eq!(out.movement, MovementState::Grounded);
}

#[test]
fn jump_height_is_deterministic_and_scales_with_power() {
    let scene = flat_park();
    let peak = |power: f32| {
        let mut body = spawn(Vec3::new(0.0, REST, 0.0));
        let first = body.step(&FrameInput::idle().with_jump(power), &scene, DEFAULT_DT);
        let mut peak = first.position.y;
        for _ in 0..200 {
            let out = body.step(&FrameInput::idle(), &scene, DEFAULT_DT);
            peak = peak.max(out.position.y);
            if out.movement == MovementState::Landed {
                break;
            }
        }
        peak
    };

    assert_eq!(peak(1.0), peak(1.0));
    assert!(peak(2.0) > peak(1.0));
}

#[test]
fn wall_contact_rolls_back_and_rerun_is_idempotent() {
    let wall = box_on_floor(1, "wall_north", Vec3::new(0.0, 0.0, -3.0), Vec3::new(5.0, 2.0, 0.25));
    let scene = SceneGeometry::build(vec![ground_plane(0, 0.0), wall]);
    let mut body = spawn(Vec3::new(0.0, REST, 0.0));

    let mut hit = None;
    for frame in 0..120 {
        let before = body.state().position;
        let out = body.step(&FrameInput::forward(), &scene, DEFAULT_DT);
        if out.collided {
            assert_eq!(out.position, before);
            assert_eq!(body.state().velocity, Vec3::zeros());
            assert!(body.resolver().wall_collision_detected());
            hit = Some(frame);
            break;
        }
    }
    assert!(hit.is_some(), "wall never reached");
    assert!(body.state().position.z > -2.75);

    let mut integrator = body.integrator().clone();
    let mut resolver = CollisionResolver::new();
    let snapshot = *integrator.state();
    resolver.check_collisions(&mut integrator, &scene);
    assert_eq!(*integrator.state(), snapshot);
}

#[test]
fn jump_in_place_against_wall_is_cancelled() {
    let wall = box_on_floor(1, "wall_north", Vec3::new(0.0, 0.0, -0.75), Vec3::new(5.0, 2.0, 0.25));
    let scene = SceneGeometry::build(vec![ground_plane(0, 0.0), wall]);
    let start = Vec3::new(0.0, REST, 0.0);
    let mut body = spawn(start);

    let out = body.step(&FrameInput::idle().with_jump(1.0), &scene, DEFAULT_DT);
    assert!(out.collided);
    assert!(!out.is_jumping && !out.in_air);
    assert_eq!(out.position, start);
    assert_eq!(out.movement, MovementState::Grounded);
    assert_eq!(body.state().velocity, Vec3::zeros());
}

#[test]
fn high_rail_never_blocks() {
    let scene = SceneGeometry::build(vec![ground_plane(0, 0.0), rail(1, 1.3, -2.0)]);
    let mut body = spawn(Vec3::new(0.0, REST, 0.0));

    for _ in 0..60 {
        let out = body.step(&FrameInput::forward(), &scene, DEFAULT_DT);
        assert!(!out.collided);
    }
    assert!(body.state().position.z < -4.0);
}

#[test]
fn low_rail_blocks_rolling_body() {
    let scene = SceneGeometry::build(vec![ground_plane(0, 0.0), rail(1, 0.3, -2.0)]);
    let mut body = spawn(Vec3::new(0.0, REST, 0.0));

    let mut blocked = false;
    for _ in 0..60 {
        if body.step(&FrameInput::forward(), &scene, DEFAULT_DT).collided {
            blocked = true;
            break;
        }
    }
    assert!(blocked);
    assert!(body.state().position.z > -2.0);
}

#[test]
fn world_bounds_clamp_position() {
    let scene = flat_park();
    let settings = PhysicsSettings::default();
    let mut body = spawn(Vec3::new(settings.world_bounds - 0.5, REST, 0.0));
    // Face +X.
    body.integrator_mut().state_mut().yaw = -FRAC_PI_2;

    for _ in 0..60 {
        let out = body.step(&FrameInput::forward().with_sprint(), &scene, DEFAULT_DT);
        assert!(out.position.x <= settings.world_bounds);
        assert!(out.position.z.abs() <= settings.world_bounds);
    }
    assert_eq!(body.state().position.x, settings.world_bounds);
}

#[test]
fn body_settles_on_ramp_and_slides_downhill() {
    let angle = 35.0_f32.to_radians();
    // Raised so the whole top face stays above the ground plane.
    let center = Vec3::new(0.0, 3.0, -4.0);
    let half_extents = Vec3::new(2.0, 0.5, 4.0);
    let rotation = Quat::from_axis_angle(&Vec3::x_axis(), angle);
    let ramp = GeometryDef::new(1, "ramp", ShapeDef::Cuboid { half_extents })
        .at(center)
        .rotated(rotation);
    let scene = SceneGeometry::build(vec![ground_plane(0, 0.0), ramp]);

    // Top face passes through `top` with normal `rotation * +Y`.
    let normal = rotation * Vec3::y();
    let top = center + normal * half_extents.y;
    let surface_y = |z: f32| top.y - angle.tan() * (z - top.z);

    let mut body = spawn(Vec3::new(0.0, surface_y(-4.0) + REST + 0.4, -4.0));
    let mut out = body.step(&FrameInput::idle(), &scene, DEFAULT_DT);
    for _ in 0..120 {
        out = body.step(&FrameInput::idle(), &scene, DEFAULT_DT);
    }

    assert!(out.movement.is_on_ground());
    let ground_normal = out.ground.normal.unwrap_or_default();
    assert_relative_eq!(ground_normal.z, angle.sin(), epsilon = 1.0e-3);
    assert_relative_eq!(out.tilt_x, angle, epsilon = 0.05);
    assert!(out.position.z > -3.9, "body should slide toward +Z");
    assert_relative_eq!(out.position.y, surface_y(out.position.z) + REST, epsilon = 1.0e-3);
}

#[test]
fn integrator_and_resolver_compose_without_the_body() {
    let scene = flat_park();
    let mut integrator =
        KinematicIntegrator::new(PhysicsSettings::default(), Vec3::new(0.0, REST, 0.0));
    let mut resolver = CollisionResolver::new();

    integrator.handle_input(&FrameInput::forward(), DEFAULT_DT);
    integrator.update_physics(DEFAULT_DT);
    assert!(!resolver.check_collisions(&mut integrator, &scene));
    let ground = resolver.check_ground(&integrator, &scene);
    assert!(ground.found);
    assert_eq!(integrator.apply_gravity(ground.height, DEFAULT_DT), MovementState::Grounded);
}
