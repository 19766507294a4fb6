//! Demo skatepark used by the simulator.
//!
//! Layout (spawn at the origin facing -Z):
//! - infinite ground plane at y = 0, boxed in by four perimeter walls at +-30
//! - a clear lane along -Z with a line of coins
//! - ledge and flat rail on the +X side, a raised rail and a ramp on the -X side
//! - a quarter-pipe style coping ring and a bench further out

use std::f32::consts::{FRAC_PI_2, PI};

use skate_physics::collision::{GeometryDef, Quat, ShapeDef, Vec3, box_on_floor, ground_plane};

/// Distance from the origin to the centre of each perimeter wall.
pub const PERIMETER: f32 = 30.0;
const WALL_HALF_THICKNESS: f32 = 0.5;
const WALL_HALF_HEIGHT: f32 = 2.0;

pub const COIN_COUNT: u32 = 4;

pub fn spawn_point() -> Vec3 {
    Vec3::new(0.0, 0.5, 0.0)
}

/// Static geometry of the park, ids starting at 0.
pub fn skatepark() -> Vec<GeometryDef> {
    let mut defs = vec![ground_plane(0, 0.0)];
    defs.extend(perimeter_walls(1));

    defs.push(box_on_floor(
        5,
        "ledge",
        Vec3::new(8.0, 0.0, -8.0),
        Vec3::new(2.0, 0.25, 3.0),
    ));

    // Downhill ramp: tilted around X so moving -Z goes uphill.
    defs.push(
        GeometryDef::new(
            6,
            "ramp",
            ShapeDef::Cuboid {
                half_extents: Vec3::new(1.5, 1.0, 6.0),
            },
        )
        .at(Vec3::new(-8.0, 0.0, -10.0))
        .rotated(Quat::from_axis_angle(&Vec3::x_axis(), 20.0_f32.to_radians())),
    );

    // Rails run along Z.
    let along_z = Quat::from_axis_angle(&Vec3::x_axis(), FRAC_PI_2);
    defs.push(rail(7, "rail_flat", Vec3::new(4.0, 0.0, -12.0), 0.4, along_z));
    defs.push(rail(8, "rail_high", Vec3::new(-4.0, 0.0, -12.0), 1.4, along_z));
    for (id, z) in [(9, -7.5), (10, -16.5)] {
        defs.push(
            GeometryDef::new(
                id,
                "post",
                ShapeDef::CylinderY {
                    radius: 0.1,
                    half_height: 0.2,
                },
            )
            .at(Vec3::new(4.0, 0.2, z)),
        );
    }

    defs.push(
        GeometryDef::new(
            11,
            "coping",
            ShapeDef::Torus {
                major_radius: 2.0,
                minor_radius: 0.06,
                arc: PI,
            },
        )
        .at(Vec3::new(14.0, 0.6, 6.0)),
    );

    defs.push(box_on_floor(
        12,
        "structure_bench",
        Vec3::new(-14.0, 0.0, 8.0),
        Vec3::new(2.5, 0.4, 0.6),
    ));

    defs.extend((0..COIN_COUNT).map(|i| {
        GeometryDef::new(100 + i, format!("coin_{i}"), ShapeDef::Sphere { radius: 0.3 })
            .at(Vec3::new(0.0, 0.8, -5.0 * (i + 1) as f32))
    }));

    defs
}

fn perimeter_walls(first_id: u32) -> Vec<GeometryDef> {
    let long = PERIMETER + WALL_HALF_THICKNESS;
    let along_x = Vec3::new(long, WALL_HALF_HEIGHT, WALL_HALF_THICKNESS);
    let along_z = Vec3::new(WALL_HALF_THICKNESS, WALL_HALF_HEIGHT, long);

    [
        ("wall_north", Vec3::new(0.0, 0.0, -PERIMETER), along_x),
        ("wall_south", Vec3::new(0.0, 0.0, PERIMETER), along_x),
        ("wall_east", Vec3::new(PERIMETER, 0.0, 0.0), along_z),
        ("wall_west", Vec3::new(-PERIMETER, 0.0, 0.0), along_z),
    ]
    .into_iter()
    .zip(first_id..)
    .map(|((tag, base, half_extents), id)| box_on_floor(id, tag, base, half_extents))
    .collect()
}

/// Thin rail whose underside sits `bottom` above `base.y`.
fn rail(id: u32, tag: &str, base: Vec3, bottom: f32, rotation: Quat) -> GeometryDef {
    const RADIUS: f32 = 0.05;
    GeometryDef::new(
        id,
        tag,
        ShapeDef::CylinderY {
            radius: RADIUS,
            half_height: 4.5,
        },
    )
    .at(base + Vec3::new(0.0, bottom + RADIUS, 0.0))
    .rotated(rotation)
}
