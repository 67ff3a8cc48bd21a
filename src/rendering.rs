//! Visual layer: camera, filled `Mesh2d` shapes, and the ship tint.
//!
//! Gameplay entities are spawned without visuals by [`crate::simulation`];
//! the `Added<T>` systems here give each one a retained mesh the first frame
//! it exists.  Pooled bullets keep their mesh for life and are only hidden
//! and shown by the weapon systems.
//!
//! | Entity   | Shape                         | Fill             |
//! |----------|-------------------------------|------------------|
//! | Ship     | dart, nose along +Y           | pale teal × tint |
//! | Asteroid | jittered 12-gon, scaled       | grey-brown       |
//! | Bullet   | slim dart along +X (heading)  | yellow           |

use crate::asteroid::Asteroid;
use crate::config::GameConfig;
use crate::player::{Bullet, Player, ShipTint};
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

const SHIP_FILL: Color = Color::srgb(0.55, 0.95, 0.90);
const BULLET_FILL: Color = Color::srgb(1.0, 0.85, 0.1);
const ASTEROID_SEGMENTS: u32 = 12;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera).add_systems(
            Update,
            (
                attach_ship_mesh_system,
                attach_asteroid_mesh_system,
                attach_bullet_mesh_system,
                sync_ship_tint_system,
            ),
        );
    }
}

/// Fixed camera looking at the centre of the world rectangle.
pub fn setup_camera(mut commands: Commands, config: Res<GameConfig>) {
    commands.spawn((
        Camera2d,
        Transform::from_translation(config.world_center().extend(0.0)),
    ));
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Fan-triangulate a polygon from vertex 0 into a renderable [`Mesh`].
///
/// Triangles `(0, i, i+1)` for `i ∈ 1..n-1`; correct for convex outlines and
/// for star-shaped ones whose first vertex is the centre.
pub fn filled_polygon_mesh(vertices: &[Vec2]) -> Mesh {
    let n = vertices.len();
    debug_assert!(n >= 3, "polygon must have ≥ 3 vertices");

    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| [v.x, v.y, 0.0]).collect();
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; n];
    let uvs: Vec<[f32; 2]> = vertices
        .iter()
        .map(|v| [(v.x / 100.0) + 0.5, (v.y / 100.0) + 0.5])
        .collect();

    let mut indices: Vec<u32> = Vec::with_capacity(n.saturating_sub(2) * 3);
    for i in 1..(n as u32).saturating_sub(1) {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Ship outline; the nose points along local +Y.
fn ship_vertices() -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, 16.0),
        Vec2::new(-12.0, -12.0),
        Vec2::new(-4.0, -6.0),
        Vec2::new(0.0, -12.0),
        Vec2::new(4.0, -6.0),
        Vec2::new(12.0, -12.0),
    ]
}

/// Bullet outline; the tip points along local +X, the launch heading.
fn bullet_vertices(radius: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(radius * 2.0, 0.0),
        Vec2::new(-radius, radius * 0.75),
        Vec2::new(-radius, -radius * 0.75),
    ]
}

/// Lumpy rock outline around the origin, deterministic per `seed`.
///
/// Rim radii stay within ±12% of `radius` so the fill tracks the circular
/// collider.  The centre is vertex 0 and the first rim vertex is repeated at
/// the end to close the fan.
fn rock_vertices(radius: f32, seed: u32) -> Vec<Vec2> {
    let mut verts = Vec::with_capacity(ASTEROID_SEGMENTS as usize + 2);
    verts.push(Vec2::ZERO);
    for i in 0..ASTEROID_SEGMENTS {
        let h = seed
            .wrapping_add(i)
            .wrapping_mul(2_654_435_761)
            .wrapping_add(0xDEAD_BEEF);
        let jitter = ((h >> 8) & 0xFF) as f32 / 255.0;
        let r = radius * (0.88 + jitter * 0.24);
        let angle = i as f32 * std::f32::consts::TAU / ASTEROID_SEGMENTS as f32;
        verts.push(Vec2::from_angle(angle) * r);
    }
    verts.push(verts[1]);
    verts
}

fn rock_color(seed: u32) -> Color {
    let h = seed.wrapping_mul(2_654_435_761).wrapping_add(0xDEAD_BEEF);
    let t = (h & 0xFFFF) as f32 / 65_535.0;

    let lum = 0.35 + t * 0.2;
    Color::srgb((lum + t * 0.06).min(1.0), lum, (lum - t * 0.05).max(0.0))
}

/// Multiply `base` by `tint` per channel, as a sprite tint does.
pub fn tinted(base: Color, tint: Color) -> Color {
    let b = base.to_srgba();
    let t = tint.to_srgba();
    Color::srgba(
        b.red * t.red,
        b.green * t.green,
        b.blue * t.blue,
        b.alpha * t.alpha,
    )
}

// ── Spawn-time mesh attachment ────────────────────────────────────────────────

pub fn attach_ship_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &ShipTint), Added<Player>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, tint) in query.iter() {
        let mesh = meshes.add(filled_polygon_mesh(&ship_vertices()));
        let material = materials.add(ColorMaterial::from_color(tinted(SHIP_FILL, tint.0)));
        commands
            .entity(entity)
            .insert((Mesh2d(mesh), MeshMaterial2d(material)));
    }
}

/// Give each new asteroid a rock mesh sized to its collider.
pub fn attach_asteroid_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &Asteroid), Added<Asteroid>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<GameConfig>,
) {
    for (entity, asteroid) in query.iter() {
        let radius = config.asteroid_base_radius * asteroid.scale;
        let seed = entity.index();
        let mesh = meshes.add(filled_polygon_mesh(&rock_vertices(radius, seed)));
        let material = materials.add(ColorMaterial::from_color(rock_color(seed)));
        commands
            .entity(entity)
            .insert((Mesh2d(mesh), MeshMaterial2d(material)));
    }
}

/// Pooled bullets share one mesh and one material.
pub fn attach_bullet_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<Bullet>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<GameConfig>,
) {
    if query.is_empty() {
        return;
    }
    let mesh = meshes.add(filled_polygon_mesh(&bullet_vertices(
        config.bullet_collider_radius,
    )));
    let material = materials.add(ColorMaterial::from_color(BULLET_FILL));
    for entity in query.iter() {
        commands
            .entity(entity)
            .insert((Mesh2d(mesh.clone()), MeshMaterial2d(material.clone())));
    }
}

/// Push a changed [`ShipTint`] into the ship's material.
pub fn sync_ship_tint_system(
    query: Query<(&ShipTint, &MeshMaterial2d<ColorMaterial>), Changed<ShipTint>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (tint, material) in query.iter() {
        if let Some(material) = materials.get_mut(&material.0) {
            material.color = tinted(SHIP_FILL, tint.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_count(mesh: &Mesh) -> usize {
        mesh.indices().map_or(0, |i| i.len()) / 3
    }

    #[test]
    fn fan_triangulation_counts() {
        assert_eq!(triangle_count(&filled_polygon_mesh(&ship_vertices())), 4);
        assert_eq!(triangle_count(&filled_polygon_mesh(&bullet_vertices(4.0))), 1);
    }

    #[test]
    fn rock_outline_is_closed_and_near_radius() {
        let verts = rock_vertices(20.0, 7);
        assert_eq!(verts.len(), ASTEROID_SEGMENTS as usize + 2);
        assert_eq!(verts[0], Vec2::ZERO);
        assert_eq!(verts[1], verts[verts.len() - 1]);
        for v in &verts[1..] {
            let r = v.length();
            assert!((17.5..=22.5).contains(&r), "rim radius {r}");
        }
        assert_eq!(
            triangle_count(&filled_polygon_mesh(&verts)),
            ASTEROID_SEGMENTS as usize
        );
    }

    #[test]
    fn white_tint_keeps_base_and_red_tint_drops_green_blue() {
        assert_eq!(tinted(SHIP_FILL, Color::WHITE), SHIP_FILL);

        let wrecked = tinted(SHIP_FILL, ShipTint::WRECKED.0).to_srgba();
        assert!((wrecked.red - 0.55).abs() < 1e-6);
        assert_eq!(wrecked.green, 0.0);
        assert_eq!(wrecked.blue, 0.0);
    }
}
