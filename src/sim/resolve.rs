//! Per-tick collision resolution between the actor and the world
//!
//! Runs after gravity and before integration. It reads the momentum gravity
//! produced and rewrites it so that integration can apply it unmodified.

use glam::IVec2;

use super::collision::{inset_box, minimal_separation, overlaps};
use super::state::{Actor, GameObject, ObjectKind, World};
use crate::consts::{HAZARD_INSET, SOLID_PROBE_INSET, SOLID_PROBE_SHRINK};
use crate::settings::Settings;

/// Outcome of one resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    /// The actor's projected box touched a hazard
    pub died: bool,
    /// Collectibles picked up this pass
    pub collected: u32,
}

/// Does the hazard's lethal core touch the actor's projected box?
fn hazard_hit(hazard: &GameObject, tile: IVec2, projected: IVec2) -> bool {
    let (core_pos, core_size) = inset_box(hazard.pos, tile, HAZARD_INSET);
    overlaps(core_pos, core_size, projected, tile)
}

/// Resolve the actor against every active object.
///
/// Hazards are checked first against the momentum gravity left behind. On a
/// hit only the collectibles ahead of that hazard in object order are picked
/// up and solids are skipped. Otherwise collectibles and solids are handled in
/// object order.
pub fn resolve(world: &mut World, actor: &mut Actor, settings: &Settings) -> Resolution {
    let tile = settings.tile_extent();
    let mut resolution = Resolution::default();

    let projected = actor.pos() + actor.momentum;
    let lethal = world.objects.iter().position(|o| {
        o.active && matches!(o.kind, ObjectKind::Hazard(_)) && hazard_hit(o, tile, projected)
    });
    let end = lethal.unwrap_or(world.objects.len());

    for object in world.objects[..end].iter_mut().filter(|o| o.active) {
        match object.kind {
            ObjectKind::Collectible => {
                let projected = actor.pos() + actor.momentum;
                if overlaps(object.pos, tile, projected, tile) {
                    object.active = false;
                    actor.collected += 1;
                    resolution.collected += 1;
                    log::debug!("Collected item at ({}, {})", object.pos.x, object.pos.y);
                }
            }
            ObjectKind::Solid(_) if lethal.is_none() => resolve_solid(object.pos, tile, actor),
            ObjectKind::Solid(_) | ObjectKind::Hazard(_) | ObjectKind::Actor | ObjectKind::Empty => {}
        }
    }

    if let Some(index) = lethal {
        let hazard = &world.objects[index];
        log::info!("Actor hit hazard at ({}, {})", hazard.pos.x, hazard.pos.y);
        resolution.died = true;
    }

    resolution
}

/// Clamp the actor's momentum against one solid tile
fn resolve_solid(solid: IVec2, tile: IVec2, actor: &mut Actor) {
    let pos = actor.pos();
    let momentum = actor.momentum;

    // Distance the actor can travel before first contact; momentum that would
    // carry it further is cut back so fast bodies cannot skip the tile
    let safe = minimal_separation(solid, tile, pos, tile);
    let mut projected = pos + momentum;
    if momentum.x * safe.x > 0 && momentum.x.abs() > safe.x.abs() {
        projected.x = pos.x + safe.x;
    }
    if momentum.y * safe.y > 0 && momentum.y.abs() > safe.y.abs() {
        projected.y = pos.y + safe.y;
    }

    // Horizontal probe, trimmed top and bottom so floors and ceilings the
    // actor merely touches do not block walking
    let probe_pos = IVec2::new(projected.x, pos.y + SOLID_PROBE_INSET);
    let probe_size = IVec2::new(tile.x, tile.y - SOLID_PROBE_SHRINK);
    if overlaps(solid, tile, probe_pos, probe_size) {
        actor.momentum.x = safe.x;
    }

    // Vertical probe, trimmed left and right so walls do not count as floors
    let probe_pos = IVec2::new(pos.x + SOLID_PROBE_INSET, projected.y);
    let probe_size = IVec2::new(tile.x - SOLID_PROBE_SHRINK, tile.y);
    if overlaps(solid, tile, probe_pos, probe_size) {
        if actor.is_jumping() {
            actor.hit_ceiling();
        } else if actor.momentum.y > 0 {
            actor.land();
        }
        actor.momentum.y = safe.y;
    }
}
