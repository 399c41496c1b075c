//! Damage resolution between actors and projectiles.
//!
//! Every hit follows the same handshake: the attacker only checks overlap,
//! the target decides whether it is vulnerable, and a projectile latches only
//! after the target accepted the hit.

use crate::actor::{Boss, Combatant, Enemy, Player};
use crate::combat::HitResult;
use crate::config::GameConfig;
use crate::event::{EventQueue, GameEvent};
use crate::geometry::Aabb;
use crate::projectile::{Faction, Projectile, ProjectileKind};
use crate::state::EntityId;

/// Mutable score plus the queue it reports into.
pub(super) struct Ledger<'a> {
    pub score: &'a mut u64,
    pub events: &'a mut EventQueue,
}

impl Ledger<'_> {
    fn award(&mut self, points: u64) {
        if points == 0 {
            return;
        }
        *self.score = self.score.saturating_add(points);
        self.events.push(GameEvent::ScoreChanged { score: *self.score });
    }
}

pub(super) fn hurt_player(player: &mut Player, damage: u32, events: &mut EventQueue) -> HitResult {
    let result = player.hit(damage);
    match result {
        HitResult::Ignored => {}
        HitResult::Hurt { remaining, .. } => events.push(GameEvent::PlayerHurt { hp: remaining }),
        HitResult::Killed { .. } => {
            events.push(GameEvent::PlayerHurt { hp: 0 });
            events.push(GameEvent::PlayerDied);
        }
    }
    result
}

pub(super) fn hurt_enemy(
    enemy: &mut Enemy,
    damage: u32,
    config: &GameConfig,
    ledger: &mut Ledger<'_>,
) -> HitResult {
    let result = enemy.hit(damage);
    match result {
        HitResult::Ignored => {}
        HitResult::Hurt { remaining, .. } => ledger.events.push(GameEvent::EnemyHurt {
            id: enemy.id,
            kind: enemy.kind,
            hp: remaining,
        }),
        HitResult::Killed { .. } => {
            ledger.events.push(GameEvent::EnemyHurt {
                id: enemy.id,
                kind: enemy.kind,
                hp: 0,
            });
            ledger.events.push(GameEvent::EnemyDied {
                id: enemy.id,
                kind: enemy.kind,
            });
            ledger.award(enemy.kind.tuning(config).score);
        }
    }
    result
}

pub(super) fn hurt_boss(boss: &mut Boss, damage: u32, config: &GameConfig, ledger: &mut Ledger<'_>) -> HitResult {
    let result = boss.hit(damage);
    boss.drain_events_into(ledger.events);
    if let HitResult::Killed { .. } = result {
        ledger.award(config.boss.score);
    }
    result
}

/// Applies a player melee swing to every enemy and the boss it covers.
pub(super) fn player_strike(
    hitbox: &Aabb,
    damage: u32,
    enemies: &mut [Enemy],
    boss: Option<&mut Boss>,
    config: &GameConfig,
    ledger: &mut Ledger<'_>,
) {
    for enemy in enemies.iter_mut() {
        if enemy.is_vulnerable() && hitbox.overlaps(&enemy.hurtbox()) {
            hurt_enemy(enemy, damage, config, ledger);
        }
    }
    if let Some(boss) = boss {
        if boss.is_vulnerable() && hitbox.overlaps(&boss.hurtbox()) {
            hurt_boss(boss, damage, config, ledger);
        }
    }
}

/// Resolves one projectile against whatever it can damage.
pub(super) fn projectile_hits(
    projectile: &mut Projectile,
    player: &mut Player,
    enemies: &mut [Enemy],
    boss: Option<&mut Boss>,
    config: &GameConfig,
    ledger: &mut Ledger<'_>,
) {
    let damage = projectile.damage();
    match projectile.faction() {
        Faction::Hostile => {
            let target = player.hurtbox();
            if projectile.touches(&target) && player.is_vulnerable() {
                hurt_player(player, damage, ledger.events);
                projectile.land_hit();
                announce_burst(projectile, ledger.events);
            }
        }
        Faction::Friendly => {
            for enemy in enemies.iter_mut() {
                if !projectile.touches(&enemy.hurtbox()) || !enemy.is_vulnerable() {
                    continue;
                }
                let result = hurt_enemy(enemy, damage, config, ledger);
                projectile.land_hit();
                ledger.events.push(GameEvent::ArrowHitEnemy {
                    target: enemy.id,
                    damage: result.dealt(),
                });
                return;
            }
            if let Some(boss) = boss {
                if projectile.touches(&boss.hurtbox()) && boss.is_vulnerable() {
                    let result = hurt_boss(boss, damage, config, ledger);
                    projectile.land_hit();
                    ledger.events.push(GameEvent::ArrowHitEnemy {
                        target: EntityId::BOSS,
                        damage: result.dealt(),
                    });
                }
            }
        }
    }
}

/// Reports the tile reaction of a projectile that just overlapped solid ground.
pub(super) fn announce_tile_hit(projectile: &Projectile, events: &mut EventQueue) {
    match projectile.kind() {
        ProjectileKind::Arrow => events.push(GameEvent::ArrowHitWall {
            at: projectile.position(),
        }),
        ProjectileKind::Fireball => announce_burst(projectile, events),
        _ => {}
    }
}

fn announce_burst(projectile: &Projectile, events: &mut EventQueue) {
    if projectile.kind() == ProjectileKind::Fireball {
        events.push(GameEvent::FireballExploded {
            at: projectile.position(),
        });
    }
}
