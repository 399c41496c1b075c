use super::{Flight, ProjectileEnv, ProjectileKind, Shape, TileResponse};
use crate::anim::{Animator, Clip};
use crate::config::FireballConfig;
use crate::geometry::{Aabb, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Flying,
    Exploding,
}

/// Witch fireball aimed at a snapshot of the player.
///
/// On a wall or a hit it stops in place and plays its explosion; it is only
/// removed once the explosion reaches its last frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Fireball {
    center: Vec2,
    velocity: Vec2,
    gravity: f32,
    half: f32,
    damage: u32,
    age: u32,
    lifetime: u32,
    anim: Animator<Stage>,
    fly: Clip,
    explode: Clip,
    dead: bool,
}

impl Fireball {
    pub fn new(origin: Vec2, target: Vec2, config: &FireballConfig) -> Self {
        let heading = (target - origin).angle();
        Self {
            center: origin,
            velocity: Vec2::from_angle(heading, config.speed),
            gravity: config.gravity,
            half: config.size * 0.5,
            damage: config.damage,
            age: 0,
            lifetime: config.lifetime_ticks,
            anim: Animator::new(Stage::Flying),
            fly: config.fly,
            explode: config.explode,
            dead: false,
        }
    }

    pub fn is_exploding(&self) -> bool {
        self.anim.state() == Stage::Exploding
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn start_explode(&mut self) {
        if self.is_exploding() {
            return;
        }
        self.velocity = Vec2::ZERO;
        self.anim.restart(Stage::Exploding);
    }
}

impl Flight for Fireball {
    fn kind(&self) -> ProjectileKind {
        ProjectileKind::Fireball
    }

    fn tile_response(&self) -> TileResponse {
        TileResponse::Explode
    }

    fn damage(&self) -> u32 {
        self.damage
    }

    fn update(&mut self, env: &ProjectileEnv) {
        match self.anim.state() {
            Stage::Flying => {
                self.velocity.y += self.gravity;
                self.center = self.center + self.velocity;
                self.anim.advance(&self.fly);
                self.age += 1;
                if self.age >= self.lifetime {
                    self.start_explode();
                } else if env.culls(&self.shape().bounds()) {
                    self.dead = true;
                }
            }
            Stage::Exploding => {
                self.anim.advance(&self.explode);
                if self.anim.finished(&self.explode) && self.anim.entering_frame(&self.explode) {
                    self.dead = true;
                }
            }
        }
    }

    fn shape(&self) -> Shape {
        Shape::Box(Aabb::from_center(self.center, self.half, self.half))
    }

    fn position(&self) -> Vec2 {
        self.center
    }

    fn is_dead(&self) -> bool {
        self.dead
    }

    fn is_armed(&self) -> bool {
        !self.dead && !self.is_exploding()
    }

    fn land_hit(&mut self) {
        self.start_explode();
    }

    fn hit_tile(&mut self) {
        self.start_explode();
    }

    fn anim(&self) -> (&'static str, u16) {
        match self.anim.state() {
            Stage::Flying => ("fly", self.anim.frame()),
            Stage::Exploding => ("explode", self.anim.frame()),
        }
    }
}
