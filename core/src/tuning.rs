//! Tuned gameplay constants grouped per concern.
//!
//! Every group implements [`Default`] with the shipped values and is
//! deserialisable with `#[serde(default)]`, so a partial tuning file only
//! needs to mention the values it overrides. Values read from a file should
//! go through [`Tuning::validate`] before they reach the world.

use glam::Vec3;
use serde::Deserialize;
use thiserror::Error;

/// Largest distance, radius or bound a tuning file may ask for.
pub const MAX_EXTENT: f32 = 1.0e6;

/// Complete set of tuned values consumed by the world and systems.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seed for every random stream owned by the simulation.
    pub seed: u64,
    /// Player stats and controls.
    pub player: PlayerTuning,
    /// Rat stats, banded AI and spit.
    pub rat: RatTuning,
    /// Sewer wave schedule.
    pub waves: WaveTuning,
    /// Player melee attack.
    pub melee: MeleeTuning,
    /// Cars, men and the boss.
    pub hazards: HazardTuning,
    /// Level layout: walls, pickups and trigger lines.
    pub layout: LayoutTuning,
}

/// Player stats and controls.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Where the player starts.
    pub spawn_position: Vec3,
    /// Player scale.
    pub scale: Vec3,
    /// Starting and maximum health.
    pub max_health: f32,
    /// Movement speed in world units per second.
    pub move_speed: f32,
    /// Rotation speed in degrees per second.
    pub rotation_speed: f32,
    /// Initial yaw in degrees.
    pub initial_yaw: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            spawn_position: Vec3::new(0.0, 0.5, 0.0),
            scale: Vec3::ONE,
            max_health: 100.0,
            move_speed: 10.0,
            rotation_speed: 5000.0,
            initial_yaw: 10350.0,
        }
    }
}

/// Rat stats, distance bands and spit.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RatTuning {
    /// Rat scale.
    pub scale: Vec3,
    /// Rat health.
    pub health: f32,
    /// Seconds between spits. Rats spawn with a full cooldown.
    pub cooldown: f32,
    /// Approach and retreat speed.
    pub speed: f32,
    /// Closer than this the rat backs off.
    pub min_distance: f32,
    /// Further than this the rat closes in.
    pub max_distance: f32,
    /// Spit speed.
    pub spit_speed: f32,
    /// Height above the rat's centre where spit is launched.
    pub muzzle_height: f32,
    /// Distance below the player's centre that spit aims at.
    pub aim_drop: f32,
    /// Spit scale.
    pub spit_scale: Vec3,
    /// Seconds before spit expires.
    pub spit_lifetime: f32,
    /// Planar distance at which spit hits the player.
    pub spit_hit_radius: f32,
    /// Damage dealt by one spit hit.
    pub spit_damage: f32,
    /// Radius of the scattered placement search.
    pub spawn_radius: f32,
    /// Candidates sampled before placement falls back to the requested point.
    pub placement_attempts: u32,
    /// Half width of the sewer corridor around the player that rats are clamped into.
    pub corridor_half_width: f32,
}

impl Default for RatTuning {
    fn default() -> Self {
        Self {
            scale: Vec3::splat(1.2),
            health: 40.0,
            cooldown: 2.0,
            speed: 2.0,
            min_distance: 2.0,
            max_distance: 5.0,
            spit_speed: 6.5,
            muzzle_height: 0.7,
            aim_drop: 0.5,
            spit_scale: Vec3::splat(0.002),
            spit_lifetime: 3.0,
            spit_hit_radius: 0.3,
            spit_damage: 25.0,
            spawn_radius: 3.0,
            placement_attempts: 30,
            corridor_half_width: 12.0 / 1.5 - 0.8,
        }
    }
}

/// Sewer wave schedule.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    /// Seconds between the first movement input and the start of the schedule.
    pub start_delay: f32,
    /// Seconds between waves.
    pub interval: f32,
    /// Number of rats in each wave.
    pub sizes: Vec<u32>,
    /// Upper bound on rats spawned across all waves.
    pub total: u32,
    /// Wave anchors are offset from the player by whole units in `-spread..spread`.
    pub anchor_spread: i32,
    /// Defeated rats required to leave the sewer.
    pub kills_to_advance: usize,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            start_delay: 5.0,
            interval: 5.0,
            sizes: vec![2, 2, 3, 1, 2],
            total: 10,
            anchor_spread: 5,
            kills_to_advance: 5,
        }
    }
}

/// Variant of the player's melee attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackStyle {
    /// Throws a fan of three fur balls when the attack starts.
    FurBallFan,
    /// Swipes in place without spawning attack volumes.
    Claw,
}

/// Player melee attack timing, reach and fur-ball fan geometry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MeleeTuning {
    /// Attack variant.
    pub style: AttackStyle,
    /// Seconds the attack window stays open.
    pub duration: f32,
    /// Fraction of the window at which hits are applied.
    pub hit_fraction: f32,
    /// Planar reach of the swipe.
    pub range: f32,
    /// Damage dealt by the swipe.
    pub damage: f32,
    /// Damage dealt by a fur ball.
    pub volume_damage: f32,
    /// Fur-ball speed.
    pub volume_speed: f32,
    /// Seconds before a fur ball expires.
    pub volume_lifetime: f32,
    /// Fur-ball scale.
    pub volume_scale: Vec3,
    /// Distance in front of the player where fur balls appear.
    pub volume_forward_offset: f32,
    /// Height above the player's centre where fur balls appear.
    pub volume_height: f32,
    /// Sideways weight of the diagonal fur balls.
    pub fan_spread: f32,
}

impl Default for MeleeTuning {
    fn default() -> Self {
        Self {
            style: AttackStyle::FurBallFan,
            duration: 1.2,
            hit_fraction: 0.5,
            range: 2.0,
            damage: 20.0,
            volume_damage: 40.0,
            volume_speed: 9.0,
            volume_lifetime: 2.0,
            volume_scale: Vec3::splat(0.009),
            volume_forward_offset: 0.8,
            volume_height: 0.5,
            fan_spread: 0.45,
        }
    }
}

/// Cars, men and the boss.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HazardTuning {
    /// Car scale.
    pub car_scale: Vec3,
    /// Car patrol velocity.
    pub car_velocity: Vec3,
    /// Cars wrap once `|x|` exceeds this bound.
    pub car_bound: f32,
    /// Damage per second while a car touches the player.
    pub car_contact_dps: f32,
    /// Number of cars spawned on the street.
    pub car_count: u32,
    /// Position of the first car.
    pub car_origin: Vec3,
    /// Z spacing between consecutive cars (towards −Z).
    pub car_spacing: f32,
    /// Man scale.
    pub man_scale: Vec3,
    /// Man health.
    pub man_health: f32,
    /// Boss scale.
    pub boss_scale: Vec3,
    /// Boss health.
    pub boss_health: f32,
    /// Boss chase speed.
    pub boss_speed: f32,
    /// Damage per second while the boss touches the player.
    pub boss_contact_dps: f32,
    /// The boss stops chasing once closer than this.
    pub boss_min_step_distance: f32,
}

impl Default for HazardTuning {
    fn default() -> Self {
        Self {
            car_scale: Vec3::new(2.0, 1.0, 4.0),
            car_velocity: Vec3::new(15.0, 0.0, 0.0),
            car_bound: 50.0,
            car_contact_dps: 10.0,
            car_count: 5,
            car_origin: Vec3::new(-50.0, 0.5, -10.0),
            car_spacing: 5.0,
            man_scale: Vec3::new(1.0, 2.0, 1.0),
            man_health: 50.0,
            boss_scale: Vec3::splat(3.0),
            boss_health: 200.0,
            boss_speed: 2.0,
            boss_contact_dps: 20.0,
            boss_min_step_distance: 0.1,
        }
    }
}

/// Level layout: sewer walls, pickups and trigger lines.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutTuning {
    /// Wall segments on each side of the sewer corridor.
    pub wall_segments: u32,
    /// X offset of the walls from the player's spawn.
    pub wall_side_offset: f32,
    /// Z spacing between wall segments.
    pub wall_spacing: f32,
    /// Wall scale.
    pub wall_scale: Vec3,
    /// Wall yaw in degrees.
    pub wall_yaw: f32,
    /// The street is crossed once the player's Z drops below this line.
    pub street_exit_z: f32,
    /// Where the men stand guard.
    pub man_positions: Vec<Vec3>,
    /// Lasagna position.
    pub lasagna_position: Vec3,
    /// Lasagna scale.
    pub lasagna_scale: Vec3,
    /// Key position.
    pub key_position: Vec3,
    /// Key scale.
    pub key_scale: Vec3,
    /// Boss spawn point.
    pub boss_position: Vec3,
    /// Kitten position.
    pub kitten_position: Vec3,
    /// Kitten scale.
    pub kitten_scale: Vec3,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            wall_segments: 16,
            wall_side_offset: 12.0 / 1.5,
            wall_spacing: 7.0,
            wall_scale: Vec3::splat(6.0 / 50.0),
            wall_yaw: 5500.0,
            street_exit_z: -30.0,
            man_positions: vec![Vec3::new(-2.0, 1.0, -40.0), Vec3::new(2.0, 1.0, -40.0)],
            lasagna_position: Vec3::new(0.0, 0.5, -45.0),
            lasagna_scale: Vec3::splat(0.5),
            key_position: Vec3::new(0.0, 0.5, -50.0),
            key_scale: Vec3::splat(0.3),
            boss_position: Vec3::new(0.0, 1.5, -60.0),
            kitten_position: Vec3::new(0.0, 0.5, -70.0),
            kitten_scale: Vec3::splat(0.5),
        }
    }
}

/// Reason a tuned value was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TuningProblem {
    /// The value is NaN or infinite.
    #[error("must be finite")]
    NotFinite,
    /// The value is zero, negative or not finite.
    #[error("must be finite and greater than zero")]
    NotPositive,
    /// The value is negative or not finite.
    #[error("must be finite and not negative")]
    Negative,
    /// The value lies outside `0..=1`.
    #[error("must lie between 0 and 1")]
    OutsideUnitRange,
    /// The value is larger than [`MAX_EXTENT`].
    #[error("must not exceed {}", MAX_EXTENT)]
    TooLarge,
    /// The upper end of a band is below its lower end.
    #[error("must not be below the matching minimum")]
    BelowMinimum,
}

/// A tuned value that the simulation cannot run with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("tuning value `{field}` {problem}")]
pub struct InvalidTuning {
    /// Dotted path of the offending value, e.g. `rat.spawn_radius`.
    pub field: &'static str,
    /// What is wrong with it.
    pub problem: TuningProblem,
}

type Checked = Result<(), InvalidTuning>;

fn reject(field: &'static str, problem: TuningProblem) -> Checked {
    Err(InvalidTuning { field, problem })
}

fn finite(field: &'static str, value: f32) -> Checked {
    if value.is_finite() {
        Ok(())
    } else {
        reject(field, TuningProblem::NotFinite)
    }
}

fn positive(field: &'static str, value: f32) -> Checked {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        reject(field, TuningProblem::NotPositive)
    }
}

fn non_negative(field: &'static str, value: f32) -> Checked {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        reject(field, TuningProblem::Negative)
    }
}

fn extent(field: &'static str, value: f32) -> Checked {
    non_negative(field, value)?;
    if value > MAX_EXTENT {
        return reject(field, TuningProblem::TooLarge);
    }
    Ok(())
}

fn point(field: &'static str, value: Vec3) -> Checked {
    if value.is_finite() && value.abs().max_element() <= MAX_EXTENT {
        Ok(())
    } else {
        reject(field, TuningProblem::TooLarge)
    }
}

fn scale(field: &'static str, value: Vec3) -> Checked {
    if value.is_finite() && value.min_element() > 0.0 {
        Ok(())
    } else {
        reject(field, TuningProblem::NotPositive)
    }
}

impl Tuning {
    /// Checks that every value keeps the simulation well defined.
    ///
    /// Scales must be positive, speeds, radii and damage must not be
    /// negative, distances must stay within [`MAX_EXTENT`] and the melee hit
    /// must fall inside its window.
    pub fn validate(&self) -> Result<(), InvalidTuning> {
        self.player.validate()?;
        self.rat.validate()?;
        self.waves.validate()?;
        self.melee.validate()?;
        self.hazards.validate()?;
        self.layout.validate()
    }
}

impl PlayerTuning {
    fn validate(&self) -> Checked {
        point("player.spawn_position", self.spawn_position)?;
        scale("player.scale", self.scale)?;
        positive("player.max_health", self.max_health)?;
        non_negative("player.move_speed", self.move_speed)?;
        non_negative("player.rotation_speed", self.rotation_speed)?;
        finite("player.initial_yaw", self.initial_yaw)
    }
}

impl RatTuning {
    fn validate(&self) -> Checked {
        scale("rat.scale", self.scale)?;
        positive("rat.health", self.health)?;
        non_negative("rat.cooldown", self.cooldown)?;
        non_negative("rat.speed", self.speed)?;
        extent("rat.min_distance", self.min_distance)?;
        extent("rat.max_distance", self.max_distance)?;
        if self.max_distance < self.min_distance {
            return reject("rat.max_distance", TuningProblem::BelowMinimum);
        }
        non_negative("rat.spit_speed", self.spit_speed)?;
        finite("rat.muzzle_height", self.muzzle_height)?;
        finite("rat.aim_drop", self.aim_drop)?;
        scale("rat.spit_scale", self.spit_scale)?;
        positive("rat.spit_lifetime", self.spit_lifetime)?;
        extent("rat.spit_hit_radius", self.spit_hit_radius)?;
        non_negative("rat.spit_damage", self.spit_damage)?;
        extent("rat.spawn_radius", self.spawn_radius)?;
        extent("rat.corridor_half_width", self.corridor_half_width)
    }
}

impl WaveTuning {
    fn validate(&self) -> Checked {
        non_negative("waves.start_delay", self.start_delay)?;
        non_negative("waves.interval", self.interval)
    }
}

impl MeleeTuning {
    fn validate(&self) -> Checked {
        positive("melee.duration", self.duration)?;
        if !(0.0..=1.0).contains(&self.hit_fraction) {
            return reject("melee.hit_fraction", TuningProblem::OutsideUnitRange);
        }
        extent("melee.range", self.range)?;
        non_negative("melee.damage", self.damage)?;
        non_negative("melee.volume_damage", self.volume_damage)?;
        non_negative("melee.volume_speed", self.volume_speed)?;
        positive("melee.volume_lifetime", self.volume_lifetime)?;
        scale("melee.volume_scale", self.volume_scale)?;
        finite("melee.volume_forward_offset", self.volume_forward_offset)?;
        finite("melee.volume_height", self.volume_height)?;
        finite("melee.fan_spread", self.fan_spread)
    }
}

impl HazardTuning {
    fn validate(&self) -> Checked {
        scale("hazards.car_scale", self.car_scale)?;
        point("hazards.car_velocity", self.car_velocity)?;
        extent("hazards.car_bound", self.car_bound)?;
        non_negative("hazards.car_contact_dps", self.car_contact_dps)?;
        point("hazards.car_origin", self.car_origin)?;
        finite("hazards.car_spacing", self.car_spacing)?;
        scale("hazards.man_scale", self.man_scale)?;
        positive("hazards.man_health", self.man_health)?;
        scale("hazards.boss_scale", self.boss_scale)?;
        positive("hazards.boss_health", self.boss_health)?;
        non_negative("hazards.boss_speed", self.boss_speed)?;
        non_negative("hazards.boss_contact_dps", self.boss_contact_dps)?;
        extent("hazards.boss_min_step_distance", self.boss_min_step_distance)
    }
}

impl LayoutTuning {
    fn validate(&self) -> Checked {
        finite("layout.wall_side_offset", self.wall_side_offset)?;
        finite("layout.wall_spacing", self.wall_spacing)?;
        scale("layout.wall_scale", self.wall_scale)?;
        finite("layout.wall_yaw", self.wall_yaw)?;
        finite("layout.street_exit_z", self.street_exit_z)?;
        for position in &self.man_positions {
            point("layout.man_positions", *position)?;
        }
        point("layout.lasagna_position", self.lasagna_position)?;
        scale("layout.lasagna_scale", self.lasagna_scale)?;
        point("layout.key_position", self.key_position)?;
        scale("layout.key_scale", self.key_scale)?;
        point("layout.boss_position", self.boss_position)?;
        point("layout.kitten_position", self.kitten_position)?;
        scale("layout.kitten_scale", self.kitten_scale)
    }
}
