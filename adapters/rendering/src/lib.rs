#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maw adapters.
//!
//! Backends receive a [`Scene`] built from the simulation's [`Frame`] plus a
//! [`CameraRig`] they may orbit around the player. Nothing here talks to a
//! graphics API; the scene is plain data so it can be asserted on in tests.

mod camera;

use anyhow::Result as AnyResult;
use glam::Vec3;
use maw_core::{
    ControlState, EntityId, EntityKind, Frame, GameOutcome, InputSource, LevelState,
};
use std::time::Duration;

pub use camera::{
    CameraControls, CameraRig, CAMERA_OFFSET, INITIAL_PITCH, MAX_PITCH, MIN_PITCH, ORBIT_SPEED,
    TARGET_LIFT,
};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Placeholder meshes a backend must be able to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshKind {
    /// Cat model used by Maw and the kitten.
    Cat,
    /// Rat model.
    Rat,
    /// Generic sphere for guards and the boss.
    Sphere,
    /// Green sphere used for spit.
    GreenSphere,
    /// Fur ball thrown by Maw.
    FurBall,
    /// Sewer wall segment.
    SewerWall,
    /// Unit cube for cars and pickups.
    Cube,
    /// Ground plane.
    Terrain,
}

impl MeshKind {
    /// Every mesh kind, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Cat,
        Self::Rat,
        Self::Sphere,
        Self::GreenSphere,
        Self::FurBall,
        Self::SewerWall,
        Self::Cube,
        Self::Terrain,
    ];

    /// Mesh drawn for an entity of the given kind.
    #[must_use]
    pub const fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Player | EntityKind::Kitten => Self::Cat,
            EntityKind::Rat => Self::Rat,
            EntityKind::Man | EntityKind::Boss => Self::Sphere,
            EntityKind::Spit => Self::GreenSphere,
            EntityKind::FurBall => Self::FurBall,
            EntityKind::SewerWall => Self::SewerWall,
            EntityKind::Car | EntityKind::Lasagna | EntityKind::Key => Self::Cube,
        }
    }

    /// Stable name used by palette manifests.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Cat => "cat",
            Self::Rat => "rat",
            Self::Sphere => "sphere",
            Self::GreenSphere => "green_sphere",
            Self::FurBall => "fur_ball",
            Self::SewerWall => "sewer_wall",
            Self::Cube => "cube",
            Self::Terrain => "terrain",
        }
    }

    /// Whether the mesh is round and should be drawn as a sphere.
    #[must_use]
    pub const fn is_round(self) -> bool {
        matches!(self, Self::Sphere | Self::GreenSphere | Self::FurBall)
    }
}

/// Surface finish of a ground layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Surface {
    /// Murky water under the sewer walkway.
    SewerWater,
    /// Untextured grey walkway of the sewer.
    SewerFloor,
    /// Rock ground of every later level.
    Rock,
}

impl Surface {
    /// Every surface, in declaration order.
    pub const ALL: [Self; 3] = [Self::SewerWater, Self::SewerFloor, Self::Rock];

    /// Stable name used by palette manifests.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SewerWater => "sewer_water",
            Self::SewerFloor => "sewer_floor",
            Self::Rock => "rock",
        }
    }
}

/// Ground plane drawn beneath the entities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundLayer {
    /// Finish of the plane.
    pub surface: Surface,
    /// Center of the plane.
    pub position: Vec3,
    /// Plane extent; `y` is unused.
    pub scale: Vec3,
}

const TERRAIN_POSITION: Vec3 = Vec3::new(0.0, -1.5, 0.0);
const TERRAIN_SCALE: Vec3 = Vec3::new(10.0, 1.0, 50.0);
const WATER_POSITION: Vec3 = Vec3::new(0.0, -1.0, 0.0);
const WATER_SCALE: Vec3 = Vec3::new(50.0, 1.0, 50.0);

/// Ground layers drawn for the given level, back to front.
#[must_use]
pub fn ground_layers(level: LevelState) -> Vec<GroundLayer> {
    if level == LevelState::Sewers {
        vec![
            GroundLayer {
                surface: Surface::SewerWater,
                position: WATER_POSITION,
                scale: WATER_SCALE,
            },
            GroundLayer {
                surface: Surface::SewerFloor,
                position: TERRAIN_POSITION,
                scale: TERRAIN_SCALE,
            },
        ]
    } else {
        vec![GroundLayer {
            surface: Surface::Rock,
            position: TERRAIN_POSITION,
            scale: TERRAIN_SCALE,
        }]
    }
}

/// Entity placed in the scene with the mesh that represents it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneObject {
    /// Entity being drawn.
    pub entity: EntityId,
    /// Mesh selected for the entity's kind.
    pub mesh: MeshKind,
    /// World-space position.
    pub position: Vec3,
    /// Non-uniform scale.
    pub scale: Vec3,
    /// Yaw in degrees.
    pub yaw: f32,
}

impl SceneObject {
    /// Axis-aligned extent of the object's scaled box after applying its yaw.
    #[must_use]
    pub fn footprint(&self) -> Vec3 {
        let (sin, cos) = self.yaw.to_radians().sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        Vec3::new(
            cos * self.scale.x + sin * self.scale.z,
            self.scale.y,
            sin * self.scale.x + cos * self.scale.z,
        )
    }
}

/// Overlay drawn on top of the 3D scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    /// Level the frame was produced in.
    pub level: LevelState,
    /// Player health as a fraction of the maximum.
    pub health_ratio: f32,
    /// Outcome once the game is over.
    pub outcome: Option<GameOutcome>,
}

impl Hud {
    /// Line of text shown under the health bar.
    #[must_use]
    pub fn caption(&self) -> &'static str {
        match self.outcome {
            Some(outcome) => outcome.message(),
            None => self.level.objective(),
        }
    }

    /// Screen rectangle of the health bar.
    #[must_use]
    pub fn health_bar(&self) -> HealthBar {
        HealthBar::for_ratio(self.health_ratio)
    }
}

/// Health bar rectangle expressed as fractions of the screen size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthBar {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl HealthBar {
    const CENTER_X: f32 = 0.1;
    const CENTER_Y: f32 = 0.05;
    const FULL_WIDTH: f32 = 0.1;
    const HEIGHT: f32 = 0.025;

    /// Bar for the given health ratio; it shrinks around its center.
    #[must_use]
    pub fn for_ratio(ratio: f32) -> Self {
        let width = Self::FULL_WIDTH * ratio.clamp(0.0, 1.0);
        Self {
            left: Self::CENTER_X - width * 0.5,
            top: Self::CENTER_Y - Self::HEIGHT * 0.5,
            width,
            height: Self::HEIGHT,
        }
    }
}

/// Scene description combining ground, entities, overlay and camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Ground planes for the active level.
    pub ground: Vec<GroundLayer>,
    /// Active entities, player first.
    pub objects: Vec<SceneObject>,
    /// Overlay state.
    pub hud: Hud,
    /// Position the camera follows.
    pub focus: Vec3,
    /// Orbit camera.
    pub camera: CameraRig,
}

impl Scene {
    /// Creates an empty sewer scene following `focus`.
    #[must_use]
    pub fn new(focus: Vec3) -> Self {
        Self {
            ground: ground_layers(LevelState::Sewers),
            objects: Vec::new(),
            hud: Hud {
                level: LevelState::Sewers,
                health_ratio: 1.0,
                outcome: None,
            },
            focus,
            camera: CameraRig::default(),
        }
    }

    /// Builds a scene from a simulation frame.
    #[must_use]
    pub fn from_frame(frame: &Frame) -> Self {
        let mut scene = Self::new(Vec3::ZERO);
        scene.apply_frame(frame);
        scene
    }

    /// Replaces the scene content with `frame`, keeping the camera.
    ///
    /// The focus stays where it was when the frame carries no player.
    pub fn apply_frame(&mut self, frame: &Frame) {
        self.ground = ground_layers(frame.level);
        self.objects = frame
            .drawables
            .iter()
            .map(|drawable| SceneObject {
                entity: drawable.entity,
                mesh: MeshKind::for_kind(drawable.kind),
                position: drawable.position,
                scale: drawable.scale,
                yaw: drawable.yaw,
            })
            .collect();
        self.hud = Hud {
            level: frame.level,
            health_ratio: frame.health_ratio(),
            outcome: frame.outcome,
        };
        if let Some(player) = frame
            .drawables
            .iter()
            .find(|drawable| drawable.kind == EntityKind::Player)
        {
            self.focus = player.position;
        }
    }

    /// Camera position for the current focus.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.camera.eye(self.focus)
    }

    /// Camera look-at point for the current focus.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.camera.target(self.focus)
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Simulation keys.
    pub controls: ControlState,
    /// Camera orbit keys.
    pub camera: CameraControls,
}

impl FrameInput {
    /// Samples simulation and camera keys from the same source.
    #[must_use]
    pub fn sample<S>(source: &S) -> Self
    where
        S: InputSource + ?Sized,
    {
        Self {
            controls: ControlState::sample(source),
            camera: CameraControls::sample(source),
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Maw scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the exit key is held or the window closes.
    ///
    /// The provided `update_scene` closure receives the measured frame delta
    /// and the input captured by the adapter, and may mutate the scene before
    /// it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}
