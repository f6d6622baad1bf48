#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maw.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, so the adapter depends on macroquad without its default `audio`
//! feature. Every mesh is a flat-colored placeholder primitive; colors come
//! from a TOML palette manifest when one is present.

mod keyboard;
mod palette;

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use glam::{Quat, Vec3};
use macroquad::{
    camera::{set_camera, set_default_camera, Camera3D},
    math::{vec2, vec3, Vec3 as MacroquadVec3},
    models::{draw_cube, draw_plane, draw_sphere},
    shapes::draw_rectangle,
    text::draw_text,
    window::{clear_background, next_frame, screen_height, screen_width},
};
use maw_rendering::{
    Color, FrameInput, Hud, MeshKind, Presentation, RenderingBackend, Scene, SceneObject,
};

pub use keyboard::{key_code, MacroquadKeyboard};
pub use palette::Palette;

const FIELD_OF_VIEW_DEGREES: f32 = 45.0;
const HEALTH_BAR_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);
const CAPTION_COLOR: Color = Color::new(1.0, 1.0, 1.0, 1.0);
const CAPTION_FONT_SIZE: f32 = 24.0;

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    palette_path: PathBuf,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            palette_path: Palette::default_manifest_path(),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Overrides where the palette manifest is read from.
    #[must_use]
    pub fn with_palette_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.palette_path = path.into();
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            palette_path,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let palette = Palette::load_or_placeholder(&palette_path);

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 1280,
            window_height: 720,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);

            loop {
                let input = FrameInput::sample(&MacroquadKeyboard);
                if input.controls.exit {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                update_scene(frame_dt, input, &mut scene);

                clear_background(background);
                draw_world(&scene, &palette);
                draw_hud(&scene.hud);

                next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_world(scene: &Scene, palette: &Palette) {
    set_camera(&Camera3D {
        position: to_macroquad_vec(scene.eye()),
        target: to_macroquad_vec(scene.target()),
        up: vec3(0.0, 1.0, 0.0),
        fovy: FIELD_OF_VIEW_DEGREES.to_radians(),
        ..Camera3D::default()
    });

    for layer in &scene.ground {
        draw_plane(
            to_macroquad_vec(layer.position),
            vec2(layer.scale.x, layer.scale.z),
            None,
            to_macroquad_color(palette.surface(layer.surface)),
        );
    }

    for object in &scene.objects {
        draw_object(object, to_macroquad_color(palette.mesh(object.mesh)));
    }
}

fn draw_object(object: &SceneObject, color: macroquad::color::Color) {
    let center = to_macroquad_vec(object.position);
    if object.mesh.is_round() {
        let radius = object.scale.max_element() * 0.5;
        draw_sphere(center, radius, None, color);
        return;
    }

    draw_cube(center, to_macroquad_vec(object.footprint()), None, color);
    if object.mesh == MeshKind::Cat {
        let head = object.position + facing(object.yaw) * object.scale.z * 0.5
            + Vec3::Y * object.scale.y * 0.5;
        draw_sphere(to_macroquad_vec(head), object.scale.x * 0.35, None, color);
    }
}

fn facing(yaw: f32) -> Vec3 {
    Quat::from_rotation_y(yaw.to_radians()) * Vec3::Z
}

fn draw_hud(hud: &Hud) {
    set_default_camera();

    let width = screen_width();
    let height = screen_height();
    let bar = hud.health_bar();
    draw_rectangle(
        bar.left * width,
        bar.top * height,
        bar.width * width,
        bar.height * height,
        to_macroquad_color(HEALTH_BAR_COLOR),
    );

    let _ = draw_text(
        hud.caption(),
        0.02 * width,
        (bar.top + bar.height) * height + CAPTION_FONT_SIZE * 1.5,
        CAPTION_FONT_SIZE,
        to_macroquad_color(CAPTION_COLOR),
    );
}

fn to_macroquad_vec(vector: Vec3) -> MacroquadVec3 {
    vec3(vector.x, vector.y, vector.z)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
