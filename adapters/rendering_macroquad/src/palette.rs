use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use maw_rendering::{Color, MeshKind, Surface};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Flat colors used to draw the placeholder meshes and ground planes.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    meshes: BTreeMap<MeshKind, Color>,
    surfaces: BTreeMap<Surface, Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl Palette {
    /// Built-in colors used when no manifest is available.
    #[must_use]
    pub fn placeholder() -> Self {
        let meshes = MeshKind::ALL
            .into_iter()
            .map(|mesh| (mesh, placeholder_mesh_color(mesh)))
            .collect();
        let surfaces = Surface::ALL
            .into_iter()
            .map(|surface| (surface, placeholder_surface_color(surface)))
            .collect();
        Self { meshes, surfaces }
    }

    /// Returns the default manifest path relative to the repository root.
    #[must_use]
    pub fn default_manifest_path() -> PathBuf {
        PathBuf::from("assets/palette.toml")
    }

    /// Loads the manifest at `path`, overriding placeholder colors it names.
    pub fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read palette manifest at {}",
                manifest_path.display()
            )
        })?;
        Self::from_manifest_str(&contents)
    }

    /// Loads the manifest at `path`, degrading to the placeholder palette on failure.
    #[must_use]
    pub fn load_or_placeholder(path: impl AsRef<Path>) -> Self {
        match Self::from_manifest_path(path) {
            Ok(palette) => palette,
            Err(error) => {
                log::warn!("using placeholder palette: {error:#}");
                Self::placeholder()
            }
        }
    }

    fn from_manifest_str(contents: &str) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(contents).context("failed to parse palette manifest toml contents")?;
        if manifest.version != SUPPORTED_MANIFEST_VERSION {
            bail!(
                "unsupported palette manifest version {}; expected {}",
                manifest.version,
                SUPPORTED_MANIFEST_VERSION
            );
        }

        let mut palette = Self::placeholder();
        for (name, rgb) in manifest.meshes {
            let mesh = MeshKind::ALL
                .into_iter()
                .find(|mesh| mesh.key() == name)
                .with_context(|| format!("unknown mesh `{name}` in palette manifest"))?;
            let _ = palette.meshes.insert(mesh, to_color(rgb));
        }
        for (name, rgb) in manifest.surfaces {
            let surface = Surface::ALL
                .into_iter()
                .find(|surface| surface.key() == name)
                .with_context(|| format!("unknown surface `{name}` in palette manifest"))?;
            let _ = palette.surfaces.insert(surface, to_color(rgb));
        }
        Ok(palette)
    }

    /// Color of the given mesh.
    #[must_use]
    pub fn mesh(&self, mesh: MeshKind) -> Color {
        self.meshes
            .get(&mesh)
            .copied()
            .unwrap_or_else(|| placeholder_mesh_color(mesh))
    }

    /// Color of the given ground surface.
    #[must_use]
    pub fn surface(&self, surface: Surface) -> Color {
        self.surfaces
            .get(&surface)
            .copied()
            .unwrap_or_else(|| placeholder_surface_color(surface))
    }
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    #[serde(default)]
    meshes: HashMap<String, [u8; 3]>,
    #[serde(default)]
    surfaces: HashMap<String, [u8; 3]>,
}

fn to_color([red, green, blue]: [u8; 3]) -> Color {
    Color::from_rgb_u8(red, green, blue)
}

const fn placeholder_mesh_color(mesh: MeshKind) -> Color {
    match mesh {
        MeshKind::Cat => Color::from_rgb_u8(224, 148, 64),
        MeshKind::Rat => Color::from_rgb_u8(120, 110, 100),
        MeshKind::Sphere => Color::from_rgb_u8(170, 60, 60),
        MeshKind::GreenSphere => Color::from_rgb_u8(80, 200, 60),
        MeshKind::FurBall => Color::from_rgb_u8(250, 210, 160),
        MeshKind::SewerWall => Color::from_rgb_u8(90, 80, 70),
        MeshKind::Cube => Color::from_rgb_u8(70, 110, 190),
        MeshKind::Terrain => Color::from_rgb_u8(110, 100, 90),
    }
}

const fn placeholder_surface_color(surface: Surface) -> Color {
    match surface {
        Surface::SewerWater => Color::from_rgb_u8(60, 80, 50),
        Surface::SewerFloor => Color::from_rgb_u8(102, 102, 102),
        Surface::Rock => Color::from_rgb_u8(110, 100, 90),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_overrides_only_named_entries() {
        let manifest = r#"
            version = 1

            [meshes]
            rat = [10, 20, 30]

            [surfaces]
            rock = [255, 0, 0]
        "#;

        let palette = Palette::from_manifest_str(manifest).expect("manifest should parse");
        assert_eq!(palette.mesh(MeshKind::Rat), Color::from_rgb_u8(10, 20, 30));
        assert_eq!(palette.surface(Surface::Rock), Color::from_rgb_u8(255, 0, 0));
        assert_eq!(
            palette.mesh(MeshKind::Cat),
            Palette::placeholder().mesh(MeshKind::Cat)
        );
    }

    #[test]
    fn manifest_rejects_unknown_keys_and_versions() {
        let unknown = r#"
            version = 1

            [meshes]
            teapot = [1, 2, 3]
        "#;
        assert!(Palette::from_manifest_str(unknown).is_err());

        let future = "version = 2";
        assert!(Palette::from_manifest_str(future).is_err());
    }

    #[test]
    fn missing_manifest_degrades_to_placeholder() {
        let palette = Palette::load_or_placeholder("does/not/exist/palette.toml");
        assert_eq!(palette, Palette::placeholder());
    }
}
