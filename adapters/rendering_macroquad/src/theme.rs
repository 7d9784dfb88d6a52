//! Palette used to draw primitive shapes, optionally loaded from a TOML file.

use anyhow::{bail, Context, Result};
use pranksters_core::{PropKind, Role};
use pranksters_rendering::Color;
use std::{fs, path::Path};

const SUPPORTED_THEME_VERSION: u32 = 1;

/// Colors for every drawable element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Fill for role A.
    pub role_a: Color,
    /// Fill for role B.
    pub role_b: Color,
    /// Fill for the guard.
    pub guard: Color,
    /// Fill for the vision wedge.
    pub cone: Color,
    /// Fill for desks.
    pub desk: Color,
    /// Fill for the jello block.
    pub jello: Color,
    /// Fill for the coffee cup.
    pub coffee: Color,
    /// Outline drawn around pranked props.
    pub highlight: Color,
    /// Tint applied while the alarm flash is on.
    pub alarm: Color,
    /// HUD text color.
    pub text: Color,
    /// Background behind the touch buttons.
    pub panel: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            role_a: Color::from_rgb_u8(0x4a, 0x90, 0xe2),
            role_b: Color::from_rgb_u8(0xe2, 0x4a, 0x90),
            guard: Color::from_rgb_u8(0xf5, 0xa6, 0x23),
            cone: Color::from_rgb_u8(0xff, 0xf1, 0x76).with_alpha(0.35),
            desk: Color::from_rgb_u8(0x8b, 0x5a, 0x2b),
            jello: Color::from_rgb_u8(0x7e, 0xd3, 0x21).with_alpha(0.8),
            coffee: Color::from_rgb_u8(0x6f, 0x4e, 0x37),
            highlight: Color::from_rgb_u8(0xff, 0xff, 0xff),
            alarm: Color::from_rgb_u8(0xd0, 0x02, 0x1b).with_alpha(0.25),
            text: Color::from_rgb_u8(0xff, 0xff, 0xff),
            panel: Color::from_rgb_u8(0x1e, 0x1e, 0x1e),
        }
    }
}

impl Theme {
    /// Loads a theme from the TOML file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read theme at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to load theme from {}", path.display()))
    }

    /// Parses a theme from TOML. Missing colors keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ThemeFile = toml::from_str(contents).context("failed to parse theme toml")?;
        if file.version != SUPPORTED_THEME_VERSION {
            bail!(
                "unsupported theme version {}; expected {}",
                file.version,
                SUPPORTED_THEME_VERSION
            );
        }

        let mut theme = Self::default();
        let colors = file.colors;
        apply(&mut theme.role_a, colors.role_a);
        apply(&mut theme.role_b, colors.role_b);
        apply(&mut theme.guard, colors.guard);
        apply(&mut theme.cone, colors.cone);
        apply(&mut theme.desk, colors.desk);
        apply(&mut theme.jello, colors.jello);
        apply(&mut theme.coffee, colors.coffee);
        apply(&mut theme.highlight, colors.highlight);
        apply(&mut theme.alarm, colors.alarm);
        apply(&mut theme.text, colors.text);
        apply(&mut theme.panel, colors.panel);
        Ok(theme)
    }

    /// Fill used for the provided role.
    #[must_use]
    pub const fn role(&self, role: Role) -> Color {
        match role {
            Role::A => self.role_a,
            Role::B => self.role_b,
        }
    }

    /// Fill used for the provided prop kind.
    #[must_use]
    pub const fn prop(&self, kind: PropKind) -> Color {
        match kind {
            PropKind::Desk => self.desk,
            PropKind::Jello => self.jello,
            PropKind::Coffee => self.coffee,
        }
    }
}

fn apply(slot: &mut Color, value: Option<[u8; 4]>) {
    if let Some([red, green, blue, alpha]) = value {
        *slot = Color::from_rgb_u8(red, green, blue).with_alpha(f32::from(alpha) / 255.0);
    }
}

#[derive(Debug, serde::Deserialize)]
struct ThemeFile {
    version: u32,
    #[serde(default)]
    colors: ThemeColors,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeColors {
    role_a: Option<[u8; 4]>,
    role_b: Option<[u8; 4]>,
    guard: Option<[u8; 4]>,
    cone: Option<[u8; 4]>,
    desk: Option<[u8; 4]>,
    jello: Option<[u8; 4]>,
    coffee: Option<[u8; 4]>,
    highlight: Option<[u8; 4]>,
    alarm: Option<[u8; 4]>,
    text: Option<[u8; 4]>,
    panel: Option<[u8; 4]>,
}
