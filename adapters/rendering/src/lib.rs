#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Office Pranksters adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use pranksters_core::{
    Animation, DirectionalKeys, Facing, InputSnapshot, PointerState, PropKind, Role,
};
use std::{error::Error, fmt, time::Duration};

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

    /// Returns the same color with a different alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Arrow keys held on this frame.
    pub keys: DirectionalKeys,
    /// Pointer position expressed in world units, clamped to the play area.
    pub pointer_world_space: Option<Vec2>,
    /// Whether the primary button or a touch is held.
    pub pointer_pressed: bool,
    /// Whether the swap button was pressed on this frame.
    pub swap: bool,
    /// Whether the action button was pressed on this frame.
    pub action: bool,
    /// Whether the restart button was pressed on this frame.
    pub restart: bool,
    /// Whether the mute button was pressed on this frame.
    pub mute: bool,
}

impl FrameInput {
    /// Converts the adapter input into the simulation's input snapshot.
    #[must_use]
    pub fn to_input_snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            keys: self.keys,
            pointer: self.pointer_world_space.map(|position| PointerState {
                position,
                pressed: self.pointer_pressed,
            }),
            swap_pressed: self.swap,
            action_pressed: self.action,
            restart_pressed: self.restart,
            mute_pressed: self.mute,
        }
    }
}

/// Describes the rectangular play area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayAreaPresentation {
    /// Width of the play area in world units.
    pub width: f32,
    /// Height of the play area in world units.
    pub height: f32,
    /// Floor color.
    pub floor_color: Color,
}

impl PlayAreaPresentation {
    /// Creates a new play area descriptor.
    pub fn new(width: f32, height: f32, floor_color: Color) -> Result<Self, RenderingError> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(RenderingError::InvalidPlayArea { width, height });
        }

        Ok(Self {
            width,
            height,
            floor_color,
        })
    }

    /// Size of the play area.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Clamps a world-space position to the play area.
    #[must_use]
    pub fn clamp_world_position(&self, position: Vec2) -> Vec2 {
        position.clamp(Vec2::ZERO, self.size())
    }
}

/// Player-controlled character drawn in the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterPresentation {
    /// Character identity.
    pub role: Role,
    /// Centre position in world units.
    pub position: Vec2,
    /// Sprite orientation.
    pub facing: Facing,
    /// Animation to play.
    pub animation: Animation,
    /// Whether the character receives input; inactive characters are dimmed.
    pub active: bool,
}

/// Guard drawn in the scene, including the wedge it sees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuardPresentation {
    /// Centre position in world units.
    pub position: Vec2,
    /// Sprite orientation.
    pub facing: Facing,
    /// Vision wedge.
    pub cone: ConePresentation,
    /// Whether the guard is fleeing an alarm.
    pub panicking: bool,
}

/// Wedge-shaped vision cone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConePresentation {
    /// Tip of the wedge.
    pub apex: Vec2,
    /// Reach of the wedge.
    pub radius: f32,
    /// Angle in radians where the wedge starts.
    pub start_angle: f32,
    /// Angle in radians where the wedge ends.
    pub end_angle: f32,
}

/// Prop drawn as an axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropPresentation {
    /// Kind of prop.
    pub kind: PropKind,
    /// Centre position in world units.
    pub position: Vec2,
    /// Full width and height.
    pub size: Vec2,
    /// Whether the prop has been pranked or placed correctly.
    pub highlighted: bool,
}

/// Static level marker such as a target zone, lever or exit door.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerPresentation {
    /// Centre position in world units.
    pub position: Vec2,
    /// Full width and height.
    pub size: Vec2,
    /// Fill color.
    pub color: Color,
    /// Optional caption drawn at the centre.
    pub label: Option<String>,
}

/// Heads-up display strings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HudPresentation {
    /// Level title drawn at the top.
    pub title: String,
    /// Role currently controlled, when a level is running.
    pub active_role: Option<Role>,
    /// Whether audio is muted.
    pub muted: bool,
    /// Large centred message such as "BUSTED!".
    pub banner: Option<String>,
    /// Small hint drawn under the banner.
    pub hint: Option<String>,
}

/// Scene description combining the play area and everything inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Play area bounds and floor.
    pub play_area: PlayAreaPresentation,
    /// Static markers drawn under everything else.
    pub markers: Vec<MarkerPresentation>,
    /// Props of the level.
    pub props: Vec<PropPresentation>,
    /// Guard, absent on menu screens.
    pub guard: Option<GuardPresentation>,
    /// Player-controlled characters.
    pub characters: Vec<CharacterPresentation>,
    /// Heads-up display.
    pub hud: HudPresentation,
    /// Whether the alarm flash tints the frame.
    pub alarm_flash: bool,
}

impl Scene {
    /// Creates an empty scene over the play area.
    #[must_use]
    pub fn new(play_area: PlayAreaPresentation) -> Self {
        Self {
            play_area,
            markers: Vec::new(),
            props: Vec::new(),
            guard: None,
            characters: Vec::new(),
            hud: HudPresentation::default(),
            alarm_flash: false,
        }
    }

    /// Removes every entity while keeping the play area.
    pub fn clear(&mut self) {
        self.markers.clear();
        self.props.clear();
        self.guard = None;
        self.characters.clear();
        self.hud = HudPresentation::default();
        self.alarm_flash = false;
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

/// Rendering backend capable of presenting Office Pranksters scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta,
    /// per-frame input captured by the adapter, and may mutate the scene before
    /// it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The play area must have a positive finite size.
    InvalidPlayArea {
        /// Provided width.
        width: f32,
        /// Provided height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPlayArea { width, height } => {
                write!(
                    f,
                    "play area must have a positive size (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
