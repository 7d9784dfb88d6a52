#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Office Pranksters.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Everything is drawn with primitive shapes. Colors come from a [`Theme`]
//! that can be loaded from a TOML file.

mod theme;
mod ui;

pub use self::theme::Theme;

use self::ui::{draw_button_panel_ui, ButtonPanelContext, ButtonPanelResult, BUTTON_PANEL_HEIGHT};
use anyhow::Result;
use glam::Vec2;
use macroquad::input::{
    is_key_down, is_key_pressed, is_mouse_button_down, mouse_position, KeyCode, MouseButton,
};
use macroquad::math::Vec2 as MacroquadVec2;
use pranksters_core::{Animation, DirectionalKeys, Facing};
use pranksters_rendering::{
    CharacterPresentation, ConePresentation, FrameInput, GuardPresentation, HudPresentation,
    MarkerPresentation, PlayAreaPresentation, Presentation, PropPresentation, RenderingBackend,
    Scene,
};
use std::{collections::VecDeque, time::Duration};

const CHARACTER_SIZE: Vec2 = Vec2::new(24.0, 32.0);
const GUARD_SIZE: Vec2 = Vec2::new(28.0, 36.0);
const CONE_SEGMENTS: usize = 16;
const HUD_FONT_SIZE: f32 = 20.0;
const BANNER_FONT_SIZE: f32 = 40.0;

/// On-screen button that can be latched for the next frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchButton {
    /// Switches the controlled character.
    Swap,
    /// Performs the level action.
    Action,
    /// Restarts the current level.
    Restart,
    /// Toggles audio.
    Mute,
}

/// Buttons released from the latch on a given frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LatchedButtons {
    /// Swap was pressed.
    pub swap: bool,
    /// Action was pressed.
    pub action: bool,
    /// Restart was pressed.
    pub restart: bool,
    /// Mute was pressed.
    pub mute: bool,
}

/// Tracks UI-sourced presses so they can be merged with physical input on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct ButtonLatch {
    latched: LatchedButtons,
}

impl ButtonLatch {
    /// Returns the latched presses and clears them so each fires only once.
    pub fn take(&mut self) -> LatchedButtons {
        std::mem::take(&mut self.latched)
    }

    /// Records that the provided button was pressed this frame.
    pub fn register(&mut self, button: TouchButton) {
        match button {
            TouchButton::Swap => self.latched.swap = true,
            TouchButton::Action => self.latched.action = true,
            TouchButton::Restart => self.latched.restart = true,
            TouchButton::Mute => self.latched.mute = true,
        }
    }

    fn register_panel(&mut self, result: ButtonPanelResult) {
        let presses = [
            (result.swap, TouchButton::Swap),
            (result.action, TouchButton::Action),
            (result.restart, TouchButton::Restart),
            (result.mute, TouchButton::Mute),
        ];
        for (pressed, button) in presses {
            if pressed {
                self.register(button);
            }
        }
    }
}

/// Snapshot of keyboard state observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardState {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// Arrow keys currently held.
    keys: DirectionalKeys,
    /// `Tab` switches the controlled character.
    swap: bool,
    /// `Space` or `Enter` performs the action.
    action: bool,
    /// `R` restarts the level.
    restart: bool,
    /// `M` toggles audio.
    mute: bool,
}

impl KeyboardState {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
            keys: DirectionalKeys {
                up: is_key_down(KeyCode::Up),
                down: is_key_down(KeyCode::Down),
                left: is_key_down(KeyCode::Left),
                right: is_key_down(KeyCode::Right),
            },
            swap: is_key_pressed(KeyCode::Tab),
            action: is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter),
            restart: is_key_pressed(KeyCode::R),
            mute: is_key_pressed(KeyCode::M),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    theme: Theme,
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

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Replaces the palette used for drawing.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            theme,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.play_area.width.round() as i32,
            window_height: (scene.play_area.height + BUTTON_PANEL_HEIGHT).round() as i32,
            high_dpi: true,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut latch = ButtonLatch::default();

            loop {
                let keyboard = KeyboardState::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let metrics_before =
                    SceneMetrics::from_play_area(&scene.play_area, screen_width, screen_height);
                let (cursor_x, cursor_y) = mouse_position();
                let frame_input = gather_frame_input_from_observations(
                    &scene.play_area,
                    &metrics_before,
                    Vec2::new(cursor_x, cursor_y),
                    is_mouse_button_down(MouseButton::Left),
                    keyboard,
                    latch.take(),
                );

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics =
                    SceneMetrics::from_play_area(&scene.play_area, screen_width, screen_height);
                draw_floor(&scene.play_area, &metrics);
                draw_markers(&scene.markers, &metrics, &theme);
                draw_props(&scene.props, &metrics, &theme);
                if let Some(guard) = scene.guard {
                    draw_cone(guard.cone, &metrics, &theme);
                    draw_guard(guard, &metrics, &theme);
                }
                draw_characters(&scene.characters, &metrics, &theme);
                if scene.alarm_flash {
                    draw_alarm_tint(&metrics, &theme);
                }
                draw_hud(&scene.hud, &metrics, &theme);

                let panel_context = ButtonPanelContext {
                    origin: MacroquadVec2::new(0.0, screen_height - BUTTON_PANEL_HEIGHT),
                    size: MacroquadVec2::new(screen_width, BUTTON_PANEL_HEIGHT),
                    background: to_macroquad_color(theme.panel),
                    muted: scene.hud.muted,
                };
                {
                    let mut panel_ui = macroquad::ui::root_ui();
                    latch.register_panel(draw_button_panel_ui(&mut panel_ui, panel_context));
                }

                if let Some(FpsMetrics {
                    per_second,
                    trailing_ten_seconds,
                }) = fps_counter.record_frame(frame_dt)
                {
                    if show_fps {
                        println!("FPS: {per_second:.2} (10s avg: {trailing_ten_seconds:.2})");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Maps world units onto the region of the screen above the button panel.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    width_scaled: f32,
    height_scaled: f32,
}

impl SceneMetrics {
    fn from_play_area(
        play_area: &PlayAreaPresentation,
        screen_width: f32,
        screen_height: f32,
    ) -> Self {
        let available_height = (screen_height - BUTTON_PANEL_HEIGHT).max(0.0);
        let scale = (screen_width / play_area.width).min(available_height / play_area.height);
        let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };

        let width_scaled = play_area.width * scale;
        let height_scaled = play_area.height * scale;
        let offset_x = ((screen_width - width_scaled) * 0.5).max(0.0);
        let offset_y = ((available_height - height_scaled) * 0.5).max(0.0);

        Self {
            scale,
            offset_x,
            offset_y,
            width_scaled,
            height_scaled,
        }
    }

    fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + world.x * self.scale,
            self.offset_y + world.y * self.scale,
        )
    }

    fn to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            (screen.x - self.offset_x) / self.scale,
            (screen.y - self.offset_y) / self.scale,
        )
    }

    fn contains_screen(&self, screen: Vec2) -> bool {
        screen.x >= self.offset_x
            && screen.x < self.offset_x + self.width_scaled
            && screen.y >= self.offset_y
            && screen.y < self.offset_y + self.height_scaled
    }
}

fn gather_frame_input_from_observations(
    play_area: &PlayAreaPresentation,
    metrics: &SceneMetrics,
    cursor_position: Vec2,
    pointer_down: bool,
    keyboard: KeyboardState,
    latched: LatchedButtons,
) -> FrameInput {
    let mut input = FrameInput {
        keys: keyboard.keys,
        swap: keyboard.swap || latched.swap,
        action: keyboard.action || latched.action,
        restart: keyboard.restart || latched.restart,
        mute: keyboard.mute || latched.mute,
        ..FrameInput::default()
    };

    if metrics.scale <= f32::EPSILON {
        return input;
    }

    if metrics.contains_screen(cursor_position) {
        input.pointer_world_space =
            Some(play_area.clamp_world_position(metrics.to_world(cursor_position)));
        input.pointer_pressed = pointer_down;
    }

    input
}

fn draw_floor(play_area: &PlayAreaPresentation, metrics: &SceneMetrics) {
    macroquad::shapes::draw_rectangle(
        metrics.offset_x,
        metrics.offset_y,
        metrics.width_scaled,
        metrics.height_scaled,
        to_macroquad_color(play_area.floor_color),
    );
}

fn draw_centered_rect(
    center: Vec2,
    size: Vec2,
    metrics: &SceneMetrics,
    color: macroquad::color::Color,
) {
    let top_left = metrics.to_screen(center - size * 0.5);
    let scaled = size * metrics.scale;
    macroquad::shapes::draw_rectangle(top_left.x, top_left.y, scaled.x, scaled.y, color);
}

fn draw_markers(markers: &[MarkerPresentation], metrics: &SceneMetrics, theme: &Theme) {
    for marker in markers {
        draw_centered_rect(
            marker.position,
            marker.size,
            metrics,
            to_macroquad_color(marker.color),
        );
        if let Some(label) = &marker.label {
            let center = metrics.to_screen(marker.position);
            draw_centered_text(label, center, HUD_FONT_SIZE * 0.6, to_macroquad_color(theme.text));
        }
    }
}

fn draw_props(props: &[PropPresentation], metrics: &SceneMetrics, theme: &Theme) {
    for prop in props {
        draw_centered_rect(
            prop.position,
            prop.size,
            metrics,
            to_macroquad_color(theme.prop(prop.kind)),
        );
        if prop.highlighted {
            let top_left = metrics.to_screen(prop.position - prop.size * 0.5);
            let scaled = prop.size * metrics.scale;
            macroquad::shapes::draw_rectangle_lines(
                top_left.x,
                top_left.y,
                scaled.x,
                scaled.y,
                2.0,
                to_macroquad_color(theme.highlight),
            );
        }
    }
}

fn cone_points(cone: ConePresentation, metrics: &SceneMetrics) -> Vec<Vec2> {
    let span = cone.end_angle - cone.start_angle;
    (0..=CONE_SEGMENTS)
        .map(|segment| {
            let angle = cone.start_angle + span * segment as f32 / CONE_SEGMENTS as f32;
            let edge = cone.apex + Vec2::new(angle.cos(), angle.sin()) * cone.radius;
            metrics.to_screen(edge)
        })
        .collect()
}

fn draw_cone(cone: ConePresentation, metrics: &SceneMetrics, theme: &Theme) {
    let apex = metrics.to_screen(cone.apex);
    let color = to_macroquad_color(theme.cone);
    for pair in cone_points(cone, metrics).windows(2) {
        macroquad::shapes::draw_triangle(
            MacroquadVec2::new(apex.x, apex.y),
            MacroquadVec2::new(pair[0].x, pair[0].y),
            MacroquadVec2::new(pair[1].x, pair[1].y),
            color,
        );
    }
}

fn facing_sign(facing: Facing) -> f32 {
    match facing {
        Facing::Right => 1.0,
        Facing::Left => -1.0,
    }
}

fn draw_body(
    position: Vec2,
    size: Vec2,
    facing: Facing,
    metrics: &SceneMetrics,
    fill: macroquad::color::Color,
) {
    draw_centered_rect(position, size, metrics, fill);
    let eye_offset = Vec2::new(facing_sign(facing) * size.x * 0.25, -size.y * 0.25);
    let eye = metrics.to_screen(position + eye_offset);
    macroquad::shapes::draw_circle(eye.x, eye.y, 3.0 * metrics.scale, macroquad::color::BLACK);
}

fn draw_guard(guard: GuardPresentation, metrics: &SceneMetrics, theme: &Theme) {
    let mut fill = theme.guard;
    if guard.panicking {
        fill = theme.alarm.with_alpha(1.0);
    }
    draw_body(
        guard.position,
        GUARD_SIZE,
        guard.facing,
        metrics,
        to_macroquad_color(fill),
    );
}

fn walk_bob(animation: Animation, time: f64) -> f32 {
    match animation {
        Animation::Idle => 0.0,
        Animation::Walking => ((time * 12.0).sin() * 2.0) as f32,
    }
}

fn draw_characters(characters: &[CharacterPresentation], metrics: &SceneMetrics, theme: &Theme) {
    let time = macroquad::time::get_time();
    for character in characters {
        let mut fill = theme.role(character.role);
        if !character.active {
            fill = fill.with_alpha(fill.alpha * 0.5);
        }
        let position = character.position + Vec2::new(0.0, walk_bob(character.animation, time));
        draw_body(
            position,
            CHARACTER_SIZE,
            character.facing,
            metrics,
            to_macroquad_color(fill),
        );
    }
}

fn draw_alarm_tint(metrics: &SceneMetrics, theme: &Theme) {
    macroquad::shapes::draw_rectangle(
        metrics.offset_x,
        metrics.offset_y,
        metrics.width_scaled,
        metrics.height_scaled,
        to_macroquad_color(theme.alarm),
    );
}

fn draw_hud(hud: &HudPresentation, metrics: &SceneMetrics, theme: &Theme) {
    let color = to_macroquad_color(theme.text);
    let top_center = Vec2::new(
        metrics.offset_x + metrics.width_scaled * 0.5,
        metrics.offset_y + HUD_FONT_SIZE * 1.5,
    );
    draw_centered_text(&hud.title, top_center, HUD_FONT_SIZE, color);

    if let Some(role) = hud.active_role {
        let label = format!("Controlling: {role:?}");
        let _ = macroquad::text::draw_text(
            &label,
            metrics.offset_x + 8.0,
            metrics.offset_y + metrics.height_scaled - 8.0,
            HUD_FONT_SIZE * 0.8,
            color,
        );
    }

    let middle = Vec2::new(
        metrics.offset_x + metrics.width_scaled * 0.5,
        metrics.offset_y + metrics.height_scaled * 0.5,
    );
    if let Some(banner) = &hud.banner {
        draw_centered_text(banner, middle, BANNER_FONT_SIZE, color);
    }
    if let Some(hint) = &hud.hint {
        draw_centered_text(
            hint,
            middle + Vec2::new(0.0, BANNER_FONT_SIZE),
            HUD_FONT_SIZE,
            color,
        );
    }
}

fn draw_centered_text(text: &str, center: Vec2, font_size: f32, color: macroquad::color::Color) {
    let dimensions = macroquad::text::measure_text(text, None, font_size.round() as u16, 1.0);
    let _ = macroquad::text::draw_text(
        text,
        center.x - dimensions.width * 0.5,
        center.y,
        font_size,
        color,
    );
}

fn to_macroquad_color(color: pranksters_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
