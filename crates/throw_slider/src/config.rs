//! Slider configuration
//!
//! A [`SliderConfig`] can come from three places:
//! - a TOML table (`SliderConfig::from_toml_str`), kebab-case keys
//! - element-style attributes (`SliderConfig::from_attributes`), where the
//!   negative switches (`not-draggable`, `no-repeat`, `no-snap`,
//!   `no-pause-on-hover`) and the slide custom properties are understood
//! - the `with_*` builder methods
//!
//! ```toml
//! autoplay = true
//! speed = 1.5
//! center = true
//! slide-gap = 16
//! slide-width = "240px"
//!
//! [navigation]
//! duration = 0.6
//! ease = "sine.inOut"
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use throw_animation::{Easing, Repeat};

use crate::error::{Result, SliderError};
use crate::geometry::SnapStrategy;

/// Flex basis of every slide
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SlideWidth {
    /// Slides size to their content
    #[default]
    Auto,
    /// Fixed basis in pixels; slides still grow to fill the row
    Px(f32),
}

impl SlideWidth {
    pub fn is_auto(&self) -> bool {
        matches!(self, SlideWidth::Auto)
    }
}

impl FromStr for SlideWidth {
    type Err = SliderError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(SlideWidth::Auto);
        }
        parse_px(s)
            .filter(|px| *px > 0.0)
            .map(SlideWidth::Px)
            .ok_or_else(|| SliderError::attribute("slide-width", s))
    }
}

impl TryFrom<String> for SlideWidth {
    type Error = SliderError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SlideWidth> for String {
    fn from(width: SlideWidth) -> Self {
        width.to_string()
    }
}

impl fmt::Display for SlideWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlideWidth::Auto => f.write_str("auto"),
            SlideWidth::Px(px) => write!(f, "{}px", px),
        }
    }
}

/// Defaults for `next`, `previous` and `go_to`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationDefaults {
    /// Transition length in seconds, 0 jumps
    pub duration: f32,
    /// Easing name, e.g. `power1.inOut`
    pub ease: String,
}

impl Default for NavigationDefaults {
    fn default() -> Self {
        Self {
            duration: 0.4,
            ease: "power1.inOut".to_string(),
        }
    }
}

impl NavigationDefaults {
    pub fn easing(&self) -> Result<Easing> {
        Ok(self.ease.parse::<Easing>()?)
    }
}

/// Every user-visible slider switch
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SliderConfig {
    /// Play the loop after mounting
    pub autoplay: bool,
    /// Speed multiplier, 100 px/s per unit
    pub speed: f32,
    /// Allow dragging and throwing
    pub draggable: bool,
    /// The active item is the one centered in the container
    pub center: bool,
    /// Loop forever instead of playing a single pass
    pub repeat: bool,
    /// Play backwards
    pub reversed: bool,
    /// Snap item offsets to a percentage grid
    pub snap: bool,
    /// Grid size in percentage points
    pub snap_increment: f32,
    /// Pause while hovered or touched
    pub pause_on_hover: bool,
    /// Throw deceleration in px/s²
    pub throw_resistance: f32,
    /// Release speed (px/s) below which the release carries no momentum
    pub min_throw_velocity: f32,
    /// Releases closer than this (px) to the press point reuse the last snap
    pub small_movement_threshold: f32,
    /// Gap between slides and padding after the last one, in px
    pub slide_gap: f32,
    pub slide_width: SlideWidth,
    pub navigation: NavigationDefaults,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            autoplay: false,
            speed: 1.0,
            draggable: true,
            center: false,
            repeat: true,
            reversed: false,
            snap: true,
            snap_increment: 1.0,
            pause_on_hover: true,
            throw_resistance: 3500.0,
            min_throw_velocity: 20.0,
            small_movement_threshold: 10.0,
            slide_gap: 0.0,
            slide_width: SlideWidth::Auto,
            navigation: NavigationDefaults::default(),
        }
    }
}

impl SliderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SliderConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Build a config from attribute name/value pairs
    ///
    /// Names are matched ignoring case, dashes and underscores, so
    /// `no-repeat`, `noRepeat` and `no_repeat` are the same switch. Boolean
    /// switches are on when present with an empty value, `true` or their own
    /// name. Unknown attributes are ignored.
    pub fn from_attributes<I, K, V>(attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (name, value) in attributes {
            config.apply_attribute(name.as_ref(), value.as_ref())?;
        }
        config.validate()?;
        Ok(config)
    }

    fn apply_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        let key = normalize(name);
        let flag = || parse_flag(&key, value).ok_or_else(|| SliderError::attribute(name, value));
        let number = || {
            value
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| SliderError::attribute(name, value))
        };
        let length = || parse_px(value.trim()).ok_or_else(|| SliderError::attribute(name, value));

        match key.as_str() {
            "autoplay" => self.autoplay = flag()?,
            "speed" => self.speed = number()?,
            "notdraggable" => self.draggable = !flag()?,
            "center" => self.center = flag()?,
            "norepeat" => self.repeat = !flag()?,
            "reversed" => self.reversed = flag()?,
            "nosnap" => self.snap = !flag()?,
            "snapincrement" => self.snap_increment = number()?,
            "nopauseonhover" => self.pause_on_hover = !flag()?,
            "throwresistance" => self.throw_resistance = number()?,
            "minthrowvelocity" => self.min_throw_velocity = number()?,
            "smallmovementthreshold" => self.small_movement_threshold = number()?,
            "throwsliderslidegap" | "slidegap" => self.slide_gap = length()?,
            "throwsliderslidewidth" | "slidewidth" => {
                self.slide_width = value
                    .parse()
                    .map_err(|_| SliderError::attribute(name, value))?
            }
            _ => tracing::trace!(name, "ignoring unknown slider attribute"),
        }
        Ok(())
    }

    /// Reject values the loop cannot work with
    pub fn validate(&self) -> Result<()> {
        let checks: [(&str, f32, bool); 7] = [
            ("speed", self.speed, self.speed >= 0.0),
            ("snap-increment", self.snap_increment, self.snap_increment > 0.0),
            ("throw-resistance", self.throw_resistance, self.throw_resistance > 0.0),
            ("min-throw-velocity", self.min_throw_velocity, self.min_throw_velocity >= 0.0),
            (
                "small-movement-threshold",
                self.small_movement_threshold,
                self.small_movement_threshold >= 0.0,
            ),
            ("slide-gap", self.slide_gap, self.slide_gap >= 0.0),
            (
                "navigation.duration",
                self.navigation.duration,
                self.navigation.duration >= 0.0,
            ),
        ];
        for (name, value, ok) in checks {
            if !ok || !value.is_finite() {
                return Err(SliderError::attribute(name, &value.to_string()));
            }
        }
        self.navigation.easing()?;
        Ok(())
    }

    /// Loop speed; a zero speed falls back to 1
    pub fn pixels_per_second(&self) -> f32 {
        let speed = if self.speed == 0.0 { 1.0 } else { self.speed };
        speed * 100.0
    }

    pub fn repeat_mode(&self) -> Repeat {
        if self.repeat {
            Repeat::Infinite
        } else {
            Repeat::Count(0)
        }
    }

    pub fn snap_strategy(&self) -> SnapStrategy {
        if self.snap {
            SnapStrategy::Grid(self.snap_increment)
        } else {
            SnapStrategy::Identity
        }
    }

    // Builders

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    pub fn with_snap(mut self, snap: bool) -> Self {
        self.snap = snap;
        self
    }

    pub fn with_snap_increment(mut self, increment: f32) -> Self {
        self.snap_increment = increment;
        self
    }

    pub fn with_pause_on_hover(mut self, pause: bool) -> Self {
        self.pause_on_hover = pause;
        self
    }

    pub fn with_throw_resistance(mut self, resistance: f32) -> Self {
        self.throw_resistance = resistance;
        self
    }

    pub fn with_min_throw_velocity(mut self, velocity: f32) -> Self {
        self.min_throw_velocity = velocity;
        self
    }

    pub fn with_small_movement_threshold(mut self, px: f32) -> Self {
        self.small_movement_threshold = px;
        self
    }

    pub fn with_slide_gap(mut self, gap: f32) -> Self {
        self.slide_gap = gap;
        self
    }

    pub fn with_slide_width(mut self, width: SlideWidth) -> Self {
        self.slide_width = width;
        self
    }

    pub fn with_navigation(mut self, duration: f32, ease: impl Into<String>) -> Self {
        self.navigation = NavigationDefaults {
            duration,
            ease: ease.into(),
        };
        self
    }
}

/// Lowercase and drop leading dashes, dashes and underscores
fn normalize(name: &str) -> String {
    name.trim()
        .trim_start_matches('-')
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn parse_flag(key: &str, value: &str) -> Option<bool> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("true") || normalize(value) == key {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// `"12"`, `"12px"` and `"0"` are lengths; other units are not
fn parse_px(value: &str) -> Option<f32> {
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f32>().ok().filter(|n| n.is_finite() && *n >= 0.0)
}
