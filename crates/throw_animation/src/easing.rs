//! Easing curves
//!
//! Maps linear progress in `[0, 1]` to eased progress. Curves can be named
//! with the `family.direction` convention used by most web animation
//! libraries, e.g. `power1.inOut`, `sine.out` or `none`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when an easing name is not recognized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EasingParseError {
    /// Unknown curve family
    #[error("unknown easing family: {0}")]
    UnknownFamily(String),

    /// Unknown direction suffix
    #[error("unknown easing direction: {0}")]
    UnknownDirection(String),
}

/// Which end of the curve is eased
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum EaseDirection {
    /// Slow start
    In,
    /// Slow end
    #[default]
    Out,
    /// Slow start and end
    InOut,
}

/// An easing curve
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum Easing {
    /// No easing (`none`, `linear`, `power0`)
    #[default]
    Linear,
    /// Polynomial curve of degree `n + 1` (`power1` is quadratic)
    Power(u8, EaseDirection),
    /// Sinusoidal curve
    Sine(EaseDirection),
    /// Exponential curve
    Expo(EaseDirection),
}

impl Easing {
    /// Quadratic ease in and out, the default for slider navigation
    pub const POWER1_IN_OUT: Easing = Easing::Power(1, EaseDirection::InOut);

    /// Quadratic ease out, used for inertial deceleration
    pub const POWER1_OUT: Easing = Easing::Power(1, EaseDirection::Out);

    /// Apply the curve to linear progress `t`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::Power(0, _) => t,
            Easing::Power(degree, direction) => {
                let exponent = i32::from(degree) + 1;
                match direction {
                    EaseDirection::In => t.powi(exponent),
                    EaseDirection::Out => 1.0 - (1.0 - t).powi(exponent),
                    EaseDirection::InOut => {
                        if t < 0.5 {
                            (2.0 * t).powi(exponent) / 2.0
                        } else {
                            1.0 - (2.0 * (1.0 - t)).powi(exponent) / 2.0
                        }
                    }
                }
            }
            Easing::Sine(direction) => {
                use std::f32::consts::{FRAC_PI_2, PI};
                match direction {
                    EaseDirection::In => 1.0 - (t * FRAC_PI_2).cos(),
                    EaseDirection::Out => (t * FRAC_PI_2).sin(),
                    EaseDirection::InOut => -((PI * t).cos() - 1.0) / 2.0,
                }
            }
            Easing::Expo(direction) => match direction {
                EaseDirection::In => {
                    if t == 0.0 {
                        0.0
                    } else {
                        2f32.powf(10.0 * (t - 1.0))
                    }
                }
                EaseDirection::Out => {
                    if t == 1.0 {
                        1.0
                    } else {
                        1.0 - 2f32.powf(-10.0 * t)
                    }
                }
                EaseDirection::InOut => {
                    if t == 0.0 || t == 1.0 {
                        t
                    } else if t < 0.5 {
                        2f32.powf(20.0 * t - 10.0) / 2.0
                    } else {
                        (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
                    }
                }
            },
        }
    }
}

impl FromStr for EaseDirection {
    type Err = EasingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(EaseDirection::In),
            "out" => Ok(EaseDirection::Out),
            "inOut" | "inout" | "in-out" => Ok(EaseDirection::InOut),
            other => Err(EasingParseError::UnknownDirection(other.to_string())),
        }
    }
}

impl FromStr for Easing {
    type Err = EasingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (family, direction) = match s.split_once('.') {
            Some((family, direction)) => (family, direction.parse::<EaseDirection>()?),
            None => (s, EaseDirection::default()),
        };

        match family {
            "none" | "linear" | "power0" => Ok(Easing::Linear),
            "power1" | "quad" => Ok(Easing::Power(1, direction)),
            "power2" | "cubic" => Ok(Easing::Power(2, direction)),
            "power3" | "quart" => Ok(Easing::Power(3, direction)),
            "power4" | "quint" | "strong" => Ok(Easing::Power(4, direction)),
            "sine" => Ok(Easing::Sine(direction)),
            "expo" => Ok(Easing::Expo(direction)),
            other => Err(EasingParseError::UnknownFamily(other.to_string())),
        }
    }
}

impl fmt::Display for EaseDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EaseDirection::In => f.write_str("in"),
            EaseDirection::Out => f.write_str("out"),
            EaseDirection::InOut => f.write_str("inOut"),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("none"),
            Easing::Power(degree, direction) => write!(f, "power{}.{}", degree, direction),
            Easing::Sine(direction) => write!(f, "sine.{}", direction),
            Easing::Expo(direction) => write!(f, "expo.{}", direction),
        }
    }
}
