//! Easing curves.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::{MotionError, Result};

/// Direction of a power curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EaseDir {
    In,
    Out,
    InOut,
}

/// An easing curve mapping linear progress in 0..1 to eased progress.
///
/// Names follow the `family.direction` convention, e.g. `power3.out` or
/// `elastic.out(1, 0.5)`. `none` and `linear` are the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    None,
    /// Polynomial curve of degree `power + 1`.
    Power { power: u8, dir: EaseDir },
    BounceOut,
    ElasticOut { amplitude: f32, period: f32 },
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Power {
            power: 1,
            dir: EaseDir::Out,
        }
    }
}

impl Ease {
    pub const fn power(power: u8, dir: EaseDir) -> Self {
        Ease::Power { power, dir }
    }

    /// Apply the curve. Input is clamped to 0..1 and the endpoints are exact.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Ease::None => t,
            Ease::Power { power, dir } => {
                let exp = power as i32 + 1;
                match dir {
                    EaseDir::In => t.powi(exp),
                    EaseDir::Out => 1.0 - (1.0 - t).powi(exp),
                    EaseDir::InOut => {
                        if t < 0.5 {
                            (2.0 * t).powi(exp) / 2.0
                        } else {
                            1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
                        }
                    }
                }
            }
            Ease::BounceOut => bounce_out(t),
            Ease::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}

fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    // Amplitudes below 1 would not reach the target.
    let a = amplitude.max(1.0);
    let p = if period > 0.0 { period } else { 0.3 };
    let shift = p / (2.0 * PI) * (1.0 / a).asin();
    a * 2f32.powf(-10.0 * t) * ((t - shift) * (2.0 * PI) / p).sin() + 1.0
}

impl FromStr for Ease {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (name, params) = match s.find('(') {
            Some(open) => {
                let close = s
                    .rfind(')')
                    .filter(|&c| c > open)
                    .ok_or_else(|| MotionError::InvalidEaseParams(s.to_string()))?;
                let params = s[open + 1..close]
                    .split(',')
                    .map(|p| p.trim())
                    .filter(|p| !p.is_empty())
                    .map(|p| {
                        p.parse::<f32>()
                            .map_err(|_| MotionError::InvalidEaseParams(s.to_string()))
                    })
                    .collect::<Result<Vec<f32>>>()?;
                (&s[..open], params)
            }
            None => (s, Vec::new()),
        };

        let (family, dir) = match name.split_once('.') {
            Some((family, dir)) => (family, Some(dir)),
            None => (name, None),
        };

        let unknown = || MotionError::UnknownEase(s.to_string());

        match family {
            "none" | "linear" => Ok(Ease::None),
            "power0" => Ok(Ease::None),
            "power1" | "power2" | "power3" | "power4" => {
                let power = family[5..].parse::<u8>().map_err(|_| unknown())?;
                let dir = match dir {
                    None | Some("out") => EaseDir::Out,
                    Some("in") => EaseDir::In,
                    Some("inOut") => EaseDir::InOut,
                    Some(_) => return Err(unknown()),
                };
                Ok(Ease::Power { power, dir })
            }
            "bounce" => match dir {
                None | Some("out") => Ok(Ease::BounceOut),
                Some(_) => Err(unknown()),
            },
            "elastic" => match dir {
                None | Some("out") => {
                    let amplitude = params.first().copied().unwrap_or(1.0);
                    let period = params.get(1).copied().unwrap_or(0.3);
                    Ok(Ease::ElasticOut { amplitude, period })
                }
                Some(_) => Err(unknown()),
            },
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::None => write!(f, "none"),
            Ease::Power { power, dir } => {
                let dir = match dir {
                    EaseDir::In => "in",
                    EaseDir::Out => "out",
                    EaseDir::InOut => "inOut",
                };
                write!(f, "power{power}.{dir}")
            }
            Ease::BounceOut => write!(f, "bounce.out"),
            Ease::ElasticOut { amplitude, period } => {
                write!(f, "elastic.out({amplitude}, {period})")
            }
        }
    }
}
