//! OpenFOAM control-point dictionaries.

use std::io::Write;

use mesh_types::Point3;

use crate::error::{FfdIoError, FfdIoResult};

const BANNER: &str = r"/*--------------------------------*- C++ -*----------------------------------*\
| =========                 |                                                 |
| \\      /  F ield         | OpenFOAM: The Open Source CFD Toolbox           |
|  \\    /   O peration     | Version:  v2406                                 |
|   \\  /    A nd           | Website:  www.openfoam.com                      |
|    \\/     M anipulation  |                                                 |
\*---------------------------------------------------------------------------*/";

const SEPARATOR: &str =
    "// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * //";

const FOOTER: &str =
    "// ************************************************************************* //";

/// Significant digits for point coordinates.
const SIGNIFICANT_DIGITS: usize = 8;

/// Header fields of a control-point dictionary.
///
/// # Defaults
///
/// | Field | Default |
/// |-------|---------|
/// | `object` | `boxcpsBsplines0` |
/// | `location` | `../constant/controlPoints` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoamDictOptions {
    /// `object` entry, the FFD box name.
    pub object: String,
    /// `location` entry.
    pub location: String,
}

impl Default for FoamDictOptions {
    fn default() -> Self {
        Self {
            object: "boxcpsBsplines0".to_string(),
            location: "../constant/controlPoints".to_string(),
        }
    }
}

impl FoamDictOptions {
    /// Set the `object` entry.
    #[must_use]
    pub fn with_object(mut self, object: impl Into<String>) -> Self {
        self.object = object.into();
        self
    }

    /// Set the `location` entry.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Format a number like C's `%.<precision>g`.
///
/// The value is rounded to `precision` significant digits (at least one).
/// Exponent form is used when the decimal exponent is below -4 or at least
/// `precision`; trailing zeros are removed in both forms.
///
/// # Example
///
/// ```
/// use ffd_io::format_general;
///
/// assert_eq!(format_general(0.1, 8), "0.1");
/// assert_eq!(format_general(123_456_789.0, 8), "1.2345679e+08");
/// assert_eq!(format_general(0.000_012_5, 8), "1.25e-05");
/// assert_eq!(format_general(-2.0, 8), "-2");
/// ```
#[must_use]
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    // Round first: the exponent must be that of the rounded value.
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    let limit = i32::try_from(precision).unwrap_or(i32::MAX);
    if exponent < -4 || exponent >= limit {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = usize::try_from(limit - 1 - exponent).unwrap_or(0);
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// Write points as an OpenFOAM `controlPoints` dictionary.
///
/// One `( x y z )` tuple per line, numbers with eight significant digits.
///
/// # Errors
///
/// [`FfdIoError::Empty`] if there are no points, or [`FfdIoError::Io`] if
/// the writer fails.
pub fn write_foam_dict<W: Write>(
    points: &[Point3<f64>],
    options: &FoamDictOptions,
    mut out: W,
) -> FfdIoResult<()> {
    if points.is_empty() {
        return Err(FfdIoError::Empty {
            what: "control points",
        });
    }

    writeln!(out, "{BANNER}")?;
    writeln!(out, "FoamFile")?;
    writeln!(out, "{{")?;
    writeln!(out, "    version     2.0;")?;
    writeln!(out, "    format      ascii;")?;
    writeln!(out, "    class       dictionary;")?;
    writeln!(out, "    location    \"{}\";", options.location)?;
    writeln!(out, "    object      {};", options.object)?;
    writeln!(out, "}}")?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out)?;

    write!(out, "controlPoints   {} ( ", points.len())?;
    for (n, p) in points.iter().enumerate() {
        if n > 0 {
            writeln!(out)?;
        }
        write!(
            out,
            "( {} {} {} ) ",
            format_general(p.x, SIGNIFICANT_DIGITS),
            format_general(p.y, SIGNIFICANT_DIGITS),
            format_general(p.z, SIGNIFICANT_DIGITS)
        )?;
    }
    writeln!(out, ");")?;
    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "{FOOTER}")?;
    Ok(())
}
